//! Row validation: [`RawRow`] → [`Order`].
//!
//! A row is `instrument,direction,price,volume`. Anything else is a
//! row-level error; the caller drops the row and keeps reading.

use std::str::FromStr;

use auctionmatch_types::{AuctionError, Order, OrderSide, Result, constants};
use rust_decimal::Decimal;

use crate::RawRow;

/// Parse and validate one row.
///
/// # Errors
/// - `RowMalformed` if the row does not have exactly four fields
/// - `FieldInvalid` for an empty or non-ASCII-identifier instrument, a direction other than `0`/`1`,
///   a non-decimal or out-of-range price, or a non-integer or negative volume
pub fn parse_row(row: &RawRow) -> Result<Order> {
    let [instrument, direction, price, volume] = row.fields.as_slice() else {
        return Err(AuctionError::RowMalformed {
            line: row.line,
            expected: constants::ORDER_ROW_FIELDS,
            actual: row.fields.len(),
        });
    };

    if instrument.is_empty() {
        return Err(invalid(row.line, "instrument", instrument, "empty instrument ID"));
    }
    if !instrument.bytes().all(is_instrument_byte) {
        return Err(invalid(
            row.line,
            "instrument",
            instrument,
            "instrument ID must be ASCII letters, digits, '-', '_' or '.'",
        ));
    }
    let side = OrderSide::from_code(direction, row.line)?;
    let price = parse_price(row.line, price)?;
    let volume = volume
        .parse::<u32>()
        .map_err(|e| invalid(row.line, "volume", volume, &e.to_string()))?;

    Ok(Order {
        instrument: instrument.clone(),
        side,
        price,
        volume,
    })
}

fn is_instrument_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.')
}

fn parse_price(line: u64, text: &str) -> Result<Decimal> {
    let price = Decimal::from_str(text).map_err(|e| invalid(line, "price", text, &e.to_string()))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(invalid(line, "price", text, "negative price"));
    }
    if price > Decimal::from(constants::MAX_PRICE) {
        return Err(invalid(line, "price", text, "price above maximum"));
    }
    Ok(price)
}

fn invalid(line: u64, field: &'static str, value: &str, reason: &str) -> AuctionError {
    AuctionError::FieldInvalid {
        line,
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
