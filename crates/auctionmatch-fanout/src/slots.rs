//! Write-once result slots, one per instrument, indexed by first-seen position.
//!
//! Slots are allocated before any worker starts. Each worker writes only
//! the positions it owns, and the slots are read back only after every
//! worker has joined, so output order comes from the slot index and never
//! from completion order.

use std::sync::OnceLock;

use auctionmatch_types::{AuctionError, EquilibriumResult, Result};

/// Pre-sized, index-addressed result storage.
#[derive(Debug)]
pub struct ResultSlots {
    slots: Vec<OnceLock<EquilibriumResult>>,
}

impl ResultSlots {
    /// Allocate `len` empty slots.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| OnceLock::new()).collect(),
        }
    }

    /// Write the result for position `index`.
    ///
    /// # Errors
    /// - `SlotAlreadyFilled` if the slot was written before
    /// - `Internal` if `index` is out of range
    pub fn fill(&self, index: usize, result: EquilibriumResult) -> Result<()> {
        let slot = self.slots.get(index).ok_or_else(|| {
            AuctionError::Internal(format!(
                "slot {index} out of range ({} slots)",
                self.slots.len()
            ))
        })?;
        slot.set(result)
            .map_err(|_| AuctionError::SlotAlreadyFilled(index))
    }

    /// Number of slots written so far.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|slot| slot.get().is_some()).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Collect every result in slot order.
    ///
    /// # Errors
    /// `SlotUnfilled` naming the first empty slot.
    pub fn into_results(self) -> Result<Vec<EquilibriumResult>> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.into_inner().ok_or(AuctionError::SlotUnfilled(index)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(instrument: &str) -> EquilibriumResult {
        EquilibriumResult {
            instrument: instrument.to_string(),
            price: None,
            decimal_scale: 0,
        }
    }

    #[test]
    fn results_come_back_in_slot_order() {
        let slots = ResultSlots::new(3);
        slots.fill(2, result("c")).unwrap();
        slots.fill(0, result("a")).unwrap();
        slots.fill(1, result("b")).unwrap();
        assert_eq!(slots.filled(), 3);
        let names: Vec<String> = slots
            .into_results()
            .unwrap()
            .into_iter()
            .map(|r| r.instrument)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn second_write_is_rejected() {
        let slots = ResultSlots::new(1);
        slots.fill(0, result("a")).unwrap();
        let err = slots.fill(0, result("b")).unwrap_err();
        assert!(matches!(err, AuctionError::SlotAlreadyFilled(0)));
        assert_eq!(slots.into_results().unwrap()[0].instrument, "a");
    }

    #[test]
    fn unfilled_slot_fails_assembly() {
        let slots = ResultSlots::new(2);
        slots.fill(0, result("a")).unwrap();
        let err = slots.into_results().unwrap_err();
        assert!(matches!(err, AuctionError::SlotUnfilled(1)));
    }

    #[test]
    fn out_of_range_write_is_internal_error() {
        let slots = ResultSlots::new(1);
        assert!(matches!(
            slots.fill(5, result("x")),
            Err(AuctionError::Internal(_))
        ));
    }

    #[test]
    fn empty_slots_assemble_to_nothing() {
        let slots = ResultSlots::new(0);
        assert!(slots.is_empty());
        assert!(slots.into_results().unwrap().is_empty());
    }
}
