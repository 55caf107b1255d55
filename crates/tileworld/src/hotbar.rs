//! # Hotbar
//!
//! Which tile kind the build verb places.
//!
//! Slots are numbered 1..=8 and slot `n` selects tile id `n`, so the bar
//! covers every built-in kind except AIR. Cycling wraps at both ends.

use tileworld_core::{CellState, TileId, TileRegistry};

/// Number of hotbar slots.
pub const HOTBAR_SLOTS: u8 = 8;

/// Selected build kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hotbar {
    /// Selected slot, 1..=HOTBAR_SLOTS.
    selected: u8,
}

impl Hotbar {
    /// Creates a hotbar with slot 1 selected.
    #[must_use]
    pub const fn new() -> Self {
        Self { selected: 1 }
    }

    /// Returns the selected slot.
    #[inline]
    #[must_use]
    pub const fn selected(&self) -> u8 {
        self.selected
    }

    /// Returns the tile id of the selected slot.
    #[inline]
    #[must_use]
    pub const fn selected_id(&self) -> TileId {
        TileId(self.selected)
    }

    /// Default state of the selected kind.
    ///
    /// A slot past the registered kinds yields AIR.
    #[must_use]
    pub fn selected_state(&self, registry: &TileRegistry) -> CellState {
        registry.get(self.selected_id()).default_state()
    }

    /// Moves to the previous slot, wrapping 1 to 8.
    pub fn select_previous(&mut self) {
        self.selected = if self.selected <= 1 { HOTBAR_SLOTS } else { self.selected - 1 };
    }

    /// Moves to the next slot, wrapping 8 to 1.
    pub fn select_next(&mut self) {
        self.selected = if self.selected >= HOTBAR_SLOTS { 1 } else { self.selected + 1 };
    }

    /// Selects `slot` directly. Returns false and keeps the selection if
    /// `slot` is not in 1..=8.
    pub fn select(&mut self, slot: u8) -> bool {
        if (1..=HOTBAR_SLOTS).contains(&slot) {
            self.selected = slot;
            true
        } else {
            false
        }
    }

    /// Selects the slot under a horizontal hotbar position.
    ///
    /// Slots are laid out left to right, `slot_width` units each. Returns
    /// false outside the bar.
    pub fn select_at(&mut self, x: f64, slot_width: f64) -> bool {
        if slot_width <= 0.0 || x < 0.0 || x.is_nan() {
            return false;
        }
        let column = (x / slot_width).floor();
        if column >= f64::from(HOTBAR_SLOTS) {
            return false;
        }
        // column is in [0, 8) here
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let slot = column as u8 + 1;
        self.select(slot)
    }
}

impl Default for Hotbar {
    fn default() -> Self {
        Self::new()
    }
}
