//! Inventory strip geometry
//!
//! Slots are packed row by row inside a strip along the bottom of the window.
//! The playfield is everything above the strip.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Window size plus inventory strip parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InventoryLayout {
    pub width: f32,
    pub height: f32,
    /// Height of the strip (>= 0, zero disables slot placement)
    pub strip_height: f32,
    /// Nominal slot edge length (>= 1)
    pub slot_size: f32,
    /// Horizontal gutter on each side (>= 0)
    pub padding: f32,
}

impl InventoryLayout {
    /// Clamps strip height, slot size and padding into their valid ranges
    pub fn new(width: f32, height: f32, strip_height: f32, slot_size: f32, padding: f32) -> Self {
        Self {
            width,
            height,
            strip_height: strip_height.max(0.0),
            slot_size: slot_size.max(1.0),
            padding: padding.max(0.0),
        }
    }

    /// Whether stored balls get slot positions at all
    #[inline]
    pub fn has_strip(&self) -> bool {
        self.strip_height > 0.0
    }

    /// Height of the region balls move in (at least 1)
    #[inline]
    pub fn play_area_height(&self) -> f32 {
        (self.height - self.strip_height).max(1.0)
    }

    /// Number of slots per row (at least 1)
    pub fn columns(&self) -> usize {
        ((self.usable_width() / self.slot_size).floor() as usize).max(1)
    }

    fn safe_width(&self) -> f32 {
        self.width.max(1.0)
    }

    fn usable_width(&self) -> f32 {
        let w = self.safe_width();
        (w - 2.0 * self.padding.min(w / 2.0)).max(1.0)
    }

    /// Center of slot `index`
    pub fn slot_position(&self, index: usize) -> Vec2 {
        let safe_width = self.safe_width();
        let usable_width = self.usable_width();
        let columns = self.columns();
        let slot_width = usable_width / columns as f32;
        let gutter = (safe_width - usable_width) / 2.0;

        let col = index % columns;
        let row = index / columns;

        let x = gutter + slot_width * (col as f32 + 0.5);
        let x = x.max(slot_width / 2.0).min(safe_width - slot_width / 2.0);

        let slot_height = self.slot_size.min(self.strip_height.max(1.0));
        let strip_top = (self.height - self.strip_height).max(0.0);
        let max_offset = (self.strip_height - slot_height / 2.0).max(0.0);
        let row_offset = slot_height * (row as f32 + 0.5);
        let cap = if max_offset > 0.0 {
            max_offset
        } else {
            slot_height / 2.0
        };
        let y = (strip_top + row_offset.min(cap)).min(self.height - slot_height / 2.0);

        Vec2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn default_layout() -> InventoryLayout {
        InventoryLayout::new(1100.0, 720.0, 130.0, 56.0, 20.0)
    }

    #[test]
    fn test_parameters_are_clamped() {
        let layout = InventoryLayout::new(100.0, 100.0, -5.0, 0.0, -3.0);
        assert_eq!(layout.strip_height, 0.0);
        assert_eq!(layout.slot_size, 1.0);
        assert_eq!(layout.padding, 0.0);
        assert!(!layout.has_strip());
        assert_eq!(layout.play_area_height(), 100.0);
    }

    #[test]
    fn test_first_row_packing() {
        let layout = default_layout();
        // 1060 usable / 56 = 18 columns
        assert_eq!(layout.columns(), 18);
        let slot_width = 1060.0 / 18.0;

        let first = layout.slot_position(0);
        assert!((first.x - (20.0 + slot_width * 0.5)).abs() < 1e-3);
        assert!((first.y - (590.0 + 28.0)).abs() < 1e-3);

        let second = layout.slot_position(1);
        assert!((second.x - first.x - slot_width).abs() < 1e-3);
        assert_eq!(second.y, first.y);
    }

    #[test]
    fn test_wraps_to_second_row() {
        let layout = default_layout();
        let row_two = layout.slot_position(18);
        assert_eq!(row_two.x, layout.slot_position(0).x);
        assert!((row_two.y - (590.0 + 56.0 * 1.5)).abs() < 1e-3);
    }

    #[test]
    fn test_deep_rows_stay_inside_window() {
        let layout = default_layout();
        let deep = layout.slot_position(18 * 10);
        assert!(deep.y <= 720.0 - 28.0 + 1e-3);
        assert!(deep.y >= 590.0);
    }

    #[test]
    fn test_narrow_window_has_one_column() {
        let layout = InventoryLayout::new(30.0, 200.0, 50.0, 56.0, 100.0);
        assert_eq!(layout.columns(), 1);
        let p = layout.slot_position(3);
        assert!(p.x >= 0.0 && p.x <= 30.0);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let layout = default_layout();
        let first: Vec<Vec2> = (0..40).map(|i| layout.slot_position(i)).collect();
        let second: Vec<Vec2> = (0..40).map(|i| layout.slot_position(i)).collect();
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn prop_slots_stay_in_strip(
            width in 50.0f32..2000.0,
            height in 200.0f32..1500.0,
            strip in 10.0f32..150.0,
            slot in 8.0f32..80.0,
            padding in 0.0f32..60.0,
            index in 0usize..200,
        ) {
            let layout = InventoryLayout::new(width, height, strip, slot, padding);
            let p = layout.slot_position(index);
            prop_assert!(p.x >= 0.0 && p.x <= width);
            prop_assert!(p.y >= height - strip - 1e-3);
            prop_assert!(p.y <= height);
        }

        #[test]
        fn prop_first_row_slots_do_not_overlap(
            width in 200.0f32..2000.0,
            slot in 8.0f32..80.0,
            padding in 0.0f32..60.0,
        ) {
            let layout = InventoryLayout::new(width, 720.0, 130.0, slot, padding);
            let cols = layout.columns();
            for i in 1..cols {
                let gap = layout.slot_position(i).x - layout.slot_position(i - 1).x;
                prop_assert!(gap >= slot - 1e-2);
            }
        }
    }
}
