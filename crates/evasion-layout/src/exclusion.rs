#![forbid(unsafe_code)]

//! The static target's exclusion zone.
//!
//! The accept control never moves; its no-go area is derived from the arena
//! center plus fixed extents, so it never needs its own measured geometry.

use evasion_core::geometry::{Point, Rect, Size};

/// Default exclusion width in pixels (accept control plus buffer).
pub const EXCLUSION_DEFAULT_WIDTH: f32 = 280.0;

/// Default exclusion height in pixels.
pub const EXCLUSION_DEFAULT_HEIGHT: f32 = 100.0;

/// Fixed-size rectangle centered in the arena that the evasive widget must
/// not overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExclusionZone {
    /// Full width of the zone.
    pub width: f32,
    /// Full height of the zone.
    pub height: f32,
}

impl Default for ExclusionZone {
    fn default() -> Self {
        Self {
            width: EXCLUSION_DEFAULT_WIDTH,
            height: EXCLUSION_DEFAULT_HEIGHT,
        }
    }
}

impl ExclusionZone {
    /// Create a zone with the given full extents.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The zone in arena-relative coordinates for an arena of size `arena`.
    #[must_use]
    pub fn rect_in(&self, arena: Size) -> Rect {
        let center = Point::new(arena.width / 2.0, arena.height / 2.0);
        Rect::centered(center, Size::new(self.width, self.height))
    }
}
