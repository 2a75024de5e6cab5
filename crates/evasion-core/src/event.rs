#![forbid(unsafe_code)]

//! Canonical pointer event types.
//!
//! Hosts translate their native input (mouse move, touch start) into
//! [`PointerEvent`] values in viewport coordinates before handing them to the
//! runtime.
//!
//! # Design Notes
//!
//! - Coordinates are viewport pixels, not arena-relative; consumers convert.
//! - Touch starts are discrete: they carry no hover semantics and should be
//!   treated as an explicit attempt to press whatever is under the finger.

use crate::geometry::Point;

/// A pointer event in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,

    /// X coordinate in viewport pixels.
    pub x: f32,

    /// Y coordinate in viewport pixels.
    pub y: f32,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f32, y: f32) -> Self {
        Self { kind, x, y }
    }

    /// A hover move to `(x, y)`.
    #[must_use]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::Moved, x, y)
    }

    /// A touch beginning at `(x, y)`.
    #[must_use]
    pub const fn touch_start(x: f32, y: f32) -> Self {
        Self::new(PointerEventKind::TouchStart, x, y)
    }

    /// Get the position as a point.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Pointer moved without a button held (continuous feed).
    Moved,

    /// A finger touched the surface.
    TouchStart,
}

impl PointerEventKind {
    /// Whether this event comes from a touch surface.
    #[must_use]
    pub const fn is_touch(self) -> bool {
        matches!(self, Self::TouchStart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind() {
        assert_eq!(PointerEvent::moved(1.0, 2.0).kind, PointerEventKind::Moved);
        assert_eq!(
            PointerEvent::touch_start(1.0, 2.0).kind,
            PointerEventKind::TouchStart
        );
    }

    #[test]
    fn position_round_trips_coordinates() {
        let event = PointerEvent::moved(10.5, 20.25);
        assert_eq!(event.position(), Point::new(10.5, 20.25));
    }

    #[test]
    fn only_touch_start_is_touch() {
        assert!(PointerEventKind::TouchStart.is_touch());
        assert!(!PointerEventKind::Moved.is_touch());
    }
}
