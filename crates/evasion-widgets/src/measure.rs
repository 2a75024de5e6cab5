#![forbid(unsafe_code)]

//! Measured-box handles.
//!
//! The controller never caches geometry: it asks a [`MeasuredBox`] for the
//! current viewport rectangle on every placement attempt, because the
//! container may have been resized since the last one. `None` means the box
//! is not mounted (or not laid out yet).

use std::cell::Cell;
use std::rc::Rc;

use evasion_core::geometry::Rect;

/// Source of a box's current viewport rectangle.
pub trait MeasuredBox {
    /// Current rectangle, or `None` if not mounted.
    fn measure(&self) -> Option<Rect>;
}

impl<F> MeasuredBox for F
where
    F: Fn() -> Option<Rect>,
{
    fn measure(&self) -> Option<Rect> {
        self()
    }
}

/// Shared cell the host writes measured geometry into.
///
/// Clones share the same cell: the host keeps one clone and updates it after
/// layout, the controller reads another.
#[derive(Debug, Clone, Default)]
pub struct BoxHandle {
    rect: Rc<Cell<Option<Rect>>>,
}

impl BoxHandle {
    /// An unmounted handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle already holding `rect`.
    #[must_use]
    pub fn mounted(rect: Rect) -> Self {
        let handle = Self::new();
        handle.set(rect);
        handle
    }

    /// Publish a new measurement.
    pub fn set(&self, rect: Rect) {
        self.rect.set(Some(rect));
    }

    /// Mark the box as unmounted.
    pub fn clear(&self) {
        self.rect.set(None);
    }

    /// Last published measurement.
    #[must_use]
    pub fn get(&self) -> Option<Rect> {
        self.rect.get()
    }
}

impl MeasuredBox for BoxHandle {
    fn measure(&self) -> Option<Rect> {
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_handle_is_unmounted() {
        assert_eq!(BoxHandle::new().measure(), None);
    }

    #[test]
    fn clones_share_measurements() {
        let host = BoxHandle::new();
        let reader = host.clone();
        host.set(Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(reader.measure(), Some(Rect::new(1.0, 2.0, 3.0, 4.0)));
        host.clear();
        assert_eq!(reader.measure(), None);
    }

    #[test]
    fn closures_measure() {
        let fixed = || Some(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(fixed.measure(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }
}
