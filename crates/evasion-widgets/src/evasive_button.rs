#![forbid(unsafe_code)]

//! Evasive decline control.
//!
//! [`EvasiveButton`] owns the relocation state of one decline control: the
//! committed offset inside the arena, the last pointer position, and the
//! motion lock. The host feeds pointer events (directly or through a
//! [`PointerFeed`]) and renders the control at [`EvasiveButton::placement`]
//! once it is set.
//!
//! # Invariants
//!
//! 1. At most one relocation per cooldown window; triggers inside the window
//!    are dropped, not queued.
//! 2. Each relocation commits the offset, then fires the dodge callback once,
//!    then engages the lock.
//! 3. A committed placement is never cleared.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Arena or control not mounted | Trigger skipped, no callback |
//! | Pointer outside the safety perimeter | Nothing happens |
//! | Arena smaller than the control | Collapsed offset committed |

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use evasion_core::event::PointerEvent;
use evasion_core::geometry::{Point, Rect};
use evasion_layout::{
    ExclusionZone, PlacementConfig, PlacementInput, PlacementOutcome, RandomSource, RngSource,
    place,
};
use evasion_runtime::cooldown::{MOTION_DEFAULT_COOLDOWN, MotionLock};
use evasion_runtime::policy_config::{EvasionPolicy, MOTION_DEFAULT_SAFETY_PERIMETER};
use evasion_runtime::subscription::{FeedSubscription, PointerFeed};
use web_time::Instant;

use crate::measure::MeasuredBox;

/// Tunables for one controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvasiveButtonConfig {
    pub placement: PlacementConfig,
    pub exclusion: ExclusionZone,
    /// Pointer distance (px) from the control center that triggers a dodge.
    pub safety_perimeter: f32,
    pub cooldown: Duration,
}

impl Default for EvasiveButtonConfig {
    fn default() -> Self {
        Self {
            placement: PlacementConfig::default(),
            exclusion: ExclusionZone::default(),
            safety_perimeter: MOTION_DEFAULT_SAFETY_PERIMETER,
            cooldown: MOTION_DEFAULT_COOLDOWN,
        }
    }
}

impl From<&EvasionPolicy> for EvasiveButtonConfig {
    fn from(policy: &EvasionPolicy) -> Self {
        Self {
            placement: policy.to_placement_config(),
            exclusion: policy.to_exclusion_zone(),
            safety_perimeter: policy.motion.safety_perimeter,
            cooldown: policy.cooldown(),
        }
    }
}

/// A committed relocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relocation {
    /// New top-left offset inside the arena.
    pub offset: Point,
    pub outcome: PlacementOutcome,
    /// Pointer used by the solver, relative to the arena origin.
    pub pointer: Point,
}

type DodgeCallback = Box<dyn FnMut()>;

/// Relocation controller for one decline control.
pub struct EvasiveButton<R = RngSource> {
    config: EvasiveButtonConfig,
    arena: Box<dyn MeasuredBox>,
    widget: Box<dyn MeasuredBox>,
    rng: R,
    lock: MotionLock,
    placement: Option<Point>,
    pointer: Option<Point>,
    dodges: u64,
    on_dodge: Option<DodgeCallback>,
}

impl<R> fmt::Debug for EvasiveButton<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvasiveButton")
            .field("config", &self.config)
            .field("placement", &self.placement)
            .field("pointer", &self.pointer)
            .field("lock", &self.lock)
            .field("dodges", &self.dodges)
            .field("on_dodge", &self.on_dodge.is_some())
            .finish_non_exhaustive()
    }
}

impl EvasiveButton<RngSource> {
    /// Controller drawing candidates from an OS-seeded generator.
    pub fn new(
        config: EvasiveButtonConfig,
        arena: impl MeasuredBox + 'static,
        widget: impl MeasuredBox + 'static,
    ) -> Self {
        Self::with_rng(config, arena, widget, RngSource::from_os_rng())
    }
}

impl<R: RandomSource> EvasiveButton<R> {
    /// Controller with an explicit random source.
    pub fn with_rng(
        config: EvasiveButtonConfig,
        arena: impl MeasuredBox + 'static,
        widget: impl MeasuredBox + 'static,
        rng: R,
    ) -> Self {
        Self {
            config,
            arena: Box::new(arena),
            widget: Box::new(widget),
            rng,
            lock: MotionLock::new(config.cooldown),
            placement: None,
            pointer: None,
            dodges: 0,
            on_dodge: None,
        }
    }

    /// Set the dodge callback (builder form).
    #[must_use]
    pub fn on_dodge(mut self, callback: impl FnMut() + 'static) -> Self {
        self.set_on_dodge(callback);
        self
    }

    /// Replace the dodge callback.
    pub fn set_on_dodge(&mut self, callback: impl FnMut() + 'static) {
        self.on_dodge = Some(Box::new(callback));
    }

    #[must_use]
    pub const fn config(&self) -> &EvasiveButtonConfig {
        &self.config
    }

    /// Committed offset inside the arena; `None` until the first dodge.
    #[must_use]
    pub const fn placement(&self) -> Option<Point> {
        self.placement
    }

    /// Last pointer position seen, in viewport coordinates.
    #[must_use]
    pub const fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Relocations committed so far.
    #[must_use]
    pub const fn dodges(&self) -> u64 {
        self.dodges
    }

    /// Whether triggers are currently being dropped.
    #[must_use]
    pub fn is_locked(&self, now: Instant) -> bool {
        self.lock.is_held(now)
    }

    /// Clear an expired motion lock. Returns `true` if it was released.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.lock.poll(now)
    }

    /// Viewport box of the control at its committed offset.
    ///
    /// `None` before the first dodge or while either box is unmounted.
    #[must_use]
    pub fn placed_bounds(&self) -> Option<Rect> {
        let offset = self.placement?;
        let arena = self.arena.measure()?;
        let widget = self.widget.measure()?;
        Some(Rect::from_origin_size(
            Point::new(arena.x + offset.x, arena.y + offset.y),
            widget.size(),
        ))
    }

    /// Where the control is drawn right now.
    ///
    /// A committed offset wins over the host's measured position, which may
    /// still report the default spot. `widget` supplies the size.
    fn visual_bounds(&self, widget: Rect) -> Rect {
        match (self.placement, self.arena.measure()) {
            (Some(offset), Some(arena)) => Rect::from_origin_size(
                Point::new(arena.x + offset.x, arena.y + offset.y),
                widget.size(),
            ),
            _ => widget,
        }
    }

    /// Route a pointer event to the matching trigger.
    pub fn on_pointer(&mut self, event: &PointerEvent, now: Instant) -> Option<Relocation> {
        if event.kind.is_touch() {
            self.on_touch_start(event.position(), now)
        } else {
            self.on_proximity(event.position(), now)
        }
    }

    /// Pointer moved to `pointer` (viewport coordinates).
    ///
    /// Relocates when the pointer is strictly inside the safety perimeter
    /// around the control's current center: the committed offset once there
    /// is one, otherwise the measured box.
    pub fn on_proximity(&mut self, pointer: Point, now: Instant) -> Option<Relocation> {
        self.pointer = Some(pointer);
        if self.lock.is_held(now) {
            return skipped("locked");
        }
        let Some(widget) = self.widget.measure() else {
            return skipped("widget_unmeasured");
        };
        let center = self.visual_bounds(widget).center();
        if pointer.distance(center) >= self.config.safety_perimeter {
            return None;
        }
        self.relocate(now)
    }

    /// A touch began at `pointer`. Touch devices have no hover, so this
    /// relocates regardless of distance.
    pub fn on_touch_start(&mut self, pointer: Point, now: Instant) -> Option<Relocation> {
        self.pointer = Some(pointer);
        self.relocate(now)
    }

    /// Move the control now, unless locked or unmounted.
    pub fn relocate(&mut self, now: Instant) -> Option<Relocation> {
        if self.lock.is_held(now) {
            return skipped("locked");
        }
        self.lock.poll(now);

        let Some(arena) = self.arena.measure() else {
            return skipped("arena_unmeasured");
        };
        let Some(widget) = self.widget.measure() else {
            return skipped("widget_unmeasured");
        };

        let pointer = self
            .pointer
            .unwrap_or_else(|| self.visual_bounds(widget).center())
            .relative_to(arena.origin());
        let input = PlacementInput {
            arena: arena.size(),
            widget: widget.size(),
            exclusion: self.config.exclusion.rect_in(arena.size()),
            pointer,
        };
        let placement = place(&input, &self.config.placement, &mut self.rng);

        self.placement = Some(placement.offset);
        self.dodges = self.dodges.saturating_add(1);
        if let Some(callback) = self.on_dodge.as_mut() {
            callback();
        }
        self.lock.engage(now);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "evasive.relocate",
            left = placement.offset.x,
            top = placement.offset.y,
            outcome = placement.outcome.as_str(),
            dodges = self.dodges,
        );

        Some(Relocation {
            offset: placement.offset,
            outcome: placement.outcome,
            pointer,
        })
    }
}

impl<R: RandomSource + 'static> EvasiveButton<R> {
    /// Subscribe a shared controller to `feed`.
    ///
    /// The subscription holds only a weak reference; dropping the returned
    /// guard (or the controller) stops delivery. Events that arrive while the
    /// controller is already borrowed, e.g. dispatched from inside its own
    /// dodge callback, are dropped.
    pub fn attach(this: &Rc<RefCell<Self>>, feed: &PointerFeed) -> FeedSubscription {
        let weak = Rc::downgrade(this);
        feed.subscribe(move |event, now| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let Ok(mut controller) = shared.try_borrow_mut() else {
                return;
            };
            controller.on_pointer(event, now);
        })
    }
}

fn skipped(reason: &'static str) -> Option<Relocation> {
    #[cfg(feature = "tracing")]
    tracing::trace!(message = "evasive.skip", reason);
    #[cfg(not(feature = "tracing"))]
    let _ = reason;
    None
}
