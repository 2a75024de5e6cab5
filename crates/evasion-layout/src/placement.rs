#![forbid(unsafe_code)]

//! Randomized placement search with a deterministic corner fallback.
//!
//! [`place`] is a small Monte-Carlo constraint solver. It samples top-left
//! offsets uniformly inside the placement [`Envelope`] and accepts the first
//! candidate that clears both constraints:
//!
//! 1. the widget box does not overlap the exclusion rectangle, and
//! 2. the widget center is at least `min_separation` away from the pointer.
//!
//! If the attempt budget runs out, the four envelope corners are scored by
//! distance from the pointer and the farthest wins.
//!
//! # Invariants
//!
//! 1. `place` always terminates and always returns an offset.
//! 2. When the widget fits the arena on an axis, every returned coordinate on
//!    that axis lies in `[0, arena - widget]`.
//! 3. A `Sampled` result satisfies both constraints.
//! 4. A `CornerFallback` result depends only on the inputs, never on the
//!    random source. Ties go to the earliest corner in [`Corner::ALL`].
//!
//! # Failure Modes
//!
//! - Widget larger than the arena: the axis collapses to `padding / 2`.
//! - Both axes collapse: the single remaining point is returned as
//!   `Collapsed`, even if it overlaps the exclusion rectangle.
//! - Fallback corners may overlap the exclusion rectangle in tiny arenas.
//!   Degenerate inputs are not detected or reported beyond the outcome tag.

use evasion_core::geometry::{Point, Rect, Size};

use crate::sampler::RandomSource;

/// Default margin kept from the arena edges.
pub const PLACEMENT_DEFAULT_PADDING: f32 = 20.0;

/// Default minimum distance between candidate center and pointer.
pub const PLACEMENT_DEFAULT_MIN_SEPARATION: f32 = 180.0;

/// Default number of random candidates tried before falling back.
pub const PLACEMENT_DEFAULT_MAX_ATTEMPTS: u32 = 50;

/// Solver parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementConfig {
    /// Margin kept from the arena edges.
    pub padding: f32,
    /// Minimum distance from the candidate center to the pointer.
    pub min_separation: f32,
    /// Random candidates tried before the corner fallback.
    pub max_attempts: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            padding: PLACEMENT_DEFAULT_PADDING,
            min_separation: PLACEMENT_DEFAULT_MIN_SEPARATION,
            max_attempts: PLACEMENT_DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Everything the solver reads, all in arena-relative pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementInput {
    /// Arena content-box size.
    pub arena: Size,
    /// Measured widget footprint.
    pub widget: Size,
    /// Exclusion rectangle to avoid.
    pub exclusion: Rect,
    /// Pointer position relative to the arena origin.
    pub pointer: Point,
}

/// Arena corner used by the fallback, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Enumeration order; earlier corners win distance ties.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];
}

/// How a placement was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// A random candidate satisfied both constraints on try `attempts`.
    Sampled { attempts: u32 },
    /// The attempt budget ran out; the farthest corner was chosen.
    CornerFallback { corner: Corner },
    /// The envelope is a single point; it was taken without checks.
    Collapsed,
}

impl PlacementOutcome {
    /// Stable label for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sampled { .. } => "sampled",
            Self::CornerFallback { .. } => "corner_fallback",
            Self::Collapsed => "collapsed",
        }
    }
}

/// Result of one solver run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// New top-left offset within the arena.
    pub offset: Point,
    /// How the offset was chosen.
    pub outcome: PlacementOutcome,
}

impl Placement {
    /// The widget box at this placement.
    #[must_use]
    pub fn bounds(&self, widget: Size) -> Rect {
        Rect::from_origin_size(self.offset, widget)
    }
}

/// Legal offsets along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisRange {
    /// Lowest sampled coordinate.
    lo: f32,
    /// Highest sampled coordinate.
    hi: f32,
    /// Fallback coordinate near the origin edge.
    near: f32,
    /// Fallback coordinate near the far edge.
    far: f32,
}

impl AxisRange {
    fn new(arena: f32, widget: f32, padding: f32) -> Self {
        let max = (arena - widget - padding).max(0.0);
        let slack = arena - widget;
        let half = padding / 2.0;
        // Widget fits: keep every coordinate inside the arena.
        // Widget does not fit: nothing is legal, inset from the origin.
        let fit = |v: f32| {
            if slack >= 0.0 {
                v.clamp(0.0, slack)
            } else {
                half
            }
        };
        Self {
            lo: fit(half),
            hi: fit(max.max(half)),
            near: fit(padding),
            far: fit(max),
        }
    }

    fn is_point(&self) -> bool {
        self.hi <= self.lo
    }

    fn sample(&self, unit: f32) -> f32 {
        (self.lo + (self.hi - self.lo) * unit).min(self.hi)
    }
}

/// The region of legal top-left offsets for a widget inside an arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    x: AxisRange,
    y: AxisRange,
}

impl Envelope {
    /// Compute the envelope for `widget` inside `arena` with `padding`.
    #[must_use]
    pub fn new(arena: Size, widget: Size, padding: f32) -> Self {
        Self {
            x: AxisRange::new(arena.width, widget.width, padding),
            y: AxisRange::new(arena.height, widget.height, padding),
        }
    }

    /// `max(0, arena.width - widget.width - padding)` after bounds clamping.
    #[must_use]
    pub fn max_left(&self) -> f32 {
        self.x.far
    }

    /// `max(0, arena.height - widget.height - padding)` after bounds clamping.
    #[must_use]
    pub fn max_top(&self) -> f32 {
        self.y.far
    }

    /// Whether only one offset is possible.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.x.is_point() && self.y.is_point()
    }

    /// Lowest sampled offset.
    #[must_use]
    pub fn min_offset(&self) -> Point {
        Point::new(self.x.lo, self.y.lo)
    }

    /// Highest sampled offset.
    #[must_use]
    pub fn max_offset(&self) -> Point {
        Point::new(self.x.hi, self.y.hi)
    }

    /// Offset of the given fallback corner.
    #[must_use]
    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => Point::new(self.x.near, self.y.near),
            Corner::TopRight => Point::new(self.x.far, self.y.near),
            Corner::BottomLeft => Point::new(self.x.near, self.y.far),
            Corner::BottomRight => Point::new(self.x.far, self.y.far),
        }
    }

    fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Point {
        let x = self.x.sample(rng.next_unit());
        let y = self.y.sample(rng.next_unit());
        Point::new(x, y)
    }
}

/// Compute a new widget offset.
///
/// Always terminates within `config.max_attempts` random draws (two samples
/// each) and never fails; see the module docs for degenerate cases.
pub fn place<R: RandomSource + ?Sized>(
    input: &PlacementInput,
    config: &PlacementConfig,
    rng: &mut R,
) -> Placement {
    let envelope = Envelope::new(input.arena, input.widget, config.padding);

    if envelope.is_collapsed() {
        return Placement {
            offset: envelope.min_offset(),
            outcome: PlacementOutcome::Collapsed,
        };
    }

    for attempt in 1..=config.max_attempts {
        let offset = envelope.sample(rng);
        if is_acceptable(offset, input, config) {
            return Placement {
                offset,
                outcome: PlacementOutcome::Sampled { attempts: attempt },
            };
        }
    }

    let (corner, offset) = farthest_corner(&envelope, input.pointer);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        message = "placement.fallback",
        attempts = config.max_attempts,
        corner = ?corner,
        left = offset.x,
        top = offset.y
    );

    Placement {
        offset,
        outcome: PlacementOutcome::CornerFallback { corner },
    }
}

/// Whether a candidate offset clears the exclusion and separation constraints.
#[must_use]
pub fn is_acceptable(offset: Point, input: &PlacementInput, config: &PlacementConfig) -> bool {
    let bounds = Rect::from_origin_size(offset, input.widget);
    !bounds.overlaps(&input.exclusion)
        && bounds.center().distance(input.pointer) >= config.min_separation
}

fn farthest_corner(envelope: &Envelope, pointer: Point) -> (Corner, Point) {
    let mut best = (Corner::TopLeft, envelope.corner(Corner::TopLeft));
    let mut best_distance = best.1.distance(pointer);
    for corner in &Corner::ALL[1..] {
        let offset = envelope.corner(*corner);
        let distance = offset.distance(pointer);
        // Strict comparison keeps the earlier corner on ties.
        if distance > best_distance {
            best = (*corner, offset);
            best_distance = distance;
        }
    }
    best
}
