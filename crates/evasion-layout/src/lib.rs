#![forbid(unsafe_code)]

//! Placement solver for the evasive widget.
//!
//! # Role in Evasion
//! `evasion-layout` answers one question: given an arena, a widget footprint,
//! an exclusion zone, and where the pointer is, where should the widget go?
//! The answer is a pure function of its inputs plus a [`RandomSource`], so the
//! geometry can be verified without any host or renderer.
//!
//! # Key types
//! - [`ExclusionZone`]: the fixed no-go rectangle around the accept control.
//! - [`PlacementConfig`] / [`PlacementInput`]: solver parameters and inputs.
//! - [`place`]: Monte-Carlo candidate search with a deterministic corner
//!   fallback.

pub mod exclusion;
pub mod placement;
pub mod sampler;

pub use evasion_core::geometry::{Point, Rect, Size};
pub use exclusion::ExclusionZone;
pub use placement::{
    Corner, Envelope, PLACEMENT_DEFAULT_MAX_ATTEMPTS, PLACEMENT_DEFAULT_MIN_SEPARATION,
    PLACEMENT_DEFAULT_PADDING, Placement, PlacementConfig, PlacementInput, PlacementOutcome, place,
};
pub use sampler::{RandomSource, RngSource, SequenceSource};
