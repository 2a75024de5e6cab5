#![forbid(unsafe_code)]

//! Core: geometry primitives, pointer events, and logging helpers.
//!
//! # Role in Evasion
//! `evasion-core` is the vocabulary layer. It owns the pixel-space geometry
//! types shared by the placement solver and the widget controller, and the
//! normalized pointer events a host feeds into the runtime.
//!
//! # Primary responsibilities
//! - **Geometry**: [`geometry::Point`], [`geometry::Size`], [`geometry::Rect`]
//!   in floating-point pixels with overlap and distance helpers.
//! - **PointerEvent**: canonical pointer input (hover moves, touch starts).
//! - **Logging**: tracing re-exports and subscriber setup behind features.
//!
//! # How it fits in the system
//! `evasion-layout` computes placements over these types, `evasion-runtime`
//! routes [`event::PointerEvent`] values to subscribers, and
//! `evasion-widgets` ties both together into the evasive button controller.

pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
