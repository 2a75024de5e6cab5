#![forbid(unsafe_code)]

//! Evasion public facade crate.
//!
//! Re-exports the types a host needs to mount an evasive decline control
//! next to a static accept control, plus a prelude for day-to-day usage.

use std::path::Path;

// --- Core re-exports -------------------------------------------------------

pub use evasion_core::event::{PointerEvent, PointerEventKind};
pub use evasion_core::geometry::{Point, Rect, Size};

// --- Layout re-exports -----------------------------------------------------

pub use evasion_layout::{
    Corner, ExclusionZone, Placement, PlacementConfig, PlacementInput, PlacementOutcome,
    RandomSource, RngSource, SequenceSource, place,
};

// --- Runtime re-exports ----------------------------------------------------

pub use evasion_runtime::{
    Duration, EvasionPolicy, FeedSubscription, Instant, MotionLock, PointerFeed,
    PolicyConfigError,
};

// --- Widget re-exports -----------------------------------------------------

pub use evasion_widgets::{
    BoxHandle, EvasiveButton, EvasiveButtonConfig, InvitationPrompt, InvitationResponse,
    MeasuredBox, Relocation, TauntLadder,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Evasion hosts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Policy could not be loaded or failed validation.
    #[error("policy: {0}")]
    Policy(#[from] PolicyConfigError),
    /// I/O failure outside policy loading.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Standard result type for Evasion APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Load and validate a policy file (`.toml` or `.json`).
pub fn load_policy(path: impl AsRef<Path>) -> Result<EvasionPolicy> {
    Ok(EvasionPolicy::from_file(path)?.validated()?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BoxHandle, Error, EvasionPolicy, EvasiveButton, EvasiveButtonConfig, Instant,
        InvitationPrompt, Point, PointerEvent, PointerFeed, Rect, Relocation, Result,
    };

    pub use crate::{core, layout, runtime, widgets};
}

pub use evasion_core as core;
pub use evasion_layout as layout;
pub use evasion_runtime as runtime;
pub use evasion_widgets as widgets;
