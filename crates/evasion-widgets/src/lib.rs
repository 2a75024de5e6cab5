#![forbid(unsafe_code)]

//! Widgets for the celebration invitation prompt.
//!
//! - [`EvasiveButton`]: the decline control that relocates whenever the
//!   pointer comes close, never overlapping the accept control.
//! - [`TauntLadder`]: rotating messages keyed by how often the decline
//!   control has dodged.
//! - [`InvitationPrompt`]: pending/accepted response state that counts
//!   dodges until the invitation is accepted.
//! - [`measure`]: handles through which the host publishes measured boxes.

pub mod evasive_button;
pub mod invitation;
pub mod measure;
pub mod taunt;

pub use evasive_button::{EvasiveButton, EvasiveButtonConfig, Relocation};
pub use invitation::{InvitationPrompt, InvitationResponse};
pub use measure::{BoxHandle, MeasuredBox};
pub use taunt::{DEFAULT_TAUNTS, TauntLadder};
