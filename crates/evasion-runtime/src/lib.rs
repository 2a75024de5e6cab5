#![forbid(unsafe_code)]

//! Runtime plumbing for the evasive widget.
//!
//! # Role in Evasion
//! `evasion-runtime` owns the time- and event-driven pieces that sit between
//! a host UI and the widget controller:
//!
//! - [`MotionLock`]: the debounce flag with a deferred, deadline-based unlock.
//! - [`PointerFeed`]: an explicit pointer-event subscription list whose
//!   guards unsubscribe on drop.
//! - [`EvasionPolicy`]: every tunable as data, loadable from TOML or JSON.
//!
//! Everything here is single-threaded and host-driven: time is passed in as
//! an [`Instant`] rather than read from a clock, so behavior replays exactly
//! under test.

pub mod cooldown;
pub mod policy_config;
pub mod subscription;

pub use cooldown::{MOTION_DEFAULT_COOLDOWN, MotionLock};
pub use policy_config::{EvasionPolicy, PolicyConfigError};
pub use subscription::{FeedSubscription, PointerFeed, SubId};
pub use std::time::Duration;
pub use web_time::Instant;
