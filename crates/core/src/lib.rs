// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conflict detection and resolution engine.
//!
//! The engine answers one question: can this draft meeting be booked, and if
//! not, why not and what should the user do instead. It composes four
//! services in a fixed pipeline per validation request:
//!
//! 1. meeting-type rules (always),
//! 2. room availability (if a room is selected),
//! 3. videoconferencing capacity (if videoconferencing is requested),
//! 4. suggestion generation over the merged conflicts.
//!
//! Results are cached per draft for a short TTL, and subscribers are
//! notified of conflict and capacity changes through an explicit listener
//! registry. There are no global singletons: every service instance owns its
//! own cache and is constructor-injected, so tests can substitute fakes and
//! run in parallel.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod cache;
mod capacity;
mod clock;
mod engine;
mod error;
mod events;
mod resolution;
mod rooms;

#[cfg(test)]
mod tests;

pub use cache::{CacheStats, VALIDATION_CACHE_TTL_SECS};
pub use capacity::{
    ACCOUNT_CACHE_TTL_SECS, AccountCacheStats, AccountLoadInfo, CapacityReport, ZoomCapacityService,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::ConflictDetectionEngine;
pub use error::EngineError;
pub use events::{EngineEvent, SubscriptionId};
pub use resolution::{
    ConflictResolutionService, MAX_SUGGESTIONS, SLOT_PROBE_HORIZON_MINUTES,
    SLOT_PROBE_STEP_MINUTES, apply_suggestion,
};
pub use rooms::{
    DEFAULT_BUSINESS_HOURS_PER_DAY, RoomAvailability, RoomAvailabilityService, RoomUtilization,
};
