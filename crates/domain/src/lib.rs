// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod error;
mod interval;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use error::DomainError;
pub use interval::{end_of, overlaps};
pub use types::{
    Conflict, ConflictKind, MeetingDraft, MeetingSummary, MeetingType, Room, ScheduledMeeting,
    Severity, Suggestion, SuggestionAction, SuggestionKind, ValidationOutcome, ZoomAccount,
    ZOOM_MAX_CONCURRENT_MEETINGS, ZOOM_MAX_PARTICIPANTS,
};
pub use validation::{
    validate_draft, validate_type_change, TypeValidation, MAX_REASONABLE_DURATION_MINUTES,
};
