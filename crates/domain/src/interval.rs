// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Half-open time-interval arithmetic.
//!
//! Every overlap decision in the system goes through [`overlaps`] so the
//! boundary rule cannot drift between services.

use chrono::{DateTime, Duration, Utc};

/// Returns whether two half-open intervals `[a_start, a_end)` and
/// `[b_start, b_end)` share at least one instant.
///
/// Touching endpoints do not overlap: a meeting ending at 11:00 does not
/// conflict with one starting at 11:00.
#[must_use]
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Computes the exclusive end instant of a meeting starting at `start` and
/// lasting `duration_minutes`.
#[must_use]
pub fn end_of(start: DateTime<Utc>, duration_minutes: i64) -> DateTime<Utc> {
    start + Duration::minutes(duration_minutes)
}
