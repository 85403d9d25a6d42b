// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Meeting store contract for the Confab scheduling engine.
//!
//! The engine never talks to a database directly; it reads rooms, accounts,
//! and scheduled meetings through the [`MeetingStore`] trait. Production
//! deployments implement the trait over their own storage. This crate ships
//! an in-memory implementation used by the server binary and by tests.
//!
//! Every operation is safe to call with no matching rows: absence is an
//! empty list or `None`, never an error.

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
mod memory;

#[cfg(test)]
mod tests;

pub use error::StoreError;
pub use memory::InMemoryStore;

use chrono::{DateTime, Utc};
use confab_domain::{Room, ScheduledMeeting, ZoomAccount};

/// Read-only access to scheduled meetings and the resources they consume.
///
/// Implementations must apply half-open overlap semantics
/// (`confab_domain::overlaps`) and honor `exclude_id` in every overlap
/// query, so a meeting being edited never conflicts with itself.
pub trait MeetingStore: Send + Sync {
    /// Returns the bookings on `room_id` whose interval overlaps
    /// `[start, end)`, excluding the meeting with id `exclude_id` if given.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the underlying storage cannot be queried.
    fn find_room_overlaps(
        &self,
        room_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<&str>,
    ) -> Result<Vec<ScheduledMeeting>, StoreError>;

    /// Returns every videoconferencing meeting (any account) whose interval
    /// overlaps `[start, end)`, excluding `exclude_id` if given.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the underlying storage cannot be queried.
    fn find_zoom_overlaps(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<&str>,
    ) -> Result<Vec<ScheduledMeeting>, StoreError>;

    /// Looks up a room by id. Absence is `None`, not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the underlying storage cannot be queried.
    fn find_room(&self, room_id: &str) -> Result<Option<Room>, StoreError>;

    /// Returns all active rooms.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the underlying storage cannot be queried.
    fn list_active_rooms(&self) -> Result<Vec<Room>, StoreError>;

    /// Returns all active videoconferencing accounts.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the underlying storage cannot be queried.
    fn list_active_accounts(&self) -> Result<Vec<ZoomAccount>, StoreError>;
}
