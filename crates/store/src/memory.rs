// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::MeetingStore;
use crate::error::StoreError;
use chrono::{DateTime, Utc};
use confab_domain::{Room, ScheduledMeeting, ZoomAccount, overlaps};
use std::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
    rooms: Vec<Room>,
    accounts: Vec<ZoomAccount>,
    meetings: Vec<ScheduledMeeting>,
}

/// An in-memory meeting store.
///
/// Serves as the reference implementation of [`MeetingStore`] for the server
/// binary and for tests. All data lives behind one `RwLock`; reads never
/// block each other.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a room. Replaces any existing room with the same id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store lock is poisoned.
    pub fn add_room(&self, room: Room) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        inner.rooms.retain(|r| r.id != room.id);
        inner.rooms.push(room);
        Ok(())
    }

    /// Adds a videoconferencing account. Replaces any existing account with
    /// the same id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store lock is poisoned.
    pub fn add_account(&self, account: ZoomAccount) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        inner.accounts.retain(|a| a.id != account.id);
        inner.accounts.push(account);
        Ok(())
    }

    /// Removes an account by id. Removing an unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store lock is poisoned.
    pub fn remove_account(&self, account_id: &str) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        inner.accounts.retain(|a| a.id != account_id);
        Ok(())
    }

    /// Adds a scheduled meeting. Replaces any existing meeting with the same
    /// id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store lock is poisoned.
    pub fn add_meeting(&self, meeting: ScheduledMeeting) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        inner.meetings.retain(|m| m.id != meeting.id);
        inner.meetings.push(meeting);
        Ok(())
    }

    /// Removes a meeting by id. Removing an unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the store lock is poisoned.
    pub fn remove_meeting(&self, meeting_id: &str) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        inner.meetings.retain(|m| m.id != meeting_id);
        Ok(())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable(String::from("store lock poisoned")))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable(String::from("store lock poisoned")))
    }
}

impl MeetingStore for InMemoryStore {
    fn find_room_overlaps(
        &self,
        room_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<&str>,
    ) -> Result<Vec<ScheduledMeeting>, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .meetings
            .iter()
            .filter(|m| m.room_id.as_deref() == Some(room_id))
            .filter(|m| exclude_id != Some(m.id.as_str()))
            .filter(|m| overlaps(m.start, m.end(), start, end))
            .cloned()
            .collect())
    }

    fn find_zoom_overlaps(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<&str>,
    ) -> Result<Vec<ScheduledMeeting>, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .meetings
            .iter()
            .filter(|m| m.zoom_account_id.is_some())
            .filter(|m| exclude_id != Some(m.id.as_str()))
            .filter(|m| overlaps(m.start, m.end(), start, end))
            .cloned()
            .collect())
    }

    fn find_room(&self, room_id: &str) -> Result<Option<Room>, StoreError> {
        let inner = self.read()?;
        Ok(inner.rooms.iter().find(|r| r.id == room_id).cloned())
    }

    fn list_active_rooms(&self) -> Result<Vec<Room>, StoreError> {
        let inner = self.read()?;
        Ok(inner.rooms.iter().filter(|r| r.is_active).cloned().collect())
    }

    fn list_active_accounts(&self) -> Result<Vec<ZoomAccount>, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .accounts
            .iter()
            .filter(|a| a.is_active)
            .cloned()
            .collect())
    }
}
