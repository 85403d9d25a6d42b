// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ManualClock;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use confab_domain::{MeetingDraft, Room, ScheduledMeeting, ZoomAccount};
use confab_store::{MeetingStore, StoreError};
use std::sync::Arc;

/// 2026-03-01 09:00 UTC, the frozen "now" for every core test.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().unwrap()
}

pub fn fixed_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(fixed_now()))
}

/// The day every test meeting lives on, safely in the clock's future.
pub fn meeting_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

/// An instant on the meeting day.
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, hour, minute, 0)
        .single()
        .unwrap()
}

pub fn create_test_room(id: &str, name: &str, capacity: u32) -> Room {
    Room {
        id: id.to_string(),
        name: name.to_string(),
        capacity,
        is_active: true,
        location: None,
        equipment: Vec::new(),
    }
}

pub fn create_test_account(id: &str) -> ZoomAccount {
    ZoomAccount {
        id: id.to_string(),
        is_active: true,
    }
}

pub fn create_room_meeting(
    id: &str,
    room_id: &str,
    start: DateTime<Utc>,
    duration_minutes: i64,
) -> ScheduledMeeting {
    ScheduledMeeting {
        id: id.to_string(),
        title: format!("Meeting {id}"),
        start,
        duration_minutes,
        participants: vec![String::from("ada")],
        room_id: Some(room_id.to_string()),
        zoom_account_id: None,
    }
}

pub fn create_zoom_meeting(
    id: &str,
    account_id: &str,
    start: DateTime<Utc>,
    duration_minutes: i64,
) -> ScheduledMeeting {
    ScheduledMeeting {
        id: id.to_string(),
        title: format!("Meeting {id}"),
        start,
        duration_minutes,
        participants: vec![String::from("ada")],
        room_id: None,
        zoom_account_id: Some(account_id.to_string()),
    }
}

/// A well-formed offline draft on the meeting day at 10:00 for one hour.
pub fn create_test_draft() -> MeetingDraft {
    MeetingDraft {
        title: String::from("Sprint planning"),
        date: Some(meeting_day()),
        time: String::from("10:00"),
        duration_minutes: 60,
        meeting_type: String::from("offline"),
        is_zoom_meeting: false,
        room_id: None,
        participants: vec![String::from("ada"), String::from("grace")],
        description: None,
        zoom_passcode: None,
    }
}

/// A store whose every query fails, for degradation tests.
pub struct FailingStore;

impl MeetingStore for FailingStore {
    fn find_room_overlaps(
        &self,
        _room_id: &str,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
        _exclude_id: Option<&str>,
    ) -> Result<Vec<ScheduledMeeting>, StoreError> {
        Err(StoreError::QueryFailed(String::from("synthetic failure")))
    }

    fn find_zoom_overlaps(
        &self,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
        _exclude_id: Option<&str>,
    ) -> Result<Vec<ScheduledMeeting>, StoreError> {
        Err(StoreError::QueryFailed(String::from("synthetic failure")))
    }

    fn find_room(&self, _room_id: &str) -> Result<Option<Room>, StoreError> {
        Err(StoreError::QueryFailed(String::from("synthetic failure")))
    }

    fn list_active_rooms(&self) -> Result<Vec<Room>, StoreError> {
        Err(StoreError::QueryFailed(String::from("synthetic failure")))
    }

    fn list_active_accounts(&self) -> Result<Vec<ZoomAccount>, StoreError> {
        Err(StoreError::QueryFailed(String::from("synthetic failure")))
    }
}
