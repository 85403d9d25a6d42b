// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::clock::Clock;
use crate::error::EngineError;
use chrono::{DateTime, NaiveDate, Utc};
use confab_domain::{Conflict, ConflictKind, MeetingSummary, Room, ScheduledMeeting};
use confab_store::MeetingStore;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

/// Length of a bookable business day, in hours, used by utilization math.
///
/// Injected rather than hard-coded so it can be tuned or made
/// calendar-aware without touching the algorithm.
pub const DEFAULT_BUSINESS_HOURS_PER_DAY: u32 = 8;

/// Upper bound on rooms returned by the optimal-room search.
const MAX_OPTIMAL_ROOMS: usize = 5;

/// Upper bound on alternative-room names attached to a room conflict.
const MAX_ALTERNATIVE_HINTS: usize = 3;

/// The answer to a single room availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAvailability {
    /// True iff no existing booking overlaps the requested interval.
    pub is_available: bool,
    /// The overlapping bookings, when any exist.
    pub conflicting_meetings: Vec<MeetingSummary>,
    /// Alternative rooms free during the interval, best fit first. Only
    /// computed when conflicts exist.
    pub alternative_rooms: Vec<Room>,
}

/// Aggregate booking statistics for one room over a date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUtilization {
    /// Bookable hours in the range (`days × business hours per day`).
    pub total_hours: f64,
    /// Hours actually booked.
    pub booked_hours: f64,
    /// Number of bookings in the range.
    pub meeting_count: usize,
    /// `booked_hours / total_hours × 100`, or 0 when `total_hours` is 0.
    pub utilization_percentage: f64,
}

/// Room availability checks and alternative-room ranking.
pub struct RoomAvailabilityService {
    store: Arc<dyn MeetingStore>,
    clock: Arc<dyn Clock>,
    business_hours_per_day: u32,
}

impl RoomAvailabilityService {
    /// Creates a service with the default business-day length.
    #[must_use]
    pub fn new(store: Arc<dyn MeetingStore>, clock: Arc<dyn Clock>) -> Self {
        Self::with_business_hours(store, clock, DEFAULT_BUSINESS_HOURS_PER_DAY)
    }

    /// Creates a service with an explicit business-day length.
    #[must_use]
    pub fn with_business_hours(
        store: Arc<dyn MeetingStore>,
        clock: Arc<dyn Clock>,
        business_hours_per_day: u32,
    ) -> Self {
        Self {
            store,
            clock,
            business_hours_per_day,
        }
    }

    /// Checks whether `room_id` is free during `[start, end)`.
    ///
    /// `exclude_meeting_id` is the meeting being edited, if any, so it does
    /// not conflict with itself. When conflicts exist, alternative rooms are
    /// ranked and attached (the requested room excluded).
    ///
    /// # Errors
    ///
    /// Returns `EngineError::RoomNotFound` if the room does not exist, or a
    /// store error if the query fails.
    pub fn check_availability(
        &self,
        room_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_meeting_id: Option<&str>,
    ) -> Result<RoomAvailability, EngineError> {
        if self.store.find_room(room_id)?.is_none() {
            return Err(EngineError::RoomNotFound(room_id.to_string()));
        }

        let overlapping: Vec<ScheduledMeeting> =
            self.store
                .find_room_overlaps(room_id, start, end, exclude_meeting_id)?;

        if overlapping.is_empty() {
            return Ok(RoomAvailability {
                is_available: true,
                conflicting_meetings: Vec::new(),
                alternative_rooms: Vec::new(),
            });
        }

        let alternative_rooms: Vec<Room> = self
            .find_optimal_rooms(start, end, 1, None)?
            .into_iter()
            .filter(|room| room.id != room_id)
            .collect();

        Ok(RoomAvailability {
            is_available: false,
            conflicting_meetings: overlapping.iter().map(ScheduledMeeting::summary).collect(),
            alternative_rooms,
        })
    }

    /// Returns every active room with zero overlapping bookings in
    /// `[start, end)`, ordered by name for determinism.
    ///
    /// # Errors
    ///
    /// Returns a store error if any query fails.
    pub fn find_available_rooms(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Room>, EngineError> {
        let mut free: Vec<Room> = Vec::new();
        for room in self.store.list_active_rooms()? {
            let overlapping: Vec<ScheduledMeeting> =
                self.store.find_room_overlaps(&room.id, start, end, None)?;
            if overlapping.is_empty() {
                free.push(room);
            }
        }
        free.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(free)
    }

    /// Ranks the free rooms for `[start, end)` by fit.
    ///
    /// Capacity fit scores highest when the participant/capacity ratio is
    /// tight but sufficient (0.5–0.8), medium at ≥ 0.3, low otherwise.
    /// Rooms too small for the participant count are excluded entirely. A
    /// flat bonus applies when the room's location contains
    /// `preferred_location` (case-insensitive). Returns at most five rooms,
    /// best first.
    ///
    /// # Errors
    ///
    /// Returns a store error if any query fails.
    pub fn find_optimal_rooms(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        participant_count: usize,
        preferred_location: Option<&str>,
    ) -> Result<Vec<Room>, EngineError> {
        let candidates: Vec<Room> = self.find_available_rooms(start, end)?;

        let mut scored: Vec<(f64, Room)> = candidates
            .into_iter()
            .filter(|room| room.capacity as usize >= participant_count)
            .map(|room| {
                let mut score: f64 = capacity_fit_score(participant_count, room.capacity);
                if let (Some(preferred), Some(location)) = (preferred_location, &room.location)
                    && location.to_lowercase().contains(&preferred.to_lowercase())
                {
                    score += 0.25;
                }
                (score, room)
            })
            .collect();

        // Name as tie-break keeps the ranking stable across runs.
        scored.sort_by(|(score_a, room_a), (score_b, room_b)| {
            score_b
                .partial_cmp(score_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| room_a.name.cmp(&room_b.name))
        });

        Ok(scored
            .into_iter()
            .take(MAX_OPTIMAL_ROOMS)
            .map(|(_, room)| room)
            .collect())
    }

    /// Computes booking statistics for `room_id` across the inclusive date
    /// range `[start_date, end_date]`.
    ///
    /// Total capacity assumes `business_hours_per_day` bookable hours per
    /// calendar day in the range.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::RoomNotFound` if the room does not exist, or a
    /// store error if the query fails.
    #[allow(clippy::cast_precision_loss)]
    pub fn get_utilization(
        &self,
        room_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<RoomUtilization, EngineError> {
        if self.store.find_room(room_id)?.is_none() {
            return Err(EngineError::RoomNotFound(room_id.to_string()));
        }

        let range_start: DateTime<Utc> = start_date.and_time(chrono::NaiveTime::MIN).and_utc();
        let range_end: DateTime<Utc> = (end_date + chrono::Duration::days(1))
            .and_time(chrono::NaiveTime::MIN)
            .and_utc();

        let meetings: Vec<ScheduledMeeting> =
            self.store
                .find_room_overlaps(room_id, range_start, range_end, None)?;

        let booked_minutes: i64 = meetings.iter().map(|m| m.duration_minutes).sum();
        let booked_hours: f64 = booked_minutes as f64 / 60.0;

        let days_in_range: i64 = (end_date - start_date).num_days() + 1;
        let total_hours: f64 = if days_in_range > 0 {
            days_in_range as f64 * f64::from(self.business_hours_per_day)
        } else {
            0.0
        };

        let utilization_percentage: f64 = if total_hours > 0.0 {
            booked_hours / total_hours * 100.0
        } else {
            0.0
        };

        Ok(RoomUtilization {
            total_hours,
            booked_hours,
            meeting_count: meetings.len(),
            utilization_percentage,
        })
    }

    /// Wraps [`Self::check_availability`] into a conflict, or `None` when
    /// the room is free.
    ///
    /// A store failure degrades to a retryable blocking conflict rather than
    /// crossing the component boundary; only the room-not-found case remains
    /// a hard failure to the caller.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::RoomNotFound` if the room does not exist.
    pub fn generate_conflict_info(
        &self,
        room_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_meeting_id: Option<&str>,
    ) -> Result<Option<Conflict>, EngineError> {
        let availability: RoomAvailability =
            match self.check_availability(room_id, start, end, exclude_meeting_id) {
                Ok(availability) => availability,
                Err(err @ EngineError::RoomNotFound(_)) => return Err(err),
                Err(err) => {
                    warn!(room_id, error = %err, "room availability check failed");
                    return Ok(Some(
                        Conflict::error(
                            ConflictKind::RoomConflict,
                            "Could not verify room availability. Please try again.",
                        )
                        .with_resource(room_id),
                    ));
                }
            };

        if availability.is_available {
            return Ok(None);
        }

        let mut hints: Vec<String> = availability
            .alternative_rooms
            .iter()
            .take(MAX_ALTERNATIVE_HINTS)
            .map(|room| format!("Try {} (seats {})", room.name, room.capacity))
            .collect();
        hints.extend(self.time_shift_hints(&availability.conflicting_meetings, start, end));

        Ok(Some(
            Conflict::error(
                ConflictKind::RoomConflict,
                format!(
                    "The room is already booked by {} meeting(s) in this time slot",
                    availability.conflicting_meetings.len()
                ),
            )
            .with_resource(room_id)
            .with_meetings(availability.conflicting_meetings)
            .with_suggestions(hints),
        ))
    }

    /// Suggests the nearest slot strictly before the earliest conflict and
    /// the nearest slot strictly after the latest, skipping slots already in
    /// the past. At most two hints.
    fn time_shift_hints(
        &self,
        conflicts: &[MeetingSummary],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<String> {
        let now: DateTime<Utc> = self.clock.now();
        let duration = end - start;
        let mut hints: Vec<String> = Vec::new();

        if let Some(earliest) = conflicts.iter().map(|m| m.start).min() {
            let before: DateTime<Utc> = earliest - duration;
            if before > now {
                hints.push(format!("Start earlier at {}", before.format("%H:%M")));
            }
        }
        if let Some(latest) = conflicts.iter().map(|m| m.end).max()
            && latest > now
        {
            hints.push(format!("Start later at {}", latest.format("%H:%M")));
        }
        hints
    }
}

/// Scores how well a room's capacity fits a participant count.
#[allow(clippy::cast_precision_loss)]
fn capacity_fit_score(participant_count: usize, capacity: u32) -> f64 {
    if capacity == 0 {
        return 0.0;
    }
    let ratio: f64 = participant_count as f64 / f64::from(capacity);
    if (0.5..=0.8).contains(&ratio) {
        1.0
    } else if ratio >= 0.3 {
        0.6
    } else {
        0.3
    }
}
