// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::interval::end_of;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum number of meetings a single videoconferencing account may host
/// concurrently. This is a system-wide invariant, not per-account
/// configuration.
pub const ZOOM_MAX_CONCURRENT_MEETINGS: u32 = 2;

/// Maximum number of participants a single videoconferencing account
/// supports per meeting.
pub const ZOOM_MAX_PARTICIPANTS: u32 = 1000;

/// The declared kind of a meeting.
///
/// The variant determines which resources the meeting structurally requires:
/// offline meetings need a room, online meetings need videoconferencing,
/// hybrid meetings are recommended both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingType {
    /// In-person only. A room is strictly required.
    Offline,
    /// In-person plus remote attendees. Room and videoconferencing are both
    /// recommended but neither is required.
    Hybrid,
    /// Remote only. Videoconferencing is strictly required.
    Online,
}

impl FromStr for MeetingType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "offline" => Ok(Self::Offline),
            "hybrid" => Ok(Self::Hybrid),
            "online" => Ok(Self::Online),
            _ => Err(DomainError::InvalidMeetingType(s.to_string())),
        }
    }
}

impl std::fmt::Display for MeetingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl MeetingType {
    /// Converts this meeting type to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Offline => "offline",
            Self::Hybrid => "hybrid",
            Self::Online => "online",
        }
    }
}

/// A proposed, not-yet-persisted meeting submitted for validation.
///
/// The `meeting_type` field keeps its raw wire value so an unrecognized type
/// string surfaces as a validation conflict instead of a deserialization
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingDraft {
    /// The meeting title.
    pub title: String,
    /// The calendar date, if one has been chosen.
    pub date: Option<NaiveDate>,
    /// The wall-clock start time as `HH:MM`.
    pub time: String,
    /// The duration in minutes.
    pub duration_minutes: i64,
    /// The declared meeting type (`offline`, `hybrid`, or `online`).
    pub meeting_type: String,
    /// Whether videoconferencing is requested.
    pub is_zoom_meeting: bool,
    /// The selected room, if any.
    pub room_id: Option<String>,
    /// Participant identifiers.
    pub participants: Vec<String>,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional videoconferencing passcode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_passcode: Option<String>,
}

impl MeetingDraft {
    /// Parses the declared meeting type.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMeetingType` if the wire value is not one
    /// of `offline`, `hybrid`, or `online`.
    pub fn parsed_type(&self) -> Result<MeetingType, DomainError> {
        self.meeting_type.parse()
    }

    /// Returns the selected room id, treating an empty string as no room.
    #[must_use]
    pub fn selected_room(&self) -> Option<&str> {
        self.room_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Parses the `HH:MM` wall-clock time if it is well-formed.
    #[must_use]
    pub fn parsed_time(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(&self.time, "%H:%M").ok()
    }

    /// Resolves the draft's start instant from its date and time.
    ///
    /// Returns `None` when either the date is missing or the time is not a
    /// valid `HH:MM` value; both cases are reported separately by the
    /// validator.
    #[must_use]
    pub fn start_instant(&self) -> Option<DateTime<Utc>> {
        let date: NaiveDate = self.date?;
        let time: NaiveTime = self.parsed_time()?;
        Some(date.and_time(time).and_utc())
    }

    /// Resolves the draft's half-open interval `[start, start + duration)`.
    #[must_use]
    pub fn interval(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        if self.duration_minutes <= 0 {
            return None;
        }
        let start: DateTime<Utc> = self.start_instant()?;
        Some((start, end_of(start, self.duration_minutes)))
    }
}

/// A meeting already persisted in the store, as read by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledMeeting {
    /// The meeting identifier.
    pub id: String,
    /// The meeting title.
    pub title: String,
    /// The start instant.
    pub start: DateTime<Utc>,
    /// The duration in minutes.
    pub duration_minutes: i64,
    /// Participant identifiers.
    pub participants: Vec<String>,
    /// The booked room, if any.
    pub room_id: Option<String>,
    /// The videoconferencing account hosting this meeting, if any.
    pub zoom_account_id: Option<String>,
}

impl ScheduledMeeting {
    /// Returns the exclusive end instant of this meeting.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        end_of(self.start, self.duration_minutes)
    }

    /// Builds the human-facing summary attached to conflicts.
    #[must_use]
    pub fn summary(&self) -> MeetingSummary {
        MeetingSummary {
            title: self.title.clone(),
            start: self.start,
            end: self.end(),
            participants: self.participants.clone(),
            room_id: self.room_id.clone(),
        }
    }
}

/// A physical meeting room. The engine only reads rooms; creation and
/// editing happen elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// The room identifier.
    pub id: String,
    /// The display name.
    pub name: String,
    /// Seating capacity.
    pub capacity: u32,
    /// Whether the room is bookable.
    pub is_active: bool,
    /// Optional location tag (building, floor, campus).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Optional equipment tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equipment: Vec<String>,
}

/// A videoconferencing account. Accounts are interchangeable capacity units;
/// no account is assigned to a meeting until one is chosen at booking time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomAccount {
    /// The account identifier.
    pub id: String,
    /// Whether the account may host new meetings.
    pub is_active: bool,
}

/// How serious a conflict is. Errors block submission; warnings do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory only. Submission remains possible.
    Warning,
    /// Blocking. Submission must be refused.
    Error,
}

/// The classification of a detected conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Two meetings share an instant on the same resource.
    Overlap,
    /// The selected room is booked during the requested interval.
    RoomConflict,
    /// The meeting type requires or recommends a room and none is selected.
    MissingRoom,
    /// The declared type and the draft's flags disagree.
    InvalidType,
    /// No videoconferencing account has a free slot.
    ZoomCapacity,
}

impl ConflictKind {
    /// Converts this kind to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Overlap => "overlap",
            Self::RoomConflict => "room_conflict",
            Self::MissingRoom => "missing_room",
            Self::InvalidType => "invalid_type",
            Self::ZoomCapacity => "zoom_capacity",
        }
    }
}

/// A compact description of a meeting involved in a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSummary {
    /// The conflicting meeting's title.
    pub title: String,
    /// Its start instant.
    pub start: DateTime<Utc>,
    /// Its exclusive end instant.
    pub end: DateTime<Utc>,
    /// Its participants.
    pub participants: Vec<String>,
    /// Its room, if any.
    pub room_id: Option<String>,
}

/// A single detected conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    /// The conflict classification.
    pub kind: ConflictKind,
    /// Whether this conflict blocks submission.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// The affected resource (room or account), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    /// Summaries of the meetings causing this conflict.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicting_meetings: Vec<MeetingSummary>,
    /// Plain-text remediation hints. The resolution service translates some
    /// of these into typed suggestions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl Conflict {
    /// Creates a blocking conflict.
    #[must_use]
    pub fn error(kind: ConflictKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Error, message)
    }

    /// Creates an advisory conflict.
    #[must_use]
    pub fn warning(kind: ConflictKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Warning, message)
    }

    /// Creates a conflict with the given severity.
    #[must_use]
    pub fn new(kind: ConflictKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            resource_id: None,
            conflicting_meetings: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Attaches the affected resource identifier.
    #[must_use]
    pub fn with_resource(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    /// Attaches the conflicting meeting summaries.
    #[must_use]
    pub fn with_meetings(mut self, meetings: Vec<MeetingSummary>) -> Self {
        self.conflicting_meetings = meetings;
        self
    }

    /// Attaches plain-text remediation hints.
    #[must_use]
    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Returns whether this conflict blocks submission.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

/// The classification of a generated suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// Move the meeting to a different room.
    RoomChange,
    /// Move the meeting to a different time.
    TimeChange,
    /// Change the meeting type.
    TypeChange,
    /// Shorten or lengthen the meeting.
    DurationChange,
}

impl SuggestionKind {
    /// Fixed tie-break order used when two suggestions share a priority.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::RoomChange => 0,
            Self::TimeChange => 1,
            Self::TypeChange => 2,
            Self::DurationChange => 3,
        }
    }

    /// Converts this kind to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RoomChange => "room_change",
            Self::TimeChange => "time_change",
            Self::TypeChange => "type_change",
            Self::DurationChange => "duration_change",
        }
    }
}

/// The field edit a suggestion performs when applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionAction {
    /// The draft field to change (wire name, e.g. `roomId`).
    pub field: String,
    /// The replacement value.
    pub value: serde_json::Value,
    /// Additional field patches applied alongside the primary one.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub additional_changes: serde_json::Map<String, serde_json::Value>,
}

impl SuggestionAction {
    /// Creates an action patching a single field.
    #[must_use]
    pub fn set(field: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            field: field.into(),
            value,
            additional_changes: serde_json::Map::new(),
        }
    }

    /// Adds a secondary field patch.
    #[must_use]
    pub fn and_set(mut self, field: impl Into<String>, value: serde_json::Value) -> Self {
        self.additional_changes.insert(field.into(), value);
        self
    }
}

/// A machine-generated, user-applicable remediation for a conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Deterministic identifier for this suggestion.
    pub id: String,
    /// The suggestion classification.
    pub kind: SuggestionKind,
    /// Human-readable description.
    pub description: String,
    /// The field edit performed when the suggestion is applied.
    pub action: SuggestionAction,
    /// Application priority. Lower applies first.
    pub priority: i32,
}

/// The complete answer to one validation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    /// Every conflict detected for the draft.
    pub conflicts: Vec<Conflict>,
    /// Ranked remediation suggestions.
    pub suggestions: Vec<Suggestion>,
    /// True iff no conflict has error severity.
    pub can_submit: bool,
}

impl ValidationOutcome {
    /// Builds an outcome, deriving `can_submit` from the conflict severities.
    #[must_use]
    pub fn new(conflicts: Vec<Conflict>, suggestions: Vec<Suggestion>) -> Self {
        let can_submit: bool = !conflicts.iter().any(Conflict::is_blocking);
        Self {
            conflicts,
            suggestions,
            can_submit,
        }
    }
}
