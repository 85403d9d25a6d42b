// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use chrono::NaiveDate;
use confab_domain::{Conflict, MeetingDraft, Suggestion, ValidationOutcome};
use confab_engine::{AccountCacheStats, AccountLoadInfo, CacheStats, RoomUtilization};
use serde::{Deserialize, Serialize};

/// API request to validate a draft meeting.
///
/// Mirrors the draft's wire fields plus the optional id of the meeting
/// being edited, which must not conflict with itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateMeetingRequest {
    /// The meeting title.
    pub title: String,
    /// The calendar date, if chosen.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// The wall-clock start time as `HH:MM`.
    pub time: String,
    /// The duration in minutes.
    pub duration_minutes: i64,
    /// The declared meeting type.
    pub meeting_type: String,
    /// Whether videoconferencing is requested.
    #[serde(default)]
    pub is_zoom_meeting: bool,
    /// The selected room, if any.
    #[serde(default)]
    pub room_id: Option<String>,
    /// Participant identifiers.
    #[serde(default)]
    pub participants: Vec<String>,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional videoconferencing passcode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_passcode: Option<String>,
    /// The meeting being edited, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_meeting_id: Option<String>,
}

impl ValidateMeetingRequest {
    /// Splits this request into the domain draft and the exclusion id.
    #[must_use]
    pub fn into_draft(self) -> (MeetingDraft, Option<String>) {
        let draft: MeetingDraft = MeetingDraft {
            title: self.title,
            date: self.date,
            time: self.time,
            duration_minutes: self.duration_minutes,
            meeting_type: self.meeting_type,
            is_zoom_meeting: self.is_zoom_meeting,
            room_id: self.room_id,
            participants: self.participants,
            description: self.description,
            zoom_passcode: self.zoom_passcode,
        };
        (draft, self.exclude_meeting_id)
    }
}

/// API response for a validation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    /// Every conflict detected for the draft.
    pub conflicts: Vec<Conflict>,
    /// Ranked remediation suggestions.
    pub suggestions: Vec<Suggestion>,
    /// True iff no conflict blocks submission.
    pub can_submit: bool,
}

impl From<ValidationOutcome> for ValidationResponse {
    fn from(outcome: ValidationOutcome) -> Self {
        Self {
            conflicts: outcome.conflicts,
            suggestions: outcome.suggestions,
            can_submit: outcome.can_submit,
        }
    }
}

/// API response for the cache statistics endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsResponse {
    /// Statistics for the validation result cache.
    pub validation: CacheStats,
    /// Statistics for the account cache.
    pub accounts: AccountCacheStats,
}

/// API response after clearing the validation cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearCacheResponse {
    /// A success message.
    pub message: String,
}

/// API response for the account load endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountLoadResponse {
    /// Per-account load, least loaded first.
    pub accounts: Vec<AccountLoadInfo>,
}

/// API response after refreshing the account pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshAccountsResponse {
    /// The number of active accounts after the refresh.
    pub total_accounts: usize,
    /// A success message.
    pub message: String,
}

/// API response for the room utilization endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUtilizationResponse {
    /// The room the statistics cover.
    pub room_id: String,
    /// First day of the inclusive range.
    pub start_date: NaiveDate,
    /// Last day of the inclusive range.
    pub end_date: NaiveDate,
    /// The booking statistics.
    pub utilization: RoomUtilization,
}
