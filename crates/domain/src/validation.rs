// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{Conflict, ConflictKind, MeetingDraft, MeetingType, ZOOM_MAX_PARTICIPANTS};
use chrono::{DateTime, Utc};

/// Durations above this many minutes draw a warning.
pub const MAX_REASONABLE_DURATION_MINUTES: i64 = 480;

/// The result of running the meeting-type rules against a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeValidation {
    /// True iff no blocking conflict was produced.
    pub is_valid: bool,
    /// Every conflict the rules produced, warnings included.
    pub conflicts: Vec<Conflict>,
    /// Wire names of the fields that must be filled to clear the blocking
    /// conflicts.
    pub required_fields: Vec<String>,
}

impl TypeValidation {
    fn from_findings(conflicts: Vec<Conflict>, required_fields: Vec<String>) -> Self {
        let is_valid: bool = !conflicts.iter().any(Conflict::is_blocking);
        Self {
            is_valid,
            conflicts,
            required_fields,
        }
    }
}

/// Runs the full stateless rule set against a draft.
///
/// The rules are pure: the only inputs are the draft and the caller's `now`,
/// which makes past-instant checks deterministic under test.
///
/// Dispatch on the declared type is exhaustive over [`MeetingType`]; an
/// unrecognized wire value is itself a blocking `invalid_type` conflict
/// rather than a silent fallthrough.
#[must_use]
pub fn validate_draft(draft: &MeetingDraft, now: DateTime<Utc>) -> TypeValidation {
    let mut conflicts: Vec<Conflict> = Vec::new();
    let mut required: Vec<String> = Vec::new();

    check_basic_fields(draft, now, &mut conflicts, &mut required);

    match draft.parsed_type() {
        Ok(MeetingType::Offline) => check_offline(draft, &mut conflicts, &mut required),
        Ok(MeetingType::Hybrid) => check_hybrid(draft, &mut conflicts),
        Ok(MeetingType::Online) => check_online(draft, &mut conflicts, &mut required),
        Err(_) => {
            conflicts.push(Conflict::error(
                ConflictKind::InvalidType,
                format!(
                    "Unknown meeting type '{}': expected offline, hybrid, or online",
                    draft.meeting_type
                ),
            ));
            required.push(String::from("meetingType"));
        }
    }

    TypeValidation::from_findings(conflicts, required)
}

/// Re-validates a draft as if its type had been changed to `new_type`.
///
/// Used when a user edits an existing draft's type: the result is the normal
/// rule output for the altered draft, with an informational warning
/// summarizing the change prepended.
#[must_use]
pub fn validate_type_change(
    draft: &MeetingDraft,
    new_type: MeetingType,
    now: DateTime<Utc>,
) -> TypeValidation {
    let mut altered: MeetingDraft = draft.clone();
    altered.meeting_type = new_type.as_str().to_string();

    let result: TypeValidation = validate_draft(&altered, now);

    let mut conflicts: Vec<Conflict> = vec![Conflict::warning(
        ConflictKind::InvalidType,
        format!(
            "Meeting type changed from '{}' to '{}'; requirements below reflect the new type",
            draft.meeting_type, new_type
        ),
    )];
    conflicts.extend(result.conflicts);

    TypeValidation::from_findings(conflicts, result.required_fields)
}

/// Field checks that apply to every draft regardless of type.
fn check_basic_fields(
    draft: &MeetingDraft,
    now: DateTime<Utc>,
    conflicts: &mut Vec<Conflict>,
    required: &mut Vec<String>,
) {
    if draft.title.trim().is_empty() {
        conflicts.push(Conflict::error(
            ConflictKind::InvalidType,
            "A meeting title is required",
        ));
        required.push(String::from("title"));
    }

    if draft.date.is_none() {
        conflicts.push(Conflict::error(
            ConflictKind::InvalidType,
            "A meeting date is required",
        ));
        required.push(String::from("date"));
    }

    if draft.parsed_time().is_none() {
        conflicts.push(Conflict::error(
            ConflictKind::InvalidType,
            format!(
                "Invalid start time '{}': expected HH:MM in 24-hour form",
                draft.time
            ),
        ));
        required.push(String::from("time"));
    }

    if draft.duration_minutes <= 0 {
        conflicts.push(Conflict::error(
            ConflictKind::InvalidType,
            "Duration must be greater than zero minutes",
        ));
        required.push(String::from("durationMinutes"));
    } else if draft.duration_minutes > MAX_REASONABLE_DURATION_MINUTES {
        conflicts.push(Conflict::warning(
            ConflictKind::InvalidType,
            format!(
                "Duration of {} minutes exceeds {} minutes; consider splitting the meeting",
                draft.duration_minutes, MAX_REASONABLE_DURATION_MINUTES
            ),
        ));
    }

    // Only decidable once date and time both parse.
    if let Some(start) = draft.start_instant()
        && start < now
    {
        conflicts.push(Conflict::error(
            ConflictKind::InvalidType,
            "The meeting start is in the past",
        ));
    }

    if draft.participants.is_empty() {
        conflicts.push(Conflict::warning(
            ConflictKind::InvalidType,
            "No participants have been added",
        ));
    } else if draft.is_zoom_meeting && draft.participants.len() > ZOOM_MAX_PARTICIPANTS as usize {
        conflicts.push(Conflict::warning(
            ConflictKind::ZoomCapacity,
            format!(
                "{} participants exceed the {} supported per videoconferencing session",
                draft.participants.len(),
                ZOOM_MAX_PARTICIPANTS
            ),
        ));
    }
}

/// Offline meetings: room strictly required, videoconferencing discouraged.
fn check_offline(draft: &MeetingDraft, conflicts: &mut Vec<Conflict>, required: &mut Vec<String>) {
    if draft.selected_room().is_none() {
        conflicts.push(
            Conflict::error(
                ConflictKind::MissingRoom,
                "Offline meetings require a meeting room",
            )
            .with_suggestions(vec![
                String::from("Select an available room"),
                String::from("Switch the meeting type to online"),
            ]),
        );
        required.push(String::from("roomId"));
    }

    if draft.is_zoom_meeting {
        conflicts.push(
            Conflict::warning(
                ConflictKind::InvalidType,
                "Offline meetings do not normally use videoconferencing",
            )
            .with_suggestions(vec![String::from(
                "Disable videoconferencing for an in-person meeting",
            )]),
        );
    }
}

/// Hybrid meetings: room and videoconferencing are both recommended; neither
/// finding ever blocks submission on its own.
fn check_hybrid(draft: &MeetingDraft, conflicts: &mut Vec<Conflict>) {
    if draft.selected_room().is_none() {
        conflicts.push(
            Conflict::warning(
                ConflictKind::MissingRoom,
                "Hybrid meetings usually reserve a room for in-person attendees",
            )
            .with_suggestions(vec![String::from("Select a room for in-person attendees")]),
        );
    }

    if !draft.is_zoom_meeting {
        conflicts.push(
            Conflict::warning(
                ConflictKind::InvalidType,
                "Hybrid meetings usually offer videoconferencing for remote attendees",
            )
            .with_suggestions(vec![String::from(
                "Enable videoconferencing so remote attendees can join",
            )]),
        );
    }
}

/// Online meetings: videoconferencing strictly required, a room discouraged.
fn check_online(draft: &MeetingDraft, conflicts: &mut Vec<Conflict>, required: &mut Vec<String>) {
    if !draft.is_zoom_meeting {
        conflicts.push(
            Conflict::error(
                ConflictKind::InvalidType,
                "Online meetings require videoconferencing",
            )
            .with_suggestions(vec![String::from("Enable videoconferencing")]),
        );
        required.push(String::from("isZoomMeeting"));
    }

    if draft.selected_room().is_some() {
        conflicts.push(
            Conflict::warning(
                ConflictKind::InvalidType,
                "Online meetings do not need a meeting room",
            )
            .with_suggestions(vec![String::from("Release the room reservation")]),
        );
    }
}
