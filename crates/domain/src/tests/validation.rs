// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Conflict, ConflictKind, MeetingDraft, MeetingType, Severity, TypeValidation, validate_draft,
    validate_type_change,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().unwrap()
}

fn create_test_draft(meeting_type: &str) -> MeetingDraft {
    MeetingDraft {
        title: String::from("Sprint planning"),
        date: NaiveDate::from_ymd_opt(2026, 3, 2),
        time: String::from("10:00"),
        duration_minutes: 60,
        meeting_type: meeting_type.to_string(),
        is_zoom_meeting: false,
        room_id: None,
        participants: vec![String::from("ada"), String::from("grace")],
        description: None,
        zoom_passcode: None,
    }
}

fn errors(result: &TypeValidation) -> Vec<&Conflict> {
    result.conflicts.iter().filter(|c| c.is_blocking()).collect()
}

fn warnings(result: &TypeValidation) -> Vec<&Conflict> {
    result
        .conflicts
        .iter()
        .filter(|c| c.severity == Severity::Warning)
        .collect()
}

#[test]
fn test_offline_without_room_is_exactly_one_error() {
    let draft: MeetingDraft = create_test_draft("offline");

    let result: TypeValidation = validate_draft(&draft, fixed_now());

    let blocking: Vec<&Conflict> = errors(&result);
    assert_eq!(blocking.len(), 1);
    assert_eq!(blocking[0].kind, ConflictKind::MissingRoom);
    assert!(!result.is_valid);
    assert!(result.required_fields.contains(&String::from("roomId")));
}

#[test]
fn test_offline_with_room_is_valid() {
    let mut draft: MeetingDraft = create_test_draft("offline");
    draft.room_id = Some(String::from("room-1"));

    let result: TypeValidation = validate_draft(&draft, fixed_now());

    assert!(result.is_valid);
    assert!(result.conflicts.is_empty());
}

#[test]
fn test_offline_with_zoom_flag_warns_but_submits() {
    let mut draft: MeetingDraft = create_test_draft("offline");
    draft.room_id = Some(String::from("room-1"));
    draft.is_zoom_meeting = true;

    let result: TypeValidation = validate_draft(&draft, fixed_now());

    assert!(result.is_valid);
    assert_eq!(warnings(&result).len(), 1);
    assert_eq!(warnings(&result)[0].kind, ConflictKind::InvalidType);
}

#[test]
fn test_hybrid_without_room_or_zoom_is_two_warnings_zero_errors() {
    let draft: MeetingDraft = create_test_draft("hybrid");

    let result: TypeValidation = validate_draft(&draft, fixed_now());

    assert!(result.is_valid);
    assert!(errors(&result).is_empty());
    assert_eq!(warnings(&result).len(), 2);

    let kinds: Vec<ConflictKind> = result.conflicts.iter().map(|c| c.kind).collect();
    assert!(kinds.contains(&ConflictKind::MissingRoom));
    assert!(kinds.contains(&ConflictKind::InvalidType));
}

#[test]
fn test_hybrid_fully_equipped_is_clean() {
    let mut draft: MeetingDraft = create_test_draft("hybrid");
    draft.room_id = Some(String::from("room-1"));
    draft.is_zoom_meeting = true;

    let result: TypeValidation = validate_draft(&draft, fixed_now());

    assert!(result.is_valid);
    assert!(result.conflicts.is_empty());
}

#[test]
fn test_online_without_zoom_is_blocking() {
    let draft: MeetingDraft = create_test_draft("online");

    let result: TypeValidation = validate_draft(&draft, fixed_now());

    assert!(!result.is_valid);
    let blocking: Vec<&Conflict> = errors(&result);
    assert_eq!(blocking.len(), 1);
    assert_eq!(blocking[0].kind, ConflictKind::InvalidType);
    assert!(
        result
            .required_fields
            .contains(&String::from("isZoomMeeting"))
    );
}

#[test]
fn test_online_with_room_warns_but_submits() {
    let mut draft: MeetingDraft = create_test_draft("online");
    draft.is_zoom_meeting = true;
    draft.room_id = Some(String::from("room-1"));

    let result: TypeValidation = validate_draft(&draft, fixed_now());

    assert!(result.is_valid);
    assert_eq!(warnings(&result).len(), 1);
}

#[test]
fn test_unrecognized_type_is_blocking_and_requires_meeting_type() {
    let draft: MeetingDraft = create_test_draft("townhall");

    let result: TypeValidation = validate_draft(&draft, fixed_now());

    assert!(!result.is_valid);
    assert!(
        result
            .conflicts
            .iter()
            .any(|c| c.kind == ConflictKind::InvalidType && c.is_blocking())
    );
    assert!(result.required_fields.contains(&String::from("meetingType")));
}

#[test]
fn test_empty_title_is_blocking() {
    let mut draft: MeetingDraft = create_test_draft("hybrid");
    draft.title = String::from("   ");

    let result: TypeValidation = validate_draft(&draft, fixed_now());

    assert!(!result.is_valid);
    assert!(result.required_fields.contains(&String::from("title")));
}

#[test]
fn test_missing_date_is_blocking() {
    let mut draft: MeetingDraft = create_test_draft("hybrid");
    draft.date = None;

    let result: TypeValidation = validate_draft(&draft, fixed_now());

    assert!(!result.is_valid);
    assert!(result.required_fields.contains(&String::from("date")));
}

#[test]
fn test_malformed_time_is_blocking() {
    let mut draft: MeetingDraft = create_test_draft("hybrid");
    draft.time = String::from("25:61");

    let result: TypeValidation = validate_draft(&draft, fixed_now());

    assert!(!result.is_valid);
    assert!(result.required_fields.contains(&String::from("time")));
}

#[test]
fn test_zero_duration_is_blocking() {
    let mut draft: MeetingDraft = create_test_draft("hybrid");
    draft.duration_minutes = 0;

    let result: TypeValidation = validate_draft(&draft, fixed_now());

    assert!(!result.is_valid);
    assert!(
        result
            .required_fields
            .contains(&String::from("durationMinutes"))
    );
}

#[test]
fn test_marathon_duration_warns_but_submits() {
    let mut draft: MeetingDraft = create_test_draft("hybrid");
    draft.room_id = Some(String::from("room-1"));
    draft.is_zoom_meeting = true;
    draft.duration_minutes = 481;

    let result: TypeValidation = validate_draft(&draft, fixed_now());

    assert!(result.is_valid);
    assert_eq!(warnings(&result).len(), 1);
}

#[test]
fn test_past_start_is_blocking() {
    let mut draft: MeetingDraft = create_test_draft("hybrid");
    draft.room_id = Some(String::from("room-1"));
    draft.is_zoom_meeting = true;
    draft.date = NaiveDate::from_ymd_opt(2026, 2, 28);

    let result: TypeValidation = validate_draft(&draft, fixed_now());

    assert!(!result.is_valid);
    assert!(
        result
            .conflicts
            .iter()
            .any(|c| c.is_blocking() && c.message.contains("past"))
    );
}

#[test]
fn test_empty_participants_warns_but_submits() {
    let mut draft: MeetingDraft = create_test_draft("hybrid");
    draft.room_id = Some(String::from("room-1"));
    draft.is_zoom_meeting = true;
    draft.participants.clear();

    let result: TypeValidation = validate_draft(&draft, fixed_now());

    assert!(result.is_valid);
    assert_eq!(warnings(&result).len(), 1);
}

#[test]
fn test_oversized_zoom_roster_warns_but_submits() {
    let mut draft: MeetingDraft = create_test_draft("online");
    draft.is_zoom_meeting = true;
    draft.participants = (0..=crate::ZOOM_MAX_PARTICIPANTS)
        .map(|n| format!("guest-{n}"))
        .collect();

    let result: TypeValidation = validate_draft(&draft, fixed_now());

    assert!(result.is_valid);
    let flagged: Vec<&Conflict> = warnings(&result);
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].kind, ConflictKind::ZoomCapacity);
}

#[test]
fn test_empty_room_id_counts_as_no_room() {
    let mut draft: MeetingDraft = create_test_draft("offline");
    draft.room_id = Some(String::new());

    let result: TypeValidation = validate_draft(&draft, fixed_now());

    assert!(!result.is_valid);
    assert!(
        result
            .conflicts
            .iter()
            .any(|c| c.kind == ConflictKind::MissingRoom)
    );
}

#[test]
fn test_type_change_prepends_informational_warning() {
    let draft: MeetingDraft = create_test_draft("offline");

    let result: TypeValidation = validate_type_change(&draft, MeetingType::Online, fixed_now());

    assert_eq!(result.conflicts[0].severity, Severity::Warning);
    assert!(result.conflicts[0].message.contains("offline"));
    assert!(result.conflicts[0].message.contains("online"));
}

#[test]
fn test_type_change_revalidates_against_new_type() {
    // Offline without a room blocks; as online (without zoom) the missing
    // room disappears but the zoom requirement takes over.
    let draft: MeetingDraft = create_test_draft("offline");

    let result: TypeValidation = validate_type_change(&draft, MeetingType::Online, fixed_now());

    assert!(
        !result
            .conflicts
            .iter()
            .any(|c| c.kind == ConflictKind::MissingRoom)
    );
    assert!(!result.is_valid);
    assert!(
        result
            .required_fields
            .contains(&String::from("isZoomMeeting"))
    );
}
