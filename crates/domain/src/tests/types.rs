// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Conflict, ConflictKind, MeetingDraft, MeetingType, ScheduledMeeting, Severity,
    ValidationOutcome,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

fn create_test_draft() -> MeetingDraft {
    MeetingDraft {
        title: String::from("Review"),
        date: NaiveDate::from_ymd_opt(2026, 3, 2),
        time: String::from("14:30"),
        duration_minutes: 45,
        meeting_type: String::from("hybrid"),
        is_zoom_meeting: true,
        room_id: Some(String::from("room-2")),
        participants: vec![String::from("ada")],
        description: None,
        zoom_passcode: None,
    }
}

#[test]
fn test_meeting_type_parses_known_values() {
    assert_eq!("offline".parse::<MeetingType>().unwrap(), MeetingType::Offline);
    assert_eq!("hybrid".parse::<MeetingType>().unwrap(), MeetingType::Hybrid);
    assert_eq!("online".parse::<MeetingType>().unwrap(), MeetingType::Online);
}

#[test]
fn test_meeting_type_rejects_unknown_values() {
    assert!("".parse::<MeetingType>().is_err());
    assert!("Offline".parse::<MeetingType>().is_err());
    assert!("townhall".parse::<MeetingType>().is_err());
}

#[test]
fn test_draft_start_instant_combines_date_and_time() {
    let draft: MeetingDraft = create_test_draft();

    let start: DateTime<Utc> = draft.start_instant().unwrap();
    assert_eq!(
        start,
        Utc.with_ymd_and_hms(2026, 3, 2, 14, 30, 0).single().unwrap()
    );
}

#[test]
fn test_draft_start_instant_requires_valid_time() {
    let mut draft: MeetingDraft = create_test_draft();
    draft.time = String::from("noonish");
    assert!(draft.start_instant().is_none());
}

#[test]
fn test_draft_interval_requires_positive_duration() {
    let mut draft: MeetingDraft = create_test_draft();
    draft.duration_minutes = 0;
    assert!(draft.interval().is_none());
}

#[test]
fn test_draft_interval_spans_duration() {
    let draft: MeetingDraft = create_test_draft();

    let (start, end) = draft.interval().unwrap();
    assert_eq!(
        start,
        Utc.with_ymd_and_hms(2026, 3, 2, 14, 30, 0).single().unwrap()
    );
    assert_eq!(
        end,
        Utc.with_ymd_and_hms(2026, 3, 2, 15, 15, 0).single().unwrap()
    );
}

#[test]
fn test_scheduled_meeting_summary_carries_interval() {
    let meeting: ScheduledMeeting = ScheduledMeeting {
        id: String::from("m-1"),
        title: String::from("Standup"),
        start: Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).single().unwrap(),
        duration_minutes: 15,
        participants: vec![String::from("ada")],
        room_id: Some(String::from("room-1")),
        zoom_account_id: None,
    };

    let summary = meeting.summary();
    assert_eq!(summary.title, "Standup");
    assert_eq!(summary.end - summary.start, chrono::Duration::minutes(15));
    assert_eq!(summary.room_id.as_deref(), Some("room-1"));
}

#[test]
fn test_outcome_blocks_on_any_error() {
    let outcome: ValidationOutcome = ValidationOutcome::new(
        vec![
            Conflict::warning(ConflictKind::MissingRoom, "advisory"),
            Conflict::error(ConflictKind::ZoomCapacity, "blocking"),
        ],
        Vec::new(),
    );
    assert!(!outcome.can_submit);
}

#[test]
fn test_outcome_submits_on_warnings_only() {
    let outcome: ValidationOutcome = ValidationOutcome::new(
        vec![Conflict::warning(ConflictKind::MissingRoom, "advisory")],
        Vec::new(),
    );
    assert!(outcome.can_submit);
}

#[test]
fn test_conflict_wire_format_uses_snake_case_tags() {
    let conflict: Conflict = Conflict::new(ConflictKind::ZoomCapacity, Severity::Error, "full")
        .with_resource("acct-1");

    let json: serde_json::Value = serde_json::to_value(&conflict).unwrap();
    assert_eq!(json["kind"], "zoom_capacity");
    assert_eq!(json["severity"], "error");
    assert_eq!(json["resourceId"], "acct-1");
}

#[test]
fn test_draft_wire_format_is_camel_case() {
    let draft: MeetingDraft = create_test_draft();

    let json: serde_json::Value = serde_json::to_value(&draft).unwrap();
    assert_eq!(json["durationMinutes"], 45);
    assert_eq!(json["meetingType"], "hybrid");
    assert_eq!(json["isZoomMeeting"], true);
    assert_eq!(json["roomId"], "room-2");
}
