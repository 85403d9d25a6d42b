// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::capacity::ZoomCapacityService;
use crate::error::EngineError;
use crate::rooms::RoomAvailabilityService;
use chrono::{DateTime, Duration, Utc};
use confab_domain::{
    Conflict, ConflictKind, MeetingDraft, MeetingType, Room, Suggestion, SuggestionAction,
    SuggestionKind, end_of,
};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

/// Hard cap on the suggestion list. Downstream UI assumes at most eight
/// entries; this is an interface contract, not a tuning knob.
pub const MAX_SUGGESTIONS: usize = 8;

/// Step between probed start times when searching for free
/// videoconferencing capacity.
pub const SLOT_PROBE_STEP_MINUTES: i64 = 15;

/// How far ahead of the original start the capacity probe looks.
pub const SLOT_PROBE_HORIZON_MINUTES: i64 = 480;

/// Upper bound on collected capacity-relief time slots.
const MAX_TIME_SLOT_SUGGESTIONS: usize = 3;

/// Upper bound on room-swap candidates.
const MAX_ROOM_SUGGESTIONS: usize = 5;

/// Turns detected conflicts into typed, prioritized, feasibility-scored
/// suggestions.
///
/// Suggestion generation is an enhancement, never a correctness
/// requirement: any failure inside this service degrades to an empty list
/// so it can never mask the underlying conflicts.
pub struct ConflictResolutionService {
    rooms: Arc<RoomAvailabilityService>,
    capacity: Arc<ZoomCapacityService>,
}

impl ConflictResolutionService {
    /// Creates a resolution service over the room and capacity services.
    #[must_use]
    pub const fn new(
        rooms: Arc<RoomAvailabilityService>,
        capacity: Arc<ZoomCapacityService>,
    ) -> Self {
        Self { rooms, capacity }
    }

    /// Derives suggestions for every conflict, dispatching per kind.
    ///
    /// `exclude_meeting_id` is the meeting being edited, if any, so probed
    /// alternatives do not collide with the meeting itself.
    #[must_use]
    pub fn generate_suggestions(
        &self,
        conflicts: &[Conflict],
        draft: &MeetingDraft,
        exclude_meeting_id: Option<&str>,
    ) -> Vec<Suggestion> {
        let mut suggestions: Vec<Suggestion> = Vec::new();
        for conflict in conflicts {
            match conflict.kind {
                ConflictKind::RoomConflict => {
                    suggestions.extend(self.room_swap_suggestions(draft));
                }
                ConflictKind::MissingRoom => {
                    suggestions.extend(missing_room_suggestions(draft));
                }
                ConflictKind::ZoomCapacity => {
                    suggestions.extend(self.capacity_relief_suggestions(draft, exclude_meeting_id));
                }
                ConflictKind::InvalidType => {
                    suggestions.extend(type_toggle_suggestions(conflict));
                }
                // Overlap conflicts describe the situation; the sibling
                // room/capacity conflicts carry the actionable remedies.
                ConflictKind::Overlap => {}
            }
        }
        suggestions
    }

    /// Ranks free rooms for a swap, attaching a feasibility score in
    /// `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns a store error if the room search fails.
    pub fn get_room_suggestions(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        participant_count: usize,
        exclude_room_id: Option<&str>,
    ) -> Result<Vec<(Room, f64)>, EngineError> {
        let candidates: Vec<Room> = self
            .rooms
            .find_available_rooms(start, end)?
            .into_iter()
            .filter(|room| exclude_room_id != Some(room.id.as_str()))
            .collect();

        let mut scored: Vec<(Room, f64)> = candidates
            .into_iter()
            .map(|room| {
                let feasibility: f64 = feasibility_score(&room, participant_count);
                (room, feasibility)
            })
            .collect();

        scored.sort_by(|(room_a, score_a), (room_b, score_b)| {
            score_b
                .partial_cmp(score_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| room_a.name.cmp(&room_b.name))
        });
        scored.truncate(MAX_ROOM_SUGGESTIONS);
        Ok(scored)
    }

    /// Stable sort ascending by priority, ties broken by a fixed kind
    /// order, truncated to [`MAX_SUGGESTIONS`].
    #[must_use]
    pub fn prioritize_suggestions(&self, suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut unique: Vec<Suggestion> = suggestions
            .into_iter()
            .filter(|s| seen.insert(s.id.clone()))
            .collect();

        unique.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| a.kind.rank().cmp(&b.kind.rank()))
        });
        unique.truncate(MAX_SUGGESTIONS);
        unique
    }

    fn room_swap_suggestions(&self, draft: &MeetingDraft) -> Vec<Suggestion> {
        let Some((start, end)) = draft.interval() else {
            return Vec::new();
        };

        let scored: Vec<(Room, f64)> = match self.get_room_suggestions(
            start,
            end,
            draft.participants.len(),
            draft.selected_room(),
        ) {
            Ok(scored) => scored,
            Err(err) => {
                // Degrade silently: a missing suggestion must never mask
                // the conflict it was meant to remedy.
                warn!(error = %err, "room suggestion search failed");
                return Vec::new();
            }
        };

        scored
            .into_iter()
            .map(|(room, feasibility)| Suggestion {
                id: format!("room-{}", room.id),
                kind: SuggestionKind::RoomChange,
                description: format!("Move to {} (seats {})", room.name, room.capacity),
                action: SuggestionAction::set("roomId", json!(room.id)),
                priority: room_swap_priority(feasibility),
            })
            .collect()
    }

    fn capacity_relief_suggestions(
        &self,
        draft: &MeetingDraft,
        exclude_meeting_id: Option<&str>,
    ) -> Vec<Suggestion> {
        let mut suggestions: Vec<Suggestion> = Vec::new();

        if let Some((start, _)) = draft.interval() {
            suggestions.extend(self.probe_free_slots(
                start,
                draft.duration_minutes,
                exclude_meeting_id,
            ));
        }

        if matches!(
            draft.parsed_type(),
            Ok(MeetingType::Online | MeetingType::Hybrid)
        ) {
            suggestions.push(Suggestion {
                id: String::from("type-offline"),
                kind: SuggestionKind::TypeChange,
                description: String::from(
                    "Switch to an in-person meeting and release the videoconferencing slot",
                ),
                action: SuggestionAction::set("meetingType", json!("offline"))
                    .and_set("isZoomMeeting", json!(false))
                    .and_set("roomId", json!("auto-select")),
                priority: 3,
            });
        }

        suggestions
    }

    /// Probes forward from the original start in fixed steps, collecting up
    /// to three start times where an account has a free slot.
    ///
    /// The probe is sequential, so results are deterministically ascending
    /// in time. A store failure aborts the probe and degrades to whatever
    /// was collected.
    fn probe_free_slots(
        &self,
        start: DateTime<Utc>,
        duration_minutes: i64,
        exclude_meeting_id: Option<&str>,
    ) -> Vec<Suggestion> {
        let steps: i64 = SLOT_PROBE_HORIZON_MINUTES / SLOT_PROBE_STEP_MINUTES;
        let mut found: Vec<Suggestion> = Vec::new();

        for step in 1..=steps {
            if found.len() == MAX_TIME_SLOT_SUGGESTIONS {
                break;
            }
            let candidate: DateTime<Utc> =
                start + Duration::minutes(step * SLOT_PROBE_STEP_MINUTES);
            let report = match self.capacity.check_capacity(
                candidate,
                end_of(candidate, duration_minutes),
                exclude_meeting_id,
            ) {
                Ok(report) => report,
                Err(err) => {
                    warn!(error = %err, "capacity probe failed");
                    break;
                }
            };
            if !report.has_available_account {
                continue;
            }

            let time: String = candidate.format("%H:%M").to_string();
            let mut action: SuggestionAction = SuggestionAction::set("time", json!(time));
            if candidate.date_naive() != start.date_naive() {
                action = action.and_set("date", json!(candidate.date_naive().to_string()));
            }
            found.push(Suggestion {
                id: format!("time-{time}"),
                kind: SuggestionKind::TimeChange,
                description: format!("Move to {time} when a videoconferencing slot is free"),
                action,
                priority: 2,
            });
        }

        found
    }
}

/// Applies a suggestion, producing the field-level patch for the draft.
///
/// Pure transform: no validation, no service calls, no side effects.
#[must_use]
pub fn apply_suggestion(suggestion: &Suggestion) -> serde_json::Map<String, Value> {
    let mut patch: serde_json::Map<String, Value> = serde_json::Map::new();
    patch.insert(
        suggestion.action.field.clone(),
        suggestion.action.value.clone(),
    );
    for (field, value) in &suggestion.action.additional_changes {
        patch.insert(field.clone(), value.clone());
    }
    patch
}

/// Feasibility of a candidate room in `[0, 1]`.
///
/// Base 0.5; up to +0.4 for a tight-but-sufficient capacity ratio; −0.3
/// when the room is too small; +0.1 for an active room.
#[allow(clippy::cast_precision_loss)]
fn feasibility_score(room: &Room, participant_count: usize) -> f64 {
    let mut score: f64 = 0.5;

    if room.capacity > 0 {
        let ratio: f64 = participant_count as f64 / f64::from(room.capacity);
        if (0.5..=0.8).contains(&ratio) {
            score += 0.4;
        } else if ratio >= 0.3 {
            score += 0.2;
        } else {
            score += 0.1;
        }
    }

    if (room.capacity as usize) < participant_count {
        score -= 0.3;
    }
    if room.is_active {
        score += 0.1;
    }

    score.clamp(0.0, 1.0)
}

/// Priority for a room swap: better-fitting rooms apply first, floored at
/// one.
#[allow(clippy::cast_possible_truncation)]
fn room_swap_priority(feasibility: f64) -> i32 {
    let raw: f64 = (1.0 - feasibility * 2.0).round();
    (raw as i32).max(1)
}

fn missing_room_suggestions(draft: &MeetingDraft) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = vec![Suggestion {
        id: String::from("room-auto"),
        kind: SuggestionKind::RoomChange,
        description: String::from("Let the system pick a free room"),
        // The concrete room choice is deferred to whoever applies the patch.
        action: SuggestionAction::set("roomId", json!("auto-select")),
        priority: 1,
    }];

    if draft.parsed_type() == Ok(MeetingType::Offline) {
        suggestions.push(Suggestion {
            id: String::from("type-online"),
            kind: SuggestionKind::TypeChange,
            description: String::from("Switch to an online meeting (no room needed)"),
            action: SuggestionAction::set("meetingType", json!("online"))
                .and_set("roomId", Value::Null)
                .and_set("isZoomMeeting", json!(true)),
            priority: 2,
        });
    }

    suggestions
}

/// Translates a conflict's plain-text hints about enabling or disabling
/// videoconferencing into typed toggles.
fn type_toggle_suggestions(conflict: &Conflict) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = Vec::new();
    for hint in &conflict.suggestions {
        let lower: String = hint.to_lowercase();
        if !lower.contains("videoconferencing") && !lower.contains("zoom") {
            continue;
        }
        if lower.contains("disable") {
            suggestions.push(Suggestion {
                id: String::from("type-disable-zoom"),
                kind: SuggestionKind::TypeChange,
                description: hint.clone(),
                action: SuggestionAction::set("isZoomMeeting", json!(false)),
                priority: 2,
            });
        } else if lower.contains("enable") {
            suggestions.push(Suggestion {
                id: String::from("type-enable-zoom"),
                kind: SuggestionKind::TypeChange,
                description: hint.clone(),
                action: SuggestionAction::set("isZoomMeeting", json!(true)),
                priority: 2,
            });
        }
    }
    suggestions
}
