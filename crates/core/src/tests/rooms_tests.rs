// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    at, create_room_meeting, create_test_room, fixed_clock, meeting_day,
};
use crate::{EngineError, RoomAvailability, RoomAvailabilityService, RoomUtilization};
use confab_domain::{ConflictKind, Room};
use confab_store::InMemoryStore;
use std::sync::Arc;

fn service_with(store: InMemoryStore) -> RoomAvailabilityService {
    RoomAvailabilityService::new(Arc::new(store), fixed_clock())
}

#[test]
fn test_unknown_room_is_a_hard_error() {
    let service: RoomAvailabilityService = service_with(InMemoryStore::new());

    let result = service.check_availability("nope", at(10, 0), at(11, 0), None);

    assert!(matches!(result, Err(EngineError::RoomNotFound(id)) if id == "nope"));
}

#[test]
fn test_free_room_is_available() {
    let store: InMemoryStore = InMemoryStore::new();
    store.add_room(create_test_room("room-1", "Aurora", 8)).unwrap();
    let service: RoomAvailabilityService = service_with(store);

    let availability: RoomAvailability = service
        .check_availability("room-1", at(10, 0), at(11, 0), None)
        .unwrap();

    assert!(availability.is_available);
    assert!(availability.conflicting_meetings.is_empty());
    assert!(availability.alternative_rooms.is_empty());
}

#[test]
fn test_touching_booking_does_not_conflict() {
    let store: InMemoryStore = InMemoryStore::new();
    store.add_room(create_test_room("room-1", "Aurora", 8)).unwrap();
    store
        .add_meeting(create_room_meeting("m1", "room-1", at(11, 0), 60))
        .unwrap();
    let service: RoomAvailabilityService = service_with(store);

    let availability: RoomAvailability = service
        .check_availability("room-1", at(10, 0), at(11, 0), None)
        .unwrap();

    assert!(availability.is_available);
}

#[test]
fn test_overlapping_booking_conflicts_and_ranks_alternatives() {
    let store: InMemoryStore = InMemoryStore::new();
    store.add_room(create_test_room("room-1", "Aurora", 8)).unwrap();
    store.add_room(create_test_room("room-2", "Borealis", 6)).unwrap();
    store
        .add_meeting(create_room_meeting("m1", "room-1", at(10, 30), 60))
        .unwrap();
    let service: RoomAvailabilityService = service_with(store);

    let availability: RoomAvailability = service
        .check_availability("room-1", at(10, 0), at(11, 0), None)
        .unwrap();

    assert!(!availability.is_available);
    assert_eq!(availability.conflicting_meetings.len(), 1);
    assert_eq!(availability.alternative_rooms.len(), 1);
    assert_eq!(availability.alternative_rooms[0].id, "room-2");
}

#[test]
fn test_editing_a_meeting_excludes_it_from_its_own_slot() {
    let store: InMemoryStore = InMemoryStore::new();
    store.add_room(create_test_room("room-1", "Aurora", 8)).unwrap();
    store
        .add_meeting(create_room_meeting("m1", "room-1", at(10, 0), 60))
        .unwrap();
    let service: RoomAvailabilityService = service_with(store);

    let availability: RoomAvailability = service
        .check_availability("room-1", at(10, 0), at(11, 0), Some("m1"))
        .unwrap();

    assert!(availability.is_available);
}

#[test]
fn test_find_available_rooms_sorted_by_name() {
    let store: InMemoryStore = InMemoryStore::new();
    store.add_room(create_test_room("room-2", "Borealis", 6)).unwrap();
    store.add_room(create_test_room("room-1", "Aurora", 8)).unwrap();
    store
        .add_meeting(create_room_meeting("m1", "room-1", at(10, 0), 60))
        .unwrap();
    let service: RoomAvailabilityService = service_with(store);

    let free: Vec<Room> = service.find_available_rooms(at(10, 0), at(11, 0)).unwrap();
    assert_eq!(free.len(), 1);
    assert_eq!(free[0].id, "room-2");

    let later: Vec<Room> = service.find_available_rooms(at(14, 0), at(15, 0)).unwrap();
    let names: Vec<&str> = later.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Aurora", "Borealis"]);
}

#[test]
fn test_inactive_rooms_are_never_offered() {
    let store: InMemoryStore = InMemoryStore::new();
    let mut retired: Room = create_test_room("room-9", "Mothballed", 20);
    retired.is_active = false;
    store.add_room(retired).unwrap();
    let service: RoomAvailabilityService = service_with(store);

    let free: Vec<Room> = service.find_available_rooms(at(10, 0), at(11, 0)).unwrap();

    assert!(free.is_empty());
}

#[test]
fn test_optimal_rooms_prefer_tight_fit_and_exclude_too_small() {
    let store: InMemoryStore = InMemoryStore::new();
    // 6 participants: tiny excluded, snug (ratio 0.75) beats huge (0.06).
    store.add_room(create_test_room("tiny", "Closet", 4)).unwrap();
    store.add_room(create_test_room("snug", "Snug", 8)).unwrap();
    store.add_room(create_test_room("huge", "Ballroom", 100)).unwrap();
    let service: RoomAvailabilityService = service_with(store);

    let ranked: Vec<Room> = service
        .find_optimal_rooms(at(10, 0), at(11, 0), 6, None)
        .unwrap();

    let ids: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["snug", "huge"]);
}

#[test]
fn test_optimal_rooms_location_bonus_breaks_ties() {
    let store: InMemoryStore = InMemoryStore::new();
    let mut east: Room = create_test_room("east", "East Wing", 10);
    east.location = Some(String::from("Building B, Floor 2"));
    let west: Room = create_test_room("west", "West Wing", 10);
    store.add_room(east).unwrap();
    store.add_room(west).unwrap();
    let service: RoomAvailabilityService = service_with(store);

    let ranked: Vec<Room> = service
        .find_optimal_rooms(at(10, 0), at(11, 0), 6, Some("building b"))
        .unwrap();

    assert_eq!(ranked[0].id, "east");
}

#[test]
fn test_optimal_rooms_caps_at_five() {
    let store: InMemoryStore = InMemoryStore::new();
    for i in 0..7 {
        store
            .add_room(create_test_room(&format!("room-{i}"), &format!("Room {i}"), 10))
            .unwrap();
    }
    let service: RoomAvailabilityService = service_with(store);

    let ranked: Vec<Room> = service
        .find_optimal_rooms(at(10, 0), at(11, 0), 6, None)
        .unwrap();

    assert_eq!(ranked.len(), 5);
}

#[test]
fn test_utilization_math_over_one_day() {
    let store: InMemoryStore = InMemoryStore::new();
    store.add_room(create_test_room("room-1", "Aurora", 8)).unwrap();
    store
        .add_meeting(create_room_meeting("m1", "room-1", at(10, 0), 60))
        .unwrap();
    store
        .add_meeting(create_room_meeting("m2", "room-1", at(13, 0), 120))
        .unwrap();
    let service: RoomAvailabilityService = service_with(store);

    let utilization: RoomUtilization = service
        .get_utilization("room-1", meeting_day(), meeting_day())
        .unwrap();

    assert!((utilization.total_hours - 8.0).abs() < f64::EPSILON);
    assert!((utilization.booked_hours - 3.0).abs() < f64::EPSILON);
    assert_eq!(utilization.meeting_count, 2);
    assert!((utilization.utilization_percentage - 37.5).abs() < 1e-9);
}

#[test]
fn test_utilization_for_unknown_room_is_an_error() {
    let service: RoomAvailabilityService = service_with(InMemoryStore::new());

    let result = service.get_utilization("nope", meeting_day(), meeting_day());

    assert!(matches!(result, Err(EngineError::RoomNotFound(_))));
}

#[test]
fn test_conflict_info_for_free_room_is_none() {
    let store: InMemoryStore = InMemoryStore::new();
    store.add_room(create_test_room("room-1", "Aurora", 8)).unwrap();
    let service: RoomAvailabilityService = service_with(store);

    let conflict = service
        .generate_conflict_info("room-1", at(10, 0), at(11, 0), None)
        .unwrap();

    assert!(conflict.is_none());
}

#[test]
fn test_conflict_info_carries_alternatives_and_time_hints() {
    let store: InMemoryStore = InMemoryStore::new();
    store.add_room(create_test_room("room-1", "Aurora", 8)).unwrap();
    store.add_room(create_test_room("room-2", "Borealis", 6)).unwrap();
    store
        .add_meeting(create_room_meeting("m1", "room-1", at(10, 30), 60))
        .unwrap();
    let service: RoomAvailabilityService = service_with(store);

    let conflict = service
        .generate_conflict_info("room-1", at(10, 0), at(11, 0), None)
        .unwrap()
        .unwrap();

    assert_eq!(conflict.kind, ConflictKind::RoomConflict);
    assert!(conflict.is_blocking());
    assert_eq!(conflict.resource_id.as_deref(), Some("room-1"));
    assert_eq!(conflict.conflicting_meetings.len(), 1);
    assert!(conflict.suggestions.iter().any(|s| s.contains("Borealis")));
    // Earlier slot 09:30 and later slot 11:30 are both in the future.
    assert!(conflict.suggestions.iter().any(|s| s.contains("09:30")));
    assert!(conflict.suggestions.iter().any(|s| s.contains("11:30")));
}
