// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::cache::{CacheStats, VALIDATION_CACHE_TTL_SECS, ValidationCache};
use crate::capacity::{CapacityReport, ZoomCapacityService};
use crate::clock::Clock;
use crate::error::EngineError;
use crate::events::{EngineEvent, ListenerRegistry, SubscriptionId};
use crate::resolution::ConflictResolutionService;
use crate::rooms::RoomAvailabilityService;
use chrono::{DateTime, Utc};
use confab_domain::{
    Conflict, ConflictKind, MeetingDraft, MeetingType, Suggestion, ValidationOutcome, ZoomAccount,
    validate_draft,
};
use confab_store::MeetingStore;
use std::sync::Arc;
use tracing::{debug, info};

/// The orchestrator: runs the fixed validation pipeline per request, caches
/// results, and notifies subscribers of changes.
///
/// `validate_meeting` never fails: worst case it returns a single blocking
/// conflict describing the internal failure.
pub struct ConflictDetectionEngine {
    rooms: Arc<RoomAvailabilityService>,
    capacity: Arc<ZoomCapacityService>,
    resolution: ConflictResolutionService,
    cache: ValidationCache,
    listeners: ListenerRegistry,
    clock: Arc<dyn Clock>,
}

impl ConflictDetectionEngine {
    /// Builds an engine and its services over `store`, sharing `clock`.
    #[must_use]
    pub fn new(store: Arc<dyn MeetingStore>, clock: Arc<dyn Clock>) -> Self {
        let rooms: Arc<RoomAvailabilityService> = Arc::new(RoomAvailabilityService::new(
            Arc::clone(&store),
            Arc::clone(&clock),
        ));
        let capacity: Arc<ZoomCapacityService> = Arc::new(ZoomCapacityService::new(
            Arc::clone(&store),
            Arc::clone(&clock),
        ));
        let resolution: ConflictResolutionService =
            ConflictResolutionService::new(Arc::clone(&rooms), Arc::clone(&capacity));

        Self {
            rooms,
            capacity,
            resolution,
            cache: ValidationCache::new(VALIDATION_CACHE_TTL_SECS),
            listeners: ListenerRegistry::new(),
            clock,
        }
    }

    /// Validates a draft end to end.
    ///
    /// Pipeline: cache lookup → type rules → room availability (if a room
    /// is selected) → videoconferencing capacity (if requested and the type
    /// uses it) → suggestion generation → cache store → event emission.
    ///
    /// `exclude_meeting_id` is the meeting being edited, if any; it is
    /// excluded from every overlap and capacity count.
    pub fn validate_meeting(
        &self,
        draft: &MeetingDraft,
        exclude_meeting_id: Option<&str>,
    ) -> ValidationOutcome {
        let now: DateTime<Utc> = self.clock.now();
        let key: String = ValidationCache::key_for(draft, exclude_meeting_id);

        if let Some(cached) = self.cache.get(&key, now) {
            debug!("validation served from cache");
            return cached;
        }

        let mut conflicts: Vec<Conflict> = validate_draft(draft, now).conflicts;

        if let (Some(room_id), Some((start, end))) = (draft.selected_room(), draft.interval()) {
            conflicts.extend(self.check_room(room_id, start, end, exclude_meeting_id));
        }

        let uses_zoom: bool = draft.is_zoom_meeting
            && matches!(
                draft.parsed_type(),
                Ok(MeetingType::Online | MeetingType::Hybrid)
            );
        if uses_zoom
            && let Some((start, end)) = draft.interval()
        {
            conflicts.extend(self.check_zoom_capacity(start, end, exclude_meeting_id));
        }

        let suggestions: Vec<Suggestion> = self.resolution.prioritize_suggestions(
            self.resolution
                .generate_suggestions(&conflicts, draft, exclude_meeting_id),
        );

        let outcome: ValidationOutcome = ValidationOutcome::new(conflicts, suggestions);
        self.cache.insert(key, outcome.clone(), now);

        if outcome.conflicts.is_empty() {
            self.listeners.emit(&EngineEvent::ConflictResolved);
        } else {
            self.listeners.emit(&EngineEvent::ConflictDetected {
                conflicts: outcome.conflicts.clone(),
            });
        }

        outcome
    }

    /// The pool of capacity providers changed: every cached validation may
    /// now be wrong in either direction, so drop them all before returning.
    pub fn update_capacity_limits(&self, accounts: &[ZoomAccount]) {
        info!(total = accounts.len(), "capacity pool changed; clearing caches");
        self.capacity.invalidate();
        self.cache.clear();
        self.listeners.emit(&EngineEvent::CapacityUpdated {
            total_accounts: accounts.len(),
        });
    }

    /// Drops every cached validation result.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Read-only validation-cache statistics.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Registers a listener for engine events.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&EngineEvent) + Send + Sync + 'static,
    {
        self.listeners.subscribe(handler)
    }

    /// Removes one listener without affecting others. Returns whether it
    /// was registered.
    pub fn unsubscribe(&self, subscription: SubscriptionId) -> bool {
        self.listeners.unsubscribe(subscription)
    }

    /// The room availability service, for observability endpoints.
    #[must_use]
    pub fn rooms(&self) -> &RoomAvailabilityService {
        &self.rooms
    }

    /// The account capacity service, for observability endpoints.
    #[must_use]
    pub fn capacity(&self) -> &ZoomCapacityService {
        &self.capacity
    }

    fn check_room(
        &self,
        room_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_meeting_id: Option<&str>,
    ) -> Vec<Conflict> {
        match self
            .rooms
            .generate_conflict_info(room_id, start, end, exclude_meeting_id)
        {
            Ok(Some(conflict)) => vec![conflict],
            Ok(None) => Vec::new(),
            Err(EngineError::RoomNotFound(_)) => vec![
                Conflict::error(
                    ConflictKind::RoomConflict,
                    "The selected room no longer exists",
                )
                .with_resource(room_id),
            ],
            Err(_) => vec![
                Conflict::error(
                    ConflictKind::RoomConflict,
                    "Could not verify room availability. Please try again.",
                )
                .with_resource(room_id),
            ],
        }
    }

    fn check_zoom_capacity(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_meeting_id: Option<&str>,
    ) -> Vec<Conflict> {
        let report: CapacityReport =
            match self.capacity.check_capacity(start, end, exclude_meeting_id) {
                Ok(report) => report,
                // A failed capacity check must never silently claim
                // capacity exists.
                Err(_) => {
                    return vec![Conflict::error(
                        ConflictKind::ZoomCapacity,
                        "Could not verify videoconferencing capacity. Please try again.",
                    )];
                }
            };

        if report.has_available_account {
            return Vec::new();
        }

        if report.total_accounts == 0 {
            return vec![
                Conflict::error(
                    ConflictKind::ZoomCapacity,
                    "No videoconferencing accounts are configured",
                )
                .with_suggestions(vec![
                    String::from("Ask an administrator to add a videoconferencing account"),
                    String::from("Switch to an in-person meeting"),
                ]),
            ];
        }

        vec![
            Conflict::error(
                ConflictKind::ZoomCapacity,
                format!(
                    "All {} videoconferencing account(s) are at capacity in this time slot",
                    report.total_accounts
                ),
            )
            .with_meetings(report.conflicting_meetings)
            .with_suggestions(vec![
                String::from("Try a later start time"),
                String::from("Switch to an in-person meeting"),
            ]),
        ]
    }
}

impl std::fmt::Debug for ConflictDetectionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConflictDetectionEngine")
            .field("cache", &self.cache.stats())
            .finish_non_exhaustive()
    }
}
