// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Duration, Utc};
use confab_domain::{MeetingDraft, ValidationOutcome};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// How long a cached validation result stays fresh.
pub const VALIDATION_CACHE_TTL_SECS: i64 = 60;

/// Read-only view of the validation cache, exposed for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Number of stored entries, expired ones included.
    pub size: usize,
    /// Timestamp of the oldest stored entry, if any.
    pub oldest_entry: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    outcome: ValidationOutcome,
    stored_at: DateTime<Utc>,
}

/// TTL cache for validation results, keyed by the draft's salient fields.
///
/// Entries expire by TTL only; expired entries are treated as missing and
/// dropped lazily on lookup.
#[derive(Debug)]
pub(crate) struct ValidationCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl ValidationCache {
    pub(crate) fn new(ttl_secs: i64) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Builds the canonical cache key for a draft.
    ///
    /// Participants are sorted so two drafts differing only in participant
    /// order share an entry. The exclusion id participates in the key
    /// because it changes what counts as a conflict.
    pub(crate) fn key_for(draft: &MeetingDraft, exclude_meeting_id: Option<&str>) -> String {
        let mut participants: Vec<String> = draft.participants.clone();
        participants.sort();
        format!(
            "v1|title={}|date={}|time={}|dur={}|type={}|zoom={}|room={}|excl={}|part={}",
            draft.title,
            draft.date.map_or_else(String::new, |d| d.to_string()),
            draft.time,
            draft.duration_minutes,
            draft.meeting_type,
            draft.is_zoom_meeting,
            draft.selected_room().unwrap_or_default(),
            exclude_meeting_id.unwrap_or_default(),
            participants.join(","),
        )
    }

    pub(crate) fn get(&self, key: &str, now: DateTime<Utc>) -> Option<ValidationOutcome> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get(key) {
            Some(entry) if now - entry.stored_at < self.ttl => Some(entry.outcome.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub(crate) fn insert(&self, key: String, outcome: ValidationOutcome, now: DateTime<Utc>) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(
            key,
            CacheEntry {
                outcome,
                stored_at: now,
            },
        );
    }

    pub(crate) fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }

    pub(crate) fn stats(&self) -> CacheStats {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        CacheStats {
            size: entries.len(),
            oldest_entry: entries.values().map(|e| e.stored_at).min(),
        }
    }
}
