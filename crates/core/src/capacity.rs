// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::clock::Clock;
use crate::error::EngineError;
use chrono::{DateTime, Duration, Utc};
use confab_domain::{
    MeetingSummary, ScheduledMeeting, ZOOM_MAX_CONCURRENT_MEETINGS, ZoomAccount,
};
use confab_store::MeetingStore;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// How long the cached account list stays fresh.
pub const ACCOUNT_CACHE_TTL_SECS: i64 = 300;

/// Aggregate capacity across every videoconferencing account for one
/// interval.
///
/// A report with `total_accounts == 0` means no accounts are configured at
/// all, which is distinct from "all accounts full": both refuse capacity but
/// the remediation differs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityReport {
    /// True iff some account still has a free slot for the interval.
    pub has_available_account: bool,
    /// Number of active accounts.
    pub total_accounts: usize,
    /// `total_accounts × 2`.
    pub total_max_concurrent: u32,
    /// Videoconferencing meetings already occupying slots in the interval.
    pub current_total_usage: u32,
    /// `total_max_concurrent − current_total_usage`, floored at zero.
    pub available_slots: u32,
    /// The first account with spare capacity, if any.
    pub suggested_account: Option<ZoomAccount>,
    /// The overlapping videoconferencing meetings that were counted.
    pub conflicting_meetings: Vec<MeetingSummary>,
}

impl CapacityReport {
    /// The report for a system with no accounts configured.
    fn no_accounts() -> Self {
        Self {
            has_available_account: false,
            total_accounts: 0,
            total_max_concurrent: 0,
            current_total_usage: 0,
            available_slots: 0,
            suggested_account: None,
            conflicting_meetings: Vec::new(),
        }
    }
}

/// Per-account load, used as the load-balancing hint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountLoadInfo {
    /// The account identifier.
    pub account_id: String,
    /// Meetings the account is hosting right now.
    pub current_load: u32,
    /// The fixed per-account limit.
    pub max_capacity: u32,
    /// `current_load / max_capacity × 100`.
    pub utilization_percentage: f64,
}

/// Read-only view of the account cache, exposed for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCacheStats {
    /// Number of cached accounts.
    pub size: usize,
    /// When the cache was last refreshed from the store, if ever.
    pub last_updated: Option<DateTime<Utc>>,
    /// Whether the next read will refresh from the store.
    pub is_expired: bool,
}

#[derive(Debug, Default)]
struct AccountCache {
    accounts: Vec<ZoomAccount>,
    fetched_at: Option<DateTime<Utc>>,
}

/// Concurrency accounting across the videoconferencing account pool.
///
/// Accounts are interchangeable capacity units; no account is considered
/// assigned to a meeting until one is chosen at booking time.
pub struct ZoomCapacityService {
    store: Arc<dyn MeetingStore>,
    clock: Arc<dyn Clock>,
    cache: Mutex<AccountCache>,
    ttl: Duration,
}

impl ZoomCapacityService {
    /// Creates a capacity service over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn MeetingStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            cache: Mutex::new(AccountCache::default()),
            ttl: Duration::seconds(ACCOUNT_CACHE_TTL_SECS),
        }
    }

    /// Returns the active accounts, refreshing the cache from the store when
    /// stale.
    ///
    /// # Errors
    ///
    /// Returns a store error if the refresh fails. A failed refresh is never
    /// silently replaced with stale data: capacity must not be claimed when
    /// it cannot be verified.
    pub fn list_available_accounts(&self) -> Result<Vec<ZoomAccount>, EngineError> {
        let now: DateTime<Utc> = self.clock.now();
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);

        let fresh: bool = cache
            .fetched_at
            .is_some_and(|fetched| now - fetched < self.ttl);
        if !fresh {
            let accounts: Vec<ZoomAccount> = self.store.list_active_accounts()?;
            debug!(count = accounts.len(), "refreshed account cache");
            cache.accounts = accounts;
            cache.fetched_at = Some(now);
        }

        Ok(cache.accounts.clone())
    }

    /// Computes the aggregate capacity picture for `[start, end)`.
    ///
    /// `exclude_meeting_id` is the meeting being edited, if any; its own
    /// slot must not count against the pool.
    ///
    /// # Errors
    ///
    /// Returns a store error if either the account list or the overlap query
    /// fails.
    pub fn check_capacity(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_meeting_id: Option<&str>,
    ) -> Result<CapacityReport, EngineError> {
        let accounts: Vec<ZoomAccount> = self.list_available_accounts()?;
        if accounts.is_empty() {
            return Ok(CapacityReport::no_accounts());
        }

        let overlapping: Vec<ScheduledMeeting> =
            self.store.find_zoom_overlaps(start, end, exclude_meeting_id)?;

        // Tally usage per active account. Meetings hosted on accounts no
        // longer in the pool do not consume pool capacity.
        let mut usage: HashMap<&str, u32> = HashMap::new();
        let mut counted: Vec<MeetingSummary> = Vec::new();
        for meeting in &overlapping {
            if let Some(account_id) = meeting.zoom_account_id.as_deref()
                && accounts.iter().any(|a| a.id == account_id)
            {
                *usage.entry(account_id).or_insert(0) += 1;
                counted.push(meeting.summary());
            }
        }

        let total_accounts: usize = accounts.len();
        let total_max_concurrent: u32 =
            u32::try_from(total_accounts).unwrap_or(u32::MAX) * ZOOM_MAX_CONCURRENT_MEETINGS;
        let current_total_usage: u32 = usage.values().sum();
        let available_slots: u32 = total_max_concurrent.saturating_sub(current_total_usage);

        let suggested_account: Option<ZoomAccount> = accounts
            .iter()
            .find(|account| {
                usage.get(account.id.as_str()).copied().unwrap_or(0)
                    < ZOOM_MAX_CONCURRENT_MEETINGS
            })
            .cloned();

        Ok(CapacityReport {
            has_available_account: suggested_account.is_some(),
            total_accounts,
            total_max_concurrent,
            current_total_usage,
            available_slots,
            suggested_account,
            conflicting_meetings: counted,
        })
    }

    /// Returns an account with spare capacity for `[start, end)`, or `None`.
    ///
    /// # Errors
    ///
    /// Returns a store error if the capacity check fails.
    pub fn find_available_account(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<ZoomAccount>, EngineError> {
        Ok(self.check_capacity(start, end, None)?.suggested_account)
    }

    /// Returns per-account load sorted ascending by utilization: schedule
    /// onto the first entry to balance load.
    ///
    /// Load is measured over a one-second probe window anchored at the
    /// clock's current instant.
    ///
    /// # Errors
    ///
    /// Returns a store error if any query fails.
    pub fn get_load_balancing(&self) -> Result<Vec<AccountLoadInfo>, EngineError> {
        let accounts: Vec<ZoomAccount> = self.list_available_accounts()?;
        let now: DateTime<Utc> = self.clock.now();
        let active: Vec<ScheduledMeeting> =
            self.store
                .find_zoom_overlaps(now, now + Duration::seconds(1), None)?;

        let mut load: Vec<AccountLoadInfo> = accounts
            .into_iter()
            .map(|account| {
                let current_load: u32 = u32::try_from(
                    active
                        .iter()
                        .filter(|m| m.zoom_account_id.as_deref() == Some(account.id.as_str()))
                        .count(),
                )
                .unwrap_or(u32::MAX);
                AccountLoadInfo {
                    account_id: account.id,
                    current_load,
                    max_capacity: ZOOM_MAX_CONCURRENT_MEETINGS,
                    utilization_percentage: f64::from(current_load)
                        / f64::from(ZOOM_MAX_CONCURRENT_MEETINGS)
                        * 100.0,
                }
            })
            .collect();

        load.sort_by(|a, b| {
            a.utilization_percentage
                .partial_cmp(&b.utilization_percentage)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.account_id.cmp(&b.account_id))
        });
        Ok(load)
    }

    /// Counts the meetings hosted by `account_id` that overlap
    /// `[start, end)`, excluding `exclude_meeting_id` if given.
    ///
    /// # Errors
    ///
    /// Returns a store error if the query fails.
    pub fn count_concurrent_meetings(
        &self,
        account_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_meeting_id: Option<&str>,
    ) -> Result<u32, EngineError> {
        let overlapping: Vec<ScheduledMeeting> =
            self.store.find_zoom_overlaps(start, end, exclude_meeting_id)?;
        Ok(u32::try_from(
            overlapping
                .iter()
                .filter(|m| m.zoom_account_id.as_deref() == Some(account_id))
                .count(),
        )
        .unwrap_or(u32::MAX))
    }

    /// Drops the cached account list; the next read refreshes from the
    /// store.
    pub fn invalidate(&self) {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache.accounts.clear();
        cache.fetched_at = None;
    }

    /// Read-only cache statistics.
    #[must_use]
    pub fn cache_stats(&self) -> AccountCacheStats {
        let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let now: DateTime<Utc> = self.clock.now();
        AccountCacheStats {
            size: cache.accounts.len(),
            last_updated: cache.fetched_at,
            is_expired: !cache
                .fetched_at
                .is_some_and(|fetched| now - fetched < self.ttl),
        }
    }
}
