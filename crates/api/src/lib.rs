// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Confab conflict detection engine.
//!
//! Functions here translate wire-shaped requests into domain types, run the
//! engine, and translate results back. Engine errors never cross this
//! boundary untranslated. Validation findings about a draft are data, not
//! errors: a draft riddled with conflicts still produces `Ok`.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::ApiError;
pub use request_response::{
    AccountLoadResponse, CacheStatsResponse, ClearCacheResponse, RefreshAccountsResponse,
    RoomUtilizationResponse, ValidateMeetingRequest, ValidationResponse,
};

use chrono::NaiveDate;
use confab_domain::{MeetingDraft, ValidationOutcome, ZoomAccount};
use confab_engine::{ConflictDetectionEngine, RoomUtilization};
use error::translate_engine_error;
use tracing::info;

/// Validates a draft meeting.
///
/// This operation never fails: malformed drafts produce conflicts, and
/// internal failures surface as blocking conflicts inside the response.
#[must_use]
pub fn validate_meeting(
    engine: &ConflictDetectionEngine,
    request: ValidateMeetingRequest,
) -> ValidationResponse {
    let (draft, exclude_meeting_id): (MeetingDraft, Option<String>) = request.into_draft();
    let outcome: ValidationOutcome =
        engine.validate_meeting(&draft, exclude_meeting_id.as_deref());
    outcome.into()
}

/// Reads the engine's cache statistics. Never fails.
#[must_use]
pub fn cache_stats(engine: &ConflictDetectionEngine) -> CacheStatsResponse {
    CacheStatsResponse {
        validation: engine.cache_stats(),
        accounts: engine.capacity().cache_stats(),
    }
}

/// Drops every cached validation result.
#[must_use]
pub fn clear_cache(engine: &ConflictDetectionEngine) -> ClearCacheResponse {
    engine.clear_cache();
    info!("validation cache cleared via api");
    ClearCacheResponse {
        message: String::from("Validation cache cleared"),
    }
}

/// Returns per-account videoconferencing load, least loaded first.
///
/// # Errors
///
/// Returns `ApiError::ServiceUnavailable` if the store cannot be queried.
pub fn account_load(engine: &ConflictDetectionEngine) -> Result<AccountLoadResponse, ApiError> {
    let accounts = engine
        .capacity()
        .get_load_balancing()
        .map_err(translate_engine_error)?;
    Ok(AccountLoadResponse { accounts })
}

/// Re-reads the account pool from the store and invalidates every cached
/// validation that may depend on it.
///
/// # Errors
///
/// Returns `ApiError::ServiceUnavailable` if the store cannot be queried.
pub fn refresh_accounts(
    engine: &ConflictDetectionEngine,
) -> Result<RefreshAccountsResponse, ApiError> {
    engine.capacity().invalidate();
    let accounts: Vec<ZoomAccount> = engine
        .capacity()
        .list_available_accounts()
        .map_err(translate_engine_error)?;
    engine.update_capacity_limits(&accounts);

    Ok(RefreshAccountsResponse {
        total_accounts: accounts.len(),
        message: format!("Account pool refreshed ({} active)", accounts.len()),
    })
}

/// Computes booking statistics for a room over an inclusive date range.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the range is reversed,
/// `ApiError::RoomNotFound` if the room does not exist, or
/// `ApiError::ServiceUnavailable` if the store cannot be queried.
pub fn room_utilization(
    engine: &ConflictDetectionEngine,
    room_id: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<RoomUtilizationResponse, ApiError> {
    if end_date < start_date {
        return Err(ApiError::InvalidInput {
            field: String::from("endDate"),
            message: String::from("end date must not precede start date"),
        });
    }

    let utilization: RoomUtilization = engine
        .rooms()
        .get_utilization(room_id, start_date, end_date)
        .map_err(translate_engine_error)?;

    Ok(RoomUtilizationResponse {
        room_id: room_id.to_string(),
        start_date,
        end_date,
        utilization,
    })
}
