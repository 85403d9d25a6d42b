// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use confab_store::StoreError;
use thiserror::Error;

/// Errors that can cross a service boundary inside the engine.
///
/// The orchestrator itself never lets these escape `validate_meeting`; it
/// renders them as blocking conflicts instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The referenced room does not exist. Not retry-safe without changing
    /// the reference.
    #[error("Room '{0}' not found")]
    RoomNotFound(String),
    /// The store could not be queried. Recoverable; retry-safe.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// An invariant inside the engine was violated.
    #[error("Internal engine error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Returns whether retrying the same call may succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Store(err) => err.is_retryable(),
            Self::RoomNotFound(_) | Self::Internal(_) => false,
        }
    }
}
