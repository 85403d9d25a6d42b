// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A query could not be executed.
    QueryFailed(String),
    /// The storage backend is unreachable or unavailable.
    Unavailable(String),
}

impl StoreError {
    /// Returns whether retrying the same call may succeed.
    ///
    /// Both variants describe infrastructure trouble rather than bad
    /// references, so the answer is currently always true; callers should
    /// still branch on this rather than assume it.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::QueryFailed(_) | Self::Unavailable(_))
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::Unavailable(msg) => write!(f, "Store unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}
