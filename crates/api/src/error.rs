// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use confab_engine::EngineError;

/// API-level errors.
///
/// These are distinct from engine errors and represent the API contract.
/// Validation findings about a draft are never errors; they travel inside
/// the validation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The referenced room does not exist.
    RoomNotFound {
        /// The room identifier that was requested.
        room_id: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The backing store could not be reached.
    ServiceUnavailable {
        /// A human-readable description of the failure.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RoomNotFound { room_id } => {
                write!(f, "Room '{room_id}' not found")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ServiceUnavailable { message } => {
                write!(f, "Service unavailable: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates an engine error into an API error.
///
/// This translation is explicit so engine internals are never leaked
/// directly.
pub(crate) fn translate_engine_error(err: EngineError) -> ApiError {
    match err {
        EngineError::RoomNotFound(room_id) => ApiError::RoomNotFound { room_id },
        EngineError::Store(store_err) => ApiError::ServiceUnavailable {
            message: store_err.to_string(),
        },
        EngineError::Internal(message) => ApiError::ServiceUnavailable { message },
    }
}
