// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while interpreting domain data.
///
/// Validation findings about a draft are reported as [`crate::Conflict`]
/// values, not errors; this type covers data that cannot be interpreted at
/// all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The meeting type string is not a recognized variant.
    InvalidMeetingType(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMeetingType(value) => {
                write!(
                    f,
                    "Unknown meeting type '{value}': expected offline, hybrid, or online"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
