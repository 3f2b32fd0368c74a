//! Identifier types for the board domain.
//!
//! The REST API hands out positive integer keys for every resource. Drag and
//! drop payloads carry those keys as loosely typed numbers, so each identifier
//! offers both a validating constructor and a lenient [`from_raw`] variant
//! for UI boundaries.
//!
//! [`from_raw`]: TaskId::from_raw

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! positive_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(u64);

        impl $name {
            /// Creates a validated identifier.
            ///
            /// # Errors
            ///
            /// Returns [`BoardDomainError::InvalidId`] when the value is not
            /// strictly positive.
            pub const fn new(value: i64) -> Result<Self, BoardDomainError> {
                if value <= 0 {
                    return Err(BoardDomainError::InvalidId { kind: $kind, value });
                }
                Ok(Self(value.unsigned_abs()))
            }

            /// Converts an untrusted raw value, discarding invalid ones.
            #[must_use]
            pub fn from_raw(value: i64) -> Option<Self> {
                Self::new(value).ok()
            }

            /// Returns the underlying numeric value.
            #[must_use]
            pub const fn value(self) -> u64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = BoardDomainError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                // Construction only admits values from 1 to i64::MAX.
                i64::try_from(id.0).unwrap_or(i64::MAX)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

positive_id!(
    /// Identifier of a task record.
    TaskId,
    "task"
);

positive_id!(
    /// Identifier of a board column (task status). Doubles as the drop-target
    /// key during drag and drop.
    ColumnId,
    "column"
);

positive_id!(
    /// Identifier of the project that owns a board.
    ProjectId,
    "project"
);

positive_id!(
    /// Identifier of a user who may own tasks.
    UserId,
    "user"
);
