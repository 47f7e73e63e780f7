//! Error types for the Vitrine store.
//!
//! Uses `thiserror` for ergonomic error definition. Schema and handle
//! contract violations are programming errors and fail loudly; missing
//! event input is not represented here at all — producers record it as
//! data in the conventional errors table instead.

use thiserror::Error;

use crate::types::ValueKind;

/// Convenience result type for Vitrine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for store and producer operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A value of the wrong kind was written to a column, or a column
    /// default did not match its declared kind.
    #[error("type mismatch on column {column}: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Name of the column being written.
        column: String,
        /// The column's declared kind.
        expected: ValueKind,
        /// The kind of the offered value.
        actual: ValueKind,
    },

    /// A column was redeclared under the same name with a different kind.
    #[error(
        "schema conflict on {table}.{column}: declared as {existing}, redeclared as {requested}"
    )]
    SchemaConflict {
        /// Name of the table.
        table: String,
        /// Name of the conflicting column.
        column: String,
        /// Kind of the existing declaration.
        existing: ValueKind,
        /// Kind of the rejected redeclaration.
        requested: ValueKind,
    },

    /// A handle was used against a store or table that did not issue it,
    /// or references a row that does not exist.
    #[error("handle mismatch: {detail}")]
    HandleMismatch {
        /// Human-readable diagnosis including the offending handle.
        detail: String,
    },

    /// A handle issued before the store's last reset was used.
    #[error("stale handle: {detail}")]
    StaleHandle {
        /// Human-readable diagnosis including the offending handle.
        detail: String,
    },

    /// A producer ran without a store available for the event.
    ///
    /// This is a configuration error: it aborts the producer and
    /// propagates, because continuing would write into nothing.
    #[error("{producer} requires the {service} service which is not available for this event")]
    MissingService {
        /// The producer that failed to resolve its store.
        producer: String,
        /// The service that was unavailable.
        service: String,
    },
}

impl Error {
    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(column: impl Into<String>, expected: ValueKind, actual: ValueKind) -> Self {
        Self::TypeMismatch {
            column: column.into(),
            expected,
            actual,
        }
    }

    /// Creates a schema conflict error.
    #[must_use]
    pub fn schema_conflict(
        table: impl Into<String>,
        column: impl Into<String>,
        existing: ValueKind,
        requested: ValueKind,
    ) -> Self {
        Self::SchemaConflict {
            table: table.into(),
            column: column.into(),
            existing,
            requested,
        }
    }

    /// Creates a handle mismatch error.
    #[must_use]
    pub fn handle_mismatch(detail: impl Into<String>) -> Self {
        Self::HandleMismatch {
            detail: detail.into(),
        }
    }

    /// Creates a stale handle error.
    #[must_use]
    pub fn stale_handle(detail: impl Into<String>) -> Self {
        Self::StaleHandle {
            detail: detail.into(),
        }
    }

    /// Creates a missing service (configuration) error.
    #[must_use]
    pub fn missing_service(producer: impl Into<String>, service: impl Into<String>) -> Self {
        Self::MissingService {
            producer: producer.into(),
            service: service.into(),
        }
    }
}
