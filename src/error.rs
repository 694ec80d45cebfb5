// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `RvcSync` library.
//!
//! This module provides the error hierarchy for handling failures across
//! the library: value validation, telemetry payload parsing, and rejected
//! delegate calls into the framework.

use thiserror::Error;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when feeding
/// telemetry through a device session.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while parsing a telemetry payload.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A delegated write or event emission was rejected by the framework.
    #[error("delegate error: {0}")]
    Delegate(#[from] DelegateError),
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A battery percentage is outside the valid range (0-100).
    #[error("battery percent {0} is out of range [0, 100]")]
    InvalidBatteryPercent(u8),

    /// An operational state code is not part of the known set.
    #[error("unknown operational state code: {0:#04x}")]
    UnknownOperationalState(u8),

    /// An error state identifier is not part of the known set.
    #[error("unknown error state id: {0:#04x}")]
    UnknownErrorState(u8),

    /// A run mode number is not part of the known set.
    #[error("unknown run mode: {0}")]
    UnknownRunMode(u8),
}

/// Errors related to parsing telemetry payloads.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field was present but carried an invalid value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// Errors reported by the framework delegates.
///
/// The library never retries a rejected delegate call; the error is
/// propagated to whoever invoked the session entry point.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DelegateError {
    /// The attribute-storage collaborator rejected a write.
    #[error("attribute write rejected for {cluster}/{attribute}: {message}")]
    WriteRejected {
        /// Canonical key of the target cluster.
        cluster: String,
        /// Name of the target attribute.
        attribute: String,
        /// Description of the rejection.
        message: String,
    },

    /// The framework collaborator rejected an event emission.
    #[error("event emission rejected for {cluster}/{event}: {message}")]
    EmitRejected {
        /// Canonical key of the target cluster.
        cluster: String,
        /// Name of the rejected event.
        event: String,
        /// Description of the rejection.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
