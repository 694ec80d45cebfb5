// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operational state codes and point-in-time snapshots.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

use super::ErrorState;

/// Operational state of the vacuum, as reported to the framework.
///
/// The numeric codes follow the RVC Operational State cluster value space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum OperationalStateCode {
    /// The appliance is stopped.
    Stopped,
    /// The appliance is running a cleaning operation.
    Running,
    /// The current operation is paused.
    Paused,
    /// The appliance is in an error state.
    Error,
    /// The appliance is on its way back to the charging dock.
    SeekingCharger,
    /// The appliance is charging.
    Charging,
    /// The appliance is docked and idle.
    Docked,
}

impl OperationalStateCode {
    /// Returns the numeric state code used on the wire.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Stopped => 0x00,
            Self::Running => 0x01,
            Self::Paused => 0x02,
            Self::Error => 0x03,
            Self::SeekingCharger => 0x40,
            Self::Charging => 0x41,
            Self::Docked => 0x42,
        }
    }

    /// Parses a numeric state code.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::UnknownOperationalState`] for codes outside
    /// the known set.
    pub const fn from_u8(code: u8) -> Result<Self, ValueError> {
        match code {
            0x00 => Ok(Self::Stopped),
            0x01 => Ok(Self::Running),
            0x02 => Ok(Self::Paused),
            0x03 => Ok(Self::Error),
            0x40 => Ok(Self::SeekingCharger),
            0x41 => Ok(Self::Charging),
            0x42 => Ok(Self::Docked),
            other => Err(ValueError::UnknownOperationalState(other)),
        }
    }

    /// Returns `true` for states that count as an active operation.
    ///
    /// A paused run and the trip back to the dock still belong to the
    /// operation that started it, so a completion edge only fires once the
    /// appliance leaves this whole group.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::Paused | Self::SeekingCharger)
    }
}

impl fmt::Display for OperationalStateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<OperationalStateCode> for u8 {
    fn from(code: OperationalStateCode) -> Self {
        code.as_u8()
    }
}

impl TryFrom<u8> for OperationalStateCode {
    type Error = ValueError;

    fn try_from(code: u8) -> Result<Self, ValueError> {
        Self::from_u8(code)
    }
}

/// One point-in-time composite reading of the appliance's operation.
///
/// A snapshot is self-contained: the state code, the activity flag, and
/// the error descriptor all describe the same instant. The edge detector
/// only ever compares successive snapshots of the same device.
///
/// # Examples
///
/// ```
/// use rvcsync_lib::types::{ErrorState, OperationalSnapshot, OperationalStateCode};
///
/// let snapshot = OperationalSnapshot::from_code(
///     OperationalStateCode::Running,
///     ErrorState::clear(),
/// );
/// assert!(snapshot.is_active());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationalSnapshot {
    /// Operational state code.
    code: OperationalStateCode,
    /// Whether the appliance counts as actively operating.
    is_active: bool,
    /// Operational error descriptor.
    error: ErrorState,
}

impl OperationalSnapshot {
    /// Creates a snapshot, deriving the activity flag from the state code.
    #[must_use]
    pub const fn from_code(code: OperationalStateCode, error: ErrorState) -> Self {
        Self {
            code,
            is_active: code.is_active(),
            error,
        }
    }

    /// Creates a snapshot with an explicit activity flag.
    ///
    /// Feeds that report activity separately from the state code can
    /// override the derived flag here.
    #[must_use]
    pub const fn with_activity(
        code: OperationalStateCode,
        is_active: bool,
        error: ErrorState,
    ) -> Self {
        Self {
            code,
            is_active,
            error,
        }
    }

    /// Returns the operational state code.
    #[must_use]
    pub const fn code(&self) -> OperationalStateCode {
        self.code
    }

    /// Returns the activity flag.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the error descriptor.
    #[must_use]
    pub const fn error(&self) -> &ErrorState {
        &self.error
    }
}

#[cfg(test)]
mod tests {
    use crate::types::ErrorStateId;

    use super::*;

    #[test]
    fn code_round_trip() {
        for code in [
            OperationalStateCode::Stopped,
            OperationalStateCode::Running,
            OperationalStateCode::Paused,
            OperationalStateCode::Error,
            OperationalStateCode::SeekingCharger,
            OperationalStateCode::Charging,
            OperationalStateCode::Docked,
        ] {
            assert_eq!(OperationalStateCode::from_u8(code.as_u8()), Ok(code));
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert_eq!(
            OperationalStateCode::from_u8(0x10),
            Err(ValueError::UnknownOperationalState(0x10))
        );
    }

    #[test]
    fn activity_grouping() {
        assert!(OperationalStateCode::Running.is_active());
        assert!(OperationalStateCode::Paused.is_active());
        assert!(OperationalStateCode::SeekingCharger.is_active());
        assert!(!OperationalStateCode::Stopped.is_active());
        assert!(!OperationalStateCode::Charging.is_active());
        assert!(!OperationalStateCode::Docked.is_active());
    }

    #[test]
    fn from_code_derives_activity() {
        let running =
            OperationalSnapshot::from_code(OperationalStateCode::Running, ErrorState::clear());
        assert!(running.is_active());

        let docked =
            OperationalSnapshot::from_code(OperationalStateCode::Docked, ErrorState::clear());
        assert!(!docked.is_active());
    }

    #[test]
    fn with_activity_overrides_the_derived_flag() {
        let snapshot = OperationalSnapshot::with_activity(
            OperationalStateCode::Error,
            true,
            ErrorState::new(ErrorStateId::Stuck),
        );
        assert!(snapshot.is_active());
        assert_eq!(snapshot.code(), OperationalStateCode::Error);
    }

    #[test]
    fn serde_uses_numeric_codes() {
        let snapshot =
            OperationalSnapshot::from_code(OperationalStateCode::SeekingCharger, ErrorState::clear());
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["code"], serde_json::json!(0x40));
        let back: OperationalSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
    }
}
