// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed telemetry payloads delivered by the cloud feed.
//!
//! Each attribute group arrives as its own payload type, already mapped
//! out of vendor terms. The [`TelemetryUpdate`] envelope tags a payload
//! with the device it belongs to, which is what the feed broadcasts.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::types::{BatteryChargeState, BatteryPercent, OperationalSnapshot, RunMode};

use super::DeviceId;

/// A battery reading.
///
/// # Examples
///
/// ```
/// use rvcsync_lib::telemetry::BatteryUpdate;
/// use rvcsync_lib::types::BatteryPercent;
///
/// let update = BatteryUpdate::new(BatteryPercent::new(80)?, true);
/// assert_eq!(update.percent().value(), 80);
/// # Ok::<(), rvcsync_lib::ValueError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryUpdate {
    /// Remaining charge.
    percent: BatteryPercent,
    /// Whether the battery is currently charging.
    charging: bool,
}

impl BatteryUpdate {
    /// Creates a battery reading.
    #[must_use]
    pub const fn new(percent: BatteryPercent, charging: bool) -> Self {
        Self { percent, charging }
    }

    /// Parses a reading from a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] when the payload does not decode,
    /// including out-of-range percentages.
    pub fn from_json(payload: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Returns the remaining charge.
    #[must_use]
    pub const fn percent(&self) -> BatteryPercent {
        self.percent
    }

    /// Returns the charging flag.
    #[must_use]
    pub const fn charging(&self) -> bool {
        self.charging
    }

    /// Derives the `BatChargeState` value for this reading.
    #[must_use]
    pub const fn charge_state(&self) -> BatteryChargeState {
        BatteryChargeState::derive(self.charging, self.percent)
    }
}

/// A run-mode reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunModeUpdate {
    /// The currently selected mode.
    mode: RunMode,
}

impl RunModeUpdate {
    /// Creates a run-mode reading.
    #[must_use]
    pub const fn new(mode: RunMode) -> Self {
        Self { mode }
    }

    /// Parses a reading from a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] when the payload does not decode.
    pub fn from_json(payload: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Returns the selected mode.
    #[must_use]
    pub const fn mode(&self) -> RunMode {
        self.mode
    }
}

/// One telemetry notification, tagged with its device.
///
/// Attribute groups are delivered independently; a battery update never
/// waits for an operational snapshot and vice versa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TelemetryUpdate {
    /// A battery reading arrived.
    Battery {
        /// The device the reading belongs to.
        device_id: DeviceId,
        /// The reading.
        update: BatteryUpdate,
    },

    /// A run-mode reading arrived.
    RunMode {
        /// The device the reading belongs to.
        device_id: DeviceId,
        /// The reading.
        update: RunModeUpdate,
    },

    /// An operational snapshot arrived.
    Operational {
        /// The device the snapshot belongs to.
        device_id: DeviceId,
        /// The snapshot.
        snapshot: OperationalSnapshot,
    },
}

impl TelemetryUpdate {
    /// Creates a battery notification.
    #[must_use]
    pub const fn battery(device_id: DeviceId, update: BatteryUpdate) -> Self {
        Self::Battery { device_id, update }
    }

    /// Creates a run-mode notification.
    #[must_use]
    pub const fn run_mode(device_id: DeviceId, update: RunModeUpdate) -> Self {
        Self::RunMode { device_id, update }
    }

    /// Creates an operational notification.
    #[must_use]
    pub const fn operational(device_id: DeviceId, snapshot: OperationalSnapshot) -> Self {
        Self::Operational {
            device_id,
            snapshot,
        }
    }

    /// Returns the device this notification belongs to.
    #[must_use]
    pub const fn device_id(&self) -> DeviceId {
        match self {
            Self::Battery { device_id, .. }
            | Self::RunMode { device_id, .. }
            | Self::Operational { device_id, .. } => *device_id,
        }
    }

    /// Returns `true` for a battery notification.
    #[must_use]
    pub const fn is_battery(&self) -> bool {
        matches!(self, Self::Battery { .. })
    }

    /// Returns `true` for a run-mode notification.
    #[must_use]
    pub const fn is_run_mode(&self) -> bool {
        matches!(self, Self::RunMode { .. })
    }

    /// Returns `true` for an operational notification.
    #[must_use]
    pub const fn is_operational(&self) -> bool {
        matches!(self, Self::Operational { .. })
    }
}
