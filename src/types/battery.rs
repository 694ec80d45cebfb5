// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Battery-related types for the Power Source cluster.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// A battery charge percentage (0-100).
///
/// The Power Source cluster reports remaining charge in half-percent
/// units; [`BatteryPercent::half_percent`] performs that conversion.
///
/// # Examples
///
/// ```
/// use rvcsync_lib::types::BatteryPercent;
///
/// let percent = BatteryPercent::new(76)?;
/// assert_eq!(percent.value(), 76);
/// assert_eq!(percent.half_percent(), 152);
/// # Ok::<(), rvcsync_lib::ValueError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub struct BatteryPercent(u8);

impl BatteryPercent {
    /// A full battery.
    pub const FULL: Self = Self(100);

    /// Creates a battery percentage.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidBatteryPercent`] if the value exceeds 100.
    pub const fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            Err(ValueError::InvalidBatteryPercent(value))
        } else {
            Ok(Self(value))
        }
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the charge in half-percent units (0-200).
    #[must_use]
    pub const fn half_percent(self) -> u8 {
        self.0 * 2
    }

    /// Returns `true` for a completely charged battery.
    #[must_use]
    pub const fn is_full(self) -> bool {
        self.0 == 100
    }
}

impl fmt::Display for BatteryPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl From<BatteryPercent> for u8 {
    fn from(percent: BatteryPercent) -> Self {
        percent.value()
    }
}

impl TryFrom<u8> for BatteryPercent {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, ValueError> {
        Self::new(value)
    }
}

/// Coarse battery charge level for the `BatChargeLevel` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatteryChargeLevel {
    /// Charge is fine.
    Ok,
    /// Charge is getting low.
    Warning,
    /// Charge is critically low.
    Critical,
}

impl BatteryChargeLevel {
    /// Percentage at or below which the level is [`Self::Warning`].
    pub const WARNING_THRESHOLD: u8 = 20;
    /// Percentage at or below which the level is [`Self::Critical`].
    pub const CRITICAL_THRESHOLD: u8 = 10;

    /// Derives the level from a charge percentage.
    #[must_use]
    pub const fn for_percent(percent: BatteryPercent) -> Self {
        if percent.value() <= Self::CRITICAL_THRESHOLD {
            Self::Critical
        } else if percent.value() <= Self::WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Ok
        }
    }

    /// Returns the numeric level used on the wire.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Warning => 1,
            Self::Critical => 2,
        }
    }
}

impl fmt::Display for BatteryChargeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Charging state for the `BatChargeState` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatteryChargeState {
    /// Charging state is unknown.
    Unknown,
    /// The battery is charging.
    Charging,
    /// The battery is at full charge.
    FullCharge,
    /// The battery is not charging.
    NotCharging,
}

impl BatteryChargeState {
    /// Derives the charge state from the charging flag and percentage.
    #[must_use]
    pub const fn derive(charging: bool, percent: BatteryPercent) -> Self {
        if charging {
            if percent.is_full() {
                Self::FullCharge
            } else {
                Self::Charging
            }
        } else {
            Self::NotCharging
        }
    }

    /// Returns the numeric state used on the wire.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Charging => 1,
            Self::FullCharge => 2,
            Self::NotCharging => 3,
        }
    }
}

impl fmt::Display for BatteryChargeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
