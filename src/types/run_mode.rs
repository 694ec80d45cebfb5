// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Run modes for the RVC Run Mode cluster.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Selectable run modes of the vacuum.
///
/// The mode numbers are the `CurrentMode` values the bridged endpoint
/// advertises in its supported-modes list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum RunMode {
    /// Not running; ready for a new operation.
    Idle,
    /// Cleaning operation.
    Cleaning,
    /// Mapping run without cleaning.
    Mapping,
}

impl RunMode {
    /// Returns the mode number used on the wire.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Cleaning => 1,
            Self::Mapping => 2,
        }
    }

    /// Parses a mode number.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::UnknownRunMode`] for numbers outside the
    /// known set.
    pub const fn from_u8(mode: u8) -> Result<Self, ValueError> {
        match mode {
            0 => Ok(Self::Idle),
            1 => Ok(Self::Cleaning),
            2 => Ok(Self::Mapping),
            other => Err(ValueError::UnknownRunMode(other)),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<RunMode> for u8 {
    fn from(mode: RunMode) -> Self {
        mode.as_u8()
    }
}

impl TryFrom<u8> for RunMode {
    type Error = ValueError;

    fn try_from(mode: u8) -> Result<Self, ValueError> {
        Self::from_u8(mode)
    }
}
