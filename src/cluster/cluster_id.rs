// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named constants for the clusters this bridge serves.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Clusters exposed by the bridged vacuum endpoint.
///
/// The numeric ids follow the Matter cluster id space, which is what the
/// target framework uses on the wire.
///
/// # Examples
///
/// ```
/// use rvcsync_lib::cluster::ClusterId;
///
/// assert_eq!(ClusterId::RvcOperationalState.id(), 0x0061);
/// assert_eq!(ClusterId::from_name("powersource"), Some(ClusterId::PowerSource));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClusterId {
    /// Power Source cluster (battery reporting).
    PowerSource,
    /// RVC Run Mode cluster.
    RvcRunMode,
    /// RVC Clean Mode cluster.
    RvcCleanMode,
    /// RVC Operational State cluster.
    RvcOperationalState,
}

impl ClusterId {
    /// All clusters served by the bridge.
    pub const ALL: [Self; 4] = [
        Self::PowerSource,
        Self::RvcRunMode,
        Self::RvcCleanMode,
        Self::RvcOperationalState,
    ];

    /// Returns the numeric cluster id.
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Self::PowerSource => 0x002F,
            Self::RvcRunMode => 0x0054,
            Self::RvcCleanMode => 0x0055,
            Self::RvcOperationalState => 0x0061,
        }
    }

    /// Returns the cluster name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PowerSource => "PowerSource",
            Self::RvcRunMode => "RvcRunMode",
            Self::RvcCleanMode => "RvcCleanMode",
            Self::RvcOperationalState => "RvcOperationalState",
        }
    }

    /// Looks up a cluster by its numeric id.
    #[must_use]
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|cluster| cluster.id() == id)
    }

    /// Looks up a cluster by name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|cluster| cluster.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
