// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heterogeneous cluster references and their canonical form.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ClusterId;

/// A cluster reference in whichever representation the caller holds.
///
/// Frameworks hand out cluster identities in different shapes depending on
/// the call site: a bare number, a library constant, or a descriptor object
/// that may expose an id, a name, or both. All shapes normalize through
/// [`ClusterRef::canonical_key`].
///
/// # Examples
///
/// ```
/// use rvcsync_lib::cluster::{ClusterId, ClusterRef};
///
/// assert_eq!(ClusterRef::Id(0x0054).canonical_key(), "0x0054");
/// assert_eq!(
///     ClusterRef::Known(ClusterId::RvcRunMode).canonical_key(),
///     "0x0054"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClusterRef {
    /// A raw numeric cluster id.
    Id(u32),
    /// One of the clusters this bridge serves.
    Known(ClusterId),
    /// A descriptor exposing an id and/or a name.
    Descriptor {
        /// Numeric id, when the descriptor carries one.
        id: Option<u32>,
        /// Cluster name, when the descriptor carries one.
        name: Option<String>,
    },
}

impl ClusterRef {
    /// Creates a descriptor reference.
    #[must_use]
    pub fn descriptor(id: Option<u32>, name: Option<&str>) -> Self {
        Self::Descriptor {
            id,
            name: name.map(str::to_string),
        }
    }

    /// Returns the canonical key for this reference.
    ///
    /// Two references to the same logical cluster always produce the same
    /// key, regardless of representation. An id wins over a name; a name
    /// with no id resolves through the known-cluster registry and falls
    /// back to a lowercased name key when the cluster is not registered.
    #[must_use]
    pub fn canonical_key(&self) -> String {
        match self {
            Self::Id(id) => key_for_id(*id),
            Self::Known(cluster) => key_for_id(cluster.id()),
            Self::Descriptor { id: Some(id), .. } => key_for_id(*id),
            Self::Descriptor {
                id: None,
                name: Some(name),
            } => ClusterId::from_name(name).map_or_else(
                || format!("name:{}", name.to_ascii_lowercase()),
                |cluster| key_for_id(cluster.id()),
            ),
            Self::Descriptor {
                id: None,
                name: None,
            } => "unidentified".to_string(),
        }
    }
}

fn key_for_id(id: u32) -> String {
    format!("{id:#06x}")
}

impl fmt::Display for ClusterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_key())
    }
}

impl From<u32> for ClusterRef {
    fn from(id: u32) -> Self {
        Self::Id(id)
    }
}

impl From<ClusterId> for ClusterRef {
    fn from(cluster: ClusterId) -> Self {
        Self::Known(cluster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn representations_of_the_same_cluster_share_a_key() {
        let by_id = ClusterRef::Id(0x0061);
        let by_constant = ClusterRef::Known(ClusterId::RvcOperationalState);
        let by_descriptor_id = ClusterRef::descriptor(Some(0x0061), None);
        let by_descriptor_name = ClusterRef::descriptor(None, Some("RvcOperationalState"));

        let key = by_id.canonical_key();
        assert_eq!(by_constant.canonical_key(), key);
        assert_eq!(by_descriptor_id.canonical_key(), key);
        assert_eq!(by_descriptor_name.canonical_key(), key);
    }

    #[test]
    fn id_wins_over_a_conflicting_name() {
        let reference = ClusterRef::descriptor(Some(0x002F), Some("RvcRunMode"));
        assert_eq!(reference.canonical_key(), "0x002f");
    }

    #[test]
    fn unknown_name_falls_back_to_lowercased_name_key() {
        let reference = ClusterRef::descriptor(None, Some("Thermostat"));
        assert_eq!(reference.canonical_key(), "name:thermostat");
        // Case variants of the same unknown name still collapse.
        let other = ClusterRef::descriptor(None, Some("THERMOSTAT"));
        assert_eq!(other.canonical_key(), reference.canonical_key());
    }

    #[test]
    fn empty_descriptor_has_a_stable_key() {
        let reference = ClusterRef::descriptor(None, None);
        assert_eq!(reference.canonical_key(), "unidentified");
    }

    #[test]
    fn keys_are_zero_padded_hex() {
        assert_eq!(ClusterRef::Id(0x2F).canonical_key(), "0x002f");
        assert_eq!(ClusterRef::Id(0x1234).canonical_key(), "0x1234");
    }

    #[test]
    fn display_matches_canonical_key() {
        let reference = ClusterRef::Known(ClusterId::PowerSource);
        assert_eq!(reference.to_string(), reference.canonical_key());
    }
}
