// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalized attribute slot identity.

use std::fmt;

use super::ClusterRef;

/// Identity of one downstream attribute slot.
///
/// An `AttributeKey` pairs a canonical cluster key with an attribute name.
/// Keys built from different representations of the same cluster compare
/// equal, which is what lets the write cache treat them as one slot.
///
/// # Examples
///
/// ```
/// use rvcsync_lib::cluster::{AttributeKey, ClusterId, ClusterRef};
///
/// let a = AttributeKey::new(&ClusterRef::Id(0x0061), "OperationalState");
/// let b = AttributeKey::new(
///     &ClusterRef::Known(ClusterId::RvcOperationalState),
///     "OperationalState",
/// );
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeKey {
    cluster: String,
    attribute: String,
}

impl AttributeKey {
    /// Builds the key for a cluster reference and attribute name.
    #[must_use]
    pub fn new(cluster: &ClusterRef, attribute: &str) -> Self {
        Self {
            cluster: cluster.canonical_key(),
            attribute: attribute.to_string(),
        }
    }

    /// Returns the canonical cluster key.
    #[must_use]
    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    /// Returns the attribute name.
    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.cluster, self.attribute)
    }
}
