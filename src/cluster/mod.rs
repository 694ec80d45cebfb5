// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cluster addressing and key normalization.
//!
//! The framework side of the bridge identifies attribute slots by cluster
//! and attribute name, but cluster references reach this library in several
//! representations: a raw numeric id, one of the [`ClusterId`] constants, or
//! a descriptor object carrying an id and/or a name. [`ClusterRef`] accepts
//! all of them and [`ClusterRef::canonical_key`] collapses every
//! representation of the same logical cluster to one key string, so the
//! write cache can compare identities without caring which form arrived.
//!
//! # Examples
//!
//! ```
//! use rvcsync_lib::cluster::{ClusterId, ClusterRef};
//!
//! let by_id = ClusterRef::Id(0x0061);
//! let by_constant = ClusterRef::Known(ClusterId::RvcOperationalState);
//! let by_name = ClusterRef::descriptor(None, Some("RvcOperationalState"));
//!
//! assert_eq!(by_id.canonical_key(), by_constant.canonical_key());
//! assert_eq!(by_id.canonical_key(), by_name.canonical_key());
//! ```

mod attribute_key;
mod cluster_id;
mod cluster_ref;

pub use attribute_key::AttributeKey;
pub use cluster_id::ClusterId;
pub use cluster_ref::ClusterRef;

/// Attribute names served by this bridge, keyed by cluster.
pub mod attributes {
    /// Remaining battery charge in half-percent units (Power Source).
    pub const BAT_PERCENT_REMAINING: &str = "BatPercentRemaining";
    /// Coarse battery charge level (Power Source).
    pub const BAT_CHARGE_LEVEL: &str = "BatChargeLevel";
    /// Charging state of the battery (Power Source).
    pub const BAT_CHARGE_STATE: &str = "BatChargeState";
    /// Currently selected run mode (RVC Run Mode).
    pub const CURRENT_MODE: &str = "CurrentMode";
    /// Current operational state code (RVC Operational State).
    pub const OPERATIONAL_STATE: &str = "OperationalState";
    /// Current operational error descriptor (RVC Operational State).
    pub const OPERATIONAL_ERROR: &str = "OperationalError";
}

/// Event names emitted on the RVC Operational State cluster.
pub mod events {
    /// A run finished; payload carries elapsed time and the closing error code.
    pub const OPERATION_COMPLETION: &str = "OperationCompletion";
    /// A fault condition appeared; payload carries the full error descriptor.
    pub const OPERATIONAL_ERROR: &str = "OperationalError";
}
