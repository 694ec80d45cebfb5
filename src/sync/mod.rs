// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The state synchronization core.
//!
//! Two purely reactive pieces turn a continuous telemetry stream into a
//! minimal set of downstream writes and events:
//!
//! - [`WriteCache`] suppresses redundant attribute writes by comparing
//!   value fingerprints per slot.
//! - [`EdgeDetector`] watches successive operational snapshots and emits
//!   a discrete [`OperationalEvent`] exactly once per transition.
//!
//! Neither piece polls or holds timers; both only react to snapshots
//! delivered by the caller.

mod edge_detector;
mod write_cache;

pub use edge_detector::{EdgeDetector, OperationalEvent};
pub use write_cache::{WriteCache, WriteOutcome};
