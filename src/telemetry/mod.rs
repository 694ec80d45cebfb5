// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The inbound telemetry boundary.
//!
//! The cloud-polling side of a host application converts vendor payloads
//! into the typed updates in this module and publishes them on a
//! [`TelemetryFeed`]. Device sessions subscribe and react; nothing in
//! this library polls.
//!
//! Within one attribute group of one device, updates are delivered
//! strictly in order, one at a time. Different groups are independent
//! streams and may interleave freely.
//!
//! # Examples
//!
//! ```
//! use rvcsync_lib::telemetry::{DeviceId, TelemetryFeed, TelemetryUpdate, RunModeUpdate};
//! use rvcsync_lib::types::RunMode;
//!
//! let feed = TelemetryFeed::new();
//! let _rx = feed.subscribe();
//!
//! feed.publish(TelemetryUpdate::run_mode(
//!     DeviceId::new(),
//!     RunModeUpdate::new(RunMode::Cleaning),
//! ));
//! ```

mod device_id;
mod feed;
mod update;

pub use device_id::DeviceId;
pub use feed::TelemetryFeed;
pub use update::{BatteryUpdate, RunModeUpdate, TelemetryUpdate};
