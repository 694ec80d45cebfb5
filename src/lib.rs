// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `RvcSync` Lib - bridge robot-vacuum cloud telemetry into a
//! Matter-style attribute and event model.
//!
//! A vacuum's cloud API reports state continuously; a smart-home
//! framework wants discrete attribute writes and exactly-once events.
//! This library sits between the two and keeps the downstream surface
//! minimal and correct:
//!
//! - **Write suppression**: every attribute write passes through a
//!   per-device fingerprint cache, so a value that did not semantically
//!   change never reaches the framework twice.
//! - **Edge detection**: operational snapshots additionally run through
//!   an edge detector that emits one `OperationCompletion` per finished
//!   run (with elapsed seconds) and one `OperationalError` per fault
//!   onset, and nothing on repeats or clearance.
//!
//! The library owns neither side: telemetry arrives through typed
//! notifications on a [`telemetry::TelemetryFeed`] (or direct calls into
//! a session), and everything outbound goes through the
//! [`framework::AttributeWriter`] and [`framework::EventSink`] delegates
//! supplied by the host.
//!
//! # Quick Start
//!
//! ```no_run
//! use async_trait::async_trait;
//! use rvcsync_lib::cluster::ClusterRef;
//! use rvcsync_lib::error::DelegateError;
//! use rvcsync_lib::telemetry::{BatteryUpdate, DeviceId};
//! use rvcsync_lib::types::{BatteryPercent, ErrorState, OperationalSnapshot, OperationalStateCode};
//! use rvcsync_lib::value::AttributeValue;
//! use rvcsync_lib::{AttributeWriter, DeviceSession, EventSink};
//!
//! struct LogWriter;
//!
//! #[async_trait]
//! impl AttributeWriter for LogWriter {
//!     async fn write(
//!         &self,
//!         cluster: &ClusterRef,
//!         attribute: &str,
//!         value: &AttributeValue,
//!     ) -> Result<(), DelegateError> {
//!         println!("{cluster}/{attribute} <- {value:?}");
//!         Ok(())
//!     }
//! }
//!
//! struct LogSink;
//!
//! #[async_trait]
//! impl EventSink for LogSink {
//!     async fn emit(
//!         &self,
//!         cluster: &ClusterRef,
//!         event: &str,
//!         payload: serde_json::Value,
//!     ) -> Result<(), DelegateError> {
//!         println!("{cluster} !{event} {payload}");
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> rvcsync_lib::Result<()> {
//!     let session = DeviceSession::new(DeviceId::new(), LogWriter, LogSink);
//!
//!     // Same value twice: the second call writes nothing downstream.
//!     let battery = BatteryUpdate::new(BatteryPercent::new(76)?, true);
//!     session.process_battery_update(&battery).await?;
//!     session.process_battery_update(&battery).await?;
//!
//!     // Snapshots drive both attribute writes and edge events.
//!     let snapshot =
//!         OperationalSnapshot::from_code(OperationalStateCode::Running, ErrorState::clear());
//!     session.process_operational_snapshot(&snapshot).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Feed-Driven Sessions
//!
//! Whatever polls the cloud publishes typed updates on a feed; each
//! session drives itself from a subscription:
//!
//! ```ignore
//! let feed = TelemetryFeed::new();
//! let session = Arc::new(DeviceSession::new(device_id, writer, sink));
//!
//! let rx = feed.subscribe();
//! let driver = tokio::spawn({
//!     let session = Arc::clone(&session);
//!     async move { session.run(rx).await }
//! });
//!
//! feed.publish(TelemetryUpdate::operational(device_id, snapshot));
//! ```

pub mod clock;
pub mod cluster;
pub mod error;
pub mod framework;
pub mod session;
pub mod sync;
pub mod telemetry;
pub mod types;
pub mod value;

pub use clock::{Clock, ManualClock, SystemClock};
pub use cluster::{AttributeKey, ClusterId, ClusterRef};
pub use error::{DelegateError, Error, ParseError, Result, ValueError};
pub use framework::{AttributeWriter, EventSink};
pub use session::DeviceSession;
pub use sync::{EdgeDetector, OperationalEvent, WriteCache, WriteOutcome};
pub use telemetry::{BatteryUpdate, DeviceId, RunModeUpdate, TelemetryFeed, TelemetryUpdate};
pub use types::{
    BatteryChargeLevel, BatteryChargeState, BatteryPercent, ErrorState, ErrorStateId,
    OperationalSnapshot, OperationalStateCode, RunMode,
};
pub use value::{AttributeValue, Fingerprint};
