// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device bridging session.

use tokio::sync::Mutex;
use tokio::sync::broadcast;

use crate::clock::{Clock, SystemClock};
use crate::cluster::{ClusterId, ClusterRef, attributes};
use crate::error::Result;
use crate::framework::{AttributeWriter, EventSink};
use crate::sync::{EdgeDetector, WriteCache};
use crate::telemetry::{BatteryUpdate, DeviceId, RunModeUpdate, TelemetryUpdate};
use crate::types::{BatteryChargeLevel, OperationalSnapshot};
use crate::value::AttributeValue;

/// One device's bridge between the telemetry feed and the framework.
///
/// A session owns the write cache and edge detector for exactly one
/// device; nothing is shared across devices. The entry points are plain
/// async functions; [`DeviceSession::run`] wires them to a feed
/// subscription, but a host with its own delivery mechanism can call
/// them directly.
///
/// Snapshot processing is serialized through an internal mutex, so a
/// multi-threaded host still sees one snapshot at a time per device.
/// Updates for *different* attribute groups may be processed
/// concurrently; the write cache keeps their slots independent.
///
/// # Examples
///
/// ```ignore
/// let session = DeviceSession::new(device_id, writer, sink);
/// session.process_battery_update(&update).await?;
/// ```
#[derive(Debug)]
pub struct DeviceSession<W, E, C = SystemClock>
where
    C: Clock,
{
    device_id: DeviceId,
    writer: W,
    events: E,
    cache: WriteCache,
    detector: Mutex<EdgeDetector<C>>,
}

impl<W, E> DeviceSession<W, E>
where
    W: AttributeWriter,
    E: EventSink,
{
    /// Creates a session on the system clock.
    #[must_use]
    pub fn new(device_id: DeviceId, writer: W, events: E) -> Self {
        Self::with_clock(device_id, writer, events, SystemClock)
    }
}

impl<W, E, C> DeviceSession<W, E, C>
where
    W: AttributeWriter,
    E: EventSink,
    C: Clock,
{
    /// Creates a session on the given clock.
    #[must_use]
    pub fn with_clock(device_id: DeviceId, writer: W, events: E, clock: C) -> Self {
        Self {
            device_id,
            writer,
            events,
            cache: WriteCache::new(),
            detector: Mutex::new(EdgeDetector::with_clock(clock)),
        }
    }

    /// Marks the session's detector as already active.
    ///
    /// For sessions attached to a device mid-run; see the cold-start note
    /// on [`EdgeDetector`].
    #[must_use]
    pub fn assume_active(self) -> Self {
        let Self {
            device_id,
            writer,
            events,
            cache,
            detector,
        } = self;
        Self {
            device_id,
            writer,
            events,
            cache,
            detector: Mutex::new(detector.into_inner().assume_active()),
        }
    }

    /// Returns the device this session bridges.
    #[must_use]
    pub const fn device_id(&self) -> DeviceId {
        self.device_id
    }

    /// Returns how many attribute slots have been written at least once.
    #[must_use]
    pub fn tracked_attributes(&self) -> usize {
        self.cache.len()
    }

    /// Processes a battery reading into Power Source attribute writes.
    ///
    /// # Errors
    ///
    /// Propagates the first rejected delegate call.
    pub async fn process_battery_update(&self, update: &BatteryUpdate) -> Result<()> {
        let cluster = ClusterRef::Known(ClusterId::PowerSource);
        self.cache
            .write_if_changed(
                &self.writer,
                &cluster,
                attributes::BAT_PERCENT_REMAINING,
                &AttributeValue::from(update.percent().half_percent()),
            )
            .await?;
        self.cache
            .write_if_changed(
                &self.writer,
                &cluster,
                attributes::BAT_CHARGE_LEVEL,
                &AttributeValue::from(BatteryChargeLevel::for_percent(update.percent()).as_u8()),
            )
            .await?;
        self.cache
            .write_if_changed(
                &self.writer,
                &cluster,
                attributes::BAT_CHARGE_STATE,
                &AttributeValue::from(update.charge_state().as_u8()),
            )
            .await?;
        Ok(())
    }

    /// Processes a run-mode reading into the `CurrentMode` write.
    ///
    /// # Errors
    ///
    /// Propagates a rejected delegate call.
    pub async fn process_run_mode_update(&self, update: &RunModeUpdate) -> Result<()> {
        let cluster = ClusterRef::Known(ClusterId::RvcRunMode);
        self.cache
            .write_if_changed(
                &self.writer,
                &cluster,
                attributes::CURRENT_MODE,
                &AttributeValue::from(update.mode().as_u8()),
            )
            .await?;
        Ok(())
    }

    /// Processes an operational snapshot: attribute writes first, then
    /// edge detection and event emission.
    ///
    /// # Errors
    ///
    /// Propagates the first rejected delegate call. The detector state
    /// only advances once the attribute writes were issued, so an edge
    /// interrupted by a rejected write is re-detected on the next
    /// snapshot rather than lost.
    pub async fn process_operational_snapshot(
        &self,
        snapshot: &OperationalSnapshot,
    ) -> Result<()> {
        let cluster = ClusterRef::Known(ClusterId::RvcOperationalState);
        // One snapshot at a time per device; the mutex spans writes and
        // edge detection so events keep snapshot order.
        let mut detector = self.detector.lock().await;

        self.cache
            .write_if_changed(
                &self.writer,
                &cluster,
                attributes::OPERATIONAL_STATE,
                &AttributeValue::from(snapshot.code().as_u8()),
            )
            .await?;
        self.cache
            .write_if_changed(
                &self.writer,
                &cluster,
                attributes::OPERATIONAL_ERROR,
                &snapshot.error().to_attribute_value(),
            )
            .await?;

        for event in detector.process(snapshot) {
            tracing::info!(
                device_id = %self.device_id,
                event = event.name(),
                "operational edge detected"
            );
            self.events
                .emit(&cluster, event.name(), event.payload())
                .await?;
        }
        Ok(())
    }

    /// Dispatches one telemetry notification to the matching entry point.
    ///
    /// # Errors
    ///
    /// Propagates whatever the entry point reports.
    pub async fn apply(&self, update: &TelemetryUpdate) -> Result<()> {
        match update {
            TelemetryUpdate::Battery { update, .. } => self.process_battery_update(update).await,
            TelemetryUpdate::RunMode { update, .. } => self.process_run_mode_update(update).await,
            TelemetryUpdate::Operational { snapshot, .. } => {
                self.process_operational_snapshot(snapshot).await
            }
        }
    }

    /// Drives the session from a feed subscription until the feed closes.
    ///
    /// Updates for other devices are skipped. A rejected delegate call is
    /// logged and the loop continues with the next notification; a lagged
    /// receiver is logged and resumes from the oldest retained update.
    pub async fn run(&self, mut receiver: broadcast::Receiver<TelemetryUpdate>) {
        loop {
            match receiver.recv().await {
                Ok(update) if update.device_id() == self.device_id => {
                    if let Err(error) = self.apply(&update).await {
                        tracing::warn!(
                            device_id = %self.device_id,
                            error = %error,
                            "delegate call failed, continuing"
                        );
                    }
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(
                        device_id = %self.device_id,
                        missed,
                        "telemetry receiver lagged"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        tracing::debug!(device_id = %self.device_id, "telemetry feed closed, session loop ending");
    }
}
