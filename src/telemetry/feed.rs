// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadcast feed for telemetry notifications.

use tokio::sync::broadcast;

use super::TelemetryUpdate;

/// Default channel capacity for the feed.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Fan-out channel between the polling side and the device sessions.
///
/// Whatever polls the cloud publishes [`TelemetryUpdate`]s here; each
/// session subscribes and picks out the updates for its device. The feed
/// uses tokio's broadcast channel, so every subscriber sees every update.
///
/// # Capacity
///
/// The feed has a fixed capacity (default 256). A subscriber that falls
/// behind loses its oldest updates and observes a `Lagged` error on its
/// receiver; the session drive loop logs and keeps going.
///
/// # Examples
///
/// ```
/// use rvcsync_lib::telemetry::{BatteryUpdate, DeviceId, TelemetryFeed, TelemetryUpdate};
/// use rvcsync_lib::types::BatteryPercent;
///
/// let feed = TelemetryFeed::new();
/// let _rx = feed.subscribe();
///
/// feed.publish(TelemetryUpdate::battery(
///     DeviceId::new(),
///     BatteryUpdate::new(BatteryPercent::FULL, false),
/// ));
/// ```
#[derive(Debug)]
pub struct TelemetryFeed {
    sender: broadcast::Sender<TelemetryUpdate>,
}

impl TelemetryFeed {
    /// Creates a feed with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a feed with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to telemetry updates.
    ///
    /// The receiver sees all updates published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TelemetryUpdate> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an update to all subscribers.
    ///
    /// With no subscribers the update is silently discarded.
    pub fn publish(&self, update: TelemetryUpdate) {
        // Ignore errors (no subscribers).
        let _ = self.sender.send(update);
    }

    /// Publishes an update and returns how many receivers got it.
    #[must_use]
    pub fn publish_counted(&self, update: TelemetryUpdate) -> usize {
        self.sender.send(update).unwrap_or(0)
    }
}

impl Default for TelemetryFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TelemetryFeed {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}
