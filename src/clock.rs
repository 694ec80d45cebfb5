// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Time sources for edge detection.
//!
//! The edge detector stamps activation instants and computes elapsed
//! durations. It reads time through the [`Clock`] trait so production code
//! uses the system clock while tests drive time by hand.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// Source of wall-clock time.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A manually driven clock.
///
/// Clones share the same underlying instant, so a test can hold one handle
/// while a detector holds another.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rvcsync_lib::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::starting_at(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap());
/// clock.advance_secs(125);
/// assert_eq!(clock.now().timestamp(), 1_748_779_325);
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Creates a manual clock fixed at the given instant.
    #[must_use]
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    /// Moves the clock forward by the given number of seconds.
    pub fn advance_secs(&self, secs: i64) {
        let mut now = self.now.lock();
        *now += Duration::seconds(secs);
    }

    /// Sets the clock to the given instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock() = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
