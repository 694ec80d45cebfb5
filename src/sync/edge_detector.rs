// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Edge detection over operational snapshots.

use chrono::{DateTime, Utc};

use crate::clock::{Clock, SystemClock};
use crate::cluster::events;
use crate::types::{ErrorState, ErrorStateId, OperationalSnapshot};

/// A discrete event produced by an operational edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationalEvent {
    /// A run ended.
    OperationCompletion {
        /// Error identifier associated with the run that just ended.
        completion_error_code: ErrorStateId,
        /// Elapsed active duration in whole seconds.
        total_operational_time: u64,
    },
    /// A new fault condition appeared.
    OperationalError {
        /// The full error descriptor.
        error_state: ErrorState,
    },
}

impl OperationalEvent {
    /// Returns the framework-facing event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OperationCompletion { .. } => events::OPERATION_COMPLETION,
            Self::OperationalError { .. } => events::OPERATIONAL_ERROR,
        }
    }

    /// Builds the event payload in the framework's wire shape.
    #[must_use]
    pub fn payload(&self) -> serde_json::Value {
        match self {
            Self::OperationCompletion {
                completion_error_code,
                total_operational_time,
            } => serde_json::json!({
                "completionErrorCode": completion_error_code.as_u8(),
                "totalOperationalTime": total_operational_time,
            }),
            Self::OperationalError { error_state } => serde_json::json!({
                "errorState": error_state,
            }),
        }
    }
}

/// Detects activity and error edges across successive snapshots.
///
/// The detector holds the last-observed activity flag (initially
/// inactive), the instant the current active period began, and the
/// last-observed error descriptor (initially clear). It reacts only to
/// snapshots delivered to [`EdgeDetector::process`]; it holds no timers
/// and never polls.
///
/// Each `process` call runs two independent checks, in order:
///
/// 1. **Activity.** Going active records the activation instant and emits
///    nothing. Going inactive emits one
///    [`OperationalEvent::OperationCompletion`] whose duration is the
///    whole-second span since activation and whose error code comes from
///    the *current* snapshot.
/// 2. **Error.** A structural change of the descriptor to a fault emits
///    one [`OperationalEvent::OperationalError`]; a change back to clear
///    emits nothing. Either way the stored descriptor updates, so a
///    recurrence of the same fault after clearance is a fresh edge.
///
/// Re-processing an equal snapshot emits nothing and changes nothing.
///
/// # Cold start
///
/// A detector attached to a device mid-run (see
/// [`EdgeDetector::assume_active`]) has no activation instant; the first
/// completion then measures from the Unix epoch and the reported duration
/// is unrealistically large. This artifact is deliberate; suppressing it
/// could also hide genuine rapid-cycle completions.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rvcsync_lib::clock::ManualClock;
/// use rvcsync_lib::sync::EdgeDetector;
/// use rvcsync_lib::types::{ErrorState, OperationalSnapshot, OperationalStateCode};
///
/// let clock = ManualClock::starting_at(Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap());
/// let mut detector = EdgeDetector::with_clock(clock.clone());
///
/// let running = OperationalSnapshot::from_code(OperationalStateCode::Running, ErrorState::clear());
/// assert!(detector.process(&running).is_empty());
///
/// clock.advance_secs(125);
/// let docked = OperationalSnapshot::from_code(OperationalStateCode::Docked, ErrorState::clear());
/// let events = detector.process(&docked);
/// assert_eq!(events.len(), 1);
/// ```
#[derive(Debug)]
pub struct EdgeDetector<C: Clock = SystemClock> {
    clock: C,
    active: bool,
    active_since: Option<DateTime<Utc>>,
    last_error: ErrorState,
}

impl EdgeDetector<SystemClock> {
    /// Creates a detector on the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for EdgeDetector<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> EdgeDetector<C> {
    /// Creates a detector on the given clock.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            active: false,
            active_since: None,
            last_error: ErrorState::clear(),
        }
    }

    /// Marks the detector as already active, without an activation instant.
    ///
    /// For sessions attached to a device mid-run. The first completion
    /// after this measures from the Unix epoch; see the cold-start note
    /// on [`EdgeDetector`].
    #[must_use]
    pub fn assume_active(mut self) -> Self {
        self.active = true;
        self
    }

    /// Returns the last-observed activity flag.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the last-observed error descriptor.
    #[must_use]
    pub const fn last_error(&self) -> &ErrorState {
        &self.last_error
    }

    /// Feeds one snapshot through both edge checks.
    ///
    /// Returns zero, one, or two events; a completion always precedes an
    /// error report within the same call.
    pub fn process(&mut self, snapshot: &OperationalSnapshot) -> Vec<OperationalEvent> {
        let mut detected = Vec::new();

        if snapshot.is_active() != self.active {
            if snapshot.is_active() {
                let now = self.clock.now();
                tracing::debug!(at = %now, "operation started");
                self.active_since = Some(now);
            } else {
                let started = self.active_since.unwrap_or(DateTime::UNIX_EPOCH);
                let elapsed = (self.clock.now() - started).num_seconds();
                // A clock that stepped backwards clamps to zero.
                let total_operational_time = u64::try_from(elapsed).unwrap_or(0);
                tracing::debug!(total_operational_time, "operation completed");
                detected.push(OperationalEvent::OperationCompletion {
                    completion_error_code: snapshot.error().id(),
                    total_operational_time,
                });
            }
            self.active = snapshot.is_active();
        }

        if *snapshot.error() != self.last_error {
            if snapshot.error().is_clear() {
                tracing::debug!(previous = %self.last_error, "operational error cleared");
            } else {
                tracing::debug!(error = %snapshot.error(), "operational error raised");
                detected.push(OperationalEvent::OperationalError {
                    error_state: snapshot.error().clone(),
                });
            }
            self.last_error = snapshot.error().clone();
        }

        detected
    }
}
