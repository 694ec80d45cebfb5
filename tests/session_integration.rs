// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for device sessions against recording delegates.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use tokio::time::sleep;

use rvcsync_lib::clock::ManualClock;
use rvcsync_lib::cluster::ClusterRef;
use rvcsync_lib::error::DelegateError;
use rvcsync_lib::telemetry::{BatteryUpdate, DeviceId, RunModeUpdate, TelemetryFeed, TelemetryUpdate};
use rvcsync_lib::types::{
    BatteryPercent, ErrorState, ErrorStateId, OperationalSnapshot, OperationalStateCode, RunMode,
};
use rvcsync_lib::value::AttributeValue;
use rvcsync_lib::{AttributeWriter, DeviceSession, EventSink};

/// One recorded attribute write.
#[derive(Debug, Clone)]
struct WriteCall {
    attribute: String,
    value: AttributeValue,
}

/// Recording attribute writer; optionally rejects exactly one call.
#[derive(Clone, Default)]
struct RecordingWriter {
    calls: Arc<Mutex<Vec<WriteCall>>>,
    reject_next: Arc<AtomicBool>,
}

impl RecordingWriter {
    fn reject_next(&self) {
        self.reject_next.store(true, Ordering::SeqCst);
    }

    fn calls(&self) -> Vec<WriteCall> {
        self.calls.lock().clone()
    }

    fn attributes_written(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .map(|call| call.attribute.clone())
            .collect()
    }
}

#[async_trait]
impl AttributeWriter for RecordingWriter {
    async fn write(
        &self,
        cluster: &ClusterRef,
        attribute: &str,
        value: &AttributeValue,
    ) -> Result<(), DelegateError> {
        self.calls.lock().push(WriteCall {
            attribute: attribute.to_string(),
            value: value.clone(),
        });
        if self.reject_next.swap(false, Ordering::SeqCst) {
            return Err(DelegateError::WriteRejected {
                cluster: cluster.canonical_key(),
                attribute: attribute.to_string(),
                message: "transient outage".to_string(),
            });
        }
        Ok(())
    }
}

/// One recorded event emission.
#[derive(Debug, Clone)]
struct EmitCall {
    event: String,
    payload: serde_json::Value,
}

/// Recording event sink.
#[derive(Clone, Default)]
struct RecordingSink {
    calls: Arc<Mutex<Vec<EmitCall>>>,
}

impl RecordingSink {
    fn calls(&self) -> Vec<EmitCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn emit(
        &self,
        _cluster: &ClusterRef,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), DelegateError> {
        self.calls.lock().push(EmitCall {
            event: event.to_string(),
            payload,
        });
        Ok(())
    }
}

fn manual_clock() -> ManualClock {
    ManualClock::starting_at(Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap())
}

fn session_with_clock(
    clock: ManualClock,
) -> (
    DeviceSession<RecordingWriter, RecordingSink, ManualClock>,
    RecordingWriter,
    RecordingSink,
) {
    let writer = RecordingWriter::default();
    let sink = RecordingSink::default();
    let session = DeviceSession::with_clock(DeviceId::new(), writer.clone(), sink.clone(), clock);
    (session, writer, sink)
}

fn snapshot(code: OperationalStateCode) -> OperationalSnapshot {
    OperationalSnapshot::from_code(code, ErrorState::clear())
}

fn snapshot_with(code: OperationalStateCode, error: ErrorState) -> OperationalSnapshot {
    OperationalSnapshot::from_code(code, error)
}

// ============================================================================
// Write suppression through the session
// ============================================================================

mod write_suppression {
    use super::*;

    #[tokio::test]
    async fn identical_battery_updates_write_once() {
        let (session, writer, _sink) = session_with_clock(manual_clock());
        let update = BatteryUpdate::new(BatteryPercent::new(76).unwrap(), true);

        session.process_battery_update(&update).await.unwrap();
        session.process_battery_update(&update).await.unwrap();

        assert_eq!(
            writer.attributes_written(),
            vec!["BatPercentRemaining", "BatChargeLevel", "BatChargeState"]
        );
        assert_eq!(session.tracked_attributes(), 3);
    }

    #[tokio::test]
    async fn changed_percent_only_rewrites_affected_slots() {
        let (session, writer, _sink) = session_with_clock(manual_clock());

        let first = BatteryUpdate::new(BatteryPercent::new(76).unwrap(), true);
        session.process_battery_update(&first).await.unwrap();

        // Charge level (Ok) and charge state (Charging) stay put; only the
        // raw percentage slot changes.
        let second = BatteryUpdate::new(BatteryPercent::new(74).unwrap(), true);
        session.process_battery_update(&second).await.unwrap();

        assert_eq!(
            writer.attributes_written(),
            vec![
                "BatPercentRemaining",
                "BatChargeLevel",
                "BatChargeState",
                "BatPercentRemaining"
            ]
        );
        let calls = writer.calls();
        assert_eq!(calls.last().unwrap().value, AttributeValue::from(148u8));
    }

    #[tokio::test]
    async fn run_mode_writes_follow_changes_only() {
        let (session, writer, _sink) = session_with_clock(manual_clock());

        for mode in [RunMode::Idle, RunMode::Idle, RunMode::Cleaning, RunMode::Idle] {
            session
                .process_run_mode_update(&RunModeUpdate::new(mode))
                .await
                .unwrap();
        }

        let modes: Vec<AttributeValue> =
            writer.calls().into_iter().map(|call| call.value).collect();
        assert_eq!(
            modes,
            vec![
                AttributeValue::from(0u8),
                AttributeValue::from(1u8),
                AttributeValue::from(0u8)
            ]
        );
    }
}

// ============================================================================
// Edge detection through the session
// ============================================================================

mod edges {
    use super::*;

    #[tokio::test]
    async fn completion_after_125_seconds() {
        let clock = manual_clock();
        let (session, _writer, sink) = session_with_clock(clock.clone());

        session
            .process_operational_snapshot(&snapshot(OperationalStateCode::Docked))
            .await
            .unwrap();
        session
            .process_operational_snapshot(&snapshot(OperationalStateCode::Running))
            .await
            .unwrap();
        // Activation alone is not an externally visible event.
        assert!(sink.calls().is_empty());

        clock.advance_secs(125);
        session
            .process_operational_snapshot(&snapshot(OperationalStateCode::Docked))
            .await
            .unwrap();

        let calls = sink.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].event, "OperationCompletion");
        assert_eq!(
            calls[0].payload,
            serde_json::json!({"completionErrorCode": 0, "totalOperationalTime": 125})
        );
    }

    #[tokio::test]
    async fn error_onset_clearance_and_recurrence() {
        let (session, _writer, sink) = session_with_clock(manual_clock());
        let stuck = ErrorState::new(ErrorStateId::Stuck).with_label("Stuck");

        let sequence = [
            snapshot(OperationalStateCode::Running),
            snapshot_with(OperationalStateCode::Running, stuck.clone()),
            snapshot(OperationalStateCode::Running),
            snapshot_with(OperationalStateCode::Running, stuck.clone()),
        ];
        for step in &sequence {
            session.process_operational_snapshot(step).await.unwrap();
        }

        let calls = sink.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|call| call.event == "OperationalError"));
        assert_eq!(
            calls[0].payload,
            serde_json::json!({
                "errorState": {"errorStateId": 0x41, "errorStateLabel": "Stuck"}
            })
        );
        assert_eq!(calls[0].payload, calls[1].payload);
    }

    #[tokio::test]
    async fn combined_edge_emits_completion_before_error() {
        let clock = manual_clock();
        let (session, _writer, sink) = session_with_clock(clock.clone());
        let stuck = ErrorState::new(ErrorStateId::Stuck);

        session
            .process_operational_snapshot(&snapshot(OperationalStateCode::Running))
            .await
            .unwrap();
        clock.advance_secs(30);
        session
            .process_operational_snapshot(&snapshot_with(OperationalStateCode::Error, stuck))
            .await
            .unwrap();

        let events: Vec<String> = sink.calls().into_iter().map(|call| call.event).collect();
        assert_eq!(events, vec!["OperationCompletion", "OperationalError"]);
    }

    #[tokio::test]
    async fn repeated_snapshots_emit_nothing_new() {
        let (session, writer, sink) = session_with_clock(manual_clock());
        let step = snapshot(OperationalStateCode::Charging);

        for _ in 0..3 {
            session.process_operational_snapshot(&step).await.unwrap();
        }

        // Two slots (state + error descriptor), written exactly once.
        assert_eq!(writer.calls().len(), 2);
        assert!(sink.calls().is_empty());
    }
}

// ============================================================================
// Delegate failure policy
// ============================================================================

mod delegate_failures {
    use super::*;

    #[tokio::test]
    async fn failed_write_is_not_retried_for_the_same_value() {
        // Commit-on-issue: the fingerprint for a slot is recorded when the
        // write is issued, not when it succeeds. A transient rejection
        // therefore leaves the slot suppressed until the value changes.
        let (session, writer, _sink) = session_with_clock(manual_clock());
        let update = BatteryUpdate::new(BatteryPercent::new(50).unwrap(), false);

        writer.reject_next();
        let first = session.process_battery_update(&update).await;
        assert!(first.is_err());
        // The rejection interrupted the remaining slots of the group.
        assert_eq!(writer.attributes_written(), vec!["BatPercentRemaining"]);

        // Same reading again: the rejected slot stays quiet, the remaining
        // slots catch up.
        session.process_battery_update(&update).await.unwrap();
        assert_eq!(
            writer.attributes_written(),
            vec!["BatPercentRemaining", "BatChargeLevel", "BatChargeState"]
        );
    }

    #[tokio::test]
    async fn session_keeps_working_after_a_rejection() {
        let (session, writer, sink) = session_with_clock(manual_clock());

        writer.reject_next();
        let result = session
            .process_operational_snapshot(&snapshot(OperationalStateCode::Running))
            .await;
        // The rejection interrupted the call before edge detection ran.
        assert!(result.is_err());
        assert!(sink.calls().is_empty());

        // The feed redelivers the running snapshot, then the run ends.
        session
            .process_operational_snapshot(&snapshot(OperationalStateCode::Running))
            .await
            .unwrap();
        session
            .process_operational_snapshot(&snapshot(OperationalStateCode::Docked))
            .await
            .unwrap();
        // The running->docked edge still surfaced once processing resumed.
        let events: Vec<String> = sink.calls().into_iter().map(|call| call.event).collect();
        assert_eq!(events, vec!["OperationCompletion"]);
    }
}

// ============================================================================
// Feed-driven sessions
// ============================================================================

mod feed_driven {
    use super::*;

    async fn wait_for_writes(writer: &RecordingWriter, at_least: usize) {
        for _ in 0..100 {
            if writer.calls().len() >= at_least {
                return;
            }
            sleep(Duration::from_millis(10)).await;
        }
        panic!(
            "timed out waiting for {at_least} writes, saw {}",
            writer.calls().len()
        );
    }

    #[tokio::test]
    async fn run_processes_only_its_own_device() {
        let feed = TelemetryFeed::new();
        let writer = RecordingWriter::default();
        let sink = RecordingSink::default();
        let device_id = DeviceId::new();
        let session = Arc::new(DeviceSession::with_clock(
            device_id,
            writer.clone(),
            sink.clone(),
            manual_clock(),
        ));

        let rx = feed.subscribe();
        let driver = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.run(rx).await }
        });

        let other_device = DeviceId::new();
        feed.publish(TelemetryUpdate::battery(
            other_device,
            BatteryUpdate::new(BatteryPercent::new(10).unwrap(), false),
        ));
        feed.publish(TelemetryUpdate::run_mode(
            device_id,
            RunModeUpdate::new(RunMode::Cleaning),
        ));

        wait_for_writes(&writer, 1).await;
        assert_eq!(writer.attributes_written(), vec!["CurrentMode"]);

        drop(feed);
        driver.await.unwrap();
    }

    #[tokio::test]
    async fn run_survives_delegate_rejections() {
        let feed = TelemetryFeed::new();
        let writer = RecordingWriter::default();
        let sink = RecordingSink::default();
        let device_id = DeviceId::new();
        let session = Arc::new(DeviceSession::with_clock(
            device_id,
            writer.clone(),
            sink.clone(),
            manual_clock(),
        ));

        let rx = feed.subscribe();
        let driver = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.run(rx).await }
        });

        writer.reject_next();
        feed.publish(TelemetryUpdate::run_mode(
            device_id,
            RunModeUpdate::new(RunMode::Cleaning),
        ));
        feed.publish(TelemetryUpdate::run_mode(
            device_id,
            RunModeUpdate::new(RunMode::Idle),
        ));

        wait_for_writes(&writer, 2).await;
        assert_eq!(
            writer.attributes_written(),
            vec!["CurrentMode", "CurrentMode"]
        );

        drop(feed);
        driver.await.unwrap();
    }
}
