// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Change-driven write suppression.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::cluster::{AttributeKey, ClusterRef};
use crate::error::DelegateError;
use crate::framework::AttributeWriter;
use crate::value::{AttributeValue, Fingerprint};

/// Outcome of a [`WriteCache::write_if_changed`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The value changed and a delegated write was issued.
    Written,
    /// The value matched the last fingerprint; nothing was written.
    Unchanged,
}

impl WriteOutcome {
    /// Returns `true` when a delegated write was issued.
    #[must_use]
    pub const fn is_written(self) -> bool {
        matches!(self, Self::Written)
    }
}

/// Per-session cache of last-written attribute fingerprints.
///
/// Given a stream of (slot, value) pairs, the cache permits exactly one
/// delegated write per semantic change and suppresses the rest. A slot
/// never seen before and a slot seen with a different value are treated
/// alike: both write.
///
/// Fingerprints are recorded after the delegated call is issued, and they
/// are recorded even when the delegate reports failure: the failure
/// still reaches the caller, but a retry with the same value is
/// suppressed. The commit policy is pinned down in the test suite.
///
/// The map tolerates concurrent use from independent attribute-group
/// streams; within one slot, callers deliver one update at a time (the
/// delivering collaborator's ordering guarantee). Entries are never
/// removed; the cache drops with its owning session.
#[derive(Debug, Default)]
pub struct WriteCache {
    fingerprints: RwLock<HashMap<AttributeKey, Fingerprint>>,
}

impl WriteCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of slots written at least once.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fingerprints.read().len()
    }

    /// Returns `true` if no slot has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fingerprints.read().is_empty()
    }

    /// Writes `value` to the slot if it differs from the last write.
    ///
    /// # Errors
    ///
    /// Propagates [`DelegateError`] from the writer. The fingerprint for
    /// the slot is committed first, so the same value does not write again.
    pub async fn write_if_changed<W>(
        &self,
        writer: &W,
        cluster: &ClusterRef,
        attribute: &str,
        value: &AttributeValue,
    ) -> Result<WriteOutcome, DelegateError>
    where
        W: AttributeWriter + ?Sized,
    {
        let key = AttributeKey::new(cluster, attribute);
        let fingerprint = Fingerprint::of(value);

        {
            let seen = self.fingerprints.read();
            if seen.get(&key) == Some(&fingerprint) {
                tracing::trace!(%key, "attribute unchanged, write suppressed");
                return Ok(WriteOutcome::Unchanged);
            }
        }

        tracing::debug!(%key, "attribute changed, issuing write");
        let result = writer.write(cluster, attribute, value).await;
        self.fingerprints.write().insert(key, fingerprint);
        result?;
        Ok(WriteOutcome::Written)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use parking_lot::Mutex;

    use crate::cluster::ClusterId;

    use super::*;

    #[derive(Default)]
    struct RecordingWriter {
        writes: Mutex<Vec<(String, String, AttributeValue)>>,
        fail: bool,
    }

    impl RecordingWriter {
        fn failing() -> Self {
            Self {
                writes: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn count(&self) -> usize {
            self.writes.lock().len()
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
            self.writes.lock().push((
                cluster.canonical_key(),
                attribute.to_string(),
                value.clone(),
            ));
            if self.fail {
                Err(DelegateError::WriteRejected {
                    cluster: cluster.canonical_key(),
                    attribute: attribute.to_string(),
                    message: "rejected".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn cluster() -> ClusterRef {
        ClusterRef::Known(ClusterId::PowerSource)
    }

    #[tokio::test]
    async fn first_write_goes_through() {
        let cache = WriteCache::new();
        let writer = RecordingWriter::default();

        let outcome = cache
            .write_if_changed(&writer, &cluster(), "BatChargeLevel", &AttributeValue::from(0u8))
            .await
            .unwrap();

        assert!(outcome.is_written());
        assert_eq!(writer.count(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn identical_value_writes_once() {
        let cache = WriteCache::new();
        let writer = RecordingWriter::default();
        let value = AttributeValue::from(152u8);

        for _ in 0..3 {
            cache
                .write_if_changed(&writer, &cluster(), "BatPercentRemaining", &value)
                .await
                .unwrap();
        }

        assert_eq!(writer.count(), 1);
    }

    #[tokio::test]
    async fn changed_value_writes_again() {
        let cache = WriteCache::new();
        let writer = RecordingWriter::default();

        for value in [150u8, 150, 148] {
            cache
                .write_if_changed(
                    &writer,
                    &cluster(),
                    "BatPercentRemaining",
                    &AttributeValue::from(value),
                )
                .await
                .unwrap();
        }

        assert_eq!(writer.count(), 2);
    }

    #[tokio::test]
    async fn keys_normalize_across_representations() {
        let cache = WriteCache::new();
        let writer = RecordingWriter::default();
        let value = AttributeValue::from(1u8);

        let representations = [
            ClusterRef::Id(0x002F),
            ClusterRef::Known(ClusterId::PowerSource),
            ClusterRef::descriptor(None, Some("PowerSource")),
        ];
        for reference in &representations {
            cache
                .write_if_changed(&writer, reference, "BatChargeState", &value)
                .await
                .unwrap();
        }

        assert_eq!(writer.count(), 1);
    }

    #[tokio::test]
    async fn distinct_slots_are_independent() {
        let cache = WriteCache::new();
        let writer = RecordingWriter::default();
        let value = AttributeValue::from(1u8);

        cache
            .write_if_changed(&writer, &cluster(), "BatChargeLevel", &value)
            .await
            .unwrap();
        cache
            .write_if_changed(&writer, &cluster(), "BatChargeState", &value)
            .await
            .unwrap();

        assert_eq!(writer.count(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn nan_values_compare_equal() {
        let cache = WriteCache::new();
        let writer = RecordingWriter::default();

        for _ in 0..2 {
            cache
                .write_if_changed(
                    &writer,
                    &cluster(),
                    "BatVoltage",
                    &AttributeValue::from(f64::NAN),
                )
                .await
                .unwrap();
        }
        assert_eq!(writer.count(), 1);

        cache
            .write_if_changed(&writer, &cluster(), "BatVoltage", &AttributeValue::from(0.0))
            .await
            .unwrap();
        assert_eq!(writer.count(), 2);
    }

    #[tokio::test]
    async fn opaque_values_never_error_and_still_write() {
        let cache = WriteCache::new();
        let writer = RecordingWriter::default();

        cache
            .write_if_changed(&writer, &cluster(), "VendorBlob", &AttributeValue::from("plain"))
            .await
            .unwrap();
        let outcome = cache
            .write_if_changed(
                &writer,
                &cluster(),
                "VendorBlob",
                &AttributeValue::opaque("blob"),
            )
            .await
            .unwrap();

        assert!(outcome.is_written());
        assert_eq!(writer.count(), 2);
    }

    #[tokio::test]
    async fn fingerprint_commits_even_when_the_delegate_fails() {
        // Commit-on-issue policy: a transiently failing delegate leaves the
        // slot marked written, so the same value is suppressed afterwards.
        let cache = WriteCache::new();
        let writer = RecordingWriter::failing();
        let value = AttributeValue::from(42u8);

        let first = cache
            .write_if_changed(&writer, &cluster(), "BatChargeLevel", &value)
            .await;
        assert!(first.is_err());

        let second = cache
            .write_if_changed(&writer, &cluster(), "BatChargeLevel", &value)
            .await
            .unwrap();
        assert_eq!(second, WriteOutcome::Unchanged);
        assert_eq!(writer.count(), 1);
    }
}
