// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary contracts toward the smart-home framework.
//!
//! The bridge never owns attribute storage or event transport. It calls
//! these delegate traits, supplied by the host, and propagates whatever
//! they report. A rejected call is never retried here.
//!
//! # Examples
//!
//! ```
//! use async_trait::async_trait;
//! use rvcsync_lib::cluster::ClusterRef;
//! use rvcsync_lib::error::DelegateError;
//! use rvcsync_lib::framework::AttributeWriter;
//! use rvcsync_lib::value::AttributeValue;
//!
//! struct StdoutWriter;
//!
//! #[async_trait]
//! impl AttributeWriter for StdoutWriter {
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
//! ```

use async_trait::async_trait;

use crate::cluster::ClusterRef;
use crate::error::DelegateError;
use crate::value::AttributeValue;

/// Writes attribute values into the framework's cluster storage.
///
/// Called only when the write cache decided the value changed; the
/// implementation does not need to deduplicate.
#[async_trait]
pub trait AttributeWriter: Send + Sync {
    /// Writes one attribute value.
    ///
    /// # Errors
    ///
    /// Returns [`DelegateError::WriteRejected`] when the framework refuses
    /// the write.
    async fn write(
        &self,
        cluster: &ClusterRef,
        attribute: &str,
        value: &AttributeValue,
    ) -> Result<(), DelegateError>;
}

/// Emits cluster events into the framework.
///
/// Called only on detected edges, at most twice per operational snapshot.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Emits one event with its payload.
    ///
    /// # Errors
    ///
    /// Returns [`DelegateError::EmitRejected`] when the framework refuses
    /// the emission.
    async fn emit(
        &self,
        cluster: &ClusterRef,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), DelegateError>;
}
