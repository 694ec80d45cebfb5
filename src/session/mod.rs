// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device sessions tying the feed to the framework delegates.
//!
//! A [`DeviceSession`] owns one write cache and one edge detector, both
//! scoped to a single device and torn down with it. Sessions react to
//! telemetry notifications, delivered through [`DeviceSession::run`] or
//! by calling the `process_*` entry points directly, and talk to the
//! framework exclusively through the delegate traits.

mod device_session;

pub use device_session::DeviceSession;
