// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for the bridged vacuum.
//!
//! This module provides type-safe representations of the readings that
//! flow through the bridge. Constrained types validate at construction
//! time, and the wire-facing enums expose their numeric codes through
//! `as_u8`/`from_u8` pairs.
//!
//! # Types
//!
//! - [`BatteryPercent`] - Battery charge (0-100%)
//! - [`BatteryChargeLevel`] / [`BatteryChargeState`] - Power Source enums
//! - [`RunMode`] - Selectable run modes
//! - [`OperationalStateCode`] - Operational state codes
//! - [`ErrorStateId`] / [`ErrorState`] - Operational error descriptors
//! - [`OperationalSnapshot`] - One composite operational reading

mod battery;
mod error_state;
mod operational_state;
mod run_mode;

pub use battery::{BatteryChargeLevel, BatteryChargeState, BatteryPercent};
pub use error_state::{ErrorState, ErrorStateId};
pub use operational_state::{OperationalSnapshot, OperationalStateCode};
pub use run_mode::RunMode;
