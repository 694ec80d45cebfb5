// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute values and their fingerprints.
//!
//! [`AttributeValue`] is the closed vocabulary of values the bridge hands
//! to the framework, and [`Fingerprint`] is the deterministic encoding the
//! write cache compares to decide whether a value actually changed.
//!
//! # Examples
//!
//! ```
//! use rvcsync_lib::value::{AttributeValue, Fingerprint};
//!
//! let before = Fingerprint::of(&AttributeValue::from(152u8));
//! let after = Fingerprint::of(&AttributeValue::from(152u8));
//! assert_eq!(before, after);
//! ```

mod attribute_value;
mod fingerprint;

pub use attribute_value::AttributeValue;
pub use fingerprint::Fingerprint;
