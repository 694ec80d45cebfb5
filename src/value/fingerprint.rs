// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deterministic value fingerprints.

use std::fmt;
use std::fmt::Write as _;

use super::AttributeValue;

/// A deterministic, opaque encoding of an [`AttributeValue`].
///
/// Two values are "unchanged" for the write cache exactly when their
/// fingerprints are equal. Fingerprints are never parsed, only compared.
///
/// Encoding rules, in priority order:
///
/// - `Unset` and `Null` each map to their own fixed token.
/// - A NaN float maps to a fixed token, so every NaN equals every other
///   NaN. This is a property of the tagged-literal encoding, not of IEEE
///   comparison.
/// - Booleans, integers, floats, and strings use type-tagged literals;
///   string content is length-prefixed so composite encodings cannot
///   collide with scalar ones.
/// - Lists keep element order; structs iterate their sorted field maps.
/// - `Opaque` values encode as their type tag alone. Distinct opaque
///   values with the same tag therefore collide; this is a documented
///   imprecision, traded for never failing.
///
/// # Examples
///
/// ```
/// use rvcsync_lib::value::{AttributeValue, Fingerprint};
///
/// let a = Fingerprint::of(&AttributeValue::from(f64::NAN));
/// let b = Fingerprint::of(&AttributeValue::from(f64::NAN));
/// assert_eq!(a, b);
///
/// let zero = Fingerprint::of(&AttributeValue::from(0.0_f64));
/// assert_ne!(a, zero);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Computes the fingerprint of a value.
    ///
    /// Total over the whole vocabulary; never fails.
    #[must_use]
    pub fn of(value: &AttributeValue) -> Self {
        let mut out = String::new();
        encode(value, &mut out);
        Self(out)
    }

    /// Returns the encoded form, for logging.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn encode(value: &AttributeValue, out: &mut String) {
    match value {
        AttributeValue::Unset => out.push_str("unset"),
        AttributeValue::Null => out.push_str("null"),
        AttributeValue::Bool(flag) => {
            let _ = write!(out, "bool:{flag}");
        }
        AttributeValue::Int(value) => {
            let _ = write!(out, "int:{value}");
        }
        AttributeValue::Float(value) if value.is_nan() => out.push_str("float:nan"),
        AttributeValue::Float(value) => {
            let _ = write!(out, "float:{value:?}");
        }
        AttributeValue::Str(text) => {
            let _ = write!(out, "str:{}:{text}", text.len());
        }
        AttributeValue::List(items) => {
            out.push_str("list:[");
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                encode(item, out);
            }
            out.push(']');
        }
        AttributeValue::Struct(fields) => {
            out.push_str("struct:{");
            for (index, (key, item)) in fields.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                let _ = write!(out, "{}:{key}=", key.len());
                encode(item, out);
            }
            out.push('}');
        }
        AttributeValue::Opaque(tag) => {
            let _ = write!(out, "opaque:{tag}");
        }
    }
}
