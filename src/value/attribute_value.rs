// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The value vocabulary for downstream attribute writes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Maximum nesting depth accepted when converting feed JSON.
///
/// Anything deeper degrades to [`AttributeValue::Opaque`] instead of
/// failing; the write still goes through.
const MAX_JSON_DEPTH: usize = 32;

/// A value destined for one attribute slot.
///
/// This is the closed vocabulary the write cache fingerprints. `Unset`
/// (the attribute carries no value at all) and `Null` (the attribute
/// carries an explicit null) are distinct. Structured values keep their
/// field maps sorted, so two maps with the same entries are the same
/// value no matter the insertion order. `Opaque` stands in for payloads
/// that cannot be canonically encoded; it carries only a type tag.
///
/// # Examples
///
/// ```
/// use rvcsync_lib::value::AttributeValue;
///
/// let value = AttributeValue::from_entries([
///     ("errorStateId", AttributeValue::from(0x41_i64)),
///     ("errorStateLabel", AttributeValue::from("Stuck")),
/// ]);
/// assert!(matches!(value, AttributeValue::Struct(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// No value at all.
    Unset,
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered list.
    List(Vec<AttributeValue>),
    /// A record with sorted keys.
    Struct(BTreeMap<String, AttributeValue>),
    /// A value that cannot be canonically encoded; only its type tag
    /// survives. Distinct opaque values sharing a tag are
    /// indistinguishable to the fingerprint.
    Opaque(String),
}

impl AttributeValue {
    /// Creates an opaque value carrying only a type tag.
    #[must_use]
    pub fn opaque(tag: impl Into<String>) -> Self {
        Self::Opaque(tag.into())
    }

    /// Builds a struct value from key/value entries.
    #[must_use]
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, AttributeValue)>,
    {
        Self::Struct(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// Converts a feed JSON value.
    ///
    /// The conversion is total: numbers become integers when they fit and
    /// floats otherwise, objects become sorted structs, and anything
    /// nested beyond the depth cap becomes an opaque `json` value.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        Self::from_json_at(value, 0)
    }

    fn from_json_at(value: &serde_json::Value, depth: usize) -> Self {
        if depth >= MAX_JSON_DEPTH {
            return Self::opaque("json");
        }
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(flag) => Self::Bool(*flag),
            serde_json::Value::Number(number) => number.as_i64().map_or_else(
                || Self::Float(number.as_f64().unwrap_or(f64::NAN)),
                Self::Int,
            ),
            serde_json::Value::String(text) => Self::Str(text.clone()),
            serde_json::Value::Array(items) => Self::List(
                items
                    .iter()
                    .map(|item| Self::from_json_at(item, depth + 1))
                    .collect(),
            ),
            serde_json::Value::Object(fields) => Self::Struct(
                fields
                    .iter()
                    .map(|(key, item)| (key.clone(), Self::from_json_at(item, depth + 1)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u8> for AttributeValue {
    fn from(value: u8) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u16> for AttributeValue {
    fn from(value: u16) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for AttributeValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(items: Vec<AttributeValue>) -> Self {
        Self::List(items)
    }
}
