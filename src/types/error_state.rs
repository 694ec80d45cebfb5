// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operational error descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;
use crate::value::AttributeValue;

/// Error state identifiers for the RVC Operational State cluster.
///
/// [`ErrorStateId::NoError`] is the designated "no fault condition" value;
/// everything else describes a fault the appliance reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ErrorStateId {
    /// No fault condition.
    NoError,
    /// The appliance could not start or resume the operation.
    UnableToStartOrResume,
    /// The appliance could not complete the current operation.
    UnableToCompleteOperation,
    /// The command is invalid in the current state.
    CommandInvalidInState,
    /// The appliance failed to find its charging dock.
    FailedToFindChargingDock,
    /// The appliance is stuck.
    Stuck,
    /// The dust bin is missing.
    DustBinMissing,
    /// The dust bin is full.
    DustBinFull,
    /// The water tank is empty.
    WaterTankEmpty,
    /// The water tank is missing.
    WaterTankMissing,
    /// The water tank lid is open.
    WaterTankLidOpen,
    /// The mop cleaning pad is missing.
    MopCleaningPadMissing,
}

impl ErrorStateId {
    /// Returns the numeric identifier used on the wire.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::NoError => 0x00,
            Self::UnableToStartOrResume => 0x01,
            Self::UnableToCompleteOperation => 0x02,
            Self::CommandInvalidInState => 0x03,
            Self::FailedToFindChargingDock => 0x40,
            Self::Stuck => 0x41,
            Self::DustBinMissing => 0x42,
            Self::DustBinFull => 0x43,
            Self::WaterTankEmpty => 0x44,
            Self::WaterTankMissing => 0x45,
            Self::WaterTankLidOpen => 0x46,
            Self::MopCleaningPadMissing => 0x47,
        }
    }

    /// Parses a numeric identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::UnknownErrorState`] for identifiers outside
    /// the known set.
    pub const fn from_u8(id: u8) -> Result<Self, ValueError> {
        match id {
            0x00 => Ok(Self::NoError),
            0x01 => Ok(Self::UnableToStartOrResume),
            0x02 => Ok(Self::UnableToCompleteOperation),
            0x03 => Ok(Self::CommandInvalidInState),
            0x40 => Ok(Self::FailedToFindChargingDock),
            0x41 => Ok(Self::Stuck),
            0x42 => Ok(Self::DustBinMissing),
            0x43 => Ok(Self::DustBinFull),
            0x44 => Ok(Self::WaterTankEmpty),
            0x45 => Ok(Self::WaterTankMissing),
            0x46 => Ok(Self::WaterTankLidOpen),
            0x47 => Ok(Self::MopCleaningPadMissing),
            other => Err(ValueError::UnknownErrorState(other)),
        }
    }

    /// Returns `true` for the designated no-error identifier.
    #[must_use]
    pub const fn is_no_error(self) -> bool {
        matches!(self, Self::NoError)
    }
}

impl fmt::Display for ErrorStateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<ErrorStateId> for u8 {
    fn from(id: ErrorStateId) -> Self {
        id.as_u8()
    }
}

impl TryFrom<u8> for ErrorStateId {
    type Error = ValueError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::from_u8(id)
    }
}

/// A full operational error descriptor.
///
/// Carries the identifier plus the optional human-readable label and
/// detail string the appliance reported. Two descriptors are the same
/// error only when all three fields match; the edge detector relies on
/// this to tell a re-labelled fault from an unchanged one.
///
/// # Examples
///
/// ```
/// use rvcsync_lib::types::{ErrorState, ErrorStateId};
///
/// let stuck = ErrorState::new(ErrorStateId::Stuck)
///     .with_label("Stuck")
///     .with_details("wedged under the couch");
/// assert!(!stuck.is_clear());
/// assert!(ErrorState::clear().is_clear());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorState {
    /// Error identifier.
    #[serde(rename = "errorStateId")]
    id: ErrorStateId,
    /// Short human-readable label.
    #[serde(rename = "errorStateLabel", skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    label: Option<String>,
    /// Free-form detail string.
    #[serde(rename = "errorStateDetails", skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    details: Option<String>,
}

impl ErrorState {
    /// Creates a descriptor with the given identifier and no label or details.
    #[must_use]
    pub const fn new(id: ErrorStateId) -> Self {
        Self {
            id,
            label: None,
            details: None,
        }
    }

    /// Creates the no-error descriptor.
    #[must_use]
    pub const fn clear() -> Self {
        Self::new(ErrorStateId::NoError)
    }

    /// Attaches a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attaches a detail string.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Returns the error identifier.
    #[must_use]
    pub const fn id(&self) -> ErrorStateId {
        self.id
    }

    /// Returns the label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the detail string, if any.
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns `true` when this descriptor reports no fault.
    #[must_use]
    pub const fn is_clear(&self) -> bool {
        self.id.is_no_error()
    }

    /// Renders the descriptor as an attribute value for the
    /// `OperationalError` slot.
    #[must_use]
    pub fn to_attribute_value(&self) -> AttributeValue {
        let mut fields = vec![(
            "errorStateId".to_string(),
            AttributeValue::from(i64::from(self.id.as_u8())),
        )];
        if let Some(label) = &self.label {
            fields.push(("errorStateLabel".to_string(), AttributeValue::from(label.as_str())));
        }
        if let Some(details) = &self.details {
            fields.push((
                "errorStateDetails".to_string(),
                AttributeValue::from(details.as_str()),
            ));
        }
        AttributeValue::from_entries(fields)
    }
}

impl Default for ErrorState {
    fn default() -> Self {
        Self::clear()
    }
}

impl fmt::Display for ErrorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.label, &self.details) {
            (Some(label), Some(details)) => write!(f, "{} ({label}: {details})", self.id),
            (Some(label), None) => write!(f, "{} ({label})", self.id),
            _ => write!(f, "{}", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip() {
        for id in [
            ErrorStateId::NoError,
            ErrorStateId::UnableToStartOrResume,
            ErrorStateId::Stuck,
            ErrorStateId::DustBinFull,
            ErrorStateId::MopCleaningPadMissing,
        ] {
            assert_eq!(ErrorStateId::from_u8(id.as_u8()), Ok(id));
        }
    }

    #[test]
    fn unknown_id_is_rejected() {
        assert_eq!(
            ErrorStateId::from_u8(0x99),
            Err(ValueError::UnknownErrorState(0x99))
        );
    }

    #[test]
    fn descriptors_compare_field_wise() {
        let base = ErrorState::new(ErrorStateId::Stuck);
        assert_eq!(base, ErrorState::new(ErrorStateId::Stuck));
        assert_ne!(base, base.clone().with_label("Stuck"));
        assert_ne!(
            base.clone().with_details("left wheel"),
            base.clone().with_details("right wheel")
        );
    }

    #[test]
    fn clear_is_no_error() {
        assert!(ErrorState::clear().is_clear());
        assert!(!ErrorState::new(ErrorStateId::DustBinMissing).is_clear());
    }

    #[test]
    fn attribute_value_omits_absent_fields() {
        let bare = ErrorState::new(ErrorStateId::WaterTankEmpty).to_attribute_value();
        let labelled = ErrorState::new(ErrorStateId::WaterTankEmpty)
            .with_label("Water tank empty")
            .to_attribute_value();
        assert_ne!(bare, labelled);
    }

    #[test]
    fn serde_shape_matches_the_wire_names() {
        let state = ErrorState::new(ErrorStateId::Stuck).with_label("Stuck");
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["errorStateId"], serde_json::json!(0x41));
        assert_eq!(json["errorStateLabel"], serde_json::json!("Stuck"));
        assert!(json.get("errorStateDetails").is_none());
    }
}
