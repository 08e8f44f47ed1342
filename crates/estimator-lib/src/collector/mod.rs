//! Input collection through bounded-choice controls
//!
//! Every schema attribute is exposed as either a numeric range or a closed
//! option list, each with a default selection. Raw choices coming back from
//! a form are parsed against the control, so an out-of-domain value never
//! reaches the record builder.

use crate::error::{RecordError, SelectionError};
use crate::models::{FeatureRecord, FeatureRecordBuilder, FieldValue, FurnishingStatus, YesNo};
use crate::schema::{Attribute, Domain, FURNISHING_OPTIONS, NUM_FEATURES, YES_NO_OPTIONS};
use serde::Serialize;

/// A bounded-choice control for one attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Inclusive integer range, default given as an offset from `min`
    Range { min: u32, max: u32, default_index: u32 },
    /// Closed option list, default given as a position in `options`
    Choice {
        options: &'static [&'static str],
        default_index: usize,
    },
}

impl Control {
    /// The domain this control allows
    pub fn domain(&self) -> Domain {
        match *self {
            Control::Range { min, max, .. } => Domain::Integer { min, max },
            Control::Choice { options, .. } => Domain::Enum { options },
        }
    }

    /// Value selected before any interaction
    pub fn default_value(&self) -> FieldValue {
        match *self {
            Control::Range {
                min, default_index, ..
            } => FieldValue::Integer(min + default_index),
            Control::Choice {
                options,
                default_index,
            } => option_value(options, options[default_index])
                .unwrap_or(FieldValue::YesNo(YesNo::Yes)),
        }
    }

    /// Number of distinct values the control offers
    pub fn len(&self) -> usize {
        match *self {
            Control::Range { min, max, .. } => (max - min + 1) as usize,
            Control::Choice { options, .. } => options.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse a raw choice, rejecting anything the control does not offer
    pub fn parse(&self, attribute: Attribute, raw: &str) -> Result<FieldValue, SelectionError> {
        let raw = raw.trim();
        match *self {
            Control::Range { min, max, .. } => {
                let value: u32 = raw.parse().map_err(|_| SelectionError::NotANumber {
                    attribute: attribute.name(),
                    raw: raw.to_string(),
                })?;
                if !(min..=max).contains(&value) {
                    return Err(SelectionError::OutOfRange {
                        attribute: attribute.name(),
                        min,
                        max,
                        value,
                    });
                }
                Ok(FieldValue::Integer(value))
            }
            Control::Choice { options, .. } => {
                option_value(options, raw).ok_or_else(|| SelectionError::NotAnOption {
                    attribute: attribute.name(),
                    options: options.join(", "),
                    raw: raw.to_string(),
                })
            }
        }
    }
}

fn option_value(options: &[&str], raw: &str) -> Option<FieldValue> {
    if !options.contains(&raw) {
        return None;
    }
    if options == FURNISHING_OPTIONS {
        FurnishingStatus::parse(raw).map(FieldValue::Furnishing)
    } else {
        YesNo::parse(raw).map(FieldValue::YesNo)
    }
}

const fn range(min: u32, max: u32, default_index: u32) -> Control {
    Control::Range {
        min,
        max,
        default_index,
    }
}

const YES_NO: Control = Control::Choice {
    options: YES_NO_OPTIONS,
    default_index: 0,
};

/// Controls in schema order
const CONTROLS: [Control; NUM_FEATURES] = [
    range(500, 100_000, 2000),
    range(1, 10, 2),
    range(1, 10, 1),
    range(1, 4, 1),
    YES_NO,
    YES_NO,
    YES_NO,
    YES_NO,
    YES_NO,
    range(0, 5, 1),
    YES_NO,
    Control::Choice {
        options: FURNISHING_OPTIONS,
        default_index: 0,
    },
];

/// Control offered for an attribute
pub fn control_for(attribute: Attribute) -> Control {
    CONTROLS[attribute.index()]
}

/// Serializable description of a control, for schema listings and clients
#[derive(Debug, Clone, Serialize)]
pub struct ControlDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub domain: Domain,
    pub default: FieldValue,
}

/// Describe every control in schema order
pub fn describe_controls() -> Vec<ControlDescriptor> {
    Attribute::ALL
        .iter()
        .map(|attribute| {
            let control = control_for(*attribute);
            ControlDescriptor {
                name: attribute.name(),
                label: attribute.label(),
                domain: control.domain(),
                default: control.default_value(),
            }
        })
        .collect()
}

/// Current selections of one form, starting from the defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputCollector {
    selections: [FieldValue; NUM_FEATURES],
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl InputCollector {
    /// Collector with every control at its default selection
    pub fn new() -> Self {
        Self {
            selections: CONTROLS.map(|c| c.default_value()),
        }
    }

    pub fn control(&self, attribute: Attribute) -> Control {
        control_for(attribute)
    }

    /// All controls in schema order
    pub fn controls(&self) -> impl Iterator<Item = (Attribute, Control)> {
        Attribute::ALL.into_iter().zip(CONTROLS)
    }

    /// Select a raw value for an attribute
    pub fn select(&mut self, attribute: Attribute, raw: &str) -> Result<FieldValue, SelectionError> {
        let value = control_for(attribute).parse(attribute, raw)?;
        self.selections[attribute.index()] = value;
        Ok(value)
    }

    /// Select by field name, as submitted by a form
    pub fn select_named(&mut self, name: &str, raw: &str) -> Result<FieldValue, SelectionError> {
        let attribute =
            Attribute::from_name(name).ok_or_else(|| SelectionError::UnknownField(name.to_string()))?;
        self.select(attribute, raw)
    }

    /// Apply submitted field/value pairs on top of the current selections
    ///
    /// Stops at the first rejected pair; earlier pairs stay applied.
    pub fn apply_form<I, K, V>(&mut self, pairs: I) -> Result<(), SelectionError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, raw) in pairs {
            self.select_named(name.as_ref(), raw.as_ref())?;
        }
        Ok(())
    }

    pub fn selection(&self, attribute: Attribute) -> FieldValue {
        self.selections[attribute.index()]
    }

    /// Current selections in schema order
    pub fn selections(&self) -> impl Iterator<Item = (Attribute, FieldValue)> + '_ {
        Attribute::ALL.into_iter().zip(self.selections.iter().copied())
    }

    /// Hand the selections to the record builder
    pub fn record(&self) -> Result<FeatureRecord, RecordError> {
        FeatureRecordBuilder::from_values(self.selections())
    }
}
