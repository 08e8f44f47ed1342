//! Core data models for the estimator

use crate::error::RecordError;
use crate::schema::{Attribute, NUM_FEATURES};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Answer for a yes/no amenity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::Yes => "yes",
            YesNo::No => "no",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "yes" => Some(YesNo::Yes),
            "no" => Some(YesNo::No),
            _ => None,
        }
    }
}

/// Furnishing status of the house
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FurnishingStatus {
    Furnished,
    SemiFurnished,
    Unfurnished,
}

impl FurnishingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FurnishingStatus::Furnished => "furnished",
            FurnishingStatus::SemiFurnished => "semi-furnished",
            FurnishingStatus::Unfurnished => "unfurnished",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "furnished" => Some(FurnishingStatus::Furnished),
            "semi-furnished" => Some(FurnishingStatus::SemiFurnished),
            "unfurnished" => Some(FurnishingStatus::Unfurnished),
            _ => None,
        }
    }
}

/// A selected value for one attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(u32),
    YesNo(YesNo),
    Furnishing(FurnishingStatus),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::YesNo(v) => f.write_str(v.as_str()),
            FieldValue::Furnishing(v) => f.write_str(v.as_str()),
        }
    }
}

/// One fully populated feature record, fields in schema order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FeatureRecord {
    pub area: u32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub stories: u32,
    pub mainroad: YesNo,
    pub guestroom: YesNo,
    pub basement: YesNo,
    pub hotwaterheating: YesNo,
    pub airconditioning: YesNo,
    pub parking: u32,
    pub prefarea: YesNo,
    pub furnishingstatus: FurnishingStatus,
}

impl FeatureRecord {
    /// Field values in schema order
    pub fn values(&self) -> [FieldValue; NUM_FEATURES] {
        [
            FieldValue::Integer(self.area),
            FieldValue::Integer(self.bedrooms),
            FieldValue::Integer(self.bathrooms),
            FieldValue::Integer(self.stories),
            FieldValue::YesNo(self.mainroad),
            FieldValue::YesNo(self.guestroom),
            FieldValue::YesNo(self.basement),
            FieldValue::YesNo(self.hotwaterheating),
            FieldValue::YesNo(self.airconditioning),
            FieldValue::Integer(self.parking),
            FieldValue::YesNo(self.prefarea),
            FieldValue::Furnishing(self.furnishingstatus),
        ]
    }

    pub fn get(&self, attribute: Attribute) -> FieldValue {
        self.values()[attribute.index()]
    }

    /// Numeric encoding fed to the model, in schema order
    ///
    /// yes/no map to 1/0, furnishing status maps to its option index.
    pub fn to_features(&self) -> [f32; NUM_FEATURES] {
        self.values().map(|value| match value {
            FieldValue::Integer(v) => v as f32,
            FieldValue::YesNo(YesNo::Yes) => 1.0,
            FieldValue::YesNo(YesNo::No) => 0.0,
            FieldValue::Furnishing(FurnishingStatus::Furnished) => 0.0,
            FieldValue::Furnishing(FurnishingStatus::SemiFurnished) => 1.0,
            FieldValue::Furnishing(FurnishingStatus::Unfurnished) => 2.0,
        })
    }
}

/// Assembles a [`FeatureRecord`] from one value per attribute
///
/// The builder never defaults, infers or reorders: a missing attribute is
/// a construction error.
#[derive(Debug, Clone, Default)]
pub struct FeatureRecordBuilder {
    values: [Option<FieldValue>; NUM_FEATURES],
}

impl FeatureRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, attribute: Attribute, value: FieldValue) -> Self {
        self.values[attribute.index()] = Some(value);
        self
    }

    /// Build from a complete set of selections
    pub fn from_values<I>(values: I) -> Result<FeatureRecord, RecordError>
    where
        I: IntoIterator<Item = (Attribute, FieldValue)>,
    {
        values
            .into_iter()
            .fold(Self::new(), |builder, (attribute, value)| {
                builder.set(attribute, value)
            })
            .build()
    }

    pub fn build(&self) -> Result<FeatureRecord, RecordError> {
        Ok(FeatureRecord {
            area: self.integer(Attribute::Area)?,
            bedrooms: self.integer(Attribute::Bedrooms)?,
            bathrooms: self.integer(Attribute::Bathrooms)?,
            stories: self.integer(Attribute::Stories)?,
            mainroad: self.yes_no(Attribute::Mainroad)?,
            guestroom: self.yes_no(Attribute::Guestroom)?,
            basement: self.yes_no(Attribute::Basement)?,
            hotwaterheating: self.yes_no(Attribute::Hotwaterheating)?,
            airconditioning: self.yes_no(Attribute::Airconditioning)?,
            parking: self.integer(Attribute::Parking)?,
            prefarea: self.yes_no(Attribute::Prefarea)?,
            furnishingstatus: self.furnishing(Attribute::Furnishingstatus)?,
        })
    }

    fn value(&self, attribute: Attribute) -> Result<FieldValue, RecordError> {
        self.values[attribute.index()].ok_or(RecordError::MissingAttribute(attribute))
    }

    fn integer(&self, attribute: Attribute) -> Result<u32, RecordError> {
        match self.value(attribute)? {
            FieldValue::Integer(v) => Ok(v),
            _ => Err(RecordError::WrongKind(attribute)),
        }
    }

    fn yes_no(&self, attribute: Attribute) -> Result<YesNo, RecordError> {
        match self.value(attribute)? {
            FieldValue::YesNo(v) => Ok(v),
            _ => Err(RecordError::WrongKind(attribute)),
        }
    }

    fn furnishing(&self, attribute: Attribute) -> Result<FurnishingStatus, RecordError> {
        match self.value(attribute)? {
            FieldValue::Furnishing(v) => Ok(v),
            _ => Err(RecordError::WrongKind(attribute)),
        }
    }
}

/// A successful estimate, ready to display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceEstimate {
    pub price: f64,
    pub formatted: String,
    pub note: String,
    pub model_version: String,
}
