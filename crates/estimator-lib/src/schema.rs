//! Feature schema for the house price model
//!
//! The order of [`FEATURE_SCHEMA`] is the order the model was trained
//! against. Every record handed to a predictor follows it exactly; a
//! permutation does not fail, it silently yields a wrong price.

use serde::Serialize;

/// Version tag a model manifest must carry to be accepted
pub const SCHEMA_VERSION: &str = "house-features/v1";

/// Number of attributes in a feature record
pub const NUM_FEATURES: usize = 12;

/// Options for every yes/no amenity attribute
pub const YES_NO_OPTIONS: &[&str] = &["yes", "no"];

/// Options for the furnishing status attribute
pub const FURNISHING_OPTIONS: &[&str] = &["furnished", "semi-furnished", "unfurnished"];

/// Attributes of a house, declared in model order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Area,
    Bedrooms,
    Bathrooms,
    Stories,
    Mainroad,
    Guestroom,
    Basement,
    Hotwaterheating,
    Airconditioning,
    Parking,
    Prefarea,
    Furnishingstatus,
}

impl Attribute {
    /// All attributes in schema order
    pub const ALL: [Attribute; NUM_FEATURES] = [
        Attribute::Area,
        Attribute::Bedrooms,
        Attribute::Bathrooms,
        Attribute::Stories,
        Attribute::Mainroad,
        Attribute::Guestroom,
        Attribute::Basement,
        Attribute::Hotwaterheating,
        Attribute::Airconditioning,
        Attribute::Parking,
        Attribute::Prefarea,
        Attribute::Furnishingstatus,
    ];

    /// Column name the model was trained with
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Area => "area",
            Attribute::Bedrooms => "bedrooms",
            Attribute::Bathrooms => "bathrooms",
            Attribute::Stories => "stories",
            Attribute::Mainroad => "mainroad",
            Attribute::Guestroom => "guestroom",
            Attribute::Basement => "basement",
            Attribute::Hotwaterheating => "hotwaterheating",
            Attribute::Airconditioning => "airconditioning",
            Attribute::Parking => "parking",
            Attribute::Prefarea => "prefarea",
            Attribute::Furnishingstatus => "furnishingstatus",
        }
    }

    /// Human readable label used by forms and tables
    pub fn label(&self) -> &'static str {
        match self {
            Attribute::Area => "Area (sq ft)",
            Attribute::Bedrooms => "Bedrooms",
            Attribute::Bathrooms => "Bathrooms",
            Attribute::Stories => "Stories",
            Attribute::Mainroad => "Main Road",
            Attribute::Guestroom => "Guest Room",
            Attribute::Basement => "Basement",
            Attribute::Hotwaterheating => "Hot Water Heating",
            Attribute::Airconditioning => "Air Conditioning",
            Attribute::Parking => "Parking Spots",
            Attribute::Prefarea => "Preferred Area",
            Attribute::Furnishingstatus => "Furnishing Status",
        }
    }

    /// Position of the attribute in a feature record
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_name(name: &str) -> Option<Attribute> {
        Attribute::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Declared value domain
    pub fn domain(&self) -> Domain {
        FEATURE_SCHEMA[self.index()].domain
    }
}

/// Value domain of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Domain {
    /// Inclusive integer range
    Integer { min: u32, max: u32 },
    /// Closed set of options
    Enum { options: &'static [&'static str] },
}

impl Domain {
    pub fn contains_integer(&self, value: u32) -> bool {
        matches!(self, Domain::Integer { min, max } if (*min..=*max).contains(&value))
    }

    pub fn contains_option(&self, value: &str) -> bool {
        matches!(self, Domain::Enum { options } if options.contains(&value))
    }
}

/// One schema entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureSpec {
    pub attribute: Attribute,
    pub domain: Domain,
}

const fn integer(attribute: Attribute, min: u32, max: u32) -> FeatureSpec {
    FeatureSpec {
        attribute,
        domain: Domain::Integer { min, max },
    }
}

const fn yes_no(attribute: Attribute) -> FeatureSpec {
    FeatureSpec {
        attribute,
        domain: Domain::Enum {
            options: YES_NO_OPTIONS,
        },
    }
}

/// The ordered feature schema
pub const FEATURE_SCHEMA: [FeatureSpec; NUM_FEATURES] = [
    integer(Attribute::Area, 500, 100_000),
    integer(Attribute::Bedrooms, 1, 10),
    integer(Attribute::Bathrooms, 1, 10),
    integer(Attribute::Stories, 1, 4),
    yes_no(Attribute::Mainroad),
    yes_no(Attribute::Guestroom),
    yes_no(Attribute::Basement),
    yes_no(Attribute::Hotwaterheating),
    yes_no(Attribute::Airconditioning),
    integer(Attribute::Parking, 0, 5),
    yes_no(Attribute::Prefarea),
    FeatureSpec {
        attribute: Attribute::Furnishingstatus,
        domain: Domain::Enum {
            options: FURNISHING_OPTIONS,
        },
    },
];

/// Column names in schema order
pub fn feature_names() -> Vec<&'static str> {
    FEATURE_SCHEMA.iter().map(|s| s.attribute.name()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_order_matches_training_columns() {
        assert_eq!(
            feature_names(),
            vec![
                "area",
                "bedrooms",
                "bathrooms",
                "stories",
                "mainroad",
                "guestroom",
                "basement",
                "hotwaterheating",
                "airconditioning",
                "parking",
                "prefarea",
                "furnishingstatus",
            ]
        );
    }

    #[test]
    fn test_schema_entries_align_with_attribute_index() {
        for (i, spec) in FEATURE_SCHEMA.iter().enumerate() {
            assert_eq!(spec.attribute.index(), i);
            assert_eq!(Attribute::ALL[i], spec.attribute);
        }
    }

    #[test]
    fn test_from_name_roundtrips() {
        for attribute in Attribute::ALL {
            assert_eq!(Attribute::from_name(attribute.name()), Some(attribute));
        }
        assert_eq!(Attribute::from_name("garden"), None);
    }

    #[test]
    fn test_domain_bounds() {
        let area = Attribute::Area.domain();
        assert!(area.contains_integer(500));
        assert!(area.contains_integer(100_000));
        assert!(!area.contains_integer(499));
        assert!(!area.contains_integer(100_001));
        assert!(!area.contains_option("yes"));

        let parking = Attribute::Parking.domain();
        assert!(parking.contains_integer(0));
        assert!(!parking.contains_integer(6));

        let furnishing = Attribute::Furnishingstatus.domain();
        assert!(furnishing.contains_option("semi-furnished"));
        assert!(!furnishing.contains_option("yes"));
        assert!(!furnishing.contains_integer(1));
    }
}
