//! Feature schema listing

use anyhow::Result;
use estimator_lib::{collector::describe_controls, schema::SCHEMA_VERSION};
use serde::Serialize;
use tabled::Tabled;

use crate::client::{ApiClient, AttributeInfo, DomainInfo, SchemaResponse};
use crate::output::{format_domain, print_heading, print_table, OutputFormat};

/// Row for the schema table
#[derive(Tabled, Serialize)]
struct AttributeRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Values")]
    values: String,
    #[tabled(rename = "Default")]
    default: String,
}

impl AttributeRow {
    fn new(position: usize, info: &AttributeInfo) -> Self {
        let values = match &info.domain {
            DomainInfo::Integer { min, max } => format_domain(Some((*min, *max)), &[]),
            DomainInfo::Enum { options } => format_domain(None, options),
        };
        let default = match &info.default {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        Self {
            position,
            name: info.name.clone(),
            label: info.label.clone(),
            values,
            default,
        }
    }
}

/// The schema this binary was built with, without asking a server
pub fn local_schema() -> Result<SchemaResponse> {
    let attributes = serde_json::from_value(serde_json::to_value(describe_controls())?)?;
    Ok(SchemaResponse {
        schema_version: SCHEMA_VERSION.to_string(),
        model_version: "n/a".to_string(),
        attributes,
    })
}

/// Show the ordered attribute schema
pub async fn show_schema(client: &ApiClient, local: bool, format: OutputFormat) -> Result<()> {
    let schema = if local {
        local_schema()?
    } else {
        client.schema().await?
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        OutputFormat::Table => {
            print_heading(&format!(
                "Feature Schema {} (model {})",
                schema.schema_version, schema.model_version
            ));
            let rows: Vec<AttributeRow> = schema
                .attributes
                .iter()
                .enumerate()
                .map(|(i, info)| AttributeRow::new(i + 1, info))
                .collect();
            print_table(&rows, format);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_schema_matches_feature_order() {
        let schema = local_schema().unwrap();
        let names: Vec<&str> = schema.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, estimator_lib::schema::feature_names());
        assert_eq!(schema.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn test_rows_render_domains_and_defaults() {
        let schema = local_schema().unwrap();
        let area = AttributeRow::new(1, &schema.attributes[0]);
        assert_eq!(area.values, "500..=100000");
        assert_eq!(area.default, "2500");

        let furnishing = AttributeRow::new(12, &schema.attributes[11]);
        assert_eq!(furnishing.values, "furnished | semi-furnished | unfurnished");
        assert_eq!(furnishing.default, "furnished");
    }
}
