//! Price estimate command

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use estimator_lib::{Attribute, FieldValue, InputCollector};
use serde_json::json;

use crate::client::{ApiClient, EstimateRequest, EstimateResponse};
use crate::output::{print_error, print_heading, print_info, OutputFormat};

/// House attributes; anything omitted keeps its default selection
#[derive(Debug, Default, Args)]
pub struct EstimateArgs {
    /// Area in square feet (500-100000)
    #[arg(long)]
    pub area: Option<u32>,
    /// Number of bedrooms (1-10)
    #[arg(long)]
    pub bedrooms: Option<u32>,
    /// Number of bathrooms (1-10)
    #[arg(long)]
    pub bathrooms: Option<u32>,
    /// Number of stories (1-4)
    #[arg(long)]
    pub stories: Option<u32>,
    /// Main road access (yes/no)
    #[arg(long)]
    pub mainroad: Option<String>,
    /// Guest room (yes/no)
    #[arg(long)]
    pub guestroom: Option<String>,
    /// Basement (yes/no)
    #[arg(long)]
    pub basement: Option<String>,
    /// Hot water heating (yes/no)
    #[arg(long)]
    pub hotwaterheating: Option<String>,
    /// Air conditioning (yes/no)
    #[arg(long)]
    pub airconditioning: Option<String>,
    /// Parking spaces (0-5)
    #[arg(long)]
    pub parking: Option<u32>,
    /// Preferred area (yes/no)
    #[arg(long)]
    pub prefarea: Option<String>,
    /// Furnishing status (furnished, semi-furnished, unfurnished)
    #[arg(long)]
    pub furnishingstatus: Option<String>,
}

impl EstimateArgs {
    /// Raw values given on the command line, in schema order
    fn given(&self) -> Vec<(Attribute, String)> {
        let integers = [
            (Attribute::Area, self.area),
            (Attribute::Bedrooms, self.bedrooms),
            (Attribute::Bathrooms, self.bathrooms),
            (Attribute::Stories, self.stories),
            (Attribute::Parking, self.parking),
        ];
        let options = [
            (Attribute::Mainroad, &self.mainroad),
            (Attribute::Guestroom, &self.guestroom),
            (Attribute::Basement, &self.basement),
            (Attribute::Hotwaterheating, &self.hotwaterheating),
            (Attribute::Airconditioning, &self.airconditioning),
            (Attribute::Prefarea, &self.prefarea),
            (Attribute::Furnishingstatus, &self.furnishingstatus),
        ];

        let mut given: Vec<(Attribute, String)> = integers
            .into_iter()
            .filter_map(|(attribute, value)| value.map(|v| (attribute, v.to_string())))
            .chain(
                options
                    .into_iter()
                    .filter_map(|(attribute, value)| value.clone().map(|v| (attribute, v))),
            )
            .collect();
        given.sort_by_key(|(attribute, _)| attribute.index());
        given
    }
}

/// Check the arguments against the control domains and build a complete request
pub fn build_request(args: &EstimateArgs) -> Result<EstimateRequest> {
    let mut collector = InputCollector::new();
    for (attribute, raw) in args.given() {
        collector.select(attribute, &raw)?;
    }

    Ok(collector
        .selections()
        .map(|(attribute, value)| {
            let value = match value {
                FieldValue::Integer(n) => json!(n),
                other => json!(other.to_string()),
            };
            (attribute.name().to_string(), value)
        })
        .collect())
}

/// Request an estimate and present it
pub async fn run(client: &ApiClient, args: &EstimateArgs, format: OutputFormat) -> Result<()> {
    let request = build_request(args)?;
    let response = client.estimate(&request).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Table => match response {
            EstimateResponse::Ok {
                formatted,
                note,
                model_version,
                ..
            } => {
                print_heading("Estimated House Price");
                println!("{}", formatted.green().bold());
                println!();
                println!("{}", note);
                print_info(&format!("Model version {}", model_version));
            }
            EstimateResponse::Failed { message } => {
                print_error(&message);
            }
        },
    }

    Ok(())
}
