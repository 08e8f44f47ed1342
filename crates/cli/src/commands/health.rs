//! Server health and readiness

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use crate::client::{ApiClient, HealthResponse, ReadinessResponse};
use crate::output::{color_status, print_heading, print_success, print_warning, OutputFormat};

#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "Component")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Message")]
    message: String,
}

#[derive(Serialize)]
struct HealthReport {
    health: HealthResponse,
    readiness: Option<ReadinessResponse>,
}

/// Show component health and whether a model is serving
pub async fn show_health(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let health = client.health().await?;
    // Not ready comes back as 503
    let readiness = client.readiness().await;

    match format {
        OutputFormat::Json => {
            let report = HealthReport {
                health,
                readiness: readiness.ok(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            print_heading(&format!("Server {}", color_status(&health.status)));

            let mut rows: Vec<ComponentRow> = health
                .components
                .iter()
                .map(|(name, info)| ComponentRow {
                    name: name.clone(),
                    status: color_status(&info.status),
                    message: info.message.clone().unwrap_or_default(),
                })
                .collect();
            rows.sort_by(|a, b| a.name.cmp(&b.name));
            println!(
                "{}",
                tabled::Table::new(rows).with(tabled::settings::Style::rounded())
            );

            match readiness {
                Ok(ReadinessResponse {
                    ready: true,
                    model_version,
                    ..
                }) => print_success(&format!(
                    "Ready, serving model {}",
                    model_version.as_deref().unwrap_or("unknown")
                )),
                Ok(ReadinessResponse { reason, .. }) => print_warning(&format!(
                    "Not ready: {}",
                    reason.as_deref().unwrap_or("no reason given")
                )),
                Err(err) => print_warning(&format!("Not ready: {:#}", err)),
            }
        }
    }

    Ok(())
}
