//! Datasets command implementation

use anyhow::{Context, Result};

use crate::cli::{DatasetsArgs, GlobalArgs, OutputFormat};
use crate::context::RuntimeContext;

/// Execute the datasets command
pub async fn execute(args: &DatasetsArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    ctx.verbose(&format!(
        "Listing datasets for account {} ({} service)",
        ctx.account_id,
        ctx.service.service_type()
    ));

    let data_sets = ctx
        .service
        .list_data_sets(&ctx.account_id)
        .await
        .context("Failed to list datasets")?;

    match args.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&data_sets)?);
        }
        OutputFormat::Table => {
            if data_sets.is_empty() {
                println!("No datasets found in account {}", ctx.account_id);
                return Ok(());
            }
            let width = data_sets
                .iter()
                .map(|d| d.name.len())
                .max()
                .unwrap_or(0)
                .max("NAME".len());
            println!("{:<width$}  ARN", "NAME", width = width);
            for data_set in &data_sets {
                println!("{:<width$}  {}", data_set.name, data_set.arn, width = width);
            }
            println!();
            println!("{} dataset(s)", data_sets.len());
        }
    }
    Ok(())
}
