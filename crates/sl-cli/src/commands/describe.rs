//! Describe command implementation

use anyhow::{Context, Result};
use sl_core::AnalysisId;

use crate::cli::{DescribeArgs, GlobalArgs, OutputFormat};
use crate::context::RuntimeContext;

/// Execute the describe command
pub async fn execute(args: &DescribeArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let analysis_id = AnalysisId::parse(args.analysis_id.clone())?;

    let published = ctx
        .service
        .describe_analysis(&ctx.account_id, &analysis_id)
        .await
        .with_context(|| format!("Failed to describe analysis '{}'", analysis_id))?;

    match args.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&published)?);
        }
        OutputFormat::Table => {
            println!("Analysis '{}' in account {}", analysis_id, ctx.account_id);
            println!("  Sheets ({}):", published.sheets.len());
            for sheet in &published.sheets {
                let id = sheet.get("SheetId").and_then(|v| v.as_str()).unwrap_or("?");
                let name = sheet.get("Name").and_then(|v| v.as_str()).unwrap_or("");
                let visuals = sheet
                    .get("Visuals")
                    .and_then(|v| v.as_array())
                    .map_or(0, |v| v.len());
                println!("    {} ({}) - {} visual(s)", id, name, visuals);
            }
            println!("  Filter groups ({}):", published.filter_groups.len());
            for group_id in published.filter_group_ids() {
                println!("    {}", group_id);
            }
        }
    }
    Ok(())
}
