//! Validate command implementation

use anyhow::Result;
use sl_core::AnalysisBuilder;

use crate::cli::{GlobalArgs, ValidateArgs};
use crate::commands::common::{self, ExitCode};
use crate::context::RuntimeContext;

/// Execute the validate command
///
/// Runs the script against a fresh builder (not the registry) and builds the
/// document without submitting it.
pub async fn execute(args: &ValidateArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let script = common::load_script(&args.script)?;
    let mut builder = AnalysisBuilder::new(
        script.analysis.id.clone(),
        ctx.account_id.clone(),
        ctx.config.builder_options()?,
    );

    println!("Validating {}", args.script);
    let report = script.run(&mut builder);
    common::print_report(&report);
    if let Some(failure) = &report.failure {
        println!();
        println!("[ERROR] step {} ({}): {}", failure.index, failure.op, failure.error);
        return Err(ExitCode(1).into());
    }

    let document = match builder.build_document() {
        Ok(document) => document,
        Err(err) => {
            println!();
            println!("[ERROR] compile: {}", err);
            return Err(ExitCode(1).into());
        }
    };

    let mut warnings = 0;
    for identifier in builder.undeclared_datasets() {
        println!(
            "[WARNING] dataset identifier '{}' is referenced but never declared",
            identifier
        );
        warnings += 1;
    }
    for outcome in report.completed.iter().filter(|o| o.op == "visuals") {
        if !outcome.message.ends_with("skipped 0") {
            println!("[WARNING] {}", outcome);
            warnings += 1;
        }
    }

    println!();
    println!("Document OK: {}", common::summarize(&document));
    ctx.verbose(&format!("Checksum: {}", document.checksum()?));

    if args.strict && warnings > 0 {
        println!("{} warning(s) with --strict", warnings);
        return Err(ExitCode(1).into());
    }
    Ok(())
}
