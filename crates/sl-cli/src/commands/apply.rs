//! Apply command implementation

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::{ApplyArgs, GlobalArgs};
use crate::commands::common::{self, ExitCode};
use crate::context::RuntimeContext;

/// Execute the apply command
pub async fn execute(args: &ApplyArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let script = common::load_script(&args.script)?;

    ctx.verbose(&format!(
        "Applying {} step(s) to analysis '{}' in account {} ({} service)",
        script.steps.len(),
        script.analysis.id,
        ctx.account_id,
        ctx.service.service_type()
    ));

    let handle = ctx.builder_for(&script.analysis.id).await;
    let mut builder = handle.lock().await;

    println!("Applying {}", args.script);
    let report = script.run(&mut builder);
    common::print_report(&report);
    if let Some(failure) = &report.failure {
        eprintln!(
            "Step {} ({}) failed; nothing was submitted: {}",
            failure.index, failure.op, failure.error
        );
        return Err(ExitCode(1).into());
    }

    if args.dry_run || args.output.is_some() {
        let document = builder
            .build_document()
            .context("Failed to build analysis document")?;
        if let Some(output) = &args.output {
            common::write_document(&document, Path::new(output))?;
            println!("Document written to {}", output);
        }
        if args.dry_run {
            println!(
                "Dry run - document built ({}), checksum {}",
                common::summarize(&document),
                document.checksum()?
            );
            return Ok(());
        }
    }

    let compiler = ctx.compiler();
    match compiler.compile(&mut builder).await {
        Ok(outcome) => {
            println!("Created analysis '{}': {}", script.analysis.id, outcome.arn);
            ctx.verbose(&format!("Document checksum: {}", outcome.checksum));
            if let Some(path) = &outcome.audit_path {
                ctx.verbose(&format!("Audit record: {}", path.display()));
            }
            if outcome.repeated {
                println!("  (an identical document was already submitted)");
            }
            Ok(())
        }
        Err(err) if err.is_precondition() => {
            eprintln!("Cannot compile analysis '{}': {}", script.analysis.id, err);
            Err(ExitCode(1).into())
        }
        Err(err) => {
            eprintln!("Submission of analysis '{}' failed: {}", script.analysis.id, err);
            Err(ExitCode(2).into())
        }
    }
}
