use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_apply_args() {
    let cli = Cli::try_parse_from([
        "sl",
        "--account",
        "123456789012",
        "apply",
        "scripts/sales.yml",
        "--output",
        "target/sales.json",
        "--dry-run",
    ])
    .unwrap();

    assert_eq!(cli.global.account.as_deref(), Some("123456789012"));
    assert_eq!(cli.global.project_dir, ".");
    match cli.command {
        Commands::Apply(args) => {
            assert_eq!(args.script, "scripts/sales.yml");
            assert_eq!(args.output.as_deref(), Some("target/sales.json"));
            assert!(args.dry_run);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["sl", "describe", "sales", "-o", "json", "-v", "-p", "proj"])
        .unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.project_dir, "proj");
    match cli.command {
        Commands::Describe(args) => {
            assert_eq!(args.analysis_id, "sales");
            assert_eq!(args.output, OutputFormat::Json);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_apply_requires_script() {
    assert!(Cli::try_parse_from(["sl", "apply"]).is_err());
    assert!(Cli::try_parse_from(["sl", "datasets", "--output", "yaml"]).is_err());
}
