use crate::inspect::FsInspector;
use crate::output::{format_catalog, print_summary, to_json, write_report};
use crate::report::{ReportBuilder, ReportDocument};
use crate::rules::{load_catalog, rsr_catalog, RuleCatalog};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "rsraudit")]
#[command(about = "Audit tool for repository standards compliance")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate a repository against the catalog
    Check(CheckArgs),
    /// List the rules in the catalog
    Rules(CatalogArgs),
}

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Catalog definition (TOML). Defaults to the bundled RSR catalog
    #[arg(long, env = "RSRAUDIT_CATALOG")]
    pub catalog: Option<PathBuf>,
}

impl CatalogArgs {
    pub fn load(&self) -> Result<RuleCatalog> {
        match &self.catalog {
            Some(path) => {
                load_catalog(path).with_context(|| format!("Failed to load catalog {:?}", path))
            }
            None => rsr_catalog().context("Bundled catalog is invalid"),
        }
    }
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Repository root
    #[arg(default_value = ".")]
    pub path: PathBuf,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Output format for stdout
    #[arg(long, value_enum, default_value_t = Format::Text, env = "RSRAUDIT_FORMAT")]
    pub format: Format,

    /// Also write the JSON report to this file
    #[arg(long, short, env = "RSRAUDIT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Evaluate rules concurrently
    #[arg(long, env = "RSRAUDIT_PARALLEL")]
    pub parallel: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

/// Execute the parsed command, returning the process exit status
pub async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Check(args) => check(args).await,
        Command::Rules(args) => {
            let catalog = args.load()?;
            print!("{}", format_catalog(&catalog));
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn check(args: CheckArgs) -> Result<ExitCode> {
    let catalog = args.catalog.load()?;
    anyhow::ensure!(args.path.is_dir(), "{:?} is not a directory", args.path);

    let inspector = Arc::new(FsInspector::new(&args.path));
    let target = inspector.root().display().to_string();

    tracing::info!(
        root = %target,
        catalog = %catalog.name(),
        rules = catalog.len(),
        "running compliance checks"
    );

    let mut builder = ReportBuilder::new(&catalog);
    if args.parallel {
        builder.run_rules_concurrent(inspector).await;
    } else {
        builder.run_rules(inspector.as_ref());
    }
    let document = ReportDocument::new(&target, catalog.name(), builder.build());

    if let Some(path) = &args.output {
        write_report(&document, path)?;
    }

    match args.format {
        Format::Text => {
            let output_path = args.output.as_ref().map(|p| p.display().to_string());
            print_summary(&document.report, &target, output_path.as_deref());
        }
        Format::Json => println!("{}", to_json(&document)?),
    }

    Ok(ExitCode::from(document.report.exit_code()))
}
