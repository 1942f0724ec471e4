use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use sprout::adjust::StructureAdjuster;
use sprout::config::Config;
use sprout::content::DefaultContentProvider;
use sprout::detect::{ContextDetector, ManifestDetector};
use sprout::merge::{report, MergeExecutor, MergeOptions};
use sprout::tree::{self, TreeParser};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sprout",
    version,
    about = "Grow real project directories from pasted tree sketches"
)]
struct Cli {
    /// File holding the tree sketch; reads stdin when omitted
    structure: Option<PathBuf>,

    /// Directory to merge into (defaults to the current directory)
    #[arg(short, long)]
    target: Option<PathBuf>,

    /// Create folders only, never files
    #[arg(long)]
    dirs_only: bool,

    /// Allow repopulating empty critical files
    #[arg(long)]
    no_skip_critical: bool,

    /// Parse and validate the sketch without touching the filesystem
    #[arg(long)]
    check: bool,

    /// Print the merge stats as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_target(false)
        .init();

    let config = Config::load_or_default()?;
    if !config.display.color_output {
        colored::control::set_override(false);
    }

    let raw = read_structure(&cli)?;
    let parsed = TreeParser::new().parse(&raw);

    for warning in &parsed.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }

    if cli.check {
        let issues = tree::validate(&parsed.roots);
        if issues.is_empty() {
            println!("{}", "Structure looks good".green());
        } else {
            for issue in &issues {
                println!("{} {}", "issue:".yellow().bold(), issue);
            }
        }
        return Ok(());
    }

    if parsed.roots.is_empty() {
        println!("{}", "Nothing to merge: the sketch has no entries".yellow());
        return Ok(());
    }

    let target = match cli.target {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let context = ManifestDetector::new().detect(&target).await?;
    if context.is_nested {
        println!(
            "Merging into nested project at {}",
            context.base_path.display().to_string().blue()
        );
    }

    let adjusted = StructureAdjuster::new(context.clone()).adjust(parsed.roots);

    let options = MergeOptions {
        directories_only: cli.dirs_only || config.merge.directories_only,
        skip_critical: !cli.no_skip_critical && config.merge.skip_critical,
    };

    let executor = MergeExecutor::new(context, Box::new(DefaultContentProvider::new()))
        .with_options(options);
    let stats = executor.merge(&adjusted).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", report::render_summary(&stats));
    }

    Ok(())
}

fn read_structure(cli: &Cli) -> Result<String> {
    match &cli.structure {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("could not read structure file {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("could not read structure from stdin")?;
            Ok(buffer)
        }
    }
}
