use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use appassess::config::Config;
use appassess::error::{AssessError, Result};
use appassess::output::{self, OutputFormat};
use appassess::rules::{FindingCollection, RuleEngine, Severity};
use appassess::snapshot::Snapshot;
use appassess::{AssessOptions, DEFAULT_CONFIG_FILE};

#[derive(Parser)]
#[command(
    name = "appassess",
    about = "Best-practice assessment for Azure App Service configuration snapshots",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a collector snapshot and write the findings document
    Analyze {
        /// Snapshot JSON produced by the collector
        snapshot: PathBuf,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Findings file (defaults to findings-<timestamp>.json next to the snapshot)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Minimum severity to fail (low, medium, high, critical)
        #[arg(long)]
        fail_on: Option<String>,
    },

    /// Render a saved findings document
    Report {
        /// Findings JSON written by `analyze`
        findings: PathBuf,

        /// Output format (html, text, json)
        #[arg(long, short = 'f', default_value = "html")]
        format: String,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Write EXECUTIVE-SUMMARY.md and REMEDIATION-GUIDE.md
    Docs {
        /// Findings JSON written by `analyze`
        findings: PathBuf,

        /// The snapshot the findings were produced from
        snapshot: PathBuf,

        /// Directory for the documents (defaults to the findings file's directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// List all rules in the catalog
    ListRules {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Generate a starter .appassess.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            snapshot,
            config,
            output,
            fail_on,
        } => cmd_analyze(snapshot, config, output, fail_on),
        Commands::Report {
            findings,
            format,
            output,
        } => cmd_report(findings, format, output),
        Commands::Docs {
            findings,
            snapshot,
            out_dir,
        } => cmd_docs(findings, snapshot, out_dir),
        Commands::ListRules { format } => cmd_list_rules(format),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn cmd_analyze(
    snapshot_path: PathBuf,
    config: Option<PathBuf>,
    output_path: Option<PathBuf>,
    fail_on_str: Option<String>,
) -> Result<i32> {
    let fail_on = fail_on_str.and_then(|s| {
        let sev = Severity::from_str_lenient(&s);
        if sev.is_none() {
            tracing::warn!(severity = %s, "unknown severity, using config default");
        }
        sev
    });

    let options = AssessOptions {
        config_path: config,
        fail_on_override: fail_on,
    };
    let report = appassess::assess(&snapshot_path, &options)?;

    let out = output_path.unwrap_or_else(|| default_findings_path(&snapshot_path, &report.findings));
    std::fs::write(&out, output::json::render(&report.findings)?)?;
    tracing::info!(path = %out.display(), "findings written");

    let tally = report.findings.tally();
    println!("Assessed {} app service(s)", report.snapshot.resources.len());
    println!("  Critical: {}", tally.critical);
    println!("  High:     {}", tally.high);
    println!("  Medium:   {}", tally.medium);
    println!("  Low:      {}", tally.low);
    println!("  TOTAL:    {}", report.findings.total_findings());
    println!("Findings saved to: {}", out.display());
    if report.verdict.effective_findings != report.verdict.total_findings {
        println!(
            "Policy: {} of {} findings counted toward the result",
            report.verdict.effective_findings, report.verdict.total_findings
        );
    }

    let status = if report.verdict.pass { "PASS" } else { "FAIL" };
    println!(
        "Result: {} (threshold: {}, highest: {})",
        status,
        report.verdict.fail_threshold,
        report
            .verdict
            .highest_severity
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".into()),
    );

    // Exit code: 0 = pass, 1 = findings at or above threshold
    Ok(if report.verdict.pass { 0 } else { 1 })
}

fn default_findings_path(snapshot: &Path, findings: &FindingCollection) -> PathBuf {
    let name = format!(
        "findings-{}.json",
        findings.analysis_date.format("%Y%m%d_%H%M%S")
    );
    snapshot
        .parent()
        .map(|dir| dir.join(&name))
        .unwrap_or_else(|| PathBuf::from(&name))
}

fn cmd_report(findings_path: PathBuf, format_str: String, output_path: Option<PathBuf>) -> Result<i32> {
    let format = OutputFormat::from_str_lenient(&format_str).unwrap_or_else(|| {
        tracing::warn!(format = %format_str, "unknown format, using html");
        OutputFormat::Html
    });

    let findings = FindingCollection::load(&findings_path)?;
    let rendered = output::render(&findings, format)?;

    match output_path {
        Some(out) => {
            std::fs::write(&out, &rendered)?;
            tracing::info!(path = %out.display(), "report written");
        }
        None => print!("{}", rendered),
    }

    Ok(0)
}

fn cmd_docs(findings_path: PathBuf, snapshot_path: PathBuf, out_dir: Option<PathBuf>) -> Result<i32> {
    let findings = FindingCollection::load(&findings_path)?;
    let snapshot = Snapshot::load(&snapshot_path)?;

    let dir = out_dir.unwrap_or_else(|| {
        findings_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    });
    if dir.exists() && !dir.is_dir() {
        return Err(AssessError::Output(format!(
            "{} is not a directory",
            dir.display()
        )));
    }
    if !dir.as_os_str().is_empty() {
        std::fs::create_dir_all(&dir)?;
    }

    let summary_path = dir.join("EXECUTIVE-SUMMARY.md");
    std::fs::write(
        &summary_path,
        output::summary::render(&findings, snapshot.resources.len()),
    )?;
    println!("Generated: {}", summary_path.display());

    let guide_path = dir.join("REMEDIATION-GUIDE.md");
    std::fs::write(&guide_path, output::remediation::render(&findings, &snapshot))?;
    println!("Generated: {}", guide_path.display());

    Ok(0)
}

fn cmd_list_rules(format_str: String) -> Result<i32> {
    let engine = RuleEngine::new();
    let rules = engine.list_rules();

    match format_str.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&rules)?;
            println!("{}", json);
        }
        _ => {
            println!(
                "{:<12} {:<26} {:<10} {:<12} TITLE",
                "ID", "NAME", "SEVERITY", "CATEGORY"
            );
            println!("{}", "-".repeat(100));
            for rule in &rules {
                println!(
                    "{:<12} {:<26} {:<10} {:<12} {}",
                    rule.id,
                    rule.name,
                    rule.severity.to_string(),
                    rule.category.to_string(),
                    rule.title,
                );
            }
        }
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32> {
    let path = PathBuf::from(DEFAULT_CONFIG_FILE);

    if path.exists() && !force {
        eprintln!("{} already exists. Use --force to overwrite.", DEFAULT_CONFIG_FILE);
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created {}", DEFAULT_CONFIG_FILE);

    Ok(0)
}
