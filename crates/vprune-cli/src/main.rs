//! vprune - prune stale container package versions
//!
//! Lists every active version of a GitHub container package, applies the
//! retention policy and deletes what it marks, one version at a time.
//!
//! Every option can also be supplied through the matching GitHub Actions
//! `INPUT_*` variable, so the binary runs unchanged as an action step.

mod report;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};
use github_packages::{registry_for, GithubClient, GithubConfig, DEFAULT_API_URL};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, Level};

use vprune_core::{PruneConfig, PruneJob, PruneResult, PruneSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "vprune")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Prune stale container package versions", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,

    /// Format of the run summary printed on stdout
    #[arg(long, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Token with read:packages and delete:packages (falls back to GITHUB_TOKEN)
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// GitHub API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Organization owning the package
    #[arg(long, env = "INPUT_ORGANIZATION")]
    organization: Option<String>,

    /// User owning the package
    #[arg(long, env = "INPUT_USER")]
    user: Option<String>,

    /// Container package name
    #[arg(long, env = "INPUT_CONTAINER")]
    container: Option<String>,

    /// Report what would be pruned without deleting anything
    #[arg(long, env = "INPUT_DRY-RUN", num_args = 0..=1, default_missing_value = "true")]
    dry_run: Option<String>,

    /// Spare the N most recent versions selected for pruning
    #[arg(long, env = "INPUT_KEEP-LAST")]
    keep_last: Option<String>,

    /// Keep versions younger than this many days
    #[arg(long, env = "INPUT_KEEP-YOUNGER-THAN")]
    keep_younger_than: Option<String>,

    /// Prune versions without tags
    #[arg(long, env = "INPUT_PRUNE-UNTAGGED", num_args = 0..=1, default_missing_value = "true")]
    prune_untagged: Option<String>,

    /// Prune versions with a tag matching any of these patterns (repeatable or newline-separated)
    #[arg(long, env = "INPUT_PRUNE-TAGS-REGEXES", value_delimiter = '\n')]
    prune_tags_regexes: Vec<String>,

    /// Keep versions carrying any of these exact tags
    #[arg(long, env = "INPUT_KEEP-TAGS", value_delimiter = '\n')]
    keep_tags: Vec<String>,

    /// Keep versions with a tag matching any of these patterns
    #[arg(long, env = "INPUT_KEEP-TAGS-REGEXES", value_delimiter = '\n')]
    keep_tags_regexes: Vec<String>,

    /// Deprecated: use --keep-younger-than
    #[arg(long, env = "INPUT_OLDER-THAN", hide = true)]
    older_than: Option<String>,

    /// Deprecated: use --prune-untagged
    #[arg(long, env = "INPUT_UNTAGGED", hide = true, num_args = 0..=1, default_missing_value = "true")]
    untagged: Option<String>,

    /// Deprecated: use --prune-tags-regexes
    #[arg(long, env = "INPUT_TAG-REGEX", hide = true)]
    tag_regex: Option<String>,

    /// File receiving step outputs (set by GitHub Actions)
    #[arg(long, env = "GITHUB_OUTPUT")]
    github_output: Option<PathBuf>,
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}

/// Actions pass `""` for inputs the workflow leaves unset.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number<T>(input: &str, value: Option<&str>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    present(value)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| anyhow!("invalid {input} value {raw:?}: {e}"))
        })
        .transpose()
}

/// Booleans as the Actions toolkit reads them.
fn parse_flag(input: &str, value: Option<&str>) -> Result<Option<bool>> {
    present(value)
        .map(|raw| match raw {
            "true" | "True" | "TRUE" => Ok(true),
            "false" | "False" | "FALSE" => Ok(false),
            _ => bail!("invalid {input} value {raw:?}: expected true or false"),
        })
        .transpose()
}

/// Explicit token first, then `GITHUB_TOKEN`; blanks count as absent.
fn resolve_token(explicit: Option<&str>, fallback: Option<String>) -> Option<String> {
    present(explicit)
        .map(str::to_string)
        .or_else(|| fallback.filter(|t| !t.trim().is_empty()))
}

impl Cli {
    fn settings(&self) -> Result<PruneSettings> {
        Ok(PruneSettings {
            organization: self.organization.clone(),
            user: self.user.clone(),
            container: self.container.clone(),
            dry_run: parse_flag("dry-run", self.dry_run.as_deref())?,
            keep_last: parse_number("keep-last", self.keep_last.as_deref())?,
            keep_younger_than: parse_number(
                "keep-younger-than",
                self.keep_younger_than.as_deref(),
            )?,
            prune_untagged: parse_flag("prune-untagged", self.prune_untagged.as_deref())?,
            prune_tags_regexes: non_empty(&self.prune_tags_regexes),
            keep_tags: non_empty(&self.keep_tags),
            keep_tags_regexes: non_empty(&self.keep_tags_regexes),
            older_than: parse_number("older-than", self.older_than.as_deref())?,
            untagged: parse_flag("untagged", self.untagged.as_deref())?,
            tag_regex: self.tag_regex.clone(),
        })
    }

    fn token(&self) -> Option<String> {
        resolve_token(self.token.as_deref(), std::env::var("GITHUB_TOKEN").ok())
    }

    fn api_url(&self) -> &str {
        present(Some(self.api_url.as_str())).unwrap_or(DEFAULT_API_URL)
    }
}

/// Print the summary, write step outputs, then fail if any scheduled
/// deletion did not happen.
fn finish_run(
    config: &PruneConfig,
    result: &PruneResult,
    output: OutputFormat,
    github_output: Option<&Path>,
) -> Result<()> {
    let summary = report::RunSummary::new(config, result);
    match output {
        OutputFormat::Text => print!("{}", summary.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    if let Some(path) = github_output {
        report::write_github_outputs(path, result)
            .with_context(|| format!("Failed to write step outputs to {:?}", path))?;
    }

    if !result.is_complete() {
        bail!(
            "pruned {} of {} scheduled versions",
            result.pruned_count(),
            result.scheduled_count()
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    vprune_core::init_tracing(cli.json, level);

    let config = cli
        .settings()
        .and_then(|settings| settings.resolve().map_err(anyhow::Error::from))
        .context("Invalid configuration")?;
    if config.policy.prunes_nothing() {
        info!("no prune rule configured; nothing will be selected");
    }

    let token = cli
        .token()
        .context("No token supplied: pass --token or set GITHUB_TOKEN")?;
    let client = GithubClient::new(GithubConfig::new(&token).with_api_url(cli.api_url()))
        .context("Failed to create GitHub client")?;
    let registry = registry_for(client, &config.scope, &config.package);

    let result = PruneJob::from_config(&config)
        .run(registry.as_ref(), chrono::Utc::now())
        .await
        .with_context(|| format!("Pruning {} ({}) failed", config.package, config.scope))?;

    finish_run(&config, &result, cli.output, cli.github_output.as_deref())
}
