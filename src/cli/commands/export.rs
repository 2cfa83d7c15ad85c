//! Export command implementation
//!
//! This module implements the `export` command, which bundles the configured
//! tunnel configurations into one zip archive.

use super::{EXIT_CANCELLED, EXIT_CONFIG_ERROR, EXIT_EXPORT_FAILED, EXIT_NO_SOURCES, EXIT_SUCCESS};
use crate::adapters::placement::FilePlacement;
use crate::adapters::source::{discover_sources, FileSource};
use crate::config::{load_config_or_default, ConfzipConfig};
use crate::core::export::{ArchiveWriter, ExportOrchestrator, ExportOutcome, ExportRequest};
use crate::core::verification::{VerificationReport, Verifier};
use crate::domain::{ConfigSource, ExportErrorKind, Result, SourceName};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{oneshot, watch};

/// A `NAME=PATH` source given on the command line
#[derive(Debug, Clone)]
pub struct SourceArg {
    /// Source name
    pub name: SourceName,
    /// Configuration file path
    pub path: PathBuf,
}

fn parse_source_arg(value: &str) -> std::result::Result<SourceArg, String> {
    let (name, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PATH, got '{value}'"))?;
    if path.trim().is_empty() {
        return Err(format!("source '{name}' has an empty path"));
    }
    Ok(SourceArg {
        name: SourceName::new(name)?,
        path: PathBuf::from(path),
    })
}

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Override the output directory
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Override the archive file name
    #[arg(long, value_name = "NAME")]
    pub file_name: Option<String>,

    /// Add a source (repeatable, exported in the order given)
    #[arg(long = "source", value_name = "NAME=PATH", value_parser = parse_source_arg)]
    pub sources: Vec<SourceArg>,

    /// Override the directory scanned for *.conf files
    #[arg(long, value_name = "DIR")]
    pub source_dir: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG_ERROR);
        }

        let sources = match self.collect_sources(&config).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Failed to collect sources");
                eprintln!("Failed to collect sources: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        if !self.yes && !sources.is_empty() && !confirm(&config, &sources)? {
            println!("Export cancelled.");
            return Ok(EXIT_SUCCESS);
        }

        let writer = match config.export.compression.as_str() {
            "stored" => ArchiveWriter::stored(),
            _ => ArchiveWriter::new(),
        };
        let placement = FilePlacement::new(&config.export.output_dir, &config.export.file_name);
        let orchestrator = ExportOrchestrator::new(Arc::new(placement))
            .with_writer(writer)
            .with_shutdown(shutdown_signal);

        let request: ExportRequest = sources
            .into_iter()
            .map(|s| Arc::new(s) as Arc<dyn ConfigSource>)
            .collect();

        if !self.json {
            println!("🚀 Exporting {} tunnel(s)...", request.len());
        }

        let (completion, received) = oneshot::channel();
        let handle = orchestrator.start(request, completion);
        let outcome = received.await?;
        handle.await?;

        let verification = match &outcome {
            ExportOutcome::Success { summary, .. } if config.verification.enable_verification => {
                tracing::info!("Running post-export verification");
                match Verifier::new().verify_export(summary).await {
                    Ok(report) => Some(report),
                    Err(e) => {
                        tracing::error!(error = %e, "Verification failed");
                        eprintln!("Verification failed: {e}");
                        return Ok(EXIT_EXPORT_FAILED);
                    }
                }
            }
            _ => None,
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&outcome_json(&outcome, verification.as_ref()))?
            );
        } else {
            print_outcome(&outcome, verification.as_ref());
        }

        Ok(exit_code(&outcome, verification.as_ref()))
    }

    fn apply_overrides(&self, config: &mut ConfzipConfig) {
        if let Some(dir) = &self.output_dir {
            tracing::info!(output_dir = %dir, "Overriding output directory from CLI");
            config.export.output_dir = dir.clone();
        }
        if let Some(name) = &self.file_name {
            tracing::info!(file_name = %name, "Overriding file name from CLI");
            config.export.file_name = name.clone();
        }
        if let Some(dir) = &self.source_dir {
            tracing::info!(source_dir = %dir, "Overriding source directory from CLI");
            config.export.source_dir = Some(dir.clone());
        }
    }

    /// Configured sources, then `--source` arguments, then discovered files
    async fn collect_sources(&self, config: &ConfzipConfig) -> Result<Vec<FileSource>> {
        let mut sources = config
            .file_sources()
            .map_err(crate::domain::ConfzipError::Configuration)?;

        sources.extend(
            self.sources
                .iter()
                .map(|s| FileSource::new(s.name.clone(), &s.path)),
        );

        if let Some(dir) = &config.export.source_dir {
            let discovered = discover_sources(dir).await?;
            tracing::info!(dir = %dir, count = discovered.len(), "Discovered sources");
            sources.extend(discovered);
        }

        Ok(sources)
    }
}

fn confirm(config: &ConfzipConfig, sources: &[FileSource]) -> anyhow::Result<bool> {
    use std::io::{self, Write};

    println!("Export Configuration:");
    println!("  Output directory: {}", config.export.output_dir);
    println!("  File name: {}", config.export.file_name);
    println!("  Tunnels:");
    for source in sources {
        println!("    - {} ({})", source.name(), source.path().display());
    }
    println!();
    print!("Proceed with export? [y/N]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn print_outcome(outcome: &ExportOutcome, verification: Option<&VerificationReport>) {
    match outcome {
        ExportOutcome::Success { location, summary } => {
            println!();
            println!("📊 Export Summary:");
            println!("  Location: {}", location.display());
            println!("  Entries: {}", summary.entries.join(", "));
            println!("  Content bytes: {}", summary.content_bytes);
            println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
            if let Some(report) = verification {
                println!();
                print!("{}", report.format_summary());
            }
            println!();
            if verification.map_or(true, VerificationReport::is_success) {
                println!("✅ Export completed successfully!");
            } else {
                println!("⚠️  Export written but verification failed");
            }
        }
        ExportOutcome::Failure { reason } => match reason.kind() {
            ExportErrorKind::NoSources => {
                println!("⚠️  Nothing to export: no sources configured or discovered");
            }
            ExportErrorKind::Cancelled => {
                println!();
                println!("⚠️  Export interrupted. No archive was written.");
            }
            _ => {
                eprintln!("❌ Export failed: {reason}");
            }
        },
    }
}

fn outcome_json(
    outcome: &ExportOutcome,
    verification: Option<&VerificationReport>,
) -> serde_json::Value {
    match outcome {
        ExportOutcome::Success { summary, .. } => serde_json::json!({
            "status": "success",
            "summary": summary,
            "verification": verification,
        }),
        ExportOutcome::Failure { reason } => serde_json::json!({
            "status": "failure",
            "kind": format!("{:?}", reason.kind()),
            "source": reason.source_name().map(SourceName::as_str),
            "error": reason.to_string(),
        }),
    }
}

fn exit_code(outcome: &ExportOutcome, verification: Option<&VerificationReport>) -> i32 {
    match outcome.error_kind() {
        None if verification.map_or(true, VerificationReport::is_success) => EXIT_SUCCESS,
        None => EXIT_EXPORT_FAILED,
        Some(ExportErrorKind::NoSources) => EXIT_NO_SOURCES,
        Some(ExportErrorKind::Cancelled) => EXIT_CANCELLED,
        Some(_) => EXIT_EXPORT_FAILED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::ExportSummary;
    use crate::core::verification::VerificationFailure;
    use crate::domain::ExportError;
    use chrono::Utc;
    use std::time::Duration;
    use test_case::test_case;

    fn success() -> ExportOutcome {
        ExportOutcome::success(ExportSummary {
            location: PathBuf::from("/tmp/wireguard-export.zip"),
            media_type: "application/zip".to_string(),
            entries: vec!["home.conf".to_string()],
            content_bytes: 1,
            started_at: Utc::now(),
            duration: Duration::from_millis(3),
        })
    }

    fn args() -> ExportArgs {
        ExportArgs {
            yes: true,
            json: false,
            output_dir: None,
            file_name: None,
            sources: Vec::new(),
            source_dir: None,
        }
    }

    #[test]
    fn test_parse_source_arg() {
        let arg = parse_source_arg("home=/etc/wireguard/home.conf").unwrap();
        assert_eq!(arg.name.as_str(), "home");
        assert_eq!(arg.path, PathBuf::from("/etc/wireguard/home.conf"));
    }

    #[test_case("home" ; "missing separator")]
    #[test_case("=/tmp/x.conf" ; "empty name")]
    #[test_case("a/b=/tmp/x.conf" ; "name with slash")]
    #[test_case("home=" ; "empty path")]
    fn test_parse_source_arg_rejects(value: &str) {
        assert!(parse_source_arg(value).is_err());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&success(), None), EXIT_SUCCESS);
        assert_eq!(
            exit_code(&ExportOutcome::failure(ExportError::NoSources), None),
            EXIT_NO_SOURCES
        );
        assert_eq!(
            exit_code(
                &ExportOutcome::failure(ExportError::Cancelled("signal".to_string())),
                None
            ),
            EXIT_CANCELLED
        );
        assert_eq!(
            exit_code(&ExportOutcome::failure(ExportError::Busy), None),
            EXIT_EXPORT_FAILED
        );
    }

    #[test]
    fn test_exit_code_when_verification_fails() {
        let mut report = VerificationReport::new("/tmp/wireguard-export.zip", "00");
        report.record_failure(VerificationFailure {
            index: 0,
            expected: Some("home.conf".to_string()),
            actual: None,
            reason: "missing entry".to_string(),
        });
        assert_eq!(exit_code(&success(), Some(&report)), EXIT_EXPORT_FAILED);
    }

    #[test]
    fn test_outcome_json_failure_names_source() {
        let outcome = ExportOutcome::failure(ExportError::Resolution {
            name: SourceName::new("office").unwrap(),
            index: 1,
            cause: "permission denied".to_string(),
        });
        let value = outcome_json(&outcome, None);
        assert_eq!(value["status"], "failure");
        assert_eq!(value["kind"], "Resolution");
        assert_eq!(value["source"], "office");
    }

    #[test]
    fn test_outcome_json_success() {
        let value = outcome_json(&success(), None);
        assert_eq!(value["status"], "success");
        assert_eq!(value["summary"]["entries"][0], "home.conf");
        assert_eq!(value["summary"]["duration_ms"], 3);
        assert!(value["verification"].is_null());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = ConfzipConfig::default();
        let args = ExportArgs {
            output_dir: Some("/srv/out".to_string()),
            file_name: Some("tunnels.zip".to_string()),
            source_dir: Some("/etc/wireguard".to_string()),
            ..args()
        };
        args.apply_overrides(&mut config);
        assert_eq!(config.export.output_dir, "/srv/out");
        assert_eq!(config.export.file_name, "tunnels.zip");
        assert_eq!(config.export.source_dir.as_deref(), Some("/etc/wireguard"));
    }

    #[tokio::test]
    async fn test_collect_sources_order() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.conf"), "B").unwrap();
        std::fs::write(dir.path().join("a.conf"), "A").unwrap();

        let mut config = ConfzipConfig::default();
        config.sources.push(crate::config::SourceConfig {
            name: "first".to_string(),
            path: "/tmp/first.conf".to_string(),
        });
        config.export.source_dir = Some(dir.path().to_string_lossy().to_string());

        let args = ExportArgs {
            sources: vec![parse_source_arg("second=/tmp/second.conf").unwrap()],
            ..args()
        };

        let sources = args.collect_sources(&config).await.unwrap();
        let names: Vec<&str> = sources.iter().map(|s| s.name().as_str()).collect();
        assert_eq!(names, vec!["first", "second", "a", "b"]);
    }
}
