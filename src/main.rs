//! Command line entry point: build a report from input files, or serve the API.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::{ConfigLoader, PolicyPreset, ResolutionPolicy};
use attendance_engine::ingest::{load_leave_table, load_punch_table};
use attendance_engine::render::{DEFAULT_FILE_NAME, save_report};
use attendance_engine::resolution::build_report;
use attendance_engine::models::PunchSchema;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "attendance-engine")]
#[command(about = "Merge biometric punches with HRMS leave codes into a monthly attendance report")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Which resolution rules a report run uses.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetArg {
    /// Pick from the detected punch layout.
    Auto,
    /// Split punch-in/punch-out rules.
    DualPunch,
    /// Combined single-punch rules.
    SinglePunch,
}

impl PresetArg {
    fn policy(self, schema: PunchSchema) -> ResolutionPolicy {
        let preset = match self {
            PresetArg::Auto => PolicyPreset::for_schema(schema),
            PresetArg::DualPunch => PolicyPreset::DualPunch,
            PresetArg::SinglePunch => PolicyPreset::SinglePunch,
        };
        ResolutionPolicy::from_preset(preset)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a report from a punch export and an HRMS sheet.
    Report {
        /// Punch export (CSV or .xlsx).
        #[arg(long)]
        punches: PathBuf,

        /// HRMS leave sheet (CSV or .xlsx).
        #[arg(long)]
        hrms: PathBuf,

        /// Output workbook path.
        #[arg(long, default_value = DEFAULT_FILE_NAME)]
        output: PathBuf,

        /// Configuration directory with policy.yaml and palette.yaml.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Resolution rules; replaces the configured ones when given.
        #[arg(long, value_enum)]
        preset: Option<PresetArg>,

        /// Print the report as JSON instead of writing a workbook.
        #[arg(long)]
        json: bool,
    },
    /// Serve the HTTP API.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "0.0.0.0:3000")]
        addr: SocketAddr,

        /// Configuration directory with policy.yaml and palette.yaml.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_config(dir: Option<&Path>) -> Result<ConfigLoader> {
    match dir {
        Some(dir) => ConfigLoader::load(dir)
            .with_context(|| format!("loading configuration from {}", dir.display())),
        None => Ok(ConfigLoader::builtin()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Report {
            punches,
            hrms,
            output,
            config,
            preset,
            json,
        } => {
            let punch_table = load_punch_table(&punches)
                .with_context(|| format!("reading punches from {}", punches.display()))?;
            let mut config = load_config(config.as_deref())?;
            if let Some(preset) = preset {
                config = config.with_policy(preset.policy(punch_table.schema));
            }
            info!(
                schema = ?punch_table.schema,
                preset = ?config.policy().preset(),
                "Resolution rules selected"
            );
            let leave_table = load_leave_table(&hrms)
                .with_context(|| format!("reading HRMS sheet from {}", hrms.display()))?;

            let report = build_report(&leave_table, &punch_table, config.policy())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                save_report(&report, config.palette(), &output)
                    .with_context(|| format!("writing {}", output.display()))?;
                info!(output = %output.display(), "Report written");
            }
        }
        Command::Serve { addr, config } => {
            let state = AppState::new(load_config(config.as_deref())?);
            let app = create_router(state);

            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("binding {addr}"))?;
            info!(%addr, "Attendance engine listening");
            axum::serve(listener, app).await?;
        }
    }
    Ok(())
}
