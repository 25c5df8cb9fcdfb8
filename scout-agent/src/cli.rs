//! CLI glue for the scout agent: argument parsing, subcommand routing, and
//! assembly of the core pipeline from configuration. All business logic lives
//! in `scout-agent-core`; this module only wires it together.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use scout_agent_core::backend::BackendClient;
use scout_agent_core::connectors::{
    arxiv::ArxivConnector, benchmarks::BenchmarkIndexConnector, blogs::BlogConnector,
    github::GithubConnector, huggingface::HuggingFaceConnector,
};
use scout_agent_core::contract::Connector;
use scout_agent_core::discover::run_pipeline;
use scout_agent_core::enrich::RunContext;
use scout_agent_core::store::ReportStore;

use crate::load_config::{load_config, AgentConfig};

/// CLI for the askme scout agent: discover candidate AI models and publish
/// discovery reports.
#[derive(Parser)]
#[clap(
    name = "scout-agent",
    version,
    about = "Crawl external catalogs for candidate AI models, build a discovery report, persist it and deliver it to the aggregation backend"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute one full discovery run using the given config file
    Run {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Persist locally but do not contact the backend
        #[clap(long)]
        skip_backend: bool,
    },
    /// Project the latest persisted report to a CSV artifact
    ExportCsv {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
    },
    /// Print the latest persisted report as JSON
    Latest {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
    },
}

fn build_connectors(config: &AgentConfig) -> Result<Vec<Box<dyn Connector>>> {
    let mut connectors: Vec<Box<dyn Connector>> = Vec::new();
    for name in &config.connectors {
        match name.as_str() {
            "github" => connectors.push(Box::new(GithubConnector::new()?)),
            "huggingface" => connectors.push(Box::new(HuggingFaceConnector::new()?)),
            "arxiv" => connectors.push(Box::new(ArxivConnector::new()?)),
            "benchmarks" => connectors.push(Box::new(BenchmarkIndexConnector::new()?)),
            "blogs" => connectors.push(Box::new(BlogConnector::new()?)),
            other => anyhow::bail!(
                "Unknown connector '{other}'. Supported: github, huggingface, arxiv, benchmarks, blogs"
            ),
        }
    }
    Ok(connectors)
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            config,
            skip_backend,
        } => {
            let config = load_config(config)?;
            tracing::info!(command = "run", "Starting discovery run");

            let connectors = build_connectors(&config)?;
            let ctx = RunContext::new();
            let store = ReportStore::new(&config.output_dir)?;
            let transmitter = if skip_backend {
                None
            } else {
                Some(BackendClient::new(
                    config.backend_url.clone(),
                    config.auth_token.clone(),
                )?)
            };

            let outcome = run_pipeline(
                &connectors,
                &ctx,
                &store,
                transmitter
                    .as_ref()
                    .map(|t| t as &dyn scout_agent_core::contract::Transmitter),
            )
            .await?;

            tracing::info!(
                command = "run",
                run_id = %outcome.report.metadata.run_id,
                total_models = outcome.report.metadata.total_models,
                snapshot = %outcome.snapshot_path.display(),
                "Discovery run complete"
            );
            // A locally-complete run with a failed delivery still exits
            // non-zero so operators notice; the snapshot stays on disk.
            if let Some(Err(e)) = outcome.transmission {
                return Err(anyhow::Error::new(e)
                    .context("report persisted locally but backend delivery failed"));
            }
            Ok(())
        }
        Commands::ExportCsv { config } => {
            let config = load_config(config)?;
            let store = ReportStore::new(&config.output_dir)?;
            let models = store.latest().map(|r| r.models).unwrap_or_default();
            let path = store.write_csv(&config.csv_file, &models)?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Latest { config } => {
            let config = load_config(config)?;
            let store = ReportStore::new(&config.output_dir)?;
            match store.latest() {
                Some(report) => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                None => {
                    println!("No previous discovery run found");
                }
            }
            Ok(())
        }
    }
}
