mod config;

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use hub_core::{
    AssistantSession, DeniedGeolocation, FixedGeolocation, GeolocationProvider, HubController,
    HubOptions, MissingGeolocation,
};
use info_service::{HttpInformationService, InformationService};
use shared::domain::{Coordinates, IncidentKind, Language};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Community hub: local alerts, resources and incident reports")]
struct Cli {
    /// Response language code (en, hi, ta, te, kn, ml, bn).
    #[arg(long, global = true)]
    language: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch situational data for a place name or address.
    Search { location: String },
    /// Fetch situational data for the device position.
    Locate {
        #[command(flatten)]
        position: Position,
        /// Behave as if the user refused location access.
        #[arg(long)]
        deny: bool,
    },
    /// Report an incident and print the confirmation.
    Report {
        #[arg(long, default_value = "flood")]
        kind: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        location: Option<String>,
        #[command(flatten)]
        position: Position,
    },
    /// Ask the preparedness assistant questions, one per line.
    Chat,
}

#[derive(ClapArgs, Debug)]
struct Position {
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,
}

impl Position {
    fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.lat?, self.lon?))
    }

    fn provider(&self) -> Arc<dyn GeolocationProvider> {
        match self.coordinates() {
            Some(coordinates) => Arc::new(FixedGeolocation(coordinates)),
            None => Arc::new(MissingGeolocation),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let mut settings = config::load_settings();
    if let Some(code) = cli.language.as_deref() {
        settings.language =
            Language::from_code(code).ok_or_else(|| anyhow!("unsupported language '{code}'"))?;
    }
    let service_config = settings.service_config()?;
    info!(
        "hub_cli: starting model={} language={}",
        service_config.model, settings.language
    );
    let service: Arc<dyn InformationService> = Arc::new(
        HttpInformationService::new(service_config)
            .context("failed to build information service client")?,
    );
    let options = HubOptions {
        language: settings.language,
        initial_map_target: settings.default_map_target.clone(),
    };

    match cli.command {
        Command::Search { location } => {
            let hub = HubController::new_with_dependencies(
                service,
                Arc::new(MissingGeolocation),
                options,
            );
            hub.set_query_text(location).await;
            hub.search_query_text().await;
            print_state(&hub).await?;
        }
        Command::Locate { position, deny } => {
            let geolocation: Arc<dyn GeolocationProvider> = if deny {
                Arc::new(DeniedGeolocation)
            } else {
                position.provider()
            };
            let hub = HubController::new_with_dependencies(service, geolocation, options);
            hub.locate_me().await;
            print_state(&hub).await?;
        }
        Command::Report {
            kind,
            description,
            location,
            position,
        } => {
            let kind = IncidentKind::from_key(&kind)
                .ok_or_else(|| anyhow!("unknown incident kind '{kind}'"))?;
            let hub = HubController::new_with_dependencies(service, position.provider(), options);
            if let Some(location) = location {
                hub.set_query_text(location).await;
            }

            let mut workflow = hub.open_report().await;
            workflow.set_kind(kind);
            workflow.set_description(description);
            if position.coordinates().is_some() {
                workflow.use_my_location().await;
                if let Some(err) = workflow.location_error() {
                    return Err(anyhow!("could not use the given position: {err}"));
                }
            }

            let handle = workflow
                .dispatch(&hub)
                .ok_or_else(|| anyhow!("a report needs a description and a location"))?;
            if let Some(receipt) = handle.await.context("report task failed")? {
                println!("{}", receipt.confirmation);
            }
            print_state(&hub).await?;
        }
        Command::Chat => chat(service, settings.language).await?,
    }

    Ok(())
}

async fn print_state(hub: &HubController) -> Result<()> {
    let state = hub.snapshot().await;
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

async fn chat(service: Arc<dyn InformationService>, language: Language) -> Result<()> {
    let mut session = AssistantSession::new(service, language);
    if let Some(greeting) = session.history().first() {
        println!("{}", greeting.text);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if let Some(reply) = session.send(&line).await {
            println!("{}\n", reply.text);
        }
    }
    Ok(())
}
