//! CLI for seeding and auditing a routing database
//!
//! Talks to the database named by DATABASE_URL and prints JSON results.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

use routing_core::common::{RoutingError, Validate};
use routing_core::config::Config;
use routing_core::domains::destinations::{self, data::CreateDestinationInput};
use routing_core::domains::events::{self, data::CreateEventInput, EventDetail};
use routing_core::domains::flow_edges::{self, data::CreateFlowEdgeInput, FlowEdge};
use routing_core::domains::graph::find_dangling_flow_edges;
use routing_core::domains::partylines::{self, data::CreatePartylineInput};
use routing_core::domains::ports::{
    self,
    data::{CreateDestinationPortInput, CreateSourcePortInput},
};
use routing_core::domains::sources::{self, data::CreateSourceInput};
use routing_core::kernel::{PgRoutingStore, ServerDeps};

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Seed and audit the routing graph database")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a sample event with cameras, outputs and wiring
    Demo {
        #[arg(long, default_value = "Demo Event")]
        title: String,
        /// Cameras to create, each with one video and two audio ports
        #[arg(long, default_value_t = 2)]
        cameras: u8,
    },

    /// List flow edges whose ports no longer exist
    Audit,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuditReport {
    dangling_flow_edges: Vec<FlowEdge>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    let database_url = config
        .database_url
        .context("DATABASE_URL must be set for seeding")?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let deps = ServerDeps::new(Arc::new(PgRoutingStore::new(pool)));

    match cli.command {
        Commands::Demo { title, cameras } => {
            let detail = seed_demo(&title, cameras, &deps).await?;
            println!("{}", serde_json::to_string_pretty(&detail)?);
        }
        Commands::Audit => {
            let mut tx = deps.begin().await?;
            let dangling_flow_edges = find_dangling_flow_edges(tx.as_mut()).await?;
            tx.commit().await?;
            let report = AuditReport {
                dangling_flow_edges,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Builds the event through the same activities the HTTP routes use.
async fn seed_demo(title: &str, cameras: u8, deps: &ServerDeps) -> Result<EventDetail> {
    let input = CreateEventInput {
        title: title.to_string(),
    };
    input.validate().map_err(RoutingError::from)?;
    let event = events::create_event(input, deps).await?;

    let program = destinations::create_destination(
        CreateDestinationInput {
            label: "Program".to_string(),
            event_id: event.id,
        },
        deps,
    )
    .await?;
    partylines::create_partyline(
        CreatePartylineInput {
            title: "Director".to_string(),
            event_id: event.id,
        },
        deps,
    )
    .await?;

    for camera in 1..=i32::from(cameras) {
        let source = sources::create_source(
            CreateSourceInput {
                label: format!("Cam{}", camera),
                event_id: event.id,
            },
            deps,
        )
        .await?;

        let layout = [("video", 1), ("audio", 1), ("audio", 2)];
        for (slot, (port_type, channel)) in (1..).zip(layout) {
            let source_port = ports::create_source_port(
                CreateSourcePortInput {
                    port_type: port_type.to_string(),
                    channel,
                    description: Some(format!("Cam{} {} {}", camera, port_type, channel)),
                    source_id: source.id,
                },
                deps,
            )
            .await?;
            let destination_port = ports::create_destination_port(
                CreateDestinationPortInput {
                    port_type: port_type.to_string(),
                    channel: (camera - 1) * 3 + slot,
                    description: None,
                    destination_id: program.id,
                },
                deps,
            )
            .await?;
            flow_edges::create_flow_edge(
                CreateFlowEdgeInput {
                    source_port_id: source_port.id,
                    destination_port_id: destination_port.id,
                },
                deps,
            )
            .await?;
        }
    }

    Ok(events::get_event_detail(event.id, deps).await?)
}
