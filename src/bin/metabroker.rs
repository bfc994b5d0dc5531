//! Broker binary: one-shot metadata queries and the admin HTTP server

use clap::{Parser, Subcommand};
use metabroker::broker::{
    CoordinatorBroker, DataCoordClient, DataCoordGrpcClient, RootCoordClient,
    RootCoordGrpcClient,
};
use metabroker::common::{BrokerConfig, CallContext};
use metabroker::http::{create_router, initial_log_directive, AdminState, LogLevelControl};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "metabroker")]
#[command(about = "Metadata broker for the root and data coordinators")]
struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Root coordinator gRPC endpoint
    #[arg(long, global = true)]
    root_coord: Option<String>,

    /// Data coordinator gRPC endpoint
    #[arg(long, global = true)]
    data_coord: Option<String>,

    /// Per-operation timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a collection schema
    Schema {
        #[arg(long)]
        collection: i64,
    },

    /// List partition IDs of a collection
    Partitions {
        #[arg(long)]
        collection: i64,
    },

    /// Recovery info (v1 protocol)
    Recovery {
        #[arg(long)]
        collection: i64,
        #[arg(long)]
        partition: i64,
    },

    /// Recovery info (v2 protocol)
    RecoveryV2 {
        #[arg(long)]
        collection: i64,
        /// Partition IDs (comma-separated, empty for all)
        #[arg(long, value_delimiter = ',')]
        partitions: Vec<i64>,
    },

    /// Index definitions of a collection
    DescribeIndex {
        #[arg(long)]
        collection: i64,
    },

    /// Segment infos
    Segments {
        /// Segment IDs (comma-separated)
        #[arg(long, value_delimiter = ',')]
        ids: Vec<i64>,
    },

    /// Per-field index info of one segment
    IndexInfo {
        #[arg(long)]
        collection: i64,
        #[arg(long)]
        segment: i64,
    },

    /// Serve the admin HTTP endpoints
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        bind: Option<String>,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config from file, then override with CLI arguments
    let mut config = BrokerConfig::load(cli.config.as_deref())?;
    if cli.root_coord.is_some() {
        config.root_coord_addr = cli.root_coord.clone();
    }
    if cli.data_coord.is_some() {
        config.data_coord_addr = cli.data_coord.clone();
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.request_timeout_ms = timeout_ms;
    }
    config.validate()?;

    let log_directive = initial_log_directive(
        std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
        &config.log_level,
    );
    let filter = EnvFilter::try_new(&log_directive)?;
    let (filter, reload_handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let root_coord: Option<Arc<dyn RootCoordClient>> = match &config.root_coord_addr {
        Some(addr) => Some(Arc::new(
            RootCoordGrpcClient::connect(addr.clone(), config.connect_timeout()).await?,
        )),
        None => None,
    };
    let data_coord: Option<Arc<dyn DataCoordClient>> = match &config.data_coord_addr {
        Some(addr) => Some(Arc::new(
            DataCoordGrpcClient::connect(addr.clone(), config.connect_timeout()).await?,
        )),
        None => None,
    };
    let broker = CoordinatorBroker::new(data_coord, root_coord).with_source_id(config.node_id);
    let ctx = CallContext::background().with_timeout(config.request_timeout());

    match cli.command {
        Commands::Schema { collection } => {
            print_json(&broker.get_collection_schema(&ctx, collection).await?)?;
        }
        Commands::Partitions { collection } => {
            print_json(&broker.get_partitions(&ctx, collection).await?)?;
        }
        Commands::Recovery {
            collection,
            partition,
        } => {
            let (channels, binlogs) = broker
                .get_recovery_info(&ctx, collection, partition)
                .await?;
            print_json(&json!({ "channels": channels, "binlogs": binlogs }))?;
        }
        Commands::RecoveryV2 {
            collection,
            partitions,
        } => {
            let (channels, segments) = broker
                .get_recovery_info_v2(&ctx, collection, &partitions)
                .await?;
            print_json(&json!({ "channels": channels, "segments": segments }))?;
        }
        Commands::DescribeIndex { collection } => {
            print_json(&broker.describe_index(&ctx, collection).await?)?;
        }
        Commands::Segments { ids } => {
            print_json(&broker.get_segment_info(&ctx, &ids).await?)?;
        }
        Commands::IndexInfo {
            collection,
            segment,
        } => {
            print_json(&broker.get_index_info(&ctx, collection, segment).await?)?;
        }
        Commands::Serve { bind } => {
            let bind_addr = match bind {
                Some(bind) => bind.parse()?,
                None => config.http_addr,
            };
            let log_level = LogLevelControl::new(log_directive, move |level| {
                let filter = EnvFilter::try_new(level)
                    .map_err(|e| metabroker::Error::InvalidConfig(e.to_string()))?;
                reload_handle
                    .reload(filter)
                    .map_err(|e| metabroker::Error::Other(e.to_string()))
            });
            let router = create_router(AdminState {
                broker: Arc::new(broker),
                log_level,
            });

            tracing::info!("Starting metabroker admin server on {}", bind_addr);
            let listener = tokio::net::TcpListener::bind(bind_addr).await?;
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = tokio::signal::ctrl_c().await;
                    tracing::info!("Shutting down");
                })
                .await?;
        }
    }

    Ok(())
}
