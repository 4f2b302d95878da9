//! tpuff — operations CLI for Turbopuffer.
//!
//! # Usage
//!
//! ```text
//! tpuff export --port 9876 --interval 60
//! tpuff export --all-regions --include-recall
//! tpuff list --region gcp-us-west1
//! ```
//!
//! Credentials come from `TURBOPUFFER_API_KEY`; `TURBOPUFFER_REGION`
//! sets the default region and `TURBOPUFFER_BASE_URL` overrides the
//! endpoint (proxies, test servers).

mod client;
mod export;
mod list;

use clap::{Parser, Subcommand};

use tpuff_exporter::ExporterConfig;

#[derive(Parser)]
#[command(name = "tpuff", about = "Turbopuffer operations CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the Prometheus exporter for namespace metrics.
    Export {
        /// HTTP server port.
        #[arg(short, long, default_value = "9876")]
        port: u16,

        /// Query a specific region (default: TURBOPUFFER_REGION env).
        #[arg(short, long)]
        region: Option<String>,

        /// Query all Turbopuffer regions.
        #[arg(short = 'A', long)]
        all_regions: bool,

        /// Metric refresh interval in seconds.
        #[arg(short, long, default_value = "60")]
        interval: u64,

        /// API request timeout in seconds.
        #[arg(short, long, default_value = "30")]
        timeout: u64,

        /// Include recall estimation metrics (runs queries, incurs costs).
        #[arg(long)]
        include_recall: bool,

        /// Recall estimation refresh interval in seconds.
        #[arg(long, default_value = "3600")]
        recall_interval: u64,
    },

    /// List namespaces with row counts and index status.
    List {
        /// Query a specific region (default: TURBOPUFFER_REGION env).
        #[arg(short, long)]
        region: Option<String>,

        /// Query all Turbopuffer regions.
        #[arg(short = 'A', long)]
        all_regions: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tpuff=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Export {
            port,
            region,
            all_regions,
            interval,
            timeout,
            include_recall,
            recall_interval,
        } => {
            let config = ExporterConfig {
                port,
                region: client::resolve_region(region),
                all_regions,
                refresh_interval: interval,
                request_timeout: timeout,
                include_recall,
                recall_interval,
            };
            export::run(config).await
        }
        Command::List {
            region,
            all_regions,
        } => list::run(client::resolve_region(region), all_regions).await,
    }
}
