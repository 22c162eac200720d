use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod fetch;

#[derive(Debug, Parser)]
#[command(name = "geosource")]
#[command(about = "Fetch GeoJSON from a mapped data source")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch features for a data source and print them.
    Fetch(FetchArgs),
}

#[derive(Debug, Args)]
struct FetchArgs {
    /// ID of the data source to export.
    data_source_id: String,

    /// Free-text search string.
    #[arg(long)]
    search: Option<String>,

    /// 0-indexed page to fetch.
    #[arg(long)]
    page: Option<u32>,

    /// Bypass pagination and fetch every matching feature.
    #[arg(long)]
    all: bool,

    /// JSON-encoded filter tree, e.g.
    /// '{"type":"TEXT","column":"status","search":"active"}'.
    #[arg(long)]
    filter: Option<String>,

    /// JSON-encoded sort list, e.g. '[{"column":"name","desc":false}]'.
    /// List order is the multi-key sort order.
    #[arg(long)]
    sort: Option<String>,

    /// Print an aligned summary table instead of the raw GeoJSON.
    #[arg(long)]
    summary: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = geosource_core::config::load_app_config_from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_level)?)
        .init();

    match cli.command {
        Commands::Fetch(args) => fetch::run_fetch(&config, &args).await,
    }
}
