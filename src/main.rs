//! Health Metrics Binary
//!
//! Serves the metrics API and offers a few store maintenance commands.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use health_metrics::{
    start_web_server, InMemoryMetricRepository, MetricService, NewSystemMetric,
    PgMetricRepository, StoreConfig, WebConfig, DEFAULT_DATABASE_URL, DEFAULT_MAX_CONNECTIONS,
    DEFAULT_WEB_PORT,
};
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "health_metrics")]
#[command(about = "Record and query system health metrics")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "A small HTTP service that records system health metrics in PostgreSQL")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Web server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Web server port
    #[arg(short, long, default_value_t = DEFAULT_WEB_PORT)]
    port: u16,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    max_connections: u32,

    /// Keep metrics in memory instead of PostgreSQL (lost on exit)
    #[arg(long)]
    in_memory: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server (default)
    Serve(ServeArgs),

    /// Create the metrics table and index, then exit
    Migrate,

    /// Record a single metric and print it
    Record(RecordArgs),

    /// Print stored metrics as JSON
    Query(QueryArgs),
}

#[derive(Args, Default)]
struct ServeArgs {
    /// Disable CORS headers
    #[arg(long)]
    no_cors: bool,

    /// Record host CPU/memory samples at this interval in milliseconds
    #[arg(long)]
    sample_interval_ms: Option<u64>,
}

#[derive(Args)]
struct RecordArgs {
    /// Metric name (e.g., "cpu_usage")
    name: String,

    /// Metric type (e.g., "gauge", "counter")
    metric_type: String,

    /// Measured value
    #[arg(allow_negative_numbers = true)]
    value: f64,
}

#[derive(Args)]
struct QueryArgs {
    /// Only show metrics with this exact name
    #[arg(short, long)]
    name: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    match &cli.command {
        Some(Commands::Serve(args)) => serve_command(&cli, args).await?,
        Some(Commands::Migrate) => migrate_command(&cli).await?,
        Some(Commands::Record(args)) => record_command(&cli, args).await?,
        Some(Commands::Query(args)) => query_command(&cli, args).await?,
        None => serve_command(&cli, &ServeArgs::default()).await?,
    }

    Ok(())
}

fn log_level(cli: &Cli) -> Level {
    if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    }
}

/// Filter taken from `RUST_LOG` when it parses, otherwise from the CLI level.
fn log_filter(level: Level, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(LevelFilter::from_level(level).into()))
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(log_level(cli), rust_log.as_deref()))
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn store_config(cli: &Cli) -> StoreConfig {
    StoreConfig::new(&cli.database_url).with_max_connections(cli.max_connections)
}

async fn connect_store(cli: &Cli) -> anyhow::Result<PgMetricRepository> {
    let repo = PgMetricRepository::connect(&store_config(cli))
        .await
        .context("failed to connect to the metric store")?;
    repo.ensure_schema()
        .await
        .context("failed to prepare the metric schema")?;
    Ok(repo)
}

async fn build_service(cli: &Cli) -> anyhow::Result<MetricService> {
    if cli.in_memory {
        warn!("Using in-memory metric store; records are lost on exit");
        return Ok(MetricService::new(Arc::new(InMemoryMetricRepository::new())));
    }

    let repo = connect_store(cli).await?;
    Ok(MetricService::new(Arc::new(repo)))
}

async fn serve_command(cli: &Cli, args: &ServeArgs) -> anyhow::Result<()> {
    info!("Starting health metrics service...");

    let service = build_service(cli).await?;

    let web_config = WebConfig::new(&cli.host, cli.port)
        .with_cors(!args.no_cors)
        .with_sample_interval_ms(args.sample_interval_ms);

    info!("Web server configuration:");
    info!("  - Bind address: {}", web_config.bind_address());
    info!("  - CORS enabled: {}", web_config.enable_cors);
    info!("  - In-memory store: {}", cli.in_memory);

    start_web_server(web_config, service).await?;

    Ok(())
}

async fn migrate_command(cli: &Cli) -> anyhow::Result<()> {
    if cli.in_memory {
        anyhow::bail!("migrate requires a database; drop --in-memory");
    }

    connect_store(cli).await?;
    println!("Metric schema is up to date");
    Ok(())
}

async fn record_command(cli: &Cli, args: &RecordArgs) -> anyhow::Result<()> {
    let metric = NewSystemMetric::new(&args.name, &args.metric_type, args.value)?;
    let service = build_service(cli).await?;

    let stored = service.create(metric).await?;
    println!("{}", serde_json::to_string_pretty(&stored)?);
    Ok(())
}

async fn query_command(cli: &Cli, args: &QueryArgs) -> anyhow::Result<()> {
    let service = build_service(cli).await?;

    let metrics = match &args.name {
        Some(name) => service.find_by_name(name).await?,
        None => service.list_all().await?,
    };
    println!("{}", serde_json::to_string_pretty(&metrics)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_with(cli: &Cli, rust_log: Option<&str>, level: Level) -> bool {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(log_filter(log_level(cli), rust_log))
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            if level == Level::DEBUG {
                tracing::enabled!(Level::DEBUG)
            } else if level == Level::INFO {
                tracing::enabled!(Level::INFO)
            } else {
                tracing::enabled!(Level::WARN)
            }
        })
    }

    #[test]
    fn test_debug_flag_enables_debug_logs() {
        let cli = Cli::try_parse_from(["health_metrics", "--debug"]).unwrap();
        assert!(enabled_with(&cli, None, Level::DEBUG));
    }

    #[test]
    fn test_verbose_flag_enables_info_only() {
        let cli = Cli::try_parse_from(["health_metrics", "--verbose"]).unwrap();
        assert!(enabled_with(&cli, None, Level::INFO));
        assert!(!enabled_with(&cli, None, Level::DEBUG));
    }

    #[test]
    fn test_default_level_shows_warnings() {
        let cli = Cli::try_parse_from(["health_metrics"]).unwrap();
        assert!(enabled_with(&cli, None, Level::WARN));
        assert!(!enabled_with(&cli, None, Level::INFO));
    }

    #[test]
    fn test_rust_log_overrides_flags() {
        let cli = Cli::try_parse_from(["health_metrics"]).unwrap();
        assert!(enabled_with(&cli, Some("debug"), Level::DEBUG));
        // unparseable directives fall back to the CLI level
        assert!(!enabled_with(&cli, Some("health_metrics=loud"), Level::INFO));
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["health_metrics", "--port", "9090"]).unwrap();
        assert_eq!(cli.port, 9090);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_default_values() {
        let cli = Cli::try_parse_from(["health_metrics"]).unwrap();
        assert_eq!(cli.port, DEFAULT_WEB_PORT);
        assert_eq!(cli.host, "0.0.0.0");
        assert_eq!(cli.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert!(!cli.in_memory);
    }

    #[test]
    fn test_record_accepts_negative_values() {
        let cli = Cli::try_parse_from(["health_metrics", "record", "temp_delta", "gauge", "-2.5"])
            .unwrap();
        match cli.command {
            Some(Commands::Record(args)) => {
                assert_eq!(args.name, "temp_delta");
                assert_eq!(args.metric_type, "gauge");
                assert_eq!(args.value, -2.5);
            }
            _ => panic!("expected record command"),
        }
    }

    #[test]
    fn test_serve_args() {
        let cli = Cli::try_parse_from([
            "health_metrics",
            "--in-memory",
            "serve",
            "--no-cors",
            "--sample-interval-ms",
            "1000",
        ])
        .unwrap();
        assert!(cli.in_memory);
        match cli.command {
            Some(Commands::Serve(args)) => {
                assert!(args.no_cors);
                assert_eq!(args.sample_interval_ms, Some(1000));
            }
            _ => panic!("expected serve command"),
        }
    }
}
