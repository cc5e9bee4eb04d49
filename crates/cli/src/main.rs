use std::sync::Arc;

use clap::Parser;
use dns_sentinel_application::ports::{Notifier, Resolver};
use dns_sentinel_application::repo::DomainStateRepo;
use dns_sentinel_application::use_cases::Observer;
use dns_sentinel_domain::config::{CliOverrides, Config};
use dns_sentinel_domain::Fqdn;
use dns_sentinel_infrastructure::database::create_pool;
use dns_sentinel_infrastructure::notifier::{LoggingNotifier, WebhookNotifier};
use dns_sentinel_infrastructure::resolver::DohResolver;
use dns_sentinel_infrastructure::store::SqliteStore;
use dns_sentinel_jobs::SentinelJob;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "dns-sentinel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Monitors dynamic DNS state for a set of domains and emits change notifications")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Seconds between scheduler ticks
    #[arg(long)]
    tick_secs: Option<u64>,

    /// Webhook URL notifications are posted to
    #[arg(long)]
    webhook_url: Option<String>,

    /// Database path for the durable key/value store
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        tick_secs: cli.tick_secs,
        webhook_url: cli.webhook_url.clone(),
        log_level: cli.log_level.clone(),
        database_path: cli.database.clone(),
    };

    let config = Config::load(cli.config.as_deref(), overrides)?;
    config.validate()?;

    let log_level = config.logging.level.parse().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt()
        .with_target(true)
        .with_max_level(log_level)
        .init();

    info!("Starting DNS Change Sentinel v{}", env!("CARGO_PKG_VERSION"));
    info!(
        config_file = cli.config.as_deref().unwrap_or("default"),
        tick_secs = config.scheduler.tick_secs,
        concurrency = config.scheduler.concurrency,
        "Configuration loaded"
    );

    info!(path = %config.database.path, "Initializing database");
    let pool = match create_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "Failed to initialize database");
            return Err(e.into());
        }
    };

    let store = Arc::new(SqliteStore::new(pool));
    let repo = Arc::new(DomainStateRepo::new(store));

    let resolver: Arc<dyn Resolver> = Arc::new(DohResolver::new(
        config.resolver.doh_url.clone(),
        config.resolver.timeout_ms,
    ));

    let notifier: Arc<dyn Notifier> = match &config.notifier.webhook_url {
        Some(url) => {
            info!(url = %url, "Notifications will be posted to webhook");
            Arc::new(WebhookNotifier::new(url.clone(), config.notifier.timeout_ms))
        }
        None => {
            warn!("No webhook configured, notifications will only be logged");
            Arc::new(LoggingNotifier)
        }
    };

    let static_domains: Vec<Fqdn> = config
        .static_domains
        .iter()
        .filter_map(|raw| match Fqdn::parse(raw) {
            Ok(fqdn) => Some(fqdn),
            Err(e) => {
                warn!(domain = %raw, error = %e, "skipping invalid static domain");
                None
            }
        })
        .collect();

    info!(count = static_domains.len(), "Loaded static domains");

    let observer = Arc::new(Observer::new(repo.clone(), resolver, notifier));
    let shutdown = CancellationToken::new();

    let job = Arc::new(
        SentinelJob::new(observer, repo, static_domains, config.scheduler.clone())
            .with_cancellation(shutdown.clone()),
    );
    job.start().await;

    info!("DNS Change Sentinel running, press Ctrl+C to stop");
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");
    shutdown.cancel();

    Ok(())
}
