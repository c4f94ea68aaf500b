mod config;
mod model;
mod quotes;
mod parser;
mod analyzer;
mod normalizer;
mod notifier;
mod storage;
mod utils;

use analyzer::{AnalysisCache, Analyzer, AnalyzerImpl};
use config::{load_config, AppConfig, InstrumentConfig};
use futures::future::join_all;
use normalizer::normalize_points;
use notifier::{LatestAnalyses, TelegramNotifier, deliver_new_signals};
use quotes::{ChartFetcher, QuoteFetcher};
use rand::Rng;
use std::collections::BTreeMap;
use std::sync::Arc;
use storage::SqliteStorage;
use tokio::sync::{Mutex, Notify};
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};

/// Ledger rows older than this are pruned each cycle.
const LEDGER_RETENTION_DAYS: i64 = 7;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".into());
    let config: Arc<AppConfig> = match load_config(&config_path) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return;
        }
    };

    let fetcher = match ChartFetcher::new() {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to build quote fetcher: {}", e);
            return;
        }
    };
    let analyzer = AnalyzerImpl::new();
    let cache = Arc::new(Mutex::new(AnalysisCache::new()));

    let storage = match SqliteStorage::new(&config.database_path) {
        Ok(s) => Arc::new(Mutex::new(s)),
        Err(e) => {
            error!("Failed to initialize storage: {}", e);
            return;
        }
    };

    let latest: LatestAnalyses = Arc::new(Mutex::new(BTreeMap::new()));
    let refresh_notify = Arc::new(Notify::new());
    let notifier = match TelegramNotifier::new(config.clone(), latest.clone(), refresh_notify.clone()) {
        Ok(n) => Arc::new(n),
        Err(e) => {
            error!("Failed to initialize notifier: {}", e);
            return;
        }
    };

    // Spawn listener for bot commands (e.g. /refresh)
    TelegramNotifier::spawn_listener(notifier.clone());

    info!("Sending startup message...");
    if let Err(e) = notifier.notify_text("🚀 IntradaySniper started!").await {
        warn!("Startup notification failed: {}", e);
    }

    loop {
        info!("Analysing {} instruments...", config.instruments.len());

        let tasks: Vec<_> = config
            .instruments
            .iter()
            .map(|instrument| {
                process_instrument(
                    instrument,
                    &fetcher,
                    &analyzer,
                    cache.clone(),
                    latest.clone(),
                    storage.clone(),
                    notifier.clone(),
                )
            })
            .collect();
        join_all(tasks).await;

        match storage
            .lock()
            .await
            .prune_older_than(chrono::Duration::days(LEDGER_RETENTION_DAYS))
        {
            Ok(0) => {}
            Ok(n) => info!("Pruned {} old alert records", n),
            Err(e) => warn!("Alert ledger prune failed: {}", e),
        }

        let jitter = if config.jitter_seconds > 0 {
            rand::rng().random_range(0..=config.jitter_seconds)
        } else {
            0
        };
        let wait = config.check_interval_seconds + jitter;
        info!("Waiting for timer ({}s) or manual refresh...", wait);
        tokio::select! {
            _ = sleep(Duration::from_secs(wait)) => {
                info!("Timer triggered.");
            }
            _ = refresh_notify.notified() => {
                info!("Manual refresh triggered.");
            }
        }
    }
}

/// Fetches, normalizes and analyzes one instrument, then delivers any new signals.
async fn process_instrument(
    instrument: &InstrumentConfig,
    fetcher: &ChartFetcher,
    analyzer: &impl Analyzer,
    cache: Arc<Mutex<AnalysisCache>>,
    latest: LatestAnalyses,
    storage: Arc<Mutex<SqliteStorage>>,
    notifier: Arc<TelegramNotifier>,
) {
    let symbol = instrument.symbol.as_str();
    info!("Processing {} ({} / {})", symbol, instrument.range, instrument.interval);

    let points = match fetcher.fetch(&instrument.request()).await {
        Ok(points) => normalize_points(points, symbol),
        Err(e) => {
            warn!("Quote fetch failed for {}: {}", symbol, e);
            return;
        }
    };

    let analysis = cache.lock().await.analyze(symbol, &points, analyzer);
    latest
        .lock()
        .await
        .insert(symbol.to_string(), analysis.summary.clone());

    let summary = analysis.summary;
    if analysis.changed {
        info!(
            "{}: {} insights, {} signals, session change {:+.2}%",
            symbol,
            summary.insights.len(),
            summary.signals.len(),
            summary.stats.session_change_pct
        );
    } else {
        info!("{}: input unchanged since last cycle, reusing analysis", symbol);
    }

    // The ledger filters repeats, so alerts that failed earlier are retried here.
    let delivered = deliver_new_signals(
        symbol,
        &summary.signals,
        instrument.min_alert_confidence,
        &storage,
        notifier.as_ref(),
    )
    .await;
    if delivered > 0 {
        info!("{}: {} new alerts delivered", symbol, delivered);
    }
}
