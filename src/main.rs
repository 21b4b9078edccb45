//! WARCHEST — Dynasty fantasy-football asset valuation and trade
//! fairness engine.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! restores the user's saved ranking (or generates a fresh one from the
//! player catalog), prints the tier board, and evaluates any trades
//! listed in the configured trade file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

use warchest::catalog;
use warchest::config::AppConfig;
use warchest::outliers;
use warchest::storage::{JsonFileStore, RankingStore};
use warchest::trade;
use warchest::types::{Asset, Ranking};
use warchest::valuation;
use warchest::valuation::tiers::tier_label;

const BANNER: &str = r#"
__        ___    ____   ____ _   _ _____ ____ _____
\ \      / / \  |  _ \ / ___| | | | ____/ ___|_   _|
 \ \ /\ / / _ \ | |_) | |   | |_| |  _| \___ \ | |
  \ V  V / ___ \|  _ <| |___|  _  | |___ ___) || |
   \_/\_/_/   \_\_| \_\\____|_| |_|_____|____/ |_|

  Dynasty asset valuation & trade fairness
  v0.1.0
"#;

/// A trade to evaluate, as stored in the trades file: asset ids per side.
#[derive(Debug, Deserialize)]
struct TradeFile {
    side_a: Vec<String>,
    side_b: Vec<String>,
}

fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let config_path =
        std::env::var("WARCHEST_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let cfg = AppConfig::load_or_default(&config_path)?;

    init_logging();

    println!("{BANNER}");
    info!(config = %config_path, "WARCHEST starting up");

    let table = cfg.tier_table()?;
    let store = JsonFileStore::new(&cfg.storage.dir);
    let user_id = cfg.storage.user_id.clone();

    // -- Restore or generate rankings -------------------------------------

    let ranking = match store.load(&user_id)? {
        Some(saved) => {
            info!(user_id = %user_id, assets = saved.len(), "Resumed saved ranking");
            saved
        }
        None => {
            let players_path = cfg.catalog.players_path.as_deref().context(
                "No saved ranking and no catalog.players_path configured; \
                 nothing to rank",
            )?;
            let records = catalog::load_players(Path::new(players_path))?;
            let (weights, position_weights) = cfg.resolve_weights()?;
            let ranking =
                valuation::generate(&records, &weights, &position_weights, &table);
            info!(
                assets = ranking.len(),
                source = players_path,
                "Generated fresh ranking"
            );
            store.save(&user_id, &ranking)?;
            ranking
        }
    };

    print_tier_board(&ranking);

    // -- Outliers against market consensus --------------------------------

    if let Some(players_path) = cfg.catalog.players_path.as_deref() {
        let records = catalog::load_players(Path::new(players_path))?;
        let market = catalog::market_assets(&records);
        let report = outliers::report(&ranking.assets, &market, 5);

        if !report.higher.is_empty() || !report.lower.is_empty() {
            println!("\nHigher than consensus:");
            for o in &report.higher {
                println!(
                    "  {} you {:.2} vs market {:.2} (+{:.2})",
                    o.name, o.user_value, o.market_value, o.delta
                );
            }
            println!("Lower than consensus:");
            for o in &report.lower {
                println!(
                    "  {} you {:.2} vs market {:.2} ({:.2})",
                    o.name, o.user_value, o.market_value, o.delta
                );
            }
        }
    }

    // -- Trade evaluation --------------------------------------------------

    if let Some(trades_path) = cfg.trade.trades_path.as_deref() {
        let picks = catalog::draft_picks(
            cfg.catalog
                .base_year
                .unwrap_or_else(|| cfg.trade_config().current_year),
        );
        evaluate_trade_file(trades_path, &ranking, &picks, &cfg)?;
    }

    info!("WARCHEST done.");
    Ok(())
}

/// Print the ranking grouped into tier sections.
fn print_tier_board(ranking: &Ranking) {
    let mut current_tier: Option<u8> = None;
    for asset in &ranking.assets {
        if asset.tier != current_tier {
            if let Some(tier) = asset.tier {
                println!("\n== Tier {tier} - {} ==", tier_label(tier));
            }
            current_tier = asset.tier;
        }
        println!("  {asset}");
    }
}

/// Evaluate the trade described in a JSON file, resolving asset ids
/// against the ranking first and the pick board second.
fn evaluate_trade_file(
    path: &str,
    ranking: &Ranking,
    picks: &[Asset],
    cfg: &AppConfig,
) -> Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trades file: {path}"))?;
    let file: TradeFile = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse trades file: {path}"))?;

    let mut side_a = Vec::new();
    let mut side_b = Vec::new();
    for (ids, side) in [(&file.side_a, &mut side_a), (&file.side_b, &mut side_b)] {
        for id in ids {
            match resolve_asset(id, ranking, picks) {
                Some(asset) => {
                    trade::push_unique(side, asset);
                }
                None => warn!(asset_id = %id, "Unknown asset id in trades file, skipped"),
            }
        }
    }

    let result = trade::evaluate(&side_a, &side_b, &cfg.trade_config());
    println!("\nTrade: {} asset(s) vs {} asset(s)", side_a.len(), side_b.len());
    println!("  {result}");
    for reason in &result.reasons {
        println!("  - {reason}");
    }
    Ok(())
}

fn resolve_asset(id: &str, ranking: &Ranking, picks: &[Asset]) -> Option<Asset> {
    ranking
        .get(id)
        .or_else(|| picks.iter().find(|p| p.id == id))
        .cloned()
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warchest=info"));

    let json_logging = std::env::var("WARCHEST_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt().with_env_filter(env_filter).with_target(true).init();
    }
}
