use clap::Parser;
use rodman_feats::adapters::http::DEFAULT_REQUEST_TIMEOUT;
use rodman_feats::config::{DEFAULT_FALLBACK_DIR, DEFAULT_STATS_ENDPOINT};
use rodman_feats::core::fallback::FallbackLoader;
use rodman_feats::core::live::StrategyRegistry;
use rodman_feats::core::normalize::{assign_ranks, normalize};
use rodman_feats::core::{Catalog, LiveStrategy};
use rodman_feats::utils::logger::{self, LogFormat};
use rodman_feats::{LocalStorage, NbaStatsClient, StaticCatalog};
use std::sync::Arc;

/// 檢查每個 feat 的備援資料集，可選擇順便探測即時資料來源
#[derive(Debug, Parser)]
#[command(name = "check_datasets")]
#[command(about = "Validate the fallback dataset of every catalog feat")]
struct Args {
    #[arg(long, default_value = DEFAULT_FALLBACK_DIR)]
    fallback_dir: String,

    #[arg(long, help = "Also run each live strategy once against the stats provider")]
    probe_live: bool,

    #[arg(long, default_value = DEFAULT_STATS_ENDPOINT)]
    stats_endpoint: String,

    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_logger(LogFormat::Compact, args.verbose);

    let catalog = StaticCatalog::builtin();
    let loader = FallbackLoader::new(LocalStorage::new(&args.fallback_dir));
    let mut failures = 0;

    println!("📂 Checking fallback datasets in {}", args.fallback_dir);
    for summary in catalog.list_feats() {
        let Some(feat) = catalog.get_feat(&summary.id) else {
            continue;
        };

        match loader.load_fallback(&feat.fallback_resource).await {
            Ok(raw) => {
                let ranking = assign_ranks(raw.iter().map(normalize).collect());
                let rodman_first = ranking.first().is_some_and(|entry| entry.is_rodman);
                if ranking.is_empty() || !rodman_first {
                    failures += 1;
                    println!(
                        "❌ {}: {} entries, Rodman first: {}",
                        feat.id,
                        ranking.len(),
                        rodman_first
                    );
                } else {
                    println!("✅ {}: {} entries", feat.id, ranking.len());
                }
            }
            Err(e) => {
                failures += 1;
                println!("❌ {}: {}", feat.id, e);
            }
        }
    }

    if args.probe_live {
        let client = NbaStatsClient::new(&args.stats_endpoint, DEFAULT_REQUEST_TIMEOUT, &[])?;
        let registry = StrategyRegistry::nba_defaults(Arc::new(client));

        println!("📡 Probing live strategies at {}", args.stats_endpoint);
        for summary in catalog.list_feats() {
            let Some(strategy) = registry.get(&summary.id) else {
                continue;
            };
            // 即時來源失敗不算資料集錯誤
            match strategy.fetch_live(10).await {
                Ok(entries) => println!("✅ {}: {} live entries", summary.id, entries.len()),
                Err(e) => println!("⚠️ {}: live unavailable ({})", summary.id, e),
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} fallback dataset(s) failed validation", failures);
    }
    Ok(())
}
