//! board: print the order board from the backend
//!
//! Usage: `board [today|yesterday|last7|last15|month|all] [--json]`

use anyhow::Context;
use chrono::{Local, Utc};
use shared::format::format_currency;
use shared::report::{DateFilter, DateRange, OrderSummary};
use toyart_client::{Board, ClientConfig, OrderCache, cache, logger};

fn parse_range(arg: Option<&str>) -> anyhow::Result<DateRange> {
    let filter = match arg {
        None | Some("all") => return Ok(DateRange::all()),
        Some("today") => DateFilter::Today,
        Some("yesterday") => DateFilter::Yesterday,
        Some("last7") => DateFilter::Last7Days,
        Some("last15") => DateFilter::Last15Days,
        Some("month") => DateFilter::Month,
        Some(other) => anyhow::bail!("Unknown period: {other}"),
    };
    Ok(filter.range(Utc::now()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env()?;
    logger::init_logger(&config.log_level, config.log_json)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let period = args.iter().find(|a| !a.starts_with("--")).map(String::as_str);
    let range = parse_range(period)?;

    let api = config.build_http_client()?;
    let shared_cache = OrderCache::new().shared();
    cache::load(&shared_cache, &api, &range)
        .await
        .with_context(|| format!("Failed to load orders from {}", api.base_url()))?;

    let orders = shared_cache.read().await;
    let board = Board::render(&orders, Local::now().naive_local());
    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
    } else {
        print!("{board}");
        let summary = OrderSummary::from_orders(orders.iter());
        println!(
            "-- {} orders | revenue {} | freight {}",
            summary.total_orders,
            format_currency(summary.revenue),
            format_currency(summary.freight.total())
        );
    }
    Ok(())
}
