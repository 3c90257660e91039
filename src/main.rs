use anyhow::Context;
use fcash_valuation::{Config, PortfolioSnapshot, ValuationReport};

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = Config::from_env().context("configuration error")?;
    let registry = config
        .load_currency_registry()
        .context("failed to load currency registry")?;

    let json = std::fs::read_to_string(&config.snapshot_path)
        .with_context(|| format!("failed to read snapshot {}", config.snapshot_path))?;
    let snapshot = PortfolioSnapshot::from_json(&json)
        .with_context(|| format!("failed to parse snapshot {}", config.snapshot_path))?;

    let report = ValuationReport::build(&snapshot, &registry, config.min_time_to_maturity_secs)
        .context("valuation failed")?;

    tracing::info!(
        currency = %report.currency_id,
        net_fcash = %report.net_fcash,
        classification = %report.classification,
        markets = snapshot.markets.len(),
        "Valued portfolio snapshot"
    );
    if report.is_idiosyncratic() {
        tracing::warn!(
            maturities = ?report.idiosyncratic_maturities,
            "Portfolio holds positions without an active market"
        );
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
