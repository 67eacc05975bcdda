use cricscore::{
    average_for, chart_series, DataSource, FetchConfig, FetchController, FetchOutcome, HttpSource,
    StaticSource,
};

/// Usage: `cargo run --example scores -- [fixed|server] [country]`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let mode = args.next().unwrap_or_else(|| "fixed".to_owned());
    let country = args.next().unwrap_or_else(|| "India".to_owned());

    let source = match mode.as_str() {
        "server" => DataSource::from(HttpSource::from_env().map_err(anyhow::Error::msg)?),
        _ => DataSource::from(StaticSource::sample()),
    };
    let config = FetchConfig::from_env().map_err(anyhow::Error::msg)?;
    let controller = FetchController::new(config);

    let records = match controller.acquire(&source).await {
        FetchOutcome::Success { records, .. } => records,
        failure @ FetchOutcome::Failure { .. } => anyhow::bail!("{failure}"),
    };

    match average_for(&records, &country) {
        Some(average) => println!("{country}: {average:.2}"),
        None => println!("{country}: No data available"),
    }

    let series = chart_series(&records);
    for (label, value) in series.labels.iter().zip(&series.values) {
        println!("{label:>12} {value:>8.1}");
    }

    Ok(())
}
