//! fueltrack - Fuel consumption analytics over fill-up logs

use fueltrack::{
    cli::{Cli, Command, EfficiencyArgs},
    data_loader::DataLoader,
    error::Result,
    fleet::{compute_fleet_efficiency, compute_fleet_statistics},
    mileage::compute_efficiency,
    output::get_formatter,
    series::{efficiency_series, monthly_spend},
    statistics::compute_all_vehicle_statistics,
    timezone::TimezoneConfig,
    types::FillDate,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Quiet unless --verbose; RUST_LOG only applies in verbose mode
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fueltrack=info"))
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let now = match &cli.today {
        Some(today) => today.parse::<FillDate>()?,
        None => {
            let tz_config = TimezoneConfig::from_cli(cli.timezone.as_deref(), cli.utc)?;
            info!("Using timezone: {}", tz_config.display_name());
            tz_config.today()
        }
    };

    let loader = DataLoader::new(cli.data_path()?)?;
    let fills = loader.load_filtered(cli.fill_filter()?).await?;
    info!("Loaded {} fills from {}", fills.len(), loader.path().display());

    let formatter = get_formatter(cli.json);

    match cli.command.clone().unwrap_or(Command::Stats) {
        Command::Efficiency(EfficiencyArgs {
            computed_only,
            series,
        }) => {
            info!("Running efficiency report");

            // A single vehicle needs no partitioning
            let report = if cli.vehicle.is_some() {
                compute_efficiency(&fills)
            } else {
                compute_fleet_efficiency(&fills)
            };

            if series {
                println!(
                    "{}",
                    formatter.format_efficiency_series(&efficiency_series(&report))
                );
            } else {
                println!("{}", formatter.format_efficiency(&report, computed_only));
            }
        }
        Command::Stats => {
            info!("Running vehicle statistics as of {now}");

            let vehicles = compute_all_vehicle_statistics(&fills, now, cli.parallel);
            let fleet = compute_fleet_statistics(vehicles.iter().map(|v| &v.statistics));
            println!("{}", formatter.format_statistics(&vehicles, &fleet));
        }
        Command::Monthly => {
            info!("Running monthly spend report");
            println!("{}", formatter.format_monthly(&monthly_spend(&fills)));
        }
    }

    Ok(())
}
