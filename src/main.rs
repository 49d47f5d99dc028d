use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use weather_trends::io::read_weather_csv;
use weather_trends::pipeline::{run, run_self_checks};
use weather_trends::report::format_results;
use weather_trends::{AnalysisConfig, Metric};

/// Analyse yearly and seasonal weather trends and forecast the coming years
#[derive(Parser, Debug)]
#[command(name = "weather-trends")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Weather CSV to analyse
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Metric to analyse (temperature, rainfall, humidity)
    #[arg(short, long)]
    metric: Option<Metric>,

    /// Number of years to forecast
    #[arg(short, long)]
    periods: Option<usize>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Results file to append to
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Do not print charts
    #[arg(long)]
    no_plot: bool,

    /// Do not append results to the export file
    #[arg(long)]
    no_export: bool,

    /// Run the self-check battery instead of an analysis
    #[arg(long)]
    test: bool,
}

impl Cli {
    fn into_config(self) -> weather_trends::Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_file(path)?,
            None => AnalysisConfig::default(),
        };

        if let Some(data) = self.data {
            config.data_path = data;
        }
        if let Some(metric) = self.metric {
            config.metric = metric;
        }
        if let Some(periods) = self.periods {
            config.periods = periods;
        }
        if let Some(export) = self.export {
            config.export_path = export;
        }
        if self.no_plot {
            config.plot = false;
        }
        if self.no_export {
            config.export = false;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let test_mode = cli.test;

    // nothing has run yet, so every configuration error is a failure
    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if test_mode {
        let dataset = read_weather_csv(&config.data_path)?;
        let report = run_self_checks(&dataset, config.periods);
        println!("{}", report);
        if !report.all_passed() {
            process::exit(1);
        }
        return Ok(());
    }

    let today = chrono::Local::now().date_naive();
    match run(&config, today) {
        Ok(outcome) => {
            println!("{}", format_results(&outcome.results));
            if let Some(charts) = outcome.charts {
                println!("{}", charts);
            }
            if outcome.exported_rows > 0 {
                println!(
                    "Appended {} rows to {}",
                    outcome.exported_rows,
                    config.export_path.display()
                );
            }
            Ok(())
        }
        Err(e) if e.is_expected() => {
            eprintln!("Analysis stopped: {}", e);
            log::warn!("nothing was rendered or exported");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
