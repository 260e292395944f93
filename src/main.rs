use dvdblk_weather::{Config, ConsoleDisplay, WeatherService};
use log::{debug, info};
use simplelog::{ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::time::Duration;
use structopt::StructOpt;

const DEFAULT_CITY_ID: &str = "3078610";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::from_args();

    let log_config = ConfigBuilder::new().set_time_to_local(true).build();
    TermLogger::init(args.log_level, log_config, TerminalMode::Mixed)?;
    debug!("logger initialized");

    let mut config = match (args.current_url, args.forecast_url, args.appid) {
        (Some(current), Some(forecast), _) => Config::new(current, forecast),
        (current, forecast, Some(appid)) => {
            let mut config = Config::for_city(&appid, &args.city_id);
            if let Some(url) = current {
                config.current_url = url;
            }
            if let Some(url) = forecast {
                config.forecast_url = url;
            }
            config
        }
        _ => {
            return Err(dvdblk_weather::Error::config(
                "--appid is required unless both --current-url and --forecast-url are given",
            )
            .into())
        }
    };
    config.timeout = Duration::from_secs(args.timeout_secs);
    config.refresh_interval = Duration::from_secs(args.refresh_secs);

    let service = WeatherService::new(config);
    let mut display = ConsoleDisplay::new(std::io::stdout());

    info!("Initialization complete");

    dvdblk_weather::run(&service, &mut display, args.once)?;

    Ok(())
}

#[derive(StructOpt)]
struct Cli {
    /// OpenWeatherMap API key.
    #[structopt(long)]
    appid: Option<String>,

    #[structopt(long, default_value = DEFAULT_CITY_ID)]
    city_id: String,

    #[structopt(long)]
    current_url: Option<String>,

    #[structopt(long)]
    forecast_url: Option<String>,

    #[structopt(long, default_value = "10")]
    timeout_secs: u64,

    #[structopt(long, default_value = "600")]
    refresh_secs: u64,

    /// Print one refresh and exit.
    #[structopt(long)]
    once: bool,

    #[structopt(long, default_value = "warn")]
    log_level: LevelFilter,
}
