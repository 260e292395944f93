use std::time::Duration;

const OPEN_WEATHER_BASE_URI: &str = "http://api.openweathermap.org/data/2.5";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(600);

#[derive(Clone, Debug)]
pub struct Config {
    pub current_url: String,
    pub forecast_url: String,
    pub timeout: Duration,
    pub refresh_interval: Duration,
}

impl Config {
    pub fn new(current_url: String, forecast_url: String) -> Config {
        Config {
            current_url,
            forecast_url,
            timeout: DEFAULT_TIMEOUT,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }

    /// Current weather and 5 day / 3 hour forecast endpoints for one city.
    pub fn for_city(appid: &str, city_id: &str) -> Config {
        Config::new(
            format!(
                "{}/weather?id={}&appid={}",
                OPEN_WEATHER_BASE_URI, city_id, appid
            ),
            format!(
                "{}/forecast?id={}&appid={}",
                OPEN_WEATHER_BASE_URI, city_id, appid
            ),
        )
    }
}
