mod error;
mod fetch;
mod format;
mod open_weather_types;
mod parse;
mod weather_types;

pub use error::{FetchError, FetchErrorKind, ParseError, ParseErrorKind};
pub use fetch::{fetch_pair, Fetch, HttpFetcher, Payloads};
pub use parse::parse;
pub use weather_types::{
    Attribute, AttributeKind, DayCycle, DayRecord, ExtendedWeatherDay, WeatherCollection,
    WeatherDay, COLLECTION_LEN, FORECAST_DAYS,
};
