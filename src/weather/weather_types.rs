use crate::weather::format;
use crate::weather::open_weather_types::OpenWeatherSample;
use chrono::Local;
use std::fmt;

pub const FORECAST_DAYS: usize = 5;
pub const COLLECTION_LEN: usize = FORECAST_DAYS + 1;

const DEFAULT_CONDITION: i64 = 800;
const DEFAULT_ICON: &str = "01d";
const DEFAULT_DESCRIPTION: &str = "clear sky";

#[derive(Clone, Debug, PartialEq)]
pub struct WeatherDay {
    /// OpenWeatherMap condition code.
    pub condition: i64,
    /// Kelvin.
    pub temperature: f64,
    pub icon: String,
    /// Unix epoch seconds.
    pub timestamp: i64,
    pub description: String,
}

impl Default for WeatherDay {
    fn default() -> Self {
        WeatherDay {
            condition: DEFAULT_CONDITION,
            temperature: 0.0,
            icon: DEFAULT_ICON.to_owned(),
            timestamp: 0,
            description: DEFAULT_DESCRIPTION.to_owned(),
        }
    }
}

impl WeatherDay {
    /// Returns `None` unless all five base fields are present.
    pub fn from_sample(sample: &OpenWeatherSample) -> Option<WeatherDay> {
        let description = sample.weather.first()?;

        Some(WeatherDay {
            condition: description.id?,
            temperature: sample.main.temp?,
            icon: description.icon.clone()?,
            timestamp: sample.dt?,
            description: description.description.clone()?,
        })
    }

    pub fn celsius(&self) -> String {
        format::celsius(self.temperature)
    }

    /// Full local weekday name of the sample time, e.g. "Monday".
    pub fn weekday(&self) -> String {
        format::weekday(self.timestamp, &Local).unwrap_or_default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    Cloudiness,
    Pressure,
    Humidity,
    WindSpeed,
    WindDirection,
    Sunrise,
    Sunset,
    Rain,
    Snow,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 9] = [
        AttributeKind::Cloudiness,
        AttributeKind::Pressure,
        AttributeKind::Humidity,
        AttributeKind::WindSpeed,
        AttributeKind::WindDirection,
        AttributeKind::Sunrise,
        AttributeKind::Sunset,
        AttributeKind::Rain,
        AttributeKind::Snow,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Cloudiness => "cloudiness",
            Self::Pressure => "pressure",
            Self::Humidity => "humidity",
            Self::WindSpeed => "wind speed",
            Self::WindDirection => "wind direction",
            Self::Sunrise => "sunrise",
            Self::Sunset => "sunset",
            Self::Rain => "rain (3h)",
            Self::Snow => "snow (3h)",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::Cloudiness | Self::Humidity => "%",
            Self::Pressure => "hPa",
            Self::WindSpeed => "m/s",
            Self::Rain | Self::Snow => "mm",
            Self::WindDirection | Self::Sunrise | Self::Sunset => "",
        }
    }

    fn format(&self, value: f64) -> Option<String> {
        match self {
            Self::WindDirection => format::compass_point(value).map(str::to_owned),
            Self::Sunrise | Self::Sunset => format::hour_minute(value, &Local),
            _ => Some(format::decimal(value)),
        }
    }

    fn reading(&self, sample: &OpenWeatherSample) -> Option<f64> {
        match self {
            Self::Cloudiness => sample.clouds.all,
            Self::Pressure => sample.main.pressure,
            Self::Humidity => sample.main.humidity,
            Self::WindSpeed => sample.wind.speed,
            Self::WindDirection => sample.wind.deg,
            Self::Sunrise => sample.sys.sunrise,
            Self::Sunset => sample.sys.sunset,
            Self::Rain => sample.rain.three_hour,
            Self::Snow => sample.snow.three_hour,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub kind: AttributeKind,
    pub display_value: String,
    pub numeric_value: f64,
}

impl Attribute {
    pub fn new(kind: AttributeKind, numeric_value: f64) -> Option<Attribute> {
        Some(Attribute {
            kind,
            display_value: kind.format(numeric_value)?,
            numeric_value,
        })
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn unit(&self) -> &'static str {
        self.kind.unit()
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.unit().is_empty() {
            write!(f, "{}", self.display_value)
        } else {
            write!(f, "{} {}", self.display_value, self.unit())
        }
    }
}

/// Today's record: the base fields plus whichever attributes were readable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtendedWeatherDay {
    pub day: WeatherDay,
    pub attributes: Vec<Attribute>,
}

impl ExtendedWeatherDay {
    pub fn from_sample(sample: &OpenWeatherSample) -> Option<ExtendedWeatherDay> {
        let day = WeatherDay::from_sample(sample)?;
        let attributes = AttributeKind::ALL
            .iter()
            .filter_map(|kind| Attribute::new(*kind, kind.reading(sample)?))
            .collect();

        Some(ExtendedWeatherDay { day, attributes })
    }

    pub fn attribute(&self, kind: AttributeKind) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.kind == kind)
    }
}

#[derive(Clone, Copy, Debug)]
pub enum DayRecord<'a> {
    Plain(&'a WeatherDay),
    Extended(&'a ExtendedWeatherDay),
}

impl<'a> DayRecord<'a> {
    pub fn day(&self) -> &'a WeatherDay {
        match *self {
            Self::Plain(day) => day,
            Self::Extended(extended) => &extended.day,
        }
    }
}

/// Today followed by five forecast days. Slot 0 is always extended.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeatherCollection {
    pub(crate) today: ExtendedWeatherDay,
    pub(crate) forecast: [WeatherDay; FORECAST_DAYS],
}

impl WeatherCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        COLLECTION_LEN
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn today(&self) -> &ExtendedWeatherDay {
        &self.today
    }

    pub fn forecast(&self) -> &[WeatherDay] {
        &self.forecast
    }

    pub fn get(&self, index: usize) -> Option<DayRecord<'_>> {
        match index {
            0 => Some(DayRecord::Extended(&self.today)),
            i => self.forecast.get(i - 1).map(DayRecord::Plain),
        }
    }

    pub fn days(&self) -> impl Iterator<Item = DayRecord<'_>> {
        std::iter::once(DayRecord::Extended(&self.today))
            .chain(self.forecast.iter().map(DayRecord::Plain))
    }

    /// Forecast slots holding real data, minus one.
    ///
    /// Goes negative when no forecast day carries a non-zero temperature.
    pub fn forecast_day_count(&self) -> i64 {
        let with_data = self
            .forecast
            .iter()
            .filter(|d| d.temperature != 0.0)
            .count();

        with_data as i64 - 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayCycle {
    Day,
    Night,
}

impl DayCycle {
    /// Day when `now` falls within today's sunrise..sunset. Without both sun
    /// times this stays `Day`.
    pub fn at(today: &ExtendedWeatherDay, now: i64) -> DayCycle {
        let sun = |kind| today.attribute(kind).map(|a| a.numeric_value as i64);

        match (sun(AttributeKind::Sunrise), sun(AttributeKind::Sunset)) {
            (Some(sunrise), Some(sunset)) if now >= sunrise && now < sunset => DayCycle::Day,
            (Some(_), Some(_)) => DayCycle::Night,
            _ => DayCycle::Day,
        }
    }

    pub fn now(today: &ExtendedWeatherDay) -> DayCycle {
        Self::at(today, format::now_epoch_secs())
    }
}

impl fmt::Display for DayCycle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Night => write!(f, "night"),
        }
    }
}
