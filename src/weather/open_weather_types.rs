use num_traits::cast::ToPrimitive;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// Leaf fields go through these helpers so that a value of the wrong JSON type
// reads as absent instead of failing the whole sample.

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_f64())
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(integer(&Value::deserialize(deserializer)?))
}

/// Integers may also arrive as floats with no fractional part, e.g. `800.0`.
fn integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0)
            .and_then(|f| f.to_i64())
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Value::deserialize(deserializer)?
        .as_str()
        .map(str::to_owned))
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Description {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub icon: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Main {
    #[serde(deserialize_with = "lenient_f64")]
    pub temp: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub pressure: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub humidity: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Wind {
    #[serde(deserialize_with = "lenient_f64")]
    pub speed: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub deg: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Precipitation {
    #[serde(rename = "3h", deserialize_with = "lenient_f64")]
    pub three_hour: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Clouds {
    #[serde(deserialize_with = "lenient_f64")]
    pub all: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Sys {
    #[serde(deserialize_with = "lenient_f64")]
    pub sunrise: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub sunset: Option<f64>,
}

/// One weather reading: the whole current-weather payload, or one entry of
/// the forecast `list`.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct OpenWeatherSample {
    pub weather: Vec<Description>,
    pub main: Main,
    pub wind: Wind,
    pub clouds: Clouds,
    pub sys: Sys,
    pub rain: Precipitation,
    pub snow: Precipitation,
    #[serde(deserialize_with = "lenient_i64")]
    pub dt: Option<i64>,
}

impl OpenWeatherSample {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        OpenWeatherSample::deserialize(value)
    }
}

/// The count of three-hour samples, present only on forecast payloads.
pub fn forecast_count(payload: &Value) -> Option<i64> {
    payload.get("cnt").and_then(integer)
}

pub fn forecast_list(payload: &Value) -> &[Value] {
    payload
        .get("list")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
