use crate::weather::error::{ParseError, ParseErrorKind};
use crate::weather::open_weather_types::{forecast_count, forecast_list, OpenWeatherSample};
use crate::weather::weather_types::{
    ExtendedWeatherDay, WeatherCollection, WeatherDay, FORECAST_DAYS,
};
use log::debug;
use serde_json::Value;

// The forecast holds eight three-hour samples per day; one per day is kept.
const SAMPLES_PER_DAY: usize = 8;
const SAMPLE_OFFSET: usize = 6;

/// Builds a new collection from the two payloads, in either order.
///
/// Slots the forecast has no sample for keep the value they had in
/// `previous`.
pub fn parse(
    first: &Value,
    second: &Value,
    previous: &WeatherCollection,
) -> Result<WeatherCollection, ParseError> {
    let (current, forecast) = match (forecast_count(first), forecast_count(second)) {
        (None, Some(_)) => (first, second),
        (Some(_), None) => (second, first),
        _ => return Err(ParseErrorKind::MalformedResponse.into()),
    };

    let samples = forecast_samples(forecast);
    if samples.is_empty() {
        return Err(ParseErrorKind::NoForecastData.into());
    }

    let mut collection = previous.clone();

    collection.today = read_sample(current)
        .as_ref()
        .and_then(ExtendedWeatherDay::from_sample)
        .ok_or(ParseErrorKind::InvalidDayRecord(0))?;

    for (i, sample) in samples.into_iter().enumerate() {
        let slot = i + 1;
        debug!("forecast day {} from list index {:?}", slot, sample.map(|s| s.0));

        collection.forecast[i] = sample
            .and_then(|(_, value)| read_sample(value))
            .as_ref()
            .and_then(WeatherDay::from_sample)
            .ok_or(ParseErrorKind::InvalidDayRecord(slot))?;
    }

    Ok(collection)
}

/// One entry per forecast day, paired with its list index; `None` where the
/// list is shorter than its count claims.
fn forecast_samples(forecast: &Value) -> Vec<Option<(usize, &Value)>> {
    let count = forecast_count(forecast).unwrap_or(0).max(0) as usize;
    let list = forecast_list(forecast);

    let days = count / SAMPLES_PER_DAY;
    if days > FORECAST_DAYS {
        debug!("ignoring {} forecast days past the fifth", days - FORECAST_DAYS);
    }

    (0..days.min(FORECAST_DAYS))
        .map(|day| {
            let index = SAMPLE_OFFSET + day * SAMPLES_PER_DAY;
            list.get(index).map(|value| (index, value))
        })
        .collect()
}

fn read_sample(value: &Value) -> Option<OpenWeatherSample> {
    match OpenWeatherSample::from_value(value) {
        Ok(sample) => Some(sample),
        Err(e) => {
            debug!("unreadable weather sample: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::weather_types::{AttributeKind, DayRecord};
    use serde_json::json;

    fn current() -> Value {
        json!({
            "weather": [{ "id": 803, "icon": "04d", "description": "broken clouds" }],
            "main": { "temp": 278.65, "pressure": 1021, "humidity": 81 },
            "wind": { "speed": 3.6, "deg": 250 },
            "clouds": { "all": 75 },
            "rain": { "3h": 0.25 },
            "snow": { "3h": 1 },
            "sys": { "sunrise": 1455086000, "sunset": 1455122000 },
            "dt": 1455100000,
        })
    }

    fn forecast(count: usize) -> Value {
        let list: Vec<Value> = (0..count)
            .map(|i| {
                json!({
                    "weather": [{ "id": 500 + i, "icon": "10d", "description": "light rain" }],
                    "main": { "temp": 270.0 + i as f64 },
                    "dt": 1455100000 + i * 10800,
                })
            })
            .collect();

        json!({ "cnt": count, "list": list })
    }

    #[test]
    fn test_roles_are_found_in_either_order() -> Result<(), Box<dyn std::error::Error>> {
        let previous = WeatherCollection::new();

        let forward = parse(&current(), &forecast(40), &previous)?;
        let swapped = parse(&forecast(40), &current(), &previous)?;

        assert_eq!(forward, swapped);
        assert_eq!(forward.today().day.condition, 803);

        Ok(())
    }

    #[test]
    fn test_roles_must_be_unambiguous() {
        let previous = WeatherCollection::new();

        let err = parse(&current(), &current(), &previous).unwrap_err();
        assert_eq!(err.kind(), &ParseErrorKind::MalformedResponse);

        let err = parse(&forecast(40), &forecast(40), &previous).unwrap_err();
        assert_eq!(err.kind(), &ParseErrorKind::MalformedResponse);
    }

    #[test]
    fn test_one_sample_per_day() -> Result<(), Box<dyn std::error::Error>> {
        let collection = parse(&current(), &forecast(40), &WeatherCollection::new())?;

        let conditions: Vec<i64> = collection.forecast().iter().map(|d| d.condition).collect();
        assert_eq!(conditions, vec![506, 514, 522, 530, 538]);

        Ok(())
    }

    #[test]
    fn test_full_payloads() -> Result<(), Box<dyn std::error::Error>> {
        let collection = parse(&current(), &forecast(40), &WeatherCollection::new())?;

        assert_eq!(collection.len(), 6);
        assert_eq!(collection.today().attributes.len(), 9);
        assert!(matches!(collection.get(0), Some(DayRecord::Extended(_))));
        for i in 1..6 {
            match collection.get(i) {
                Some(DayRecord::Plain(day)) => assert_ne!(day.temperature, 0.0),
                other => panic!("slot {} holds {:?}", i, other),
            }
        }
        assert_eq!(collection.forecast_day_count(), 4);

        let today = collection.today();
        assert_eq!(today.day.celsius(), "5.5 °C");
        assert_eq!(
            today.attribute(AttributeKind::WindDirection).unwrap().display_value,
            "W"
        );
        assert_eq!(
            today.attribute(AttributeKind::Rain).unwrap().to_string(),
            "0.2 mm"
        );
        assert_eq!(
            today.attribute(AttributeKind::Sunrise).unwrap().numeric_value,
            1455086000.0
        );

        Ok(())
    }

    #[test]
    fn test_missing_attribute_is_dropped() -> Result<(), Box<dyn std::error::Error>> {
        let mut today = current();
        today["wind"] = json!({ "speed": 3.6 });

        let collection = parse(&today, &forecast(40), &WeatherCollection::new())?;

        assert_eq!(collection.today().attributes.len(), 8);
        assert!(collection
            .today()
            .attribute(AttributeKind::WindDirection)
            .is_none());

        Ok(())
    }

    #[test]
    fn test_missing_base_field_fails_the_parse() {
        let mut today = current();
        today["main"] = json!({ "pressure": 1021, "humidity": 81 });

        let err = parse(&today, &forecast(40), &WeatherCollection::new()).unwrap_err();
        assert_eq!(err.kind(), &ParseErrorKind::InvalidDayRecord(0));

        let mut bad_forecast = forecast(40);
        bad_forecast["list"][14]["dt"] = json!(null);

        let err = parse(&current(), &bad_forecast, &WeatherCollection::new()).unwrap_err();
        assert_eq!(err.kind(), &ParseErrorKind::InvalidDayRecord(2));
    }

    #[test]
    fn test_short_list_fails_the_parse() {
        let mut short = forecast(20);
        short["cnt"] = json!(40);

        let err = parse(&current(), &short, &WeatherCollection::new()).unwrap_err();
        assert_eq!(err.kind(), &ParseErrorKind::InvalidDayRecord(3));
    }

    #[test]
    fn test_empty_forecast() {
        let err = parse(&current(), &forecast(7), &WeatherCollection::new()).unwrap_err();
        assert_eq!(err.kind(), &ParseErrorKind::NoForecastData);

        let err = parse(&current(), &json!({ "cnt": -8 }), &WeatherCollection::new()).unwrap_err();
        assert_eq!(err.kind(), &ParseErrorKind::NoForecastData);
    }

    #[test]
    fn test_partial_forecast_keeps_previous_slots() -> Result<(), Box<dyn std::error::Error>> {
        let previous = parse(&current(), &forecast(40), &WeatherCollection::new())?;
        let collection = parse(&current(), &forecast(16), &previous)?;

        assert_eq!(collection.forecast()[0].condition, 506);
        assert_eq!(collection.forecast()[1].condition, 514);
        assert_eq!(collection.forecast()[2..], previous.forecast()[2..]);

        let fresh = parse(&current(), &forecast(16), &WeatherCollection::new())?;
        assert_eq!(fresh.forecast()[2], WeatherDay::default());
        assert_eq!(fresh.forecast_day_count(), 1);

        Ok(())
    }

    #[test]
    fn test_extra_days_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
        let collection = parse(&current(), &forecast(56), &WeatherCollection::new())?;

        assert_eq!(collection.len(), 6);
        assert_eq!(collection.forecast()[4].condition, 538);

        Ok(())
    }
}
