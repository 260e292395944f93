use chrono::{TimeZone, Utc};
use num_traits::cast::ToPrimitive;
use std::fmt::Display;

const KELVIN_OFFSET: f64 = 273.15;

const COMPASS_POINTS: [&str; 9] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW", "N"];

/// Rounds half to even, to at most one fractional digit, dropping a
/// trailing `.0`.
pub fn decimal(value: f64) -> String {
    let rounded = round_half_even(value * 10.0) / 10.0;
    // Avoid printing "-0".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };

    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}

fn round_half_even(value: f64) -> f64 {
    let rounded = value.round();
    if (value - value.trunc()).abs() == 0.5 && rounded % 2.0 != 0.0 {
        rounded - value.signum()
    } else {
        rounded
    }
}

/// Kelvin to Celsius, to the nearest half degree.
pub fn celsius(kelvin: f64) -> String {
    let halves = ((kelvin - KELVIN_OFFSET) * 2.0).round() / 2.0;
    format!("{} °C", decimal(halves))
}

pub fn compass_point(degrees: f64) -> Option<&'static str> {
    let index = (degrees.rem_euclid(360.0) / 45.0).round().to_usize()?;
    COMPASS_POINTS.get(index).copied()
}

pub fn hour_minute<Tz>(epoch_secs: f64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let secs = epoch_secs.to_i64()?;
    let time = tz.timestamp_opt(secs, 0).single()?;
    Some(time.format("%H:%M").to_string())
}

pub fn weekday<Tz>(epoch_secs: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let time = tz.timestamp_opt(epoch_secs, 0).single()?;
    Some(time.format("%A").to_string())
}

pub fn now_epoch_secs() -> i64 {
    Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal() {
        assert_eq!(decimal(1013.0), "1013");
        assert_eq!(decimal(4.1), "4.1");
        assert_eq!(decimal(65.0), "65");
        assert_eq!(decimal(0.44), "0.4");
        assert_eq!(decimal(7.96), "8");
        assert_eq!(decimal(-0.01), "0");
        assert_eq!(decimal(0.25), "0.2");
        assert_eq!(decimal(2.25), "2.2");
        assert_eq!(decimal(-0.25), "-0.2");
    }

    #[test]
    fn test_celsius() {
        assert_eq!(celsius(273.15), "0 °C");
        assert_eq!(celsius(273.0), "0 °C");
        assert_eq!(celsius(298.65), "25.5 °C");
        assert_eq!(celsius(300.0), "27 °C");
        assert_eq!(celsius(263.15), "-10 °C");
    }

    #[test]
    fn test_compass_point() {
        let expected = ["N", "NE", "E", "SE", "S", "SW", "W", "NW", "N"];
        for (i, point) in expected.iter().enumerate() {
            assert_eq!(compass_point(i as f64 * 45.0), Some(*point));
        }

        assert_eq!(compass_point(22.0), Some("N"));
        assert_eq!(compass_point(23.0), Some("NE"));
        assert_eq!(compass_point(350.0), Some("N"));
        assert_eq!(compass_point(-90.0), Some("W"));
        assert_eq!(compass_point(f64::NAN), None);
    }

    #[test]
    fn test_hour_minute() {
        // 2016-02-10T07:24:00Z
        assert_eq!(hour_minute(1455089040.0, &Utc), Some("07:24".to_owned()));
        assert_eq!(hour_minute(0.0, &Utc), Some("00:00".to_owned()));
        assert_eq!(hour_minute(f64::INFINITY, &Utc), None);
    }

    #[test]
    fn test_weekday() {
        assert_eq!(weekday(1455089040, &Utc), Some("Wednesday".to_owned()));
    }
}
