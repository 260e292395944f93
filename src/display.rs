mod error;

use crate::weather::{DayCycle, WeatherCollection, WeatherDay};
pub use error::Error;

use std::io::Write;

const ROW_WIDTH: usize = 34;
const DESCRIPTION_CHARS: usize = 14;
const ATTRIBUTE_NAME_CHARS: usize = 16;

pub trait Display {
    fn print(&mut self, collection: &WeatherCollection, cycle: DayCycle) -> Result<(), Error>;
}

/// Renders the collection as a text box on any writer, usually stdout.
pub struct ConsoleDisplay<W: Write> {
    out: W,
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W) -> ConsoleDisplay<W> {
        ConsoleDisplay { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Display for ConsoleDisplay<W> {
    fn print(&mut self, collection: &WeatherCollection, cycle: DayCycle) -> Result<(), Error> {
        let today = collection.today();
        let border = format!("-{}-", "-".repeat(ROW_WIDTH));

        writeln!(self.out)?;
        writeln!(self.out, "{}", border)?;
        writeln!(
            self.out,
            "|{:<width$}|",
            format!("{} ({})", today.day.weekday(), cycle),
            width = ROW_WIDTH
        )?;
        writeln!(self.out, "|{}|", day_row(&today.day))?;

        for attribute in &today.attributes {
            writeln!(
                self.out,
                "|  {:<name_width$}{:>value_width$}|",
                attribute.name(),
                attribute.to_string(),
                name_width = ATTRIBUTE_NAME_CHARS,
                value_width = ROW_WIDTH - ATTRIBUTE_NAME_CHARS - 2
            )?;
        }

        writeln!(self.out, "{}", border)?;
        for day in collection.forecast() {
            writeln!(self.out, "|{}|", forecast_row(day))?;
        }
        writeln!(self.out, "{}", border)?;

        self.out.flush()?;

        Ok(())
    }
}

fn day_row(day: &WeatherDay) -> String {
    format!(
        "{:>8}  {:<width$}  {:<8}",
        day.celsius(),
        truncate_to_characters(&day.description, DESCRIPTION_CHARS),
        day.icon,
        width = DESCRIPTION_CHARS
    )
}

fn forecast_row(day: &WeatherDay) -> String {
    format!(
        "{:<9} {:>8}  {:<width$}",
        truncate_to_characters(&day.weekday(), 9),
        day.celsius(),
        truncate_to_characters(&day.description, DESCRIPTION_CHARS),
        width = DESCRIPTION_CHARS
    )
}

fn truncate_to_characters(s: &str, length: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= length {
        return s.to_owned();
    }
    // No room for the apostrophe.
    if length < 2 {
        return chars[..length].iter().collect();
    }

    let tail: String = chars[chars.len() - length + 2..].iter().collect();
    format!("{}'{}", chars[0], tail)
}
