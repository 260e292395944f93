mod config;
mod display;
mod weather;

pub use config::{Config, DEFAULT_REFRESH_INTERVAL, DEFAULT_TIMEOUT};
pub use display::{ConsoleDisplay, Display, Error as DisplayError};
pub use weather::{
    fetch_pair, parse, Attribute, AttributeKind, DayCycle, DayRecord, ExtendedWeatherDay, Fetch,
    FetchError, FetchErrorKind, HttpFetcher, ParseError, ParseErrorKind, Payloads,
    WeatherCollection, WeatherDay, COLLECTION_LEN, FORECAST_DAYS,
};

use log::{debug, info, warn};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
}

impl std::error::Error for Error {}

impl Error {
    /// Return the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Error {
            kind: ErrorKind::Config(message.into()),
        }
    }
}

/// The kind of an error that can occur.
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    Fetch(weather::FetchError),
    Parse(weather::ParseError),
    Display(display::Error),
    LockState,
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ErrorKind::Fetch(ref err) => write!(f, "{}", err),
            ErrorKind::Parse(ref err) => write!(f, "{}", err),
            ErrorKind::Display(ref err) => write!(f, "{}", err),
            ErrorKind::LockState => write!(f, "a task failed while holding the weather lock"),
            ErrorKind::Config(ref msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl From<weather::FetchError> for Error {
    fn from(e: weather::FetchError) -> Self {
        Error {
            kind: ErrorKind::Fetch(e),
        }
    }
}

impl From<weather::ParseError> for Error {
    fn from(e: weather::ParseError) -> Self {
        Error {
            kind: ErrorKind::Parse(e),
        }
    }
}

impl From<display::Error> for Error {
    fn from(e: display::Error) -> Self {
        Error {
            kind: ErrorKind::Display(e),
        }
    }
}

impl From<PoisonError<MutexGuard<'_, Snapshot>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, Snapshot>>) -> Self {
        Error {
            kind: ErrorKind::LockState,
        }
    }
}

/// The collection a renderer should show, and the refresh that produced it.
/// Generation 0 is the placeholder collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub generation: u64,
    pub collection: WeatherCollection,
}

/// Owns the latest weather and refreshes it on request.
///
/// Refreshes may overlap; a refresh only replaces the snapshot if it was
/// started after the one that produced the snapshot.
pub struct WeatherService<F: Fetch = HttpFetcher> {
    config: Config,
    fetcher: F,
    issued: AtomicU64,
    latest: Mutex<Snapshot>,
}

impl WeatherService<HttpFetcher> {
    pub fn new(config: Config) -> Self {
        let fetcher = HttpFetcher::new(config.timeout);
        WeatherService::with_fetcher(config, fetcher)
    }
}

impl<F: Fetch> WeatherService<F> {
    pub fn with_fetcher(config: Config, fetcher: F) -> Self {
        WeatherService {
            config,
            fetcher,
            issued: AtomicU64::new(0),
            latest: Mutex::new(Snapshot::default()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn snapshot(&self) -> Result<Snapshot, Error> {
        Ok(self.latest.lock()?.clone())
    }

    /// Downloads both payloads and rebuilds the collection.
    ///
    /// On failure the held snapshot is left as it was.
    pub fn refresh(&self) -> Result<Snapshot, Error> {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("starting weather refresh {}", generation);

        let payloads = fetch_pair(
            &self.fetcher,
            &self.config.current_url,
            &self.config.forecast_url,
        )?;

        let base = self.snapshot()?.collection;
        let collection = parse(&payloads.current, &payloads.forecast, &base)?;

        let mut latest = self.latest.lock()?;
        if generation > latest.generation {
            info!(
                "weather refresh {} applied ({} forecast days)",
                generation,
                collection.forecast_day_count() + 1
            );
            *latest = Snapshot {
                generation,
                collection,
            };
        } else {
            warn!(
                "discarding weather refresh {}, refresh {} already applied",
                generation, latest.generation
            );
        }

        Ok(latest.clone())
    }

    /// Runs a refresh and reports its outcome to `on_complete`.
    pub fn refresh_with<C>(&self, on_complete: C)
    where
        C: FnOnce(Option<Error>),
    {
        on_complete(self.refresh().err())
    }
}

/// Refreshes and prints until an unrecoverable error. With `once`, prints a
/// single time and returns the refresh error if there was one.
pub fn run<F: Fetch, D: Display>(
    service: &WeatherService<F>,
    display: &mut D,
    once: bool,
) -> Result<(), Error> {
    let refresh_interval: Duration = service.config().refresh_interval;

    loop {
        let snapshot = match service.refresh() {
            Ok(snapshot) => snapshot,
            Err(e) if once => return Err(e),
            Err(e) => {
                warn!("Error updating weather: {}. Using previous weather.", e);
                service.snapshot()?
            }
        };

        let cycle = DayCycle::now(snapshot.collection.today());
        display.print(&snapshot.collection, cycle)?;

        if once {
            return Ok(());
        }

        thread::sleep(refresh_interval);
    }
}
