use crate::weather::error::FetchError;
use log::{debug, warn};
use serde_json::Value;
use std::thread::{self, ScopedJoinHandle};
use std::time::Duration;

/// A source of JSON documents. Implementations must be shareable between the
/// two request threads.
pub trait Fetch: Sync {
    fn get(&self, url: &str) -> Result<Value, FetchError>;
}

pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> HttpFetcher {
        HttpFetcher {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<Value, FetchError> {
        debug!("requesting {}", url);

        let resp = self
            .agent
            .get(url)
            .set("Cache-Control", "no-cache")
            .set("Pragma", "no-cache")
            .call()?;

        if resp.status() != 200 {
            return Err(FetchError::transport(resp.status().to_string()));
        }

        let body = resp.into_string()?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Both payloads, tagged by the request that produced them.
#[derive(Debug)]
pub struct Payloads {
    pub current: Value,
    pub forecast: Value,
}

/// Requests both URLs at once and waits for both to finish, whatever their
/// outcome. When both fail the current-weather error is returned.
pub fn fetch_pair<F: Fetch>(
    fetcher: &F,
    current_url: &str,
    forecast_url: &str,
) -> Result<Payloads, FetchError> {
    let (current, forecast) = thread::scope(|s| {
        let current = s.spawn(|| fetcher.get(current_url));
        let forecast = s.spawn(|| fetcher.get(forecast_url));
        (joined(current), joined(forecast))
    });

    match (current, forecast) {
        (Ok(current), Ok(forecast)) => Ok(Payloads { current, forecast }),
        (Err(e), Ok(_)) => Err(e),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Err(other)) => {
            warn!("forecast request failed as well: {}", other);
            Err(e)
        }
    }
}

fn joined(handle: ScopedJoinHandle<'_, Result<Value, FetchError>>) -> Result<Value, FetchError> {
    handle
        .join()
        .unwrap_or_else(|_| Err(FetchError::transport("request thread panicked")))
}
