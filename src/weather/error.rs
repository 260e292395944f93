use std::fmt;

#[derive(Debug)]
pub struct FetchError {
    kind: FetchErrorKind,
}

impl std::error::Error for FetchError {}

impl FetchError {
    /// Return the kind of this error.
    pub fn kind(&self) -> &FetchErrorKind {
        &self.kind
    }

    pub(crate) fn transport<S: Into<String>>(message: S) -> Self {
        FetchError {
            kind: FetchErrorKind::Transport(message.into()),
        }
    }
}

/// The kind of an error that can occur while downloading a payload.
#[derive(Debug)]
#[non_exhaustive]
pub enum FetchErrorKind {
    /// Network failure or a status other than 200. Status failures carry the
    /// numeric code as their message.
    Transport(String),
    Body(std::io::Error),
    Decode(serde_json::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            FetchErrorKind::Transport(ref msg) => write!(f, "request failed: {}", msg),
            FetchErrorKind::Body(ref err) => write!(f, "{}", err),
            FetchErrorKind::Decode(ref err) => write!(f, "{}", err),
        }
    }
}

impl From<ureq::Error> for FetchError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, _) => FetchError::transport(code.to_string()),
            ureq::Error::Transport(t) => FetchError::transport(t.to_string()),
        }
    }
}

impl From<std::io::Error> for FetchError {
    fn from(e: std::io::Error) -> Self {
        FetchError {
            kind: FetchErrorKind::Body(e),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError {
            kind: FetchErrorKind::Decode(e),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct ParseError {
    kind: ParseErrorKind,
}

impl std::error::Error for ParseError {}

impl ParseError {
    /// Return the kind of this error.
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

/// The kind of an error that can occur while building the model.
#[derive(Debug, PartialEq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// Neither or both payloads carry a forecast count.
    MalformedResponse,
    NoForecastData,
    /// The day record for this collection slot lacks a base field.
    InvalidDayRecord(usize),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ParseErrorKind::MalformedResponse => {
                write!(f, "could not tell current weather from forecast")
            }
            ParseErrorKind::NoForecastData => write!(f, "forecast contains no day samples"),
            ParseErrorKind::InvalidDayRecord(slot) => {
                write!(f, "day {} is missing a required field", slot)
            }
        }
    }
}

impl From<ParseErrorKind> for ParseError {
    fn from(kind: ParseErrorKind) -> Self {
        ParseError { kind }
    }
}
