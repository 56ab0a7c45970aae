//! Logging severity levels
//!
//! A level is stored the way it was written: either a well-known name or a
//! raw integer on the conventional 10/20/30/40/50 scale. The logging layer
//! decides what a value means for its own output.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use tracing::level_filters::LevelFilter;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level `{0}` (expected DEBUG, INFO, WARNING, ERROR, CRITICAL or an integer)")]
pub struct LevelParseError(pub String);

/// Well-known severity names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LevelName {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LevelName {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelName::Debug => "DEBUG",
            LevelName::Info => "INFO",
            LevelName::Warning => "WARNING",
            LevelName::Error => "ERROR",
            LevelName::Critical => "CRITICAL",
        }
    }

    pub fn numeric(&self) -> i64 {
        match self {
            LevelName::Debug => 10,
            LevelName::Info => 20,
            LevelName::Warning => 30,
            LevelName::Error => 40,
            LevelName::Critical => 50,
        }
    }
}

impl FromStr for LevelName {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LevelName::Debug),
            "INFO" => Ok(LevelName::Info),
            "WARNING" | "WARN" => Ok(LevelName::Warning),
            "ERROR" => Ok(LevelName::Error),
            "CRITICAL" | "FATAL" => Ok(LevelName::Critical),
            _ => Err(LevelParseError(s.to_string())),
        }
    }
}

/// A severity threshold: a level name or a raw integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Named(LevelName),
    Numeric(i64),
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Named(LevelName::Info)
    }
}

impl LogLevel {
    /// Numeric severity of this level
    pub fn numeric(&self) -> i64 {
        match self {
            LogLevel::Named(name) => name.numeric(),
            LogLevel::Numeric(value) => *value,
        }
    }

    /// Map onto the tracing verbosity filter
    pub fn to_level_filter(&self) -> LevelFilter {
        match self.numeric() {
            n if n < 10 => LevelFilter::TRACE,
            n if n < 20 => LevelFilter::DEBUG,
            n if n < 30 => LevelFilter::INFO,
            n if n < 40 => LevelFilter::WARN,
            _ => LevelFilter::ERROR,
        }
    }
}

impl From<LevelName> for LogLevel {
    fn from(name: LevelName) -> Self {
        LogLevel::Named(name)
    }
}

impl FromStr for LogLevel {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(value) = s.trim().parse::<i64>() {
            return Ok(LogLevel::Numeric(value));
        }
        s.parse::<LevelName>().map(LogLevel::Named)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Named(name) => f.write_str(name.as_str()),
            LogLevel::Numeric(value) => write!(f, "{}", value),
        }
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LogLevel::Named(name) => serializer.serialize_str(name.as_str()),
            LogLevel::Numeric(value) => serializer.serialize_i64(*value),
        }
    }
}

struct LogLevelVisitor;

impl<'de> Visitor<'de> for LogLevelVisitor {
    type Value = LogLevel;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a log level name or an integer")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<LogLevel, E> {
        Ok(LogLevel::Numeric(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<LogLevel, E> {
        i64::try_from(value)
            .map(LogLevel::Numeric)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<LogLevel, E> {
        value.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LogLevelVisitor)
    }
}
