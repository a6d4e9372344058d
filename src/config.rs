use crate::mock::CANNED_REPLY;
use leptos::logging::log;
use std::num::ParseIntError;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error("invalid reply delay: {0}")]
    Delay(#[from] ParseIntError),

    #[error("unknown clock format {0:?}, expected 12h or 24h")]
    Clock(String),

    #[error("reply text cannot be empty")]
    EmptyReply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockFormat {
    TwelveHour,
    TwentyFourHour,
}

impl ClockFormat {
    pub fn pattern(&self) -> &'static str {
        match self {
            ClockFormat::TwelveHour => "%-I:%M %p",
            ClockFormat::TwentyFourHour => "%H:%M",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub reply_delay: Duration,
    pub reply_text: String,
    pub clock: ClockFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reply_delay: Duration::from_millis(1000),
            reply_text: CANNED_REPLY.to_owned(),
            clock: ClockFormat::TwelveHour,
        }
    }
}

impl Config {
    /// Reads overrides from a page query string such as `?delay=250&clock=24h`.
    pub fn from_query(search: &str) -> Result<Self, ConfigError> {
        let url = url::Url::parse(&format!("http://localhost/{search}"))?;
        let mut config = Self::default();
        for (key, value) in url.query_pairs() {
            match &key[..] {
                "delay" => config.reply_delay = Duration::from_millis(value.parse()?),
                "reply" => {
                    if value.trim().is_empty() {
                        return Err(ConfigError::EmptyReply);
                    }
                    config.reply_text = value.into_owned();
                }
                "clock" => {
                    config.clock = match &value[..] {
                        "12h" => ClockFormat::TwelveHour,
                        "24h" => ClockFormat::TwentyFourHour,
                        other => return Err(ConfigError::Clock(other.to_owned())),
                    }
                }
                string => log!("Unexpected param {string}: {value}"),
            }
        }
        Ok(config)
    }
}
