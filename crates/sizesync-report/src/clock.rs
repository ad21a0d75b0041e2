//! Date source for report names and headers

use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;
use sizesync_types::{Error, Result};
use tracing::{debug, warn};

/// One way of computing "today"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStrategy {
    /// Current date in a fixed IANA timezone
    Reference(Tz),
    /// Current date on the host clock
    Local,
}

impl DateStrategy {
    /// Current date according to this strategy
    pub fn today(self) -> NaiveDate {
        match self {
            Self::Reference(tz) => Utc::now().with_timezone(&tz).date_naive(),
            Self::Local => Local::now().date_naive(),
        }
    }
}

/// Clock that labels reports with the date in a reference timezone
///
/// Strategies are resolved each time [`ReportClock::today`] is called: the
/// reference zone first, then the local clock when fallback is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportClock {
    timezone: String,
    fallback_to_local: bool,
    pinned: Option<NaiveDate>,
}

impl ReportClock {
    /// Create a clock for the given IANA timezone name, falling back to local time
    pub fn new<S: Into<String>>(timezone: S) -> Self {
        Self {
            timezone: timezone.into(),
            fallback_to_local: true,
            pinned: None,
        }
    }

    /// Enable or disable the local clock fallback
    pub fn with_fallback(mut self, fallback_to_local: bool) -> Self {
        self.fallback_to_local = fallback_to_local;
        self
    }

    /// Always report the given date instead of reading a clock
    pub fn pinned_to(mut self, date: NaiveDate) -> Self {
        self.pinned = Some(date);
        self
    }

    /// Name of the configured reference timezone, used in report headers
    pub fn label(&self) -> &str {
        &self.timezone
    }

    /// Strategies in resolution order
    pub fn strategies(&self) -> Vec<DateStrategy> {
        let mut strategies = Vec::with_capacity(2);
        match self.timezone.parse::<Tz>() {
            Ok(tz) => strategies.push(DateStrategy::Reference(tz)),
            Err(e) => warn!("Cannot resolve timezone '{}': {}", self.timezone, e),
        }
        if self.fallback_to_local {
            strategies.push(DateStrategy::Local);
        }
        strategies
    }

    /// Today's date according to the first strategy that resolves
    pub fn today(&self) -> Result<NaiveDate> {
        if let Some(date) = self.pinned {
            return Ok(date);
        }

        let strategy = self.strategies().into_iter().next().ok_or_else(|| {
            Error::config(format!(
                "Unknown timezone '{}' and local fallback is disabled",
                self.timezone
            ))
        })?;
        debug!("Report date strategy: {:?}", strategy);
        Ok(strategy.today())
    }
}

impl Default for ReportClock {
    fn default() -> Self {
        Self::new(crate::REFERENCE_TIMEZONE)
    }
}
