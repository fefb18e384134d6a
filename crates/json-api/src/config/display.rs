//! Display Config

use clap::Args;
use cuantovale::chart::{DateFormat, DateLocale};
use jiff::tz::TimeZone;

/// How dates are labelled in charts.
#[derive(Debug, Args)]
pub struct DisplayConfig {
    /// Date label locale (es, en)
    #[arg(long, env = "CUANTOVALE_LOCALE", default_value = "es")]
    pub locale: DateLocale,

    /// IANA time zone dates are taken in
    #[arg(long, env = "CUANTOVALE_TIME_ZONE", default_value = "UTC")]
    pub time_zone: String,
}

impl DisplayConfig {
    /// Resolve the configured date format.
    ///
    /// # Errors
    ///
    /// Returns an error if the time zone is unknown.
    pub fn date_format(&self) -> Result<DateFormat, jiff::Error> {
        Ok(DateFormat::new(self.locale, TimeZone::get(&self.time_zone)?))
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        display: DisplayConfig,
    }

    #[test]
    fn resolves_locale_and_zone() -> TestResult {
        let harness =
            Harness::try_parse_from(["test", "--locale", "en", "--time-zone", "America/Lima"])?;

        let format = harness.display.date_format()?;

        assert_eq!(format.locale, DateLocale::En);

        Ok(())
    }

    #[test]
    fn unknown_zone_is_rejected() -> TestResult {
        let harness = Harness::try_parse_from(["test", "--time-zone", "Mars/Olympus"])?;

        assert!(
            harness.display.date_format().is_err(),
            "unknown zones must not resolve"
        );

        Ok(())
    }
}
