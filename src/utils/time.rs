use crate::error::{GeomagError, Result};
use crate::utils::constants::SECONDS_PER_DAY;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike};

/// Anything that can be expressed as a fractional year, e.g. 2020.5 for mid-2020.
pub trait FractionalYear {
    fn fractional_year(&self) -> f64;
}

impl FractionalYear for f64 {
    fn fractional_year(&self) -> f64 {
        *self
    }
}

impl FractionalYear for NaiveDate {
    fn fractional_year(&self) -> f64 {
        self.year() as f64 + self.ordinal0() as f64 / days_in_year(self.year())
    }
}

impl FractionalYear for NaiveDateTime {
    fn fractional_year(&self) -> f64 {
        let seconds = self.num_seconds_from_midnight() as f64 + self.nanosecond() as f64 * 1e-9;
        let day = self.ordinal0() as f64 + seconds / SECONDS_PER_DAY;
        self.year() as f64 + day / days_in_year(self.year())
    }
}

impl<Tz: TimeZone> FractionalYear for DateTime<Tz> {
    fn fractional_year(&self) -> f64 {
        self.naive_utc().fractional_year()
    }
}

fn days_in_year(year: i32) -> f64 {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366.0
    } else {
        365.0
    }
}

/// Parses an epoch given as RFC 3339, `YYYY-MM-DDTHH:MM:SS[.f]`, `YYYY-MM-DD`,
/// or a bare decimal year, returning the fractional year.
pub fn parse_epoch(s: &str) -> Result<f64> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.fractional_year());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.fractional_year());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.fractional_year());
    }
    match s.parse::<f64>() {
        Ok(year) if year.is_finite() => Ok(year),
        _ => Err(GeomagError::InvalidEpoch(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_of_year() {
        let dt = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(dt.fractional_year(), 2020.0);
    }

    #[test]
    fn mid_leap_year() {
        // 2020 is a leap year, so midnight starting July 2nd is exactly half way through
        let dt = NaiveDate::from_ymd_opt(2020, 7, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(dt.fractional_year(), 2020.0 + 183.0 / 366.0);
        let date = NaiveDate::from_ymd_opt(2021, 7, 2).unwrap();
        assert_eq!(date.fractional_year(), 2021.0 + 182.0 / 365.0);
    }

    #[test]
    fn parse_formats() {
        assert_eq!(parse_epoch("2020-01-01T00:00:00Z").unwrap(), 2020.0);
        assert_eq!(parse_epoch("2020-01-01T00:00:00+00:00").unwrap(), 2020.0);
        assert_eq!(parse_epoch("2020-01-01T00:00:00").unwrap(), 2020.0);
        assert_eq!(parse_epoch("2020-01-01").unwrap(), 2020.0);
        assert_eq!(parse_epoch("2017.25").unwrap(), 2017.25);
        assert_eq!(
            parse_epoch("2020-01-01T12:00:00").unwrap(),
            2020.0 + 0.5 / 366.0
        );
    }

    #[test]
    fn parse_garbage() {
        assert!(matches!(
            parse_epoch("last tuesday"),
            Err(GeomagError::InvalidEpoch(_))
        ));
        assert!(matches!(parse_epoch("NaN"), Err(GeomagError::InvalidEpoch(_))));
    }
}
