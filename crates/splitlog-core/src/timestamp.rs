//! Line timestamps and rotation date buckets
//!
//! Each logging call samples the local wall clock once. The same sample gives
//! the human-readable header (`MM-DD HH:MM:SS.micros|steady`) and the
//! `yyyymmdd` bucket that decides date rollover on the flush thread.

use std::time::Instant;

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use once_cell::sync::Lazy;

/// Anchor for the monotonic part of the header
static STEADY_ANCHOR: Lazy<Instant> = Lazy::new(Instant::now);

/// Microseconds elapsed on the monotonic clock since first use in this process
pub fn steady_micros() -> u128 {
    STEADY_ANCHOR.elapsed().as_micros()
}

/// A formatted wall-clock sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    header: String,
    date_bucket: String,
}

impl Timestamp {
    /// Sample the local clock
    pub fn now() -> Self {
        let steady = steady_micros();
        Self::from_parts(Local::now(), steady)
    }

    /// Build a timestamp from an explicit date-time and monotonic sample
    pub fn from_parts<Tz: TimeZone>(dt: DateTime<Tz>, steady_micros: u128) -> Self {
        let header = format!(
            "{:02}-{:02} {:02}:{:02}:{:02}.{}|{}",
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second(),
            dt.timestamp_subsec_micros(),
            steady_micros,
        );

        Self {
            header,
            date_bucket: date_bucket_of(&dt),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// `yyyymmdd`
    pub fn date_bucket(&self) -> &str {
        &self.date_bucket
    }
}

/// `yyyymmdd` for a date-time
pub fn date_bucket_of<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    format!("{:04}{:02}{:02}", dt.year(), dt.month(), dt.day())
}

/// Today's bucket in local time
pub fn today_bucket() -> String {
    date_bucket_of(&Local::now())
}

/// Seconds since the Unix epoch, used to disambiguate archive names
pub fn epoch_seconds() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_header_padding() {
        let dt = NaiveDate::from_ymd_opt(2023, 1, 2)
            .unwrap()
            .and_hms_micro_opt(3, 4, 5, 678)
            .unwrap()
            .and_utc();
        let ts = Timestamp::from_parts(dt, 1234);

        assert_eq!(ts.header(), "01-02 03:04:05.678|1234");
        assert_eq!(ts.date_bucket(), "20230102");
    }

    #[test]
    fn test_microseconds_unpadded() {
        let dt = NaiveDate::from_ymd_opt(2023, 12, 31)
            .unwrap()
            .and_hms_micro_opt(23, 59, 59, 999_999)
            .unwrap()
            .and_utc();
        let ts = Timestamp::from_parts(dt, 0);

        assert_eq!(ts.header(), "12-31 23:59:59.999999|0");
        assert_eq!(ts.date_bucket(), "20231231");
    }

    #[test]
    fn test_date_bucket_is_fixed_width() {
        let ts = Timestamp::now();
        assert_eq!(ts.date_bucket().len(), 8);
        assert!(ts.date_bucket().chars().all(|c| c.is_ascii_digit()));
        assert_eq!(today_bucket().len(), 8);
    }

    #[test]
    fn test_steady_clock_monotonic() {
        let a = steady_micros();
        let b = steady_micros();
        assert!(b >= a);
    }

    #[test]
    fn test_epoch_seconds() {
        let before = Utc::now().timestamp();
        let secs = epoch_seconds();
        assert!(secs >= before);
    }

    #[test]
    fn test_concurrent_formatting() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| (0..100).map(|_| Timestamp::now()).count()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 100);
        }
    }
}
