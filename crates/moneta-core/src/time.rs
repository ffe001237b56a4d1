use chrono::{DateTime, NaiveDate, Utc};

/// Clock abstracts access to the current date so services remain
/// deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current UTC date. Defaults to `now().date_naive()`.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed date, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(
            self.0.and_hms_opt(12, 0, 0).expect("noon is valid"),
            Utc,
        )
    }

    fn today(&self) -> NaiveDate {
        self.0
    }
}
