use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Layout every deadline and build date is normalised to.
pub const DEADLINE_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S";

// older assignment files used these
const LEGACY_LAYOUTS: [&str; 7] = [
    DEADLINE_LAYOUT,
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%d-%m-%Y %H:%M",
    "%d.%m.%Y %H:%M",
    "%d/%m/%Y %H:%M",
];

const DATE_LAYOUTS: [&str; 2] = ["%Y-%m-%d", "%d-%m-%Y"];

#[derive(Debug, Error, PartialEq)]
pub enum DeadlineError {
    #[error("invalid date format: {0:?}")]
    InvalidFormat(String),
}

pub fn parse(s: &str) -> Result<NaiveDateTime, DeadlineError> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }
    if let Some(dt) = LEGACY_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(s, layout).ok())
    {
        return Ok(dt);
    }
    // a bare date is due at the end of that day
    DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(s, layout).ok())
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .ok_or_else(|| DeadlineError::InvalidFormat(s.to_string()))
}

/// Rewrites a deadline stored in any known layout into [`DEADLINE_LAYOUT`].
pub fn fix_deadline(s: &str) -> Result<String, DeadlineError> {
    Ok(parse(s)?.format(DEADLINE_LAYOUT).to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lateness {
    pub late_by: Duration,
    /// whole days started after the deadline
    pub slip_days: u32,
}

/// How late a delivery built at `build_date` was; `None` when on time.
pub fn lateness(build_date: &str, deadline: &str) -> Result<Option<Lateness>, DeadlineError> {
    let late_by = parse(build_date)? - parse(deadline)?;
    if late_by <= Duration::zero() {
        return Ok(None);
    }
    let day = Duration::days(1).num_seconds();
    let slip_days = (late_by.num_seconds() + day - 1) / day;
    Ok(Some(Lateness {
        late_by,
        slip_days: slip_days as u32,
    }))
}

pub fn format_exec_time(millis: i64) -> String {
    if millis < 1000 {
        format!("{} ms", millis)
    } else {
        format!("{:.2} s", millis as f64 / 1000.0)
    }
}
