//! Clock - Timestamp provider for provenance stamping.

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Produces the current moment as a fixed-width ISO-8601 string with
/// UTC offset.
pub trait Clock: Send + Sync {
    fn now(&self) -> String;
}

/// System clock formatting the current UTC moment as RFC 3339.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .expect("failed to format current time")
    }
}

/// Clock that always returns the same timestamp. For deterministic tests.
#[derive(Clone, Debug)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_produces_rfc3339() {
        let stamp = SystemClock.now();
        assert!(OffsetDateTime::parse(&stamp, &Rfc3339).is_ok());
    }

    #[test]
    fn fixed_clock_repeats_its_timestamp() {
        let clock = FixedClock("2026-08-24T12:00:00Z".to_string());
        assert_eq!(clock.now(), "2026-08-24T12:00:00Z");
        assert_eq!(clock.now(), "2026-08-24T12:00:00Z");
    }
}
