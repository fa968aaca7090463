//! Positional argument validation
//!
//! Every worker validates the same argument vector on its own. The checks are
//! pure and run in a fixed order (count, target, interval count), so all
//! workers reach the same verdict without talking to each other and an
//! invalid run exits before any collective is entered.

use thiserror::Error;

/// Rejected command line
///
/// `Display` renders the exact line the root worker prints to stdout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// Anything other than exactly two positional arguments
    #[error("usage: {program} <logarithm number> <number of intervals>")]
    Usage { program: String },

    /// Target not a finite real number, or below 1
    #[error("Found invalid argument {raw}")]
    InvalidTarget { raw: String },

    /// Interval count not an integer in range, or below 1
    #[error("Found invalid argument {raw}")]
    InvalidIntervalCount { raw: String },
}

/// Validated inputs of one estimate run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inputs {
    /// Number whose natural logarithm is estimated (finite, >= 1)
    pub log_number: f64,
    /// Total rectangle count (>= 1)
    pub num_intervals: u64,
}

/// Validate `<logarithm-target> <num-intervals>`
///
/// # Examples
///
/// ```
/// use lnpulse::config::validator::{parse_arguments, ArgumentError};
///
/// let inputs = parse_arguments("lnpulse", &["10", "1000"]).unwrap();
/// assert_eq!(inputs.log_number, 10.0);
/// assert_eq!(inputs.num_intervals, 1000);
///
/// let err = parse_arguments("lnpulse", &["0.5", "1000"]).unwrap_err();
/// assert_eq!(err.to_string(), "Found invalid argument 0.5");
/// ```
pub fn parse_arguments<S: AsRef<str>>(program: &str, args: &[S]) -> Result<Inputs, ArgumentError> {
    let [target, intervals] = args else {
        return Err(ArgumentError::Usage {
            program: program.to_string(),
        });
    };

    let log_number = parse_target(target.as_ref())?;
    let num_intervals = parse_intervals(intervals.as_ref())?;

    Ok(Inputs {
        log_number,
        num_intervals,
    })
}

/// Parse the logarithm target
///
/// Decimal and scientific notation are accepted. Values that overflow to
/// infinity, NaN, and anything below 1 are rejected.
pub fn parse_target(raw: &str) -> Result<f64, ArgumentError> {
    let invalid = || ArgumentError::InvalidTarget {
        raw: raw.to_string(),
    };

    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 1.0 {
        return Err(invalid());
    }

    Ok(value)
}

/// Parse the interval count
///
/// Parsed as a signed 64-bit integer so that negative input is reported as an
/// invalid value rather than a syntax error; anything below 1 is rejected.
pub fn parse_intervals(raw: &str) -> Result<u64, ArgumentError> {
    let invalid = || ArgumentError::InvalidIntervalCount {
        raw: raw.to_string(),
    };

    let value: i64 = raw.trim().parse().map_err(|_| invalid())?;
    if value < 1 {
        return Err(invalid());
    }

    u64::try_from(value).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_arguments() {
        let inputs = parse_arguments("lnpulse", &["2.718281828", "100000"]).unwrap();
        assert_eq!(inputs.log_number, 2.718281828);
        assert_eq!(inputs.num_intervals, 100_000);
    }

    #[test]
    fn test_wrong_argument_count() {
        let none: [&str; 0] = [];
        for args in [&none[..], &["10"][..], &["10", "100", "extra"][..]] {
            let err = parse_arguments("./lnpulse", args).unwrap_err();
            assert_eq!(
                err,
                ArgumentError::Usage {
                    program: "./lnpulse".to_string()
                }
            );
            assert_eq!(
                err.to_string(),
                "usage: ./lnpulse <logarithm number> <number of intervals>"
            );
        }
    }

    #[test]
    fn test_target_forms() {
        assert_eq!(parse_target("1"), Ok(1.0));
        assert_eq!(parse_target("1e3"), Ok(1000.0));
        assert_eq!(parse_target("2.5E-0"), Ok(2.5));
        assert_eq!(parse_target(" 7.25 "), Ok(7.25));
        assert_eq!(parse_target("+3"), Ok(3.0));
    }

    #[test]
    fn test_invalid_targets() {
        for raw in ["0.5", "0", "-3", "abc", "", "2x", "1e400", "1e-400", "inf", "NaN"] {
            assert_eq!(
                parse_target(raw),
                Err(ArgumentError::InvalidTarget { raw: raw.to_string() }),
                "{:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_interval_forms() {
        assert_eq!(parse_intervals("1"), Ok(1));
        assert_eq!(parse_intervals("+42"), Ok(42));
        assert_eq!(parse_intervals(" 1000 "), Ok(1000));
        assert_eq!(parse_intervals("9223372036854775807"), Ok(i64::MAX as u64));
    }

    #[test]
    fn test_invalid_intervals() {
        for raw in ["0", "-5", "1.5", "ten", "", "9223372036854775808", "1e3"] {
            assert_eq!(
                parse_intervals(raw),
                Err(ArgumentError::InvalidIntervalCount { raw: raw.to_string() }),
                "{:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_target_checked_before_intervals() {
        let err = parse_arguments("lnpulse", &["0.5", "-5"]).unwrap_err();
        assert!(matches!(err, ArgumentError::InvalidTarget { .. }));

        let err = parse_arguments("lnpulse", &["10", "-5"]).unwrap_err();
        assert_eq!(err.to_string(), "Found invalid argument -5");
    }

    #[test]
    fn test_error_message_keeps_raw_text() {
        let err = parse_target(" 0.25").unwrap_err();
        assert_eq!(err.to_string(), "Found invalid argument  0.25");
    }
}
