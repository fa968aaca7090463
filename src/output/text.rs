//! Human-readable text output
//!
//! The result line is
//!
//! ```text
//! <target>   <estimate>   <abs error>   <elapsed> seconds
//! ```
//!
//! with the target in shortest general notation at 16 significant digits,
//! estimate and error with 16 decimals and the elapsed time with 6.

use super::EstimateReport;

/// Significant digits used for the target value
pub const TARGET_PRECISION: usize = 16;

/// Format the single result line (no trailing newline)
pub fn format_report(report: &EstimateReport) -> String {
    format!(
        "{}   {:.16}   {:.16}   {:.6} seconds",
        format_general(report.log_number, TARGET_PRECISION),
        report.estimate,
        report.abs_error,
        report.elapsed_secs
    )
}

/// Format `value` with `precision` significant digits in general notation
///
/// Same rules as C's `%.<precision>g`: scientific notation when the decimal
/// exponent is below -4 or at least `precision`, fixed notation otherwise,
/// and trailing zeros are dropped in both.
///
/// # Examples
///
/// ```
/// use lnpulse::output::text::format_general;
///
/// assert_eq!(format_general(10.0, 16), "10");
/// assert_eq!(format_general(2.5e-5, 16), "2.5e-05");
/// assert_eq!(format_general(1e20, 16), "1e+20");
/// ```
pub fn format_general(value: f64, precision: usize) -> String {
    let precision = precision.max(1);

    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Rounding to `precision` digits first can carry into the exponent
    // (9.99.. -> 1.0e1), so the exponent is read off the rounded form.
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => match e.parse::<i32>() {
            Ok(exp) => (m, exp),
            Err(_) => return scientific,
        },
        None => return scientific,
    };

    if exponent < -4 || exponent >= precision as i32 {
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            if exponent < 0 { '-' } else { '+' },
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_trailing_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
