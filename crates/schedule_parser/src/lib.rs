use minicron_schedule_types::ScheduleExpression;
pub use nom::error::ErrorKind;
use nom::{character::complete::multispace0, combinator::all_consuming, sequence::delimited};
use nom_schedule::nom_schedule;
use thiserror::Error;

mod nom_schedule;
mod types;

pub use types::SchedulePart;

#[derive(Error, Debug)]
#[error("An error occured while parsing schedule pattern : \n{msg}")]
pub struct ScheduleParseError {
    pub msg: String,
    pub input: String,
    pub error_kind: ErrorKind,
}

impl<'a> From<nom::Err<nom::error::Error<&'a str>>> for ScheduleParseError {
    fn from(e: nom::Err<nom::error::Error<&'a str>>) -> Self {
        let msg = format!("{e:?}");
        let (input, error_kind) = match e {
            // Should not happen (only for streams)
            nom::Err::Incomplete(_) => (String::from(""), ErrorKind::Fail),
            nom::Err::Error(e) | nom::Err::Failure(e) => (e.to_string(), e.code),
        };

        ScheduleParseError {
            msg,
            input,
            error_kind,
        }
    }
}

/// Parse a five-field schedule pattern into a [`ScheduleExpression`].
///
/// The pattern is a reduced cron syntax restricted to fixed values and
/// wildcards. All fields are required:
///
/// ```pattern
/// ┌───────────── minute (0 - 59)
/// │ ┌───────────── hour (0 - 23)
/// │ │ ┌───────────── day of the month (1 - 31)
/// │ │ │ ┌───────────── month (1 - 12)
/// │ │ │ │ ┌───────────── day of the week (0 - 6) (Sunday to Saturday)
/// │ │ │ │ │
/// * * * * *
/// ```
///
/// Each field is either `*` or a single number within the field's range.
/// Ranges (`1-5`), steps (`*/n`), lists (`1,2`) and day-name aliases are not
/// supported and are rejected. Parsing fails if the pattern does not have
/// exactly five whitespace-separated fields or a value is out of range.
///
/// ```rust
/// use minicron_schedule_parser::parse_schedule;
/// use minicron_schedule_types::ScheduleValue;
///
/// let expr = parse_schedule("0 18 * * 2").unwrap();
/// assert_eq!(expr.minute, ScheduleValue::Number(0));
/// assert_eq!(expr.hour, ScheduleValue::Number(18));
/// assert_eq!(expr.dow, ScheduleValue::Number(2));
///
/// assert!(parse_schedule("60 18 * * 2").is_err());
/// assert!(parse_schedule("*/5 * * * *").is_err());
/// ```
pub fn parse_schedule(pattern: &str) -> Result<ScheduleExpression, ScheduleParseError> {
    let (_, expression) = all_consuming(delimited(multispace0, nom_schedule, multispace0))(pattern)?;
    Ok(expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minicron_schedule_types::ScheduleValue;

    #[test]
    fn parses_weekly_pattern() {
        let expression = parse_schedule("0 18 * * 2").expect("pattern should parse");
        assert_eq!(
            ScheduleExpression {
                minute: ScheduleValue::Number(0),
                hour: ScheduleValue::Number(18),
                day: ScheduleValue::Any,
                month: ScheduleValue::Any,
                dow: ScheduleValue::Number(2),
            },
            expression,
        );
    }

    #[test]
    fn parses_surrounding_whitespace() {
        assert!(parse_schedule("  0 18 * * 2\n").is_ok());
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!(parse_schedule("").is_err());
        assert!(parse_schedule("0 18 * *").is_err());
        assert!(parse_schedule("0 18 * * 2 extra").is_err());
        assert!(parse_schedule("0 18 * * 2 3").is_err());
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert!(parse_schedule("60 0 * * *").is_err());
        assert!(parse_schedule("0 24 * * *").is_err());
        assert!(parse_schedule("0 0 0 * *").is_err());
        assert!(parse_schedule("0 0 * 13 *").is_err());
        assert!(parse_schedule("0 0 * * 7").is_err());
    }

    #[test]
    fn rejects_extended_cron_grammar() {
        assert!(parse_schedule("*/5 * * * *").is_err());
        assert!(parse_schedule("0 9-17 * * *").is_err());
        assert!(parse_schedule("0,30 * * * *").is_err());
        assert!(parse_schedule("0 18 * * TUE").is_err());
    }

    #[test]
    fn rejects_negative_and_garbage_values() {
        assert!(parse_schedule("-1 18 * * 2").is_err());
        assert!(parse_schedule("0 18 * * x").is_err());
    }
}
