use nom::{
    branch::alt,
    character::complete::{self, char, space1},
    combinator::{map, verify},
    sequence::terminated,
    IResult,
};

use crate::types::SchedulePart;
use minicron_schedule_types::{ScheduleExpression, ScheduleValue};

/// Attempts to parse a number within the field's boundaries
fn schedule_number<'a>(part: &SchedulePart) -> impl Fn(&'a str) -> IResult<&'a str, u8> {
    let (min, max) = part.boundaries();
    move |input| verify(complete::u8, |v| v >= &min && v <= &max)(input)
}

/// Attempts to parse a single field value: `*` or a fixed in-range number
fn schedule_value<'a, 'p>(
    part: &'p SchedulePart,
) -> impl Fn(&'a str) -> IResult<&'a str, ScheduleValue> + 'p {
    |input| {
        alt((
            map(char('*'), |_| ScheduleValue::Any),
            map(schedule_number(part), ScheduleValue::Number),
        ))(input)
    }
}

/// Parse all 5 schedule fields
pub(crate) fn nom_schedule(input: &str) -> IResult<&str, ScheduleExpression> {
    let (input, minute) = terminated(schedule_value(&SchedulePart::Minute), space1)(input)?;
    let (input, hour) = terminated(schedule_value(&SchedulePart::Hour), space1)(input)?;
    let (input, day) = terminated(schedule_value(&SchedulePart::DayOfMonth), space1)(input)?;
    let (input, month) = terminated(schedule_value(&SchedulePart::Month), space1)(input)?;
    let (input, dow) = schedule_value(&SchedulePart::DayOfWeek)(input)?;

    Ok((
        input,
        ScheduleExpression {
            minute,
            hour,
            day,
            month,
            dow,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_all_wildcards() {
        assert_eq!(
            Ok(("", ScheduleExpression::default())),
            nom_schedule("* * * * *"),
        );
    }

    #[test]
    fn schedule_fixed_values() {
        assert_eq!(
            Ok((
                "",
                ScheduleExpression {
                    minute: ScheduleValue::Number(0),
                    hour: ScheduleValue::Number(18),
                    day: ScheduleValue::Any,
                    month: ScheduleValue::Any,
                    dow: ScheduleValue::Number(2),
                }
            )),
            nom_schedule("0 18 * * 2"),
        );
    }

    #[test]
    fn schedule_multiple_spaces_between_fields() {
        assert_eq!(
            Ok(("", ScheduleExpression::default())),
            nom_schedule("*  *   * *  *"),
        );
    }

    #[test]
    fn schedule_out_of_range_values() {
        assert!(nom_schedule("60 * * * *").is_err());
        assert!(nom_schedule("* 24 * * *").is_err());
        assert!(nom_schedule("* * 0 * *").is_err());
        assert!(nom_schedule("* * 32 * *").is_err());
        assert!(nom_schedule("* * * 0 *").is_err());
        assert!(nom_schedule("* * * 13 *").is_err());
        assert!(nom_schedule("* * * * 7").is_err());
    }

    #[test]
    fn schedule_too_few_fields() {
        assert!(nom_schedule("0 18 * *").is_err());
    }
}
