use crate::constraints::OccurrenceRange;
use crate::errors::ParseError;
use nom::{
    bytes::complete::tag,
    character::complete::{digit1, space0},
    combinator::{all_consuming, map_res, opt},
    multi::separated_list1,
    sequence::{delimited, preceded, separated_pair},
    IResult,
};
use std::collections::HashMap;

/// Parser result type: input, output, with our custom `ParseError`
type PResult<'a, O> = IResult<&'a str, O, Box<ParseError>>;

/// An unsigned decimal integer.
fn integer(input: &str) -> PResult<'_, i32> {
    map_res(digit1, str::parse::<i32>)(input)
}

/// `count` or `min-max`. A bare count is an exact requirement.
fn occurrence(input: &str) -> PResult<'_, OccurrenceRange> {
    let (rest, min) = integer(input)?;
    let (rest, max_opt) = opt(preceded(tag("-"), integer))(rest)?;
    Ok((rest, OccurrenceRange { min, max: max_opt.unwrap_or(min) }))
}

/// `digit:occurrence`.
fn entry(input: &str) -> PResult<'_, (i32, OccurrenceRange)> {
    separated_pair(integer, tag(":"), occurrence)(input)
}

/// Parse the digit-counts mapping syntax: comma-separated `digit:count` or
/// `digit:min-max` entries (`"1:3,2:2"`, `"1:2-5,2:3"`), whitespace-tolerant.
/// Empty input yields an empty map; a duplicated digit keeps its last entry.
///
/// Semantic checks match the web form: the digit must be 1-9 and every
/// occurrence count at least 1. An inverted `min-max` range is left for the
/// engine's constraint validation to report.
///
/// # Errors
///
/// Returns `Box<ParseError>` for malformed entries (E004), out-of-range
/// digits (E002), or sub-unit occurrence counts (E003).
pub fn parse_digit_counts(text: &str) -> Result<HashMap<i32, OccurrenceRange>, Box<ParseError>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(HashMap::new());
    }

    let entries = all_consuming(separated_list1(tag(","), delimited(space0, entry, space0)))(trimmed)
        .map(|(_, entries)| entries)
        .map_err(|e| match e {
            nom::Err::Error(inner) | nom::Err::Failure(inner) => match *inner {
                // A raw nom error means the overall shape was wrong: report the field text.
                ParseError::NomError(_) => Box::new(ParseError::InvalidDigitCountsEntry {
                    entry: trimmed.to_string(),
                }),
                other => Box::new(other),
            },
            nom::Err::Incomplete(_) => Box::new(ParseError::InvalidDigitCountsEntry {
                entry: trimmed.to_string(),
            }),
        })?;

    let mut counts = HashMap::with_capacity(entries.len());
    for (digit, occ) in entries {
        if !(1..=9).contains(&digit) {
            return Err(Box::new(ParseError::DigitOutOfRange { digit }));
        }
        if occ.min < 1 {
            return Err(Box::new(ParseError::SubUnitOccurrence { digit, count: occ.min }));
        }
        counts.insert(digit, occ);
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_counts() {
        let counts = parse_digit_counts("1:3,2:2").unwrap();
        assert_eq!(2, counts.len());
        assert_eq!(Some(&OccurrenceRange::exactly(3)), counts.get(&1));
        assert_eq!(Some(&OccurrenceRange::exactly(2)), counts.get(&2));
    }

    #[test]
    fn mixed_exact_and_range() {
        let counts = parse_digit_counts("1:2-5,2:3").unwrap();
        assert_eq!(Some(&OccurrenceRange::between(2, 5)), counts.get(&1));
        assert_eq!(Some(&OccurrenceRange::exactly(3)), counts.get(&2));
    }

    #[test]
    fn whitespace_is_tolerated() {
        let counts = parse_digit_counts(" 1:3 , 2:2 ").unwrap();
        assert_eq!(2, counts.len());
    }

    #[test]
    fn empty_input_is_empty_map() {
        assert!(parse_digit_counts("").unwrap().is_empty());
        assert!(parse_digit_counts("   ").unwrap().is_empty());
    }

    #[test]
    fn last_duplicate_entry_wins() {
        let counts = parse_digit_counts("1:2,1:4").unwrap();
        assert_eq!(Some(&OccurrenceRange::exactly(4)), counts.get(&1));
    }

    #[test]
    fn digit_zero_is_out_of_range() {
        let err = parse_digit_counts("0:2").unwrap_err();
        assert_eq!("E002", err.code());
    }

    #[test]
    fn two_digit_key_is_out_of_range() {
        let err = parse_digit_counts("12:2").unwrap_err();
        assert_eq!("E002", err.code());
    }

    #[test]
    fn zero_occurrence_is_rejected() {
        let err = parse_digit_counts("1:0").unwrap_err();
        assert_eq!("E003", err.code());
    }

    #[test]
    fn malformed_entries_are_rejected() {
        for bad in ["1", "1:", ":3", "1;3", "1:3,", "1:3 2:2", "a:2"] {
            let err = parse_digit_counts(bad).unwrap_err();
            assert_eq!("E004", err.code(), "input {bad:?} should be malformed");
        }
    }

    #[test]
    fn inverted_range_passes_through_to_constraint_validation() {
        let counts = parse_digit_counts("1:5-2").unwrap();
        assert_eq!(Some(&OccurrenceRange::between(5, 2)), counts.get(&1));
    }
}
