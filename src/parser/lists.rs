use crate::errors::ParseError;

/// Parse a comma-separated integer list, tolerating whitespace and blank
/// segments (`"1, 2,,3"` → `[1, 2, 3]`). Empty or all-whitespace input
/// yields an empty list.
///
/// # Errors
///
/// Returns `Box<ParseError>` if any non-blank segment is not an integer.
pub fn parse_int_list(text: &str) -> Result<Vec<i32>, Box<ParseError>> {
    text.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            segment
                .parse::<i32>()
                .map_err(|e| Box::new(ParseError::ParseIntError(e)))
        })
        .collect()
}
