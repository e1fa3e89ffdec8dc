//! Pipe-delimited line codec shared by every record kind.

/// Separator between fields of one record.
pub const FIELD_DELIMITER: char = '|';

/// Timestamp layout used in every persisted record.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date layout used for user registration dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Make free text safe to store in a field.
///
/// Removes the delimiter, folds newlines into spaces, drops every other
/// control character, and trims surrounding whitespace.
pub fn sanitize(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|&c| c != FIELD_DELIMITER && c != '\r')
        .map(|c| if c == '\n' { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect();
    cleaned.trim().to_string()
}

/// Split a raw line into its fields (trailing newline ignored).
pub fn split_fields(line: &str) -> Vec<&str> {
    line.trim_end_matches(['\n', '\r'])
        .split(FIELD_DELIMITER)
        .collect()
}

/// Join already-sanitized fields into one line.
pub fn join_fields(fields: &[&str]) -> String {
    fields.join(&FIELD_DELIMITER.to_string())
}
