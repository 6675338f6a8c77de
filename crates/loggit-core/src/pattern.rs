//! Regex compilation with XPath-style flag characters

use regex::{Regex, RegexBuilder};

use crate::error::FilterError;

/// Pattern that matches every message
pub const MATCH_ALL: &str = ".*";

/// Compile `pattern` honouring `flags`.
///
/// Supported flags: `i` case-insensitive, `m` multi-line, `s` dot matches
/// newline, `x` ignore whitespace. `stage` names the filter in errors.
pub fn compile(stage: &'static str, pattern: &str, flags: &str) -> Result<Regex, FilterError> {
    let mut builder = RegexBuilder::new(pattern);

    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            other => return Err(FilterError::InvalidFlag { stage, flag: other }),
        };
    }

    builder.build().map_err(|source| FilterError::InvalidPattern {
        stage,
        pattern: pattern.to_string(),
        source,
    })
}
