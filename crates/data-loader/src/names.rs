//! Splitting of raw studio/producer credit strings.
//!
//! Credits arrive as one string per record, e.g.
//! `"Columbia Pictures, Paramount Pictures and Orion"`. A name list is derived
//! on every read and never stored.

use regex::Regex;
use std::sync::LazyLock;

/// Separator between two names: a comma, or the word `and` surrounded by whitespace.
static NAME_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",|\s+and\s+").expect("name separator regex is valid"));

/// Split a raw credit string into trimmed names.
///
/// Empty tokens are kept, so `""` yields `[""]` and `"A,,B"` yields
/// `["A", "", "B"]`. Matching of `and` is case-sensitive.
pub fn parse_names(raw: &str) -> Vec<String> {
    NAME_SEPARATOR
        .split(raw)
        .map(|name| name.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_comma_and_word_and() {
        assert_eq!(
            parse_names("Allan Carr, Jerry Weintraub and Bo Derek"),
            vec!["Allan Carr", "Jerry Weintraub", "Bo Derek"]
        );
    }

    #[test]
    fn test_single_name_is_trimmed() {
        assert_eq!(parse_names("  Matthew Vaughn "), vec!["Matthew Vaughn"]);
    }

    #[test]
    fn test_empty_string_yields_one_empty_name() {
        assert_eq!(parse_names(""), vec![""]);
    }

    #[test]
    fn test_and_inside_a_word_is_not_a_separator() {
        assert_eq!(parse_names("Sandy Howard"), vec!["Sandy Howard"]);
        assert_eq!(parse_names("Brandon and"), vec!["Brandon and"]);
    }

    #[test]
    fn test_and_is_case_sensitive() {
        assert_eq!(parse_names("Simon AND Garfunkel"), vec!["Simon AND Garfunkel"]);
    }

    #[test]
    fn test_resplitting_is_a_no_op() {
        let names = parse_names("Associated Film Distribution, EMI and Lorimar");
        for name in &names {
            assert_eq!(parse_names(name), vec![name.clone()]);
        }
    }
}
