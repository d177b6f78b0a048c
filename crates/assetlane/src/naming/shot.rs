//! Conversion between raw shot tokens, shot numbers and formatted shot strings.

use super::grammar::NamingGrammar;
use super::range::expand_range;
use crate::error::Result;
use regex::Regex;
use std::sync::OnceLock;

/// Non-digit prefix, first digit run, then the alphabetic run right after it.
fn shot_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^0-9]*([0-9]+)([A-Za-z]*)").unwrap())
}

/// Normalizes a loosely typed shot token into the grammar's shot string.
///
/// `"abc092a"` becomes `SH092a` and `"10S"` becomes `SH010s` with a
/// `SH`/3 shot field. Digit runs of any length are kept. Returns `None`
/// when the token has no digits.
pub fn shot_string_for(grammar: &NamingGrammar, token: &str) -> Option<String> {
    let caps = shot_token_re().captures(token)?;
    let digits = without_leading_zeros(caps.get(1)?.as_str());
    let suffix = caps.get(2).map_or("", |m| m.as_str()).to_lowercase();
    let field = grammar.shot();
    Some(format!(
        "{}{:0>width$}{}",
        field.prefix(),
        digits,
        suffix,
        width = field.padding()
    ))
}

pub fn shot_string_from_number(grammar: &NamingGrammar, number: u32) -> String {
    grammar.format_shot(number, "")
}

/// Strips the shot prefix and padding: `SH010s` becomes `10s`.
///
/// The result compares numerically on the number and lexically on the
/// suffix once split again by callers. `None` when no leading digits follow
/// the prefix.
pub fn shot_number_for(grammar: &NamingGrammar, shot: &str) -> Option<String> {
    let rest = shot.strip_prefix(grammar.shot().prefix()).unwrap_or(shot);
    let digit_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digit_len == 0 {
        return None;
    }
    let (digits, suffix) = rest.split_at(digit_len);
    Some(format!("{}{}", without_leading_zeros(digits), suffix))
}

fn without_leading_zeros(digits: &str) -> &str {
    match digits.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    }
}

/// Expands a range expression into formatted shot strings.
pub fn shot_list(grammar: &NamingGrammar, expression: &str) -> Result<Vec<String>> {
    Ok(expand_range(expression)?
        .into_iter()
        .map(|n| shot_string_from_number(grammar, n))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::grammar::{NumberedField, SubNameMode};

    fn grammar() -> NamingGrammar {
        NamingGrammar::new(
            '_',
            NumberedField::new("r", 2).unwrap(),
            NumberedField::new("v", 3).unwrap(),
            NumberedField::new("SH", 3).unwrap(),
            SubNameMode::WithSubName,
        )
    }

    #[test]
    fn shot_string_lowercases_suffix_and_pads() {
        let g = grammar();
        assert_eq!(shot_string_for(&g, "10S").as_deref(), Some("SH010s"));
        assert_eq!(shot_string_for(&g, "SH010S").as_deref(), Some("SH010s"));
        assert_eq!(shot_string_for(&g, "abc092a").as_deref(), Some("SH092a"));
        assert_eq!(shot_string_for(&g, "1").as_deref(), Some("SH001"));
        assert_eq!(shot_string_from_number(&g, 1), "SH001");
    }

    #[test]
    fn shot_string_ignores_text_after_suffix() {
        let g = grammar();
        assert_eq!(shot_string_for(&g, "sq01_sh020").as_deref(), Some("SH001"));
        assert_eq!(shot_string_for(&g, "12b-final").as_deref(), Some("SH012b"));
    }

    #[test]
    fn shot_string_without_digits_is_absent() {
        let g = grammar();
        assert_eq!(shot_string_for(&g, "SHOT"), None);
        assert_eq!(shot_string_for(&g, ""), None);
    }

    #[test]
    fn shot_number_drops_prefix_and_padding() {
        let g = grammar();
        assert_eq!(shot_number_for(&g, "SH010s").as_deref(), Some("10s"));
        assert_eq!(shot_number_for(&g, "SH001").as_deref(), Some("1"));
        assert_eq!(shot_number_for(&g, "0042").as_deref(), Some("42"));
        assert_eq!(shot_number_for(&g, "SHx01"), None);
    }

    #[test]
    fn long_digit_runs_are_kept_verbatim() {
        let g = grammar();
        assert_eq!(
            shot_string_for(&g, "99999999999").as_deref(),
            Some("SH99999999999")
        );
        assert_eq!(
            shot_number_for(&g, "SH000123456789012345678901").as_deref(),
            Some("123456789012345678901")
        );
        assert_eq!(shot_string_for(&g, "000").as_deref(), Some("SH000"));
        assert_eq!(shot_number_for(&g, "SH000").as_deref(), Some("0"));
    }

    #[test]
    fn shot_list_formats_expanded_range() {
        let g = grammar();
        assert_eq!(
            shot_list(&g, "3-1,10").unwrap(),
            vec!["SH001", "SH002", "SH003", "SH010"]
        );
        assert!(shot_list(&g, "1-").is_err());
    }
}
