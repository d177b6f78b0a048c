//! Compact range expressions such as `1,4-7,11-4`.

use crate::error::{NamingError, Result};
use std::collections::BTreeSet;

/// Most values a single expression may expand to.
pub const MAX_RANGE_VALUES: u64 = 100_000;

/// Expands a range expression into a sorted, deduplicated list.
///
/// Groups are separated by `,`. A group is a single number or two numbers
/// joined by `-`; the bounds may be given in either order. Whitespace
/// around tokens is ignored. Any empty or non-numeric token fails with
/// [`NamingError::RangeSyntax`] naming that token, as does a group that
/// would push the expansion past [`MAX_RANGE_VALUES`].
pub fn expand_range(expression: &str) -> Result<Vec<u32>> {
    let mut numbers = BTreeSet::new();
    let mut total: u64 = 0;

    for group in expression.split(',') {
        let bounds: Vec<&str> = group.split('-').collect();
        match bounds.as_slice() {
            [single] => {
                numbers.insert(parse_token(single, expression)?);
                total += 1;
            }
            [first, second] => {
                let a = parse_token(first, expression)?;
                let b = parse_token(second, expression)?;
                total += u64::from(a.abs_diff(b)) + 1;
                if total > MAX_RANGE_VALUES {
                    return Err(range_error(group.trim(), expression));
                }
                numbers.extend(a.min(b)..=a.max(b));
            }
            _ => {
                return Err(NamingError::RangeSyntax {
                    token: group.trim().to_string(),
                    expression: expression.to_string(),
                })
            }
        }
    }

    Ok(numbers.into_iter().collect())
}

fn parse_token(token: &str, expression: &str) -> Result<u32> {
    let trimmed = token.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(range_error(trimmed, expression));
    }
    trimmed.parse().map_err(|_| range_error(trimmed, expression))
}

fn range_error(token: &str, expression: &str) -> NamingError {
    NamingError::RangeSyntax {
        token: token.to_string(),
        expression: expression.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_ascending_span() {
        assert_eq!(expand_range("1-4").unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn reversed_span_behaves_like_ascending() {
        assert_eq!(expand_range("10-5").unwrap(), vec![5, 6, 7, 8, 9, 10]);
        assert_eq!(expand_range("10-5").unwrap(), expand_range("5-10").unwrap());
    }

    #[test]
    fn merges_and_deduplicates_groups() {
        assert_eq!(
            expand_range("1,4-7,11-4").unwrap(),
            vec![1, 4, 5, 6, 7, 8, 9, 10, 11]
        );
        assert_eq!(expand_range("3,3,2-3").unwrap(), vec![2, 3]);
    }

    #[test]
    fn tolerates_whitespace() {
        assert_eq!(expand_range(" 1 , 3 - 4 ").unwrap(), vec![1, 3, 4]);
    }

    #[test]
    fn rejects_dangling_dash_and_reports_token() {
        for (expr, bad) in [("1-", ""), ("-3", ""), ("1,,2", ""), ("1,a", "a"), ("1-x", "x")] {
            match expand_range(expr) {
                Err(NamingError::RangeSyntax { token, expression }) => {
                    assert_eq!(token, bad, "expression {expr}");
                    assert_eq!(expression, expr);
                }
                other => panic!("expected range error for {expr}, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_three_sided_group() {
        assert!(matches!(
            expand_range("1-2-3"),
            Err(NamingError::RangeSyntax { ref token, .. }) if token == "1-2-3"
        ));
    }

    #[test]
    fn rejects_oversized_span() {
        match expand_range("1,0-4294967295") {
            Err(NamingError::RangeSyntax { token, .. }) => assert_eq!(token, "0-4294967295"),
            other => panic!("expected range error, got {other:?}"),
        }
        assert_eq!(expand_range("1-100000").unwrap().len(), 100_000);
        assert!(expand_range("1-50000,50001-100001").is_err());
    }

    #[test]
    fn rejects_empty_expression() {
        assert!(expand_range("").is_err());
    }
}
