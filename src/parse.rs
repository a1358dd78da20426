//! Input helpers shared by the solvers.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected} integers in {line:?}, found {found}")]
    Count {expected: usize, found: usize, line: String},
    #[error("cannot parse {0:?}")]
    Line(String),
}

fn int_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-?\d+").unwrap())
}

/// Every signed integer in `s`, in order of appearance. Anything that doesn't
/// fit in `T` is skipped.
pub fn ints<T: FromStr>(s: &str) -> Vec<T> {
    int_regex().find_iter(s).filter_map(|m| m.as_str().parse().ok()).collect()
}

/// Exactly `N` integers out of `s`.
pub fn fixed_ints<T: FromStr, const N: usize>(s: &str) -> Result<[T; N], ParseError> {
    let found: Vec<T> = ints(s);
    let count = found.len();
    found.try_into().map_err(|_| ParseError::Count {expected: N, found: count, line: s.to_owned()})
}

/// Non-empty lines of `s` as byte rows, for the grid puzzles.
pub fn grid(s: &str) -> Vec<Vec<u8>> {
    s.lines().filter(|line| !line.trim().is_empty()).map(|line| line.as_bytes().to_vec()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulls_signed_integers_out_of_noise() {
        assert_eq!(ints::<i32>("position=< 9,  -1> velocity=<0, 2>"), vec![9, -1, 0, 2]);
        assert_eq!(ints::<u8>("#123 @ 3,2: 5x4"), vec![123, 3, 2, 5, 4]);
    }

    #[test]
    fn fixed_ints_reports_wrong_counts() {
        assert_eq!(fixed_ints::<i64, 2>("x=5, y=7"), Ok([5, 7]));
        assert_eq!(
            fixed_ints::<i64, 3>("x=5, y=7"),
            Err(ParseError::Count {expected: 3, found: 2, line: "x=5, y=7".to_owned()})
        );
    }
}
