//! Removes unmatched quotation marks (`“`, `”`, `"`, `«`, `»`) and brackets (`()`, `[]`, `{}`).
//!
//! ```text
//! «Hello (world"
//! ```
//!
//! will be transformed into
//!
//! ```text
//! Hello world
//! ```
use serde::Deserialize;

use super::Transform;
use crate::pair::SentencePair;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoveUnpairedQuotesAndBrackets {}

fn count(line: &str, c: char) -> usize {
    line.chars().filter(|x| *x == c).count()
}

fn remove_first(line: &mut String, c: char) -> bool {
    match line.find(c) {
        Some(idx) => {
            line.remove(idx);
            true
        }
        None => false,
    }
}

/// Quote pairs whose characters differ: drop both if their total count is odd.
fn remove_unpaired_quotes(line: &mut String, open: char, close: char) {
    if (count(line, open) + count(line, close)) % 2 != 0 {
        line.retain(|c| c != open && c != close);
    }
}

/// Drop one opening and one closing bracket at a time (first occurrences) until counts match.
fn remove_unpaired_brackets(line: &mut String, open: char, close: char) {
    while count(line, open) != count(line, close) {
        remove_first(line, open);
        remove_first(line, close);
    }
}

fn clean(mut line: String) -> String {
    remove_unpaired_quotes(&mut line, '“', '”');
    remove_unpaired_quotes(&mut line, '«', '»');
    if count(&line, '"') % 2 != 0 {
        remove_first(&mut line, '"');
    }
    remove_unpaired_brackets(&mut line, '[', ']');
    remove_unpaired_brackets(&mut line, '(', ')');
    remove_unpaired_brackets(&mut line, '{', '}');
    line
}

impl Transform for RemoveUnpairedQuotesAndBrackets {
    fn transform_own(&self, pair: SentencePair) -> SentencePair {
        SentencePair {
            src: clean(pair.src),
            tgt: clean(pair.tgt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(line: &str) -> String {
        clean(line.to_string())
    }

    #[test]
    fn quotes() {
        assert_eq!(t("“Hello"), "Hello");
        assert_eq!(t("“Hello”"), "“Hello”");
        assert_eq!(t("«Hello"), "Hello");
        assert_eq!(t("\"Hello"), "Hello");
        assert_eq!(t("\"a\" \"b"), "a\" \"b");
    }

    #[test]
    fn brackets() {
        assert_eq!(t("(Hello"), "Hello");
        assert_eq!(t("Hello)"), "Hello");
        assert_eq!(t("(a) (b"), "a b");
        assert_eq!(t("[a]"), "[a]");
        assert_eq!(t("{a}}"), "a");
    }

    #[test]
    fn both_sides() {
        let pair = SentencePair::new("«Hello (world", "Bonjour (monde)");
        let pair = RemoveUnpairedQuotesAndBrackets::default().transform_own(pair);
        assert_eq!(pair, SentencePair::new("Hello world", "Bonjour (monde)"));
    }
}
