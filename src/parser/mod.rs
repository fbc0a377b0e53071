//! Parser for labeled requirement text
//!
//! One requirement per line, introduced by `[Functional]` or
//! `[Non-Functional]`. Anything else is dropped without error: a sloppy
//! document shows up as weak completeness verdicts, not as a failure.

use crate::{Category, ParsedRequirements, Requirement};

/// List markers tolerated in front of a label when enabled
const LIST_MARKERS: [char; 3] = ['-', '*', '•'];

/// Splits raw text into functional and non-functional buckets
#[derive(Debug, Clone, Default)]
pub struct RequirementParser {
    /// Strip one leading `-`, `*` or `•` before testing for a label
    strip_list_markers: bool,
}

impl RequirementParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept bullet-style lines such as `- [Functional] ...`
    pub fn with_list_markers(mut self, enabled: bool) -> Self {
        self.strip_list_markers = enabled;
        self
    }

    /// Parse `raw_text` into both buckets, preserving input order
    pub fn parse(&self, raw_text: &str) -> ParsedRequirements {
        let mut parsed = ParsedRequirements::default();

        for (zero_indexed, line) in raw_text.lines().enumerate() {
            parsed.total_lines += 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match self.classify_line(line) {
                Some((category, text)) => {
                    let req = Requirement::new(text, category, zero_indexed + 1);
                    match category {
                        Category::Functional => parsed.functional.push(req),
                        Category::NonFunctional => parsed.non_functional.push(req),
                    }
                }
                None => {
                    tracing::trace!(line = zero_indexed + 1, "skipping unlabeled line");
                    parsed.skipped_lines += 1;
                }
            }
        }

        tracing::debug!(
            functional = parsed.functional.len(),
            non_functional = parsed.non_functional.len(),
            skipped = parsed.skipped_lines,
            "parsed requirements"
        );
        parsed
    }

    /// Match a trimmed, non-empty line against the category labels.
    /// Returns `None` for unlabeled lines and for labels with no statement.
    fn classify_line<'a>(&self, line: &'a str) -> Option<(Category, &'a str)> {
        let line = if self.strip_list_markers {
            strip_list_marker(line)
        } else {
            line
        };

        Category::ALL.into_iter().find_map(|category| {
            let rest = line.strip_prefix(category.label())?.trim();
            (!rest.is_empty()).then_some((category, rest))
        })
    }
}

fn strip_list_marker(line: &str) -> &str {
    match line.strip_prefix(LIST_MARKERS) {
        Some(rest) => rest.trim_start(),
        None => line,
    }
}

/// Parse with default settings (literal labels only)
pub fn parse_requirements(raw_text: &str) -> ParsedRequirements {
    RequirementParser::new().parse(raw_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(reqs: &[Requirement]) -> Vec<&str> {
        reqs.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn test_splits_into_buckets_in_order() {
        let parsed = parse_requirements(
            "[Functional] The system shall allow login\n\
             [Non-Functional] The system shall respond within 2 seconds\n\
             [Functional] The system must ensure fast performance\n",
        );
        assert_eq!(
            texts(&parsed.functional),
            vec![
                "The system shall allow login",
                "The system must ensure fast performance"
            ]
        );
        assert_eq!(
            texts(&parsed.non_functional),
            vec!["The system shall respond within 2 seconds"]
        );
        assert_eq!(parsed.functional[1].line, 3);
        assert_eq!(parsed.non_functional[0].category, Category::NonFunctional);
    }

    #[test]
    fn test_trims_whitespace_around_lines_and_labels() {
        let parsed = parse_requirements("    [Functional]    Users can log in   \n\t[Non-Functional]Uptime 99%\t");
        assert_eq!(texts(&parsed.functional), vec!["Users can log in"]);
        assert_eq!(texts(&parsed.non_functional), vec!["Uptime 99%"]);
    }

    #[test]
    fn test_unlabeled_lines_are_dropped_and_counted() {
        let parsed = parse_requirements(
            "Meeting notes\n\n[Constraint] Must use Postgres\n[Assumption] Users have mics\n[functional] lower-case label\n[Functional] kept one\n",
        );
        assert_eq!(texts(&parsed.functional), vec!["kept one"]);
        assert!(parsed.non_functional.is_empty());
        assert_eq!(parsed.skipped_lines, 4);
        assert_eq!(parsed.total_lines, 6);
    }

    #[test]
    fn test_label_must_start_the_line() {
        let parsed = parse_requirements("Note: [Functional] not a requirement");
        assert!(parsed.is_empty());
        assert_eq!(parsed.skipped_lines, 1);
    }

    #[test]
    fn test_label_without_statement_is_skipped() {
        let parsed = parse_requirements("[Functional]\n[Non-Functional]    \n");
        assert!(parsed.is_empty());
        assert_eq!(parsed.skipped_lines, 2);
    }

    #[test]
    fn test_only_leading_label_is_removed() {
        let parsed = parse_requirements("[Functional] Show the [Functional] badge");
        assert_eq!(texts(&parsed.functional), vec!["Show the [Functional] badge"]);
    }

    #[test]
    fn test_bullets_dropped_by_default() {
        let parsed = parse_requirements("- [Functional] The system shall allow login");
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_bullets_accepted_with_list_markers() {
        let parser = RequirementParser::new().with_list_markers(true);
        let parsed = parser.parse(
            "- [Functional] The system shall allow login\n* [Non-Functional] Latency under 200 ms\n•[Functional] Export reports\n-- [Functional] double dash\n",
        );
        assert_eq!(
            texts(&parsed.functional),
            vec!["The system shall allow login", "Export reports"]
        );
        assert_eq!(texts(&parsed.non_functional), vec!["Latency under 200 ms"]);
        assert_eq!(parsed.skipped_lines, 1);
    }

    #[test]
    fn test_crlf_input() {
        let parsed = parse_requirements("[Functional] A\r\n[Non-Functional] B\r\n");
        assert_eq!(texts(&parsed.functional), vec!["A"]);
        assert_eq!(texts(&parsed.non_functional), vec!["B"]);
    }

    #[test]
    fn test_reparse_of_labeled_text_is_identical() {
        let parsed = parse_requirements(
            "intro\n[Functional] First\n\n[Non-Functional] Second 5 ms\n[Functional] Third\n",
        );
        let again = parse_requirements(&parsed.to_labeled_text());
        assert_eq!(texts(&again.functional), texts(&parsed.functional));
        assert_eq!(texts(&again.non_functional), texts(&parsed.non_functional));
    }

    #[test]
    fn test_empty_input() {
        let parsed = parse_requirements("");
        assert!(parsed.is_empty());
        assert_eq!(parsed.total_lines, 0);
        assert_eq!(parsed.skipped_lines, 0);
    }
}
