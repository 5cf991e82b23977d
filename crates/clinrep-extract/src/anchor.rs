//! Ordered-anchor scanning.
//!
//! A pattern is a list of steps. Each step finds its anchor phrase at or
//! after the cursor left by the previous step, then reads numeric fields
//! that follow it. The scan succeeds only if every step succeeds.

use regex::Regex;

use clinrep_ingest::clean_value;

use crate::error::{ExtractError, Result};

/// Characters allowed between an anchor and its fields, or between fields.
const FIELD_SEPARATORS: &[char] = &[':', '=', '|', '*', '('];

/// One scan step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Literal phrase. Any whitespace inside it matches any whitespace run.
    pub anchor: &'static str,
    /// Numeric fields read after the anchor and discarded.
    pub ignored: usize,
    /// Numeric fields read after the ignored ones and returned.
    pub captured: usize,
}

impl Step {
    /// Anchor with no fields.
    pub const fn anchor(anchor: &'static str) -> Self {
        Self {
            anchor,
            ignored: 0,
            captured: 0,
        }
    }

    /// Anchor followed by one captured field.
    pub const fn value(anchor: &'static str) -> Self {
        Self {
            anchor,
            ignored: 0,
            captured: 1,
        }
    }

    /// Subtest metric row: score and standard score ignored, percentile captured.
    pub const fn metric(anchor: &'static str) -> Self {
        Self {
            anchor,
            ignored: 2,
            captured: 1,
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledStep {
    matcher: Regex,
    ignored: usize,
    captured: usize,
}

/// A compiled list of steps.
#[derive(Debug, Clone)]
pub struct AnchorPattern {
    steps: Vec<CompiledStep>,
}

impl AnchorPattern {
    pub fn compile(steps: &[Step]) -> Result<Self> {
        let steps = steps
            .iter()
            .map(|step| {
                Ok(CompiledStep {
                    matcher: anchor_matcher(step.anchor)?,
                    ignored: step.ignored,
                    captured: step.captured,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { steps })
    }

    /// Number of values a successful scan returns.
    pub fn capture_count(&self) -> usize {
        self.steps.iter().map(|step| step.captured).sum()
    }

    /// Runs the steps from the start of `text`.
    pub fn scan(&self, text: &str) -> Option<Vec<u32>> {
        self.scan_from(text, 0)
    }

    /// Runs the steps with the cursor starting at byte offset `start`.
    ///
    /// Returns the captured values in step order, or `None` if any anchor or
    /// field is missing.
    pub fn scan_from(&self, text: &str, start: usize) -> Option<Vec<u32>> {
        let mut cursor = start;
        let mut values = Vec::with_capacity(self.capture_count());
        for step in &self.steps {
            cursor = step.matcher.find_at(text, cursor)?.end();
            for _ in 0..step.ignored {
                let (_, next) = next_field(text, cursor)?;
                cursor = next;
            }
            for _ in 0..step.captured {
                let (value, next) = next_field(text, cursor)?;
                values.push(value);
                cursor = next;
            }
        }
        Some(values)
    }
}

/// Compiles an anchor phrase into a whitespace-tolerant literal matcher.
pub fn anchor_matcher(anchor: &str) -> Result<Regex> {
    let pattern = anchor
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    Regex::new(&pattern).map_err(|source| ExtractError::Anchor {
        anchor: anchor.to_string(),
        source,
    })
}

/// Start of the earliest `boundaries` match at or after `from`, or the end of
/// `text`.
pub fn region_end<'a>(
    boundaries: impl IntoIterator<Item = &'a Regex>,
    text: &str,
    from: usize,
) -> usize {
    boundaries
        .into_iter()
        .filter_map(|boundary| boundary.find_at(text, from))
        .map(|found| found.start())
        .min()
        .unwrap_or(text.len())
}

/// Reads the next whitespace-delimited token after `from` as a number.
///
/// Separator characters are skipped first. A token without digits fails
/// the field rather than being skipped, so a missing value never borrows a
/// number from a later row.
fn next_field(text: &str, from: usize) -> Option<(u32, usize)> {
    let rest = text.get(from..)?;
    let start = rest.find(|ch: char| !(ch.is_whitespace() || FIELD_SEPARATORS.contains(&ch)))?;
    let token_rest = &rest[start..];
    let len = token_rest
        .find(char::is_whitespace)
        .unwrap_or(token_rest.len());
    let value = clean_value(&token_rest[..len])?;
    Some((value, from + start + len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(steps: &[Step]) -> AnchorPattern {
        AnchorPattern::compile(steps).expect("compile pattern")
    }

    #[test]
    fn captures_after_ignored_fields() {
        let p = pattern(&[Step::anchor("Test"), Step::metric("Correct Hits")]);
        let text = "Test\nScore Standard Percentile\nCorrect Hits 14 105 63\n";
        assert_eq!(p.scan(text), Some(vec![63]));
        assert_eq!(p.capture_count(), 1);
    }

    #[test]
    fn anchors_tolerate_whitespace_runs() {
        let p = pattern(&[Step::value("Total   Score")]);
        assert_eq!(p.scan("Total\n  Score: 12"), Some(vec![12]));
    }

    #[test]
    fn anchors_must_appear_in_order() {
        let p = pattern(&[Step::value("Second"), Step::value("First")]);
        assert_eq!(p.scan("First 1 Second 2"), None);
        assert_eq!(p.scan("Second 2 First 1"), Some(vec![2, 1]));
    }

    #[test]
    fn missing_field_fails_the_scan() {
        let p = pattern(&[Step::metric("Errors")]);
        assert_eq!(p.scan("Errors 3 -- 12\nOther 4 5 6"), None);
        assert_eq!(p.scan("Errors* 3 98 <1"), Some(vec![1]));
        assert_eq!(p.scan("Errors 3 98"), None);
    }

    #[test]
    fn scan_from_skips_earlier_text() {
        let p = pattern(&[Step::value("Total")]);
        let text = "Total 1 ... Total 2";
        assert_eq!(p.scan_from(text, 5), Some(vec![2]));
    }

    #[test]
    fn region_ends_at_nearest_boundary() {
        let first = anchor_matcher("GAD-7").unwrap();
        let second = anchor_matcher("PCL-5").unwrap();
        let text = "PHQ-9 ... PCL-5 ... GAD-7";
        assert_eq!(region_end([&first, &second], text, 0), 10);
        assert_eq!(region_end([&first], text, 20), 20);
        assert_eq!(region_end([&first], text, 21), text.len());
    }

    #[test]
    fn anchor_metacharacters_are_literal() {
        let p = pattern(&[Step::value("PHQ-9 (Total)")]);
        assert_eq!(p.scan("PHQ-9 (Total) 7"), Some(vec![7]));
        assert_eq!(p.scan("PHQ-9 Total 7"), None);
    }
}
