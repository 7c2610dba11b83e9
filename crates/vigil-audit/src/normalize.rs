//! Canonicalization applied to snapshot text before comparison.
//!
//! Status tools churn constantly in ways that do not matter for change
//! detection: packet counters tick, PIDs rotate, columns carry sizes and
//! timestamps. Each snapshot topic therefore carries a [`Normalizer`],
//! an ordered pipeline of text transforms applied identically to the
//! saved snapshot and the fresh capture.
//!
//! Every transform is a pure function of its input, and every pipeline
//! is idempotent: `apply(apply(x)) == apply(x)`. The engine relies on
//! this because the normalized current capture is persisted and may be
//! normalized again on a later run (e.g. after being promoted to the
//! saved snapshot).
//!
//! Output is always newline-joined lines without a trailing newline,
//! which is the canonical form both sides are reduced to.

use regex::Regex;

/// Placeholder for masked digit runs. Must not itself contain digits,
/// and must not collide with characters the drop patterns look for.
const DIGIT_MASK: &str = "<num>";

/// One text transformation step.
#[derive(Debug, Clone)]
pub enum Step {
    /// Strip surrounding whitespace from each line, drop blank lines.
    TrimLines,
    /// Drop lines matching the pattern (expected-noise filter).
    DropMatching(Regex),
    /// Keep only the first `n` whitespace-delimited fields of each line,
    /// joined by single spaces.
    KeepFields(usize),
    /// Replace every run of ASCII digits with [`DIGIT_MASK`].
    MaskDigits,
    /// Replace every match of the pattern with the replacement
    /// (targeted substring masking, e.g. queue depths or packet
    /// counters). The replacement must not itself re-match the
    /// pattern, or the pipeline loses idempotence.
    ReplaceAll(Regex, String),
    /// Sort lines lexicographically (order-insensitive comparison).
    SortLines,
}

impl Step {
    fn apply(&self, text: &str) -> String {
        match self {
            Self::TrimLines => join(
                text.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from),
            ),
            Self::DropMatching(pattern) => join(
                text.lines()
                    .filter(|line| !pattern.is_match(line))
                    .map(String::from),
            ),
            Self::KeepFields(n) => join(text.lines().map(|line| {
                line.split_whitespace()
                    .take(*n)
                    .collect::<Vec<_>>()
                    .join(" ")
            })),
            Self::MaskDigits => mask_digits(text),
            Self::ReplaceAll(pattern, replacement) => {
                pattern.replace_all(text, replacement.as_str()).into_owned()
            }
            Self::SortLines => {
                let mut lines: Vec<&str> = text.lines().collect();
                lines.sort_unstable();
                lines.join("\n")
            }
        }
    }
}

fn join(lines: impl Iterator<Item = String>) -> String {
    lines.collect::<Vec<_>>().join("\n")
}

fn mask_digits(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for ch in text.chars() {
        if ch.is_ascii_digit() {
            if !in_run {
                out.push_str(DIGIT_MASK);
                in_run = true;
            }
        } else {
            in_run = false;
            out.push(ch);
        }
    }
    out
}

/// Ordered transform pipeline for one topic.
///
/// The default pipeline is the identity (modulo the canonical
/// newline-joined form).
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    steps: Vec<Step>,
}

impl Normalizer {
    /// Pipeline with the given steps, applied in order.
    #[must_use]
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Identity pipeline for topics with no registered transforms.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Apply all steps in order.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        // Canonical form first so the identity pipeline is idempotent
        // across line-ending variations.
        let canonical = text.lines().collect::<Vec<_>>().join("\n");
        self.steps
            .iter()
            .fold(canonical, |acc, step| step.apply(&acc))
    }
}
