//! Rule-based feedback generator.
//!
//! Pure and deterministic: no I/O, always returns non-empty text. This is
//! the terminal fallback whenever no model produces feedback.

/// Any of these marks a goal as action-oriented.
const ACTION_VERBS: &[&str] = &["complete", "finish", "build", "create"];

/// Any of these (or any digit) marks a goal as measurable.
const MEASURABILITY_MARKERS: &[&str] = &["hour", "minute", "page"];

pub const ACTION_SUGGESTION: &str = "Consider making your goal more action-oriented. \
    Start with a concrete verb such as \"complete\", \"finish\", \"build\" or \"create\".";

pub const MEASURABLE_SUGGESTION: &str = "Add measurable criteria so you can tell when you are done: \
    a time box in hours or minutes, a page count, or another number.";

/// Always appended, in this order.
pub const GUIDING_QUESTIONS: [&str; 3] = [
    "What specific steps will you take to reach this goal?",
    "How will you know when this goal is complete?",
    "What resources or support will you need along the way?",
];

/// Advisory lines that apply to `goal_text` (zero, one, or two).
pub fn advisories(goal_text: &str) -> Vec<&'static str> {
    let lowered = goal_text.to_lowercase();
    let mut lines = Vec::with_capacity(2);

    if !ACTION_VERBS.iter().any(|verb| lowered.contains(verb)) {
        lines.push(ACTION_SUGGESTION);
    }

    let measurable = MEASURABILITY_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
        || lowered.chars().any(|c| c.is_ascii_digit());
    if !measurable {
        lines.push(MEASURABLE_SUGGESTION);
    }

    lines
}

/// Generate feedback without any model: advisories, then the guiding
/// questions, separated by blank lines.
pub fn rule_based_feedback(goal_text: &str) -> String {
    let mut lines = advisories(goal_text);
    lines.extend(GUIDING_QUESTIONS);
    lines.join("\n\n")
}
