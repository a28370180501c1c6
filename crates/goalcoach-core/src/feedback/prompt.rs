//! Feedback prompt template.

/// Build the instruction prompt for one goal.
///
/// `context_block` is the output of
/// [`format_context`](super::context::format_context). Deterministic: the
/// same inputs always produce the same prompt.
pub fn build_feedback_prompt(goal_text: &str, context_block: &str) -> String {
    format!(
        "You are an experienced mentor reviewing a student's daily goal.\n\
         \n\
         Student goal: \"{goal}\"\n\
         \n\
         Curriculum context:\n\
         {context_block}\n\
         \n\
         Respond with:\n\
         1. One sentence identifying the main weakness of this goal.\n\
         2. Up to five short guiding questions that help the student make it specific, \
         measurable, and achievable today.\n\
         \n\
         Keep the whole response under 120 words. Use plain text, no markdown headings.",
        goal = goal_text.trim(),
    )
}
