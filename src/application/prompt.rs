//! Prompt assembly for test plan generation.
//!
//! The prompt has a fixed shape: preamble, issue fields, a template excerpt
//! (or a default-template hint when no template text is available), and an
//! instruction suffix enumerating the required plan qualities. The excerpt
//! is a verbatim character-for-character prefix of the template text — no
//! trimming or normalization beyond the documented truncation.

use crate::domain::IssueDetails;

/// How much of the template feeds the prompt.
pub const TEMPLATE_EXCERPT_CHARS: usize = 1000;

const DEFAULT_TEMPLATE_HINT: &str =
    "[Default template: Create test plan with Overview, Scope, Test Scenarios, Exit Criteria]";

/// Build the generation prompt for one issue.
pub fn build_prompt(issue: &IssueDetails, template_text: Option<&str>) -> String {
    let template_excerpt = match template_text {
        Some(text) if !text.is_empty() => truncate_chars(text, TEMPLATE_EXCERPT_CHARS),
        _ => DEFAULT_TEMPLATE_HINT.to_string(),
    };

    format!(
        "You are a QA expert creating a professional test plan.\n\
         \n\
         ISSUE:\n\
         - Key: {key}\n\
         - Summary: {summary}\n\
         - Description: {description}\n\
         - Acceptance Criteria: {criteria}\n\
         - Priority: {priority}\n\
         \n\
         TEMPLATE STRUCTURE:\n\
         {template_excerpt}\n\
         \n\
         Generate a comprehensive, professional test plan in Markdown format that:\n\
         1. Covers positive, negative, and edge case scenarios\n\
         2. Includes specific test steps and expected results\n\
         3. Addresses all acceptance criteria\n\
         4. Uses professional QA terminology\n\
         5. Is ready for immediate use by QA engineers",
        key = issue.key,
        summary = issue.summary,
        description = field_or_default(&issue.description),
        criteria = field_or_default(&issue.acceptance_criteria),
        priority = field_or_default(&issue.priority),
    )
}

fn field_or_default(field: &Option<String>) -> &str {
    field.as_deref().filter(|s| !s.is_empty()).unwrap_or("Not specified")
}

/// First `max` characters, char-boundary safe.
fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
