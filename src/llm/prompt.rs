//! Instructions sent to the backends alongside the diff.

/// System instruction for chat-style backends.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that generates concise git commit messages based on diffs. Follow conventional commit format.";

/// User message for backends that also receive [`SYSTEM_PROMPT`].
pub fn chat_user_prompt(diff: &str) -> String {
    format!("Based on this git diff, suggest a commit message:\n{diff}")
}

/// Single user message carrying both the instruction and the diff.
pub fn single_turn_prompt(diff: &str) -> String {
    format!(
        "Please generate a concise git commit message based on this diff. Follow conventional commit format.\n\n{diff}"
    )
}
