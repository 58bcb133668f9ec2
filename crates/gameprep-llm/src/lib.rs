// Prompt construction for the downstream explainer.
//
// This crate only builds text and request bodies; sending them is left to
// whatever transport the caller has.

pub mod prompt;

pub use prompt::{build_coach_message, build_request_body, system_prompt, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
