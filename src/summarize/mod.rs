//! Summarizer: turns the bulletin into a single post via a chat-completions call.
//!
//! Failures never leave this module; the caller always gets a post-sized string.

pub mod client;

use std::sync::Arc;

use metrics::counter;

pub use client::{ChatCompletionsClient, CompletionClient, CompletionRequest};

/// Hard ceiling for a post, in characters.
pub const MAX_POST_CHARS: usize = 280;
/// Length the model is asked to stay under.
pub const TARGET_POST_CHARS: usize = 270;
const ELLIPSIS: &str = "...";

/// Returned when the completion service fails.
pub const GENERATION_FAILED: &str =
    "Post generation failed: not enough news came in or the language model API had a problem.";

pub const DEFAULT_MODEL: &str = "llama-3.1-70b-versatile";
pub const DEFAULT_MAX_TOKENS: u32 = 180;
pub const DEFAULT_TEMPERATURE: f32 = 0.65;
pub const DEFAULT_LANGUAGE: &str = "Persian";

#[derive(Debug, Clone)]
pub struct SummarizerSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Language the post is written in.
    pub language: String,
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

pub struct Summarizer {
    client: Arc<dyn CompletionClient>,
    settings: SummarizerSettings,
}

impl Summarizer {
    pub fn new(client: Arc<dyn CompletionClient>, settings: SummarizerSettings) -> Self {
        Self { client, settings }
    }

    /// Summarize `bulletin` into at most [`MAX_POST_CHARS`] characters.
    /// Returns [`GENERATION_FAILED`] if the completion call fails.
    pub async fn summarize(&self, bulletin: &str) -> String {
        let req = CompletionRequest {
            model: self.settings.model.clone(),
            prompt: build_prompt(bulletin, &self.settings.language),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        match self.client.complete(&req).await {
            Ok(text) if !text.trim().is_empty() => clamp_post(&text),
            Ok(_) => {
                tracing::error!(
                    provider = self.client.provider_name(),
                    "completion returned an empty post"
                );
                counter!("completion_failures_total").increment(1);
                GENERATION_FAILED.to_string()
            }
            Err(e) => {
                tracing::error!(
                    provider = self.client.provider_name(),
                    error = ?e,
                    "completion failed"
                );
                counter!("completion_failures_total").increment(1);
                GENERATION_FAILED.to_string()
            }
        }
    }
}

/// Prompt with the bulletin embedded verbatim.
pub fn build_prompt(bulletin: &str, language: &str) -> String {
    format!(
        "Collected news (limited sources, mostly domestic outlets plus a few international ones):\n\
         {bulletin}\n\
         \n\
         Write one short, engaging post in {language} (at most {TARGET_POST_CHARS} characters):\n\
         - Summarize the current situation\n\
         - If a story is important, add a brief warning or forecast\n\
         - Professional tone: neutral but sharp\n\
         - Use a few relevant emoji (do not overdo it)\n\
         - Add relevant hashtags\n\
         - If the news is very thin or repetitive, say that \"information is limited\"\n\
         \n\
         Return only the final post text, with no explanation."
    )
}

/// Trim and enforce the hard ceiling: anything over [`MAX_POST_CHARS`] is cut to
/// 277 characters plus `...`.
pub fn clamp_post(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= MAX_POST_CHARS {
        return trimmed.to_string();
    }
    let keep = MAX_POST_CHARS - ELLIPSIS.chars().count();
    let mut out: String = trimmed.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_only_trimmed() {
        assert_eq!(clamp_post("  hello world \n"), "hello world");
    }

    #[test]
    fn exactly_280_is_untouched() {
        let s = "a".repeat(280);
        assert_eq!(clamp_post(&s), s);
    }

    #[test]
    fn long_text_is_cut_to_280_with_ellipsis() {
        let out = clamp_post(&"b".repeat(300));
        assert_eq!(out.chars().count(), 280);
        assert!(out.ends_with("..."));
        assert_eq!(&out[..277], "b".repeat(277));
    }

    #[test]
    fn ceiling_counts_characters_for_non_ascii() {
        let out = clamp_post(&"ایران".repeat(70));
        assert_eq!(out.chars().count(), 280);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn prompt_embeds_bulletin_and_guidance() {
        let p = build_prompt("[a] b\nc\nd", "Persian");
        assert!(p.contains("[a] b\nc\nd"));
        assert!(p.contains("in Persian"));
        assert!(p.contains("at most 270 characters"));
        assert!(p.contains("information is limited"));
    }
}
