//! Transcript assembly and the summarize-or-placeholder rule.

use crate::vendors::Summarizer;

/// Stored when the transcript is too short to be worth a vendor call.
pub const SHORT_TRANSCRIPT_SUMMARY: &str = "Conversation too short to summarize";

/// Stored when the summarization vendor fails.
pub const FAILED_SUMMARY: &str = "Summarization failed";

/// Transcripts under this many whitespace-delimited words skip the
/// vendor call entirely.
const MIN_SUMMARY_WORDS: usize = 10;

/// Joins message texts into the stored transcript, newline-separated.
pub fn build_transcript<'a, I>(messages: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    messages.into_iter().collect::<Vec<_>>().join("\n")
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Produces the summary to store for a transcript. Vendor failures
/// degrade to a fixed placeholder; they never fail the save.
pub async fn summarize_transcript(summarizer: &dyn Summarizer, transcript: &str) -> String {
    if word_count(transcript) < MIN_SUMMARY_WORDS {
        return SHORT_TRANSCRIPT_SUMMARY.to_string();
    }
    match summarizer.summarize(transcript).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!(error = %e, "summarization failed, storing placeholder");
            FAILED_SUMMARY.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vendors::fake::FakeSummarizer;

    #[test]
    fn transcript_is_newline_joined() {
        let transcript = build_transcript(["hello", "what should I cook", "try stew"]);
        assert_eq!(transcript, "hello\nwhat should I cook\ntry stew");
    }

    #[test]
    fn word_count_is_whitespace_delimited() {
        assert_eq!(word_count("  one   two\tthree\nfour "), 4);
        assert_eq!(word_count(""), 0);
    }

    #[tokio::test]
    async fn short_transcript_skips_the_vendor() {
        let summarizer = FakeSummarizer::answering("should not appear");
        let summary = summarize_transcript(&summarizer, "only five words right here").await;
        assert_eq!(summary, SHORT_TRANSCRIPT_SUMMARY);
        assert_eq!(summarizer.calls(), 0);
    }

    #[tokio::test]
    async fn long_transcript_uses_the_vendor() {
        let summarizer = FakeSummarizer::answering("a tidy summary");
        let transcript = "one two three four five six seven eight nine ten eleven";
        let summary = summarize_transcript(&summarizer, transcript).await;
        assert_eq!(summary, "a tidy summary");
        assert_eq!(summarizer.calls(), 1);
    }

    #[tokio::test]
    async fn vendor_failure_degrades_to_placeholder() {
        let summarizer = FakeSummarizer::failing();
        let transcript = "one two three four five six seven eight nine ten";
        let summary = summarize_transcript(&summarizer, transcript).await;
        assert_eq!(summary, FAILED_SUMMARY);
        assert_eq!(summarizer.calls(), 1);
    }
}
