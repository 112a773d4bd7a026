//! Inbound slash-command payload and the validated report built from it.

use chrono::{SecondsFormat, Utc};
use serde::Deserialize;

/// Form fields Slack posts for a slash command invocation. Slack sends more
/// fields than these; unknown ones are ignored. Everything defaults so a
/// partial form still deserializes — only `text` matters downstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlashCommand {
    /// Deprecated Slack verification token; checked only when one is configured.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user_id: String,
    /// Display name of the reporter. Received but unused past this point.
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub channel_id: String,
    /// Name of the source channel. Received but unused past this point.
    #[serde(default)]
    pub channel_name: String,
}

/// A validated moderation report, built from a slash command at processing
/// time and discarded when the request ends.
#[derive(Debug, Clone)]
pub struct Report {
    /// Slack user id of the reporter (rendered as a `<@id>` mention).
    pub reporter_id: String,
    /// The report text, verbatim. Validation trims only for the empty check;
    /// whatever the reporter typed is forwarded unchanged.
    pub details: String,
    /// Channel the command was invoked from (rendered as a `<#id>` reference).
    pub source_channel_id: String,
    /// ISO-8601 UTC timestamp with milliseconds, captured when the request is
    /// processed — not when the command was issued upstream.
    pub submitted_at: String,
}

impl Report {
    /// Build a report from a slash command. Returns None when the report text
    /// is missing or trims to empty; callers answer with the usage hint.
    pub fn from_command(cmd: &SlashCommand) -> Option<Self> {
        if cmd.text.trim().is_empty() {
            return None;
        }
        Some(Self {
            reporter_id: cmd.user_id.clone(),
            details: cmd.text.clone(),
            source_channel_id: cmd.channel_id.clone(),
            submitted_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(text: &str) -> SlashCommand {
        SlashCommand {
            user_id: "U1".to_string(),
            text: text.to_string(),
            channel_id: "C1".to_string(),
            ..SlashCommand::default()
        }
    }

    #[test]
    fn empty_and_whitespace_text_rejected() {
        assert!(Report::from_command(&command("")).is_none());
        assert!(Report::from_command(&command("   \t \n")).is_none());
    }

    #[test]
    fn details_kept_verbatim() {
        let report = Report::from_command(&command("  spam in #general  ")).expect("valid report");
        assert_eq!(report.details, "  spam in #general  ");
        assert_eq!(report.reporter_id, "U1");
        assert_eq!(report.source_channel_id, "C1");
    }

    #[test]
    fn submitted_at_is_utc_iso8601_with_millis() {
        let report = Report::from_command(&command("x")).expect("valid report");
        // e.g. 2026-08-07T12:34:56.789Z
        assert!(report.submitted_at.ends_with('Z'), "got {}", report.submitted_at);
        assert_eq!(report.submitted_at.len(), "2026-08-07T12:34:56.789Z".len());
    }

}
