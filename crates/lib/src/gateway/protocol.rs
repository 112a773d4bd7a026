//! Wire types for the slash-command endpoint: the ephemeral reply envelope
//! and the canned reply texts.

use serde::Serialize;

/// JSON reply rendered by Slack to the invoking user only, never broadcast.
/// Always `{ "response_type": "ephemeral", "text": ... }`; the destination
/// API's raw response is never echoed here.
#[derive(Debug, Clone, Serialize)]
pub struct EphemeralResponse {
    pub response_type: &'static str,
    pub text: &'static str,
}

impl EphemeralResponse {
    pub fn new(text: &'static str) -> Self {
        Self {
            response_type: "ephemeral",
            text,
        }
    }
}

/// Shown when the command is invoked without report text.
pub const USAGE_HINT: &str = "⚠️ Please provide details about what you're reporting.\nUsage: `/report-behavior [description of concerning behavior]`";

/// Shown after the report reached the moderation channel.
pub const REPORT_SENT: &str = "✅ Your report has been sent to the moderation team. Thank you for helping keep our community safe.";

/// Shown when Slack rejected the chat.postMessage call.
pub const SEND_FAILED: &str = "❌ Failed to send report. Please try again or contact an admin.";

/// Shown on any unhandled failure (form decode, transport, bad upstream body).
pub const PROCESSING_ERROR: &str = "❌ An error occurred while processing your report. Please try again.";

/// Shown when a configured verification token does not match the form's token.
pub const INVALID_TOKEN: &str = "invalid verification token";
