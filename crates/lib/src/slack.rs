//! Slack Web API client: chat.postMessage with bearer auth, auth.test, and
//! Block Kit payload construction for moderation reports.

use serde_json::{json, Value};

use crate::report::Report;

const DEFAULT_API_BASE: &str = "https://slack.com/api";

/// Client for the Slack Web API.
#[derive(Clone)]
pub struct SlackClient {
    api_base: String,
    bot_token: String,
    client: reqwest::Client,
}

#[derive(Debug, thiserror::Error)]
pub enum SlackError {
    #[error("slack request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Slack answered with `ok: false` (or no `ok` at all). Carries the full
    /// response payload so operators can see the exact failure.
    #[error("slack api returned ok=false: {payload}")]
    Api { payload: Value },
}

impl SlackClient {
    pub fn new(bot_token: String, api_base: Option<String>) -> Self {
        let api_base = api_base
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self {
            api_base,
            bot_token,
            client: reqwest::Client::new(),
        }
    }

    /// POST chat.postMessage — send Block Kit blocks to a channel.
    ///
    /// The response body is parsed as JSON without gating on the HTTP status:
    /// Slack reports failures through the body's `ok` field, usually on a 200.
    /// Transport and decode failures map to [`SlackError::Request`].
    pub async fn post_message(&self, channel: &str, blocks: Vec<Value>) -> Result<Value, SlackError> {
        let url = format!("{}/chat.postMessage", self.api_base);
        let body = json!({ "channel": channel, "blocks": blocks });
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.bot_token)
            .json(&body)
            .send()
            .await?;
        let payload: Value = res.json().await?;
        if !payload.get("ok").and_then(|v| v.as_bool()).unwrap_or(false) {
            return Err(SlackError::Api { payload });
        }
        Ok(payload)
    }

    /// POST auth.test — verify the bot token without posting anywhere.
    /// Returns the identity payload (team, user, ...) on success.
    pub async fn auth_test(&self) -> Result<Value, SlackError> {
        let url = format!("{}/auth.test", self.api_base);
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.bot_token)
            .send()
            .await?;
        let payload: Value = res.json().await?;
        if !payload.get("ok").and_then(|v| v.as_bool()).unwrap_or(false) {
            return Err(SlackError::Api { payload });
        }
        Ok(payload)
    }
}

/// Block Kit layout for a moderation report: header, reporter/channel/timestamp
/// fields, the verbatim report text, and a trailing divider.
pub fn report_blocks(report: &Report) -> Vec<Value> {
    vec![
        json!({
            "type": "header",
            "text": {
                "type": "plain_text",
                "text": "🚨 New Moderation Report",
                "emoji": true
            }
        }),
        json!({
            "type": "section",
            "fields": [
                {
                    "type": "mrkdwn",
                    "text": format!("*Reported by:*\n<@{}>", report.reporter_id)
                },
                {
                    "type": "mrkdwn",
                    "text": format!("*Channel:*\n<#{}>", report.source_channel_id)
                },
                {
                    "type": "mrkdwn",
                    "text": format!("*Timestamp:*\n{}", report.submitted_at)
                }
            ]
        }),
        json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": format!("*Report Details:*\n{}", report.details)
            }
        }),
        json!({ "type": "divider" }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> Report {
        Report {
            reporter_id: "U123".to_string(),
            details: "spam in #general".to_string(),
            source_channel_id: "C456".to_string(),
            submitted_at: "2026-08-07T12:34:56.789Z".to_string(),
        }
    }

    #[test]
    fn blocks_layout_is_header_fields_text_divider() {
        let blocks = report_blocks(&sample_report());
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0]["type"], "header");
        assert_eq!(blocks[1]["type"], "section");
        assert_eq!(blocks[2]["type"], "section");
        assert_eq!(blocks[3]["type"], "divider");
    }

    #[test]
    fn fields_carry_mention_channel_and_timestamp() {
        let blocks = report_blocks(&sample_report());
        let fields = blocks[1]["fields"].as_array().expect("fields array");
        assert_eq!(fields.len(), 3);
        assert!(fields[0]["text"].as_str().unwrap().contains("<@U123>"));
        assert!(fields[1]["text"].as_str().unwrap().contains("<#C456>"));
        assert!(fields[2]["text"].as_str().unwrap().contains("2026-08-07T12:34:56.789Z"));
    }

    #[test]
    fn details_forwarded_verbatim() {
        let mut report = sample_report();
        report.details = "  <weird> *markup* & trailing space  ".to_string();
        let blocks = report_blocks(&report);
        let text = blocks[2]["text"]["text"].as_str().expect("details text");
        assert_eq!(text, "*Report Details:*\n  <weird> *markup* & trailing space  ");
    }
}
