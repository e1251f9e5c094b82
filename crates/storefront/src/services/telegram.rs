//! Telegram Bot API client for order notifications.

use std::time::Duration;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::TelegramConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when talking to the Bot API.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// The configured base URL cannot form a method URL.
    #[error("invalid Bot API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP request failed. The URL, which embeds the bot token, is stripped.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// The Bot API answered with an error.
    #[error("Bot API error: {status} - {description}")]
    Api { status: u16, description: String },
}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages to the shop's order chat.
#[derive(Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    send_message_url: Url,
    chat_id: String,
}

impl TelegramClient {
    /// Create a client for the configured bot and chat.
    ///
    /// # Errors
    ///
    /// Returns error if the method URL cannot be built or the HTTP client
    /// fails to build.
    pub fn new(config: &TelegramConfig) -> Result<Self, TelegramError> {
        let base = config.api_url.as_str().trim_end_matches('/');
        let send_message_url = Url::parse(&format!(
            "{base}/bot{}/sendMessage",
            config.bot_token.expose_secret()
        ))?;

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            send_message_url,
            chat_id: config.chat_id.clone(),
        })
    }

    /// Send a Markdown message to the order chat.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the Bot API does not confirm
    /// delivery.
    #[instrument(skip(self, text), fields(chat_id = %self.chat_id, length = text.len()))]
    pub async fn send_message(&self, text: &str) -> Result<(), TelegramError> {
        let body = SendMessage {
            chat_id: &self.chat_id,
            text,
            parse_mode: "Markdown",
        };

        let response = self
            .client
            .post(self.send_message_url.clone())
            .json(&body)
            .send()
            .await?;
        let status = response.status();

        // The Bot API reports failures in the body as well as the status.
        let reply: Option<BotApiResponse> = response.json().await.ok();
        match reply {
            Some(BotApiResponse { ok: true, .. }) if status.is_success() => Ok(()),
            Some(BotApiResponse { description, .. }) => Err(TelegramError::Api {
                status: status.as_u16(),
                description: description.unwrap_or_else(|| "request rejected".to_string()),
            }),
            None => Err(TelegramError::Api {
                status: status.as_u16(),
                description: "unreadable response".to_string(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn config(api_url: &str) -> TelegramConfig {
        TelegramConfig {
            bot_token: SecretString::from("123:abc"),
            chat_id: "42".to_string(),
            api_url: Url::parse(api_url).unwrap(),
        }
    }

    #[test]
    fn test_send_message_url() {
        let client = TelegramClient::new(&config("https://api.telegram.org")).unwrap();
        assert_eq!(
            client.send_message_url.as_str(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_send_message_url_with_path_prefix() {
        let client = TelegramClient::new(&config("http://127.0.0.1:8081/telegram/")).unwrap();
        assert_eq!(
            client.send_message_url.as_str(),
            "http://127.0.0.1:8081/telegram/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = SendMessage {
            chat_id: "42",
            text: "*hi*",
            parse_mode: "Markdown",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"chat_id": "42", "text": "*hi*", "parse_mode": "Markdown"})
        );
    }
}
