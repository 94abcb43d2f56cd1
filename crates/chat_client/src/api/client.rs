use std::time::{Duration, Instant};

use async_trait::async_trait;
use chat_core::Config;
use log::{debug, error, warn};
use reqwest::{Client, Proxy, Url};

use crate::api::models::{ChatReply, ChatRequest};
use crate::client_trait::ChatBackend;
use crate::error::{ChatClientError, Result};

/// Chat backend reached over HTTP: one JSON POST per submitted message.
#[derive(Debug, Clone)]
pub struct HttpChatClient {
    client: Client,
    url: Url,
}

impl HttpChatClient {
    pub fn new(config: &Config) -> Result<Self> {
        let raw_url = config.chat_url();
        let url = Url::parse(&raw_url).map_err(|e| ChatClientError::InvalidUrl {
            url: raw_url.clone(),
            message: e.to_string(),
        })?;
        let client = Self::build_http_client(config)?;
        Ok(Self { client, url })
    }

    /// Proxies come only from `config`; system proxy detection is disabled.
    fn build_http_client(config: &Config) -> Result<Client> {
        let mut builder = Client::builder().no_proxy();
        if !config.http_proxy.is_empty() {
            builder = builder.proxy(Proxy::http(&config.http_proxy).map_err(ChatClientError::Build)?);
        }
        if !config.https_proxy.is_empty() {
            builder =
                builder.proxy(Proxy::https(&config.https_proxy).map_err(ChatClientError::Build)?);
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build().map_err(ChatClientError::Build)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ChatBackend for HttpChatClient {
    async fn send_chat(&self, request: ChatRequest) -> Result<ChatReply> {
        debug!(
            "Sending POST request to {} with {} turn(s)",
            self.url,
            request.conversation.len()
        );
        let start_time = Instant::now();

        let response = self
            .client
            .post(self.url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed HTTP request to {}: {}", self.url, e);
                if e.is_timeout() {
                    error!("Request timed out");
                }
                if e.is_connect() {
                    error!("Connection error");
                }
                ChatClientError::Dispatch(e)
            })?;

        let status = response.status();
        debug!(
            "Got response from {} after {:?} with status {}",
            self.url,
            start_time.elapsed(),
            status
        );
        if !status.is_success() {
            warn!("Chat backend returned status {status}");
            return Err(ChatClientError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(ChatClientError::Dispatch)?;
        // A JSON `null` body counts as a reply without a result.
        let reply: Option<ChatReply> = serde_json::from_str(&body)?;
        Ok(reply.unwrap_or_default())
    }
}
