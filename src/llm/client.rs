use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ChatModel, ImageModel};

/// Configuration for the OpenAI-compatible API client
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key (from OPENAI_API_KEY env var)
    pub api_key: String,
    /// Base URL of the API (override via OPENAI_BASE_URL)
    pub base_url: String,
    /// Chat model for all text stages
    pub chat_model: String,
    /// Image model for the content studio
    pub image_model: String,
    /// Sampling temperature for chat calls
    pub temperature: f64,
}

impl OpenAiConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY environment variable not set")?;
        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        Ok(Self {
            api_key,
            base_url,
            chat_model: "gpt-4".to_string(),
            image_model: "dall-e-3".to_string(),
            temperature: 0.7,
        })
    }

    /// Create with custom settings
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            chat_model: "gpt-4".to_string(),
            image_model: "dall-e-3".to_string(),
            temperature: 0.7,
        }
    }
}

/// OpenAI-compatible API client covering chat completions and image generation
pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// One chat completion round trip. An empty `system` prompt is omitted
    /// from the message list.
    pub async fn chat_completion(&self, system: &str, user: &str) -> Result<String> {
        let mut messages = Vec::with_capacity(2);
        if !system.is_empty() {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.to_string(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: user.to_string(),
        });

        let request = ChatRequest {
            model: self.config.chat_model.clone(),
            temperature: Some(self.config.temperature),
            messages,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send chat completion request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Chat API error: {} - {}", status, body);
        }

        let response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse chat completion response")?;

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .context("No choices in chat completion response")
    }

    /// One image generation round trip, returning the hosted image URL.
    pub async fn create_image(&self, prompt: &str) -> Result<String> {
        let request = ImageRequest {
            model: self.config.image_model.clone(),
            prompt: prompt.to_string(),
            n: 1,
            size: "1024x1024".to_string(),
            quality: "standard".to_string(),
        };

        let response = self
            .client
            .post(format!("{}/images/generations", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send image generation request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Image API error: {} - {}", status, body);
        }

        let response: ImageResponse = response
            .json()
            .await
            .context("Failed to parse image generation response")?;

        response
            .data
            .into_iter()
            .next()
            .map(|d| d.url)
            .context("No image in generation response")
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        self.chat_completion(system, user).await
    }
}

#[async_trait]
impl ImageModel for OpenAiClient {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        self.create_image(prompt).await
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Serialize)]
struct ImageRequest {
    model: String,
    prompt: String,
    n: u32,
    size: String,
    quality: String,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: String,
}
