pub mod client;
pub mod prompts;

pub use client::*;
pub use prompts::*;

use anyhow::Result;
use async_trait::async_trait;

/// A chat-completion backend: system and user prompt in, generated text out.
///
/// The production implementation is [`OpenAiClient`]; tests script responses
/// through a mock.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// An image-generation backend: prompt in, hosted image URL out.
#[async_trait]
pub trait ImageModel: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<String>;
}
