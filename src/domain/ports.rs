use crate::domain::model::SchemaVariant;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Text-generation backend: model identifier and prompt in, completion text out.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn model(&self) -> &str;
    fn schema_variant(&self) -> SchemaVariant;
}
