// Adapters layer: concrete completion backends behind the CompletionProvider port.

pub mod mock;
pub mod ollama;

pub use mock::MockCompletion;
pub use ollama::OllamaClient;
