use anyhow::Result;
use async_trait::async_trait;

use super::Author;

pub type BackendBox = Box<dyn Backend + Send + Sync>;

/// Shown in place of a reply when the completion call fails, so a turn never
/// ends without an assistant message in the transcript.
pub const FALLBACK_REPLY: &str =
    "Lo siento, hubo un error al procesar tu solicitud. Por favor, intenta de nuevo.";

pub struct BackendPrompt {
    pub text: String,
    pub backend_context: String,
}

impl BackendPrompt {
    pub fn new(text: String, backend_context: String) -> BackendPrompt {
        return BackendPrompt {
            text,
            backend_context,
        };
    }
}

pub struct BackendResponse {
    pub author: Author,
    pub text: String,
    pub context: Option<String>,
}

#[async_trait]
pub trait Backend {
    /// Used at startup to verify all configurations are available to work with
    /// the backend.
    async fn health_check(&self) -> Result<()>;

    /// Submits the running conversation plus the latest user text to the
    /// hosted chat model and returns the single reply.
    ///
    /// The updated message history is returned as a serialized context to be
    /// provided again on the next prompt.
    async fn get_completion(&self, prompt: BackendPrompt) -> Result<BackendResponse>;

    /// Requests one square preview image for a cake design, returning the
    /// hosted image URL.
    async fn generate_image(&self, design: &str) -> Result<String>;
}
