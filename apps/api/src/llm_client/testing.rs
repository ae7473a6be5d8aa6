//! In-memory `TextGenerator` doubles shared by handler and service tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{LlmError, TextGenerator};

/// Returns a canned reply and records every prompt it receives.
#[derive(Default)]
pub struct StubGenerator {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Always fails as an upstream 503 would.
pub struct UnavailableGenerator;

#[async_trait]
impl TextGenerator for UnavailableGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        Err(LlmError::Api {
            status: 503,
            message: "model overloaded".to_string(),
        })
    }
}

/// A well-formed reply wrapped in prose, the way small models tend to answer.
pub const GOOD_REPLY: &str = r#"Aquí está la evaluación solicitada:
{
  "score": 78,
  "category": "ELITE",
  "summary": "Desarrollador backend con experiencia comprobable en servicios distribuidos.",
  "strengths": ["Stack moderno y coherente", "Experiencia en producción"],
  "improvements": ["Cuantificar logros con métricas", "Agregar enlaces a repositorios", "Reducir párrafos extensos"],
  "atsObservations": ["Encabezados estándar detectados", "Evitar columnas múltiples"]
}"#;
