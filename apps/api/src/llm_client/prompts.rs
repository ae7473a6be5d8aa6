// Shared prompt fragments.
// Each module that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting instructions.

/// Enforces Spanish-only, JSON-only output.
pub const SPANISH_JSON_ONLY: &str = "\
INSTRUCCIONES OBLIGATORIAS:
- Responde EXCLUSIVAMENTE en ESPAÑOL.
- Devuelve ÚNICAMENTE un JSON válido.
- No incluyas texto explicativo fuera del JSON.
- No utilices inglés bajo ningún concepto.";
