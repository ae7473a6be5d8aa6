// CV analysis: prompt the model once, then normalize its verdict.
// All LLM calls go through llm_client, never direct Gemini calls here.

pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod prompts;
pub mod service;
