// Resume scoring.
// Implements: PDF upload validation, text extraction, rubric prompt, score normalization.
// All LLM calls go through llm_client: no direct Anthropic API calls here.

pub mod handlers;
pub mod normalizer;
pub mod prompts;
pub mod service;
