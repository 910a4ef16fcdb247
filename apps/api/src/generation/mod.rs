// Resume generation pipeline.
// Implements: prompt building, response extraction, structural parsing, normalization, fallback.
// All LLM calls go through llm_client: no direct Anthropic API calls here.

pub mod extractor;
pub mod fallback;
pub mod generator;
pub mod handlers;
pub mod normalizer;
pub mod parser;
pub mod prompt_builder;
pub mod prompts;
