// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains the cross-cutting pieces.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt fragment for plain-text, heading-delimited output.
pub const PLAIN_TEXT_SYSTEM: &str = "You are a precise, structured assistant. \
    Respond with plain text only. \
    Do NOT use markdown: no code fences, no bold, no headings with '#'.";

/// Voice rule shared by every resume-writing prompt.
pub const VOICE_INSTRUCTION: &str = "\
    Write in implied first person: NEVER use 'I', 'me', 'my', 'we' or 'our'. \
    Start every bullet with a strong action verb.";

/// Factual-integrity rule shared by every resume-writing prompt.
pub const FACTS_INSTRUCTION: &str = "\
    Do NOT invent employers, titles, dates, degrees or contact details. \
    Rephrase and sharpen what the candidate supplied; only add metrics the \
    candidate's own highlights make reasonable.";
