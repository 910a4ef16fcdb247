//! Structural parsing: turns an extracted payload into a loosely-typed draft.
//!
//! Two interchangeable strategies sit behind one `parse` entry point:
//! - `Json`: strict `serde_json` parse of the brace-bounded payload.
//! - `Sectioned`: heading / "Role | Company" / bullet-marker heuristics.
//!
//! A `ParseError` here is not fatal. The pipeline answers it with one stricter
//! re-prompt, then with the fallback assembler.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

use crate::generation::extractor::{ExtractedPayload, ResumeSection, SectionedPayload};

const BULLET_MARKERS: &[char] = &['-', '•', '*'];
const BLOCK_DELIMITER: char = '|';

/// Which output contract the model is asked for and parsed against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParserStrategy {
    #[default]
    Json,
    Sectioned,
}

impl ParserStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParserStrategy::Json => "json",
            ParserStrategy::Sectioned => "sectioned",
        }
    }
}

impl fmt::Display for ParserStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParserStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ParserStrategy::Json),
            "sectioned" | "sections" | "text" => Ok(ParserStrategy::Sectioned),
            other => Err(format!(
                "unknown parser strategy '{other}' (expected 'json' or 'sectioned')"
            )),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid syntax: {0}")]
    InvalidSyntax(String),
}

/// One role block from the EXPERIENCE section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperienceBlock {
    /// The "Role | Company" line as the model wrote it. Informational only:
    /// blocks are matched to input experiences by position.
    pub title: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionedDraft {
    pub summary: String,
    pub skills: Vec<String>,
    pub experience_blocks: Vec<ExperienceBlock>,
}

/// Intermediate representation handed to the normalizer.
///
/// The JSON arm stays an untyped `Value`: every field is read through
/// presence-checked accessors in the normalizer, never by indexing.
#[derive(Debug, Clone, PartialEq)]
pub enum ResumeDraft {
    Json(Value),
    Sections(SectionedDraft),
}

pub fn parse(payload: &ExtractedPayload) -> Result<ResumeDraft, ParseError> {
    match payload {
        ExtractedPayload::Json(text) => parse_json(text),
        ExtractedPayload::Sections(sections) => parse_sections(sections),
    }
}

fn parse_json(text: &str) -> Result<ResumeDraft, ParseError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ParseError::InvalidSyntax(e.to_string()))?;
    if !value.is_object() {
        return Err(ParseError::InvalidSyntax(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }
    Ok(ResumeDraft::Json(value))
}

fn parse_sections(sections: &SectionedPayload) -> Result<ResumeDraft, ParseError> {
    if sections.headings_found() == 0 {
        return Err(ParseError::InvalidSyntax(
            "no SUMMARY, SKILLS or EXPERIENCE heading found".to_string(),
        ));
    }
    Ok(ResumeDraft::Sections(SectionedDraft {
        summary: sections.body(ResumeSection::Summary).trim().to_string(),
        skills: split_skills(sections.body(ResumeSection::Skills)),
        experience_blocks: split_experience_blocks(sections.body(ResumeSection::Experience)),
    }))
}

/// Returns the bullet text if `line` starts with a bullet marker.
/// An empty remainder still counts as a bullet line (it is just discarded later).
pub fn strip_bullet_marker(line: &str) -> Option<&str> {
    line.trim_start()
        .strip_prefix(BULLET_MARKERS)
        .map(str::trim)
}

/// Comma-separated skills; one-per-line (optionally bulleted) lists also work.
pub fn split_skills(body: &str) -> Vec<String> {
    body.lines()
        .map(|line| strip_bullet_marker(line).unwrap_or(line))
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits the EXPERIENCE body into role blocks.
///
/// A line containing `|` opens a new block, even when it carries heading, bold or
/// bullet decoration. Other bullet lines attach to the current block. Bullets before
/// the first block line, blank lines and any other prose are dropped.
pub fn split_experience_blocks(body: &str) -> Vec<ExperienceBlock> {
    let mut blocks: Vec<ExperienceBlock> = Vec::new();

    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(title) = role_line(trimmed) {
            blocks.push(ExperienceBlock {
                title: title.to_string(),
                bullets: Vec::new(),
            });
            continue;
        }
        if let Some(bullet) = strip_bullet_marker(trimmed) {
            if let (Some(block), false) = (blocks.last_mut(), bullet.is_empty()) {
                block.bullets.push(bullet.to_string());
            }
        }
    }

    blocks
}

/// The "Role | Company" text of `line` with markdown decoration removed, if it is one.
fn role_line(line: &str) -> Option<&str> {
    let cleaned = line.trim_start_matches('#').trim().trim_matches('*').trim();
    let cleaned = strip_bullet_marker(cleaned).unwrap_or(cleaned);
    let cleaned = cleaned.trim_matches('*').trim();
    cleaned.contains(BLOCK_DELIMITER).then_some(cleaned)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
