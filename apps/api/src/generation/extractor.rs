//! Response extraction: isolates the payload region of raw model text.
//!
//! Purely syntactic and total: nothing here validates JSON or rejects input.
//! Worst case the text comes back unchanged and the parser decides.

use crate::generation::parser::ParserStrategy;

/// Headings the sectioned prompt asks for, in the order they are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeSection {
    Summary,
    Skills,
    Experience,
}

impl ResumeSection {
    pub const ALL: [ResumeSection; 3] = [
        ResumeSection::Summary,
        ResumeSection::Skills,
        ResumeSection::Experience,
    ];

    pub fn heading(&self) -> &'static str {
        match self {
            ResumeSection::Summary => "SUMMARY",
            ResumeSection::Skills => "SKILLS",
            ResumeSection::Experience => "EXPERIENCE",
        }
    }

    /// Matches a standalone heading line, case-insensitively.
    /// Tolerates markdown decoration (`## Skills`, `**SKILLS**`) and a trailing colon.
    fn matches_line(line: &str) -> Option<ResumeSection> {
        let cleaned = line
            .trim()
            .trim_start_matches('#')
            .trim_matches('*')
            .trim()
            .trim_end_matches(':')
            .trim();
        Self::ALL
            .into_iter()
            .find(|section| cleaned.eq_ignore_ascii_case(section.heading()))
    }
}

/// Section bodies keyed by heading. `None` means the heading was never found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionedPayload {
    summary: Option<String>,
    skills: Option<String>,
    experience: Option<String>,
}

impl SectionedPayload {
    /// Body text of a section; empty when the heading was missing.
    pub fn body(&self, section: ResumeSection) -> &str {
        self.slot(section).as_deref().unwrap_or("")
    }

    pub fn has(&self, section: ResumeSection) -> bool {
        self.slot(section).is_some()
    }

    pub fn headings_found(&self) -> usize {
        ResumeSection::ALL.iter().filter(|s| self.has(**s)).count()
    }

    fn slot(&self, section: ResumeSection) -> &Option<String> {
        match section {
            ResumeSection::Summary => &self.summary,
            ResumeSection::Skills => &self.skills,
            ResumeSection::Experience => &self.experience,
        }
    }

    fn slot_mut(&mut self, section: ResumeSection) -> &mut Option<String> {
        match section {
            ResumeSection::Summary => &mut self.summary,
            ResumeSection::Skills => &mut self.skills,
            ResumeSection::Experience => &mut self.experience,
        }
    }
}

/// Output of extraction, shaped by the parser strategy in use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedPayload {
    /// Candidate JSON text; may still be malformed.
    Json(String),
    Sections(SectionedPayload),
}

pub fn extract(raw: &str, strategy: ParserStrategy) -> ExtractedPayload {
    match strategy {
        ParserStrategy::Json => ExtractedPayload::Json(extract_json_payload(raw).to_string()),
        ParserStrategy::Sectioned => ExtractedPayload::Sections(extract_sections(raw)),
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
/// Text without a leading fence is only trimmed; nested fences are peeled one by one.
pub fn strip_code_fences(text: &str) -> &str {
    let mut text = text.trim();
    while let Some(rest) = text.strip_prefix("```") {
        let rest = match rest.split_once('\n') {
            Some((tag, body)) if is_language_tag(tag) => body,
            _ => rest,
        };
        let rest = rest.trim();
        text = rest.strip_suffix("```").map(str::trim).unwrap_or(rest);
    }
    text
}

/// `json`, `JSON`, `text` or nothing at all. A section heading on the fence line is content.
fn is_language_tag(tag: &str) -> bool {
    let tag = tag.trim();
    tag.chars().all(|c| c.is_ascii_alphanumeric()) && ResumeSection::matches_line(tag).is_none()
}

/// Fence-strips, then slices from the first `{` to the last `}` inclusive.
/// Prose around the object is dropped; text without a brace pair is returned as-is.
pub fn extract_json_payload(raw: &str) -> &str {
    let text = strip_code_fences(raw);
    match (text.find('{'), text.rfind('}')) {
        (Some(first), Some(last)) if first < last => &text[first..=last],
        _ => text,
    }
}

/// Splits heading-delimited text into section bodies.
///
/// A body runs from the line after its heading to the next known heading (or
/// end of text). Only the first occurrence of each heading counts.
pub fn extract_sections(raw: &str) -> SectionedPayload {
    let text = strip_code_fences(raw);
    let lines: Vec<&str> = text.lines().collect();
    let headings: Vec<(usize, ResumeSection)> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| ResumeSection::matches_line(line).map(|s| (i, s)))
        .collect();

    let mut payload = SectionedPayload::default();
    for (pos, (line_idx, section)) in headings.iter().enumerate() {
        let slot = payload.slot_mut(*section);
        if slot.is_some() {
            continue;
        }
        let end = headings
            .get(pos + 1)
            .map(|(next_idx, _)| *next_idx)
            .unwrap_or(lines.len());
        let body = lines[line_idx + 1..end].join("\n");
        *slot = Some(body.trim().to_string());
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Text built from the fragments that steer extraction: fences, tags, braces, headings.
    fn fenced_text() -> impl Strategy<Value = String> {
        let fragment = prop_oneof![
            Just("```".to_string()),
            Just("```json\n".to_string()),
            Just("\n".to_string()),
            Just("{".to_string()),
            Just("}".to_string()),
            Just("SUMMARY".to_string()),
            Just("  ".to_string()),
            "\\PC{0,8}",
        ];
        prop::collection::vec(fragment, 0..16).prop_map(|parts| parts.concat())
    }

    proptest! {
        #[test]
        fn json_extraction_is_idempotent(raw in fenced_text()) {
            let once = extract_json_payload(&raw);
            prop_assert_eq!(extract_json_payload(once), once);
        }

        #[test]
        fn json_extraction_is_idempotent_on_any_text(raw in any::<String>()) {
            let once = extract_json_payload(&raw);
            prop_assert_eq!(extract_json_payload(once), once);
        }

        #[test]
        fn fence_stripping_is_idempotent(raw in fenced_text()) {
            let once = strip_code_fences(&raw);
            prop_assert_eq!(strip_code_fences(once), once);
        }
    }

    #[test]
    fn test_strip_code_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_unterminated_fence_keeps_body() {
        let input = "```json\n{\"key\": 1}";
        assert_eq!(strip_code_fences(input), "{\"key\": 1}");
    }

    #[test]
    fn test_fence_tag_needs_a_newline() {
        assert_eq!(strip_code_fences("```{\"key\": 1}```"), "{\"key\": 1}");
        assert_eq!(strip_code_fences("```json {\"key\": 1}```"), "json {\"key\": 1}");
        assert_eq!(extract_json_payload("```json {\"key\": 1}```"), "{\"key\": 1}");
    }

    #[test]
    fn test_fenced_heading_is_not_a_language_tag() {
        let payload = extract_sections("```SUMMARY\nS.\nSKILLS\nRust\n```");
        assert_eq!(payload.body(ResumeSection::Summary), "S.");
        assert_eq!(payload.body(ResumeSection::Skills), "Rust");

        let payload = extract_sections("```text\nSUMMARY\nS.\n```");
        assert_eq!(payload.body(ResumeSection::Summary), "S.");
    }

    #[test]
    fn test_nested_fences_are_peeled() {
        assert_eq!(strip_code_fences("```\n```json\n{}\n```\n```"), "{}");
        let once = strip_code_fences("```\n```x");
        assert_eq!(once, "x");
        assert_eq!(strip_code_fences(once), once);
    }

    #[test]
    fn test_json_payload_drops_surrounding_prose() {
        let input = "Sure! Here is your resume:\n{\"summary\": \"x\"}\nLet me know if you need changes.";
        assert_eq!(extract_json_payload(input), "{\"summary\": \"x\"}");
    }

    #[test]
    fn test_json_payload_keeps_nested_objects_whole() {
        let input = "```json\n{\"a\": {\"b\": 1}}\n```";
        assert_eq!(extract_json_payload(input), "{\"a\": {\"b\": 1}}");
    }

    #[test]
    fn test_json_payload_without_braces_is_unchanged() {
        assert_eq!(extract_json_payload("no json here"), "no json here");
        assert_eq!(extract_json_payload(""), "");
    }

    #[test]
    fn test_json_payload_with_reversed_braces_is_unchanged() {
        assert_eq!(extract_json_payload("} oops {"), "} oops {");
    }

    #[test]
    fn test_extraction_is_idempotent_on_clean_payload() {
        let clean = "{\"summary\": \"Expert engineer.\", \"skills\": [\"Rust\"]}";
        let once = extract_json_payload(clean);
        assert_eq!(once, clean);
        assert_eq!(extract_json_payload(once), once);
    }

    #[test]
    fn test_sections_split_on_standalone_headings() {
        let raw = "SUMMARY\nSeasoned engineer.\n\nSKILLS\nRust, Go\n\nEXPERIENCE\nEngineer | Acme\n- Shipped X";
        let payload = extract_sections(raw);
        assert_eq!(payload.body(ResumeSection::Summary), "Seasoned engineer.");
        assert_eq!(payload.body(ResumeSection::Skills), "Rust, Go");
        assert_eq!(
            payload.body(ResumeSection::Experience),
            "Engineer | Acme\n- Shipped X"
        );
        assert_eq!(payload.headings_found(), 3);
    }

    #[test]
    fn test_headings_are_case_insensitive_and_decorated() {
        let raw = "Here you go.\n## Summary\nShort.\n**Skills:**\nC++, Rust\n";
        let payload = extract_sections(raw);
        assert_eq!(payload.body(ResumeSection::Summary), "Short.");
        assert_eq!(payload.body(ResumeSection::Skills), "C++, Rust");
        assert!(!payload.has(ResumeSection::Experience));
        assert_eq!(payload.body(ResumeSection::Experience), "");
    }

    #[test]
    fn test_heading_word_inside_sentence_is_not_a_heading() {
        let raw = "SUMMARY\nStrong summary of skills and experience.\nSKILLS\nRust";
        let payload = extract_sections(raw);
        assert_eq!(
            payload.body(ResumeSection::Summary),
            "Strong summary of skills and experience."
        );
    }

    #[test]
    fn test_sections_in_any_order() {
        let raw = "EXPERIENCE\nEngineer | Acme\n- A\nSUMMARY\nS.";
        let payload = extract_sections(raw);
        assert_eq!(payload.body(ResumeSection::Experience), "Engineer | Acme\n- A");
        assert_eq!(payload.body(ResumeSection::Summary), "S.");
    }

    #[test]
    fn test_no_headings_yields_empty_payload() {
        let payload = extract_sections("complete garbage");
        assert_eq!(payload.headings_found(), 0);
        assert_eq!(payload, SectionedPayload::default());
    }
}
