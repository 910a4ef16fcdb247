// LLM prompt constants for the Scoring module.

/// System prompt for resume analysis.
pub const RESUME_SCORE_SYSTEM: &str = "You are an expert resume analyst. \
    Return ONLY valid JSON. Do not include markdown, code fences, or commentary.";

/// Resume scoring prompt.
/// Replace: {resume_text}
pub const RESUME_SCORE_PROMPT: &str = r#"Evaluate the resume content below against a standard hiring rubric.

JSON schema:
{
  "overallScore": number,
  "categories": {
    "atsCompatibility": number,
    "impactAndMetrics": number,
    "skillsRelevance": number,
    "clarityAndStructure": number
  },
  "strengths": string[],
  "weaknesses": string[],
  "missingSkills": string[],
  "improvements": [
    {
      "section": "Summary" | "Experience" | "Skills" | "Education" | "Projects" | "Other",
      "items": [
        {
          "issue": string,
          "suggestion": string,
          "applyAction"?: string
        }
      ]
    }
  ]
}

Guidelines:
- Scores must be integers between 0 and 100.
- Provide 3-5 strengths and weaknesses.
- Missing skills should be concise, ATS-friendly keywords.
- Each improvement item must include both issue and suggestion.
- Use applyAction only when a clear automated edit could be applied.

Resume content:
{resume_text}"#;
