//! Prompt templates for the enrichment request.

use super::digest::FileDigest;

/// Builds the system and user prompts for one enrichment request.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn system_prompt() -> &'static str {
        "You are a senior software architect reviewing a repository's dependency \
         structure. You only report relationships that the provided file summaries \
         give concrete evidence for. You respond with a single JSON object and \
         nothing else."
    }

    /// User prompt listing every digest as JSON.
    pub fn build_prompt(digests: &[FileDigest]) -> String {
        let files = serde_json::to_string_pretty(digests).unwrap_or_else(|_| "[]".to_string());

        format!(
            r#"Below are summaries of {count} source files from one repository. Each entry lists
the file path, its language, its import specifiers (with the resolved file when static
analysis found one), its exported names, the calls it makes, the function ids defined
in it, and the first part of its content.

Static analysis could not resolve some imports and cannot see dynamic or framework
wiring. Suggest the dependencies it missed.

Files:
{files}

IMPORTANT: Return ONLY a JSON object with no additional text before or after.

Use this exact structure:
{{
  "fileEdges": [
    {{ "source": "path/of/dependent.ts", "target": "path/of/dependency.ts", "relationship": "imports", "confidence": "high", "reason": "short justification" }}
  ],
  "functionEdges": [
    {{ "source": "path/a.ts::caller", "target": "path/b.ts::callee", "relationship": "calls", "confidence": "medium", "reason": "short justification" }}
  ],
  "notes": [
    "Optional observation about the architecture"
  ]
}}

Requirements:
- source and target must be file paths or function ids copied exactly from the summaries
- relationship is a short label such as "imports", "calls", "configures" or "renders"
- confidence is one of "low", "medium", "high"
- Do not repeat dependencies that are already resolved in the summaries
- Use empty arrays when you have nothing to add
- Output ONLY valid JSON (no markdown, no code blocks, no extra text)"#,
            count = digests.len(),
            files = files,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_digests_and_schema() {
        let digest = FileDigest {
            path: "src/app.ts".to_string(),
            language: "typescript".to_string(),
            imports: Vec::new(),
            exports: vec!["default".to_string()],
            calls: Vec::new(),
            functions: vec!["src/app.ts::App".to_string()],
            preview: "export default function App() {}".to_string(),
        };
        let prompt = PromptBuilder::build_prompt(&[digest]);
        assert!(prompt.contains("summaries of 1 source files"));
        assert!(prompt.contains("\"path\": \"src/app.ts\""));
        assert!(prompt.contains("\"functionEdges\""));
    }
}
