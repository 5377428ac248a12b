use console::style;

use repograph_analysis::Language;

use crate::error::Result;

/// Print every recognised language with its extensions and extractor kind.
pub fn execute() -> Result<()> {
    for language in Language::all() {
        let kind = if language.is_ecmascript() { "ast" } else { "pattern" };
        let extensions = language
            .extensions()
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "{:<12} {:<8} {}",
            style(language.name()).bold(),
            style(kind).dim(),
            extensions
        );
    }
    Ok(())
}
