//! Parallel per-file extraction.
//!
//! Each worker writes only its own result slot; results come back in input
//! order once every worker has finished.

mod progress;

use std::sync::Arc;

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::{trace, warn};

use crate::config::ProgressFn;
use crate::extractors::{ExtractError, Extractor, ExtractorRegistry, FileExtraction};
use crate::language::Language;

pub(crate) use progress::ProgressReporter;

/// A file that went through its extractor successfully.
#[derive(Debug, Clone)]
pub(crate) struct ExtractedFile {
    pub path: String,
    pub language: Language,
    pub extraction: FileExtraction,
}

#[derive(Debug, Clone)]
pub(crate) struct FailedFile {
    pub path: String,
    pub error: ExtractError,
}

#[derive(Debug, Default)]
pub(crate) struct WalkOutput {
    pub extracted: Vec<ExtractedFile>,
    pub failed: Vec<FailedFile>,
    /// Every path that had an extractor, extracted or not.
    pub supported: Vec<String>,
    /// Inputs with no extractor.
    pub skipped: usize,
}

/// Run extraction over `files` on a pool of `concurrency` workers.
pub(crate) fn walk(
    files: &[(&str, &str)],
    registry: &ExtractorRegistry,
    concurrency: usize,
    on_progress: Option<ProgressFn>,
) -> Result<WalkOutput, rayon::ThreadPoolBuildError> {
    let mut output = WalkOutput::default();
    let mut jobs: Vec<(&str, &str, Arc<dyn Extractor>)> = Vec::new();
    for &(path, content) in files {
        match registry.for_path(path) {
            Some(extractor) => {
                output.supported.push(path.to_string());
                jobs.push((path, content, Arc::clone(extractor)));
            }
            None => {
                trace!(path, "no extractor, skipping");
                output.skipped += 1;
            }
        }
    }

    let reporter = ProgressReporter::new(jobs.len(), on_progress);
    let pool = ThreadPoolBuilder::new().num_threads(concurrency).build()?;
    let results: Vec<Result<FileExtraction, ExtractError>> = pool.install(|| {
        jobs.par_iter()
            .map(|(path, content, extractor)| {
                let result = extractor.extract(path, content);
                reporter.tick();
                result
            })
            .collect()
    });
    reporter.finish();

    for ((path, _, extractor), result) in jobs.iter().zip(results) {
        match result {
            Ok(extraction) => output.extracted.push(ExtractedFile {
                path: path.to_string(),
                language: extractor.language(),
                extraction,
            }),
            Err(error) => {
                warn!(path, %error, "extraction failed");
                output.failed.push(FailedFile {
                    path: path.to_string(),
                    error,
                });
            }
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_input_order_and_splits_outcomes() {
        let registry = ExtractorRegistry::standard(50);
        let files = [
            ("src/b.ts", "export const b = () => 1;"),
            ("bin/tool.exe", "MZ"),
            ("src/bad.ts", "export const = ;"),
            ("src/a.py", "def a():\n    pass\n"),
        ];
        let output = walk(&files, &registry, 2, None).unwrap();

        let extracted: Vec<_> = output.extracted.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(extracted, ["src/b.ts", "src/a.py"]);
        assert_eq!(output.failed.len(), 1);
        assert_eq!(output.failed[0].path, "src/bad.ts");
        assert_eq!(output.supported, ["src/b.ts", "src/bad.ts", "src/a.py"]);
        assert_eq!(output.skipped, 1);
        assert_eq!(output.extracted[1].language, Language::Python);
    }
}
