//! Run summary formatting.

use std::time::Duration;

use console::{Term, style};

use repograph_analysis::AnalysisResult;

/// Format a duration as `50ms`, `1.50s` or `2m 5s`.
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print the graph summary table to stderr.
pub fn print_summary(result: &AnalysisResult) {
    let width = (Term::stderr().size().1 as usize).min(60);
    let stats = &result.stats;

    eprintln!("\n{}", style("Repository Graph").bold().underlined());
    eprintln!("{}", "─".repeat(width));

    let rows = [
        ("Files", stats.file_count),
        ("Directories", stats.directory_count),
        ("Functions", stats.function_count),
        ("Import edges", stats.file_edge_count),
        ("Call edges", stats.function_edge_count),
        ("Unresolved imports", stats.unresolved_import_count),
        ("Parse failures", stats.parse_failure_count),
    ];
    for (label, value) in rows {
        eprintln!("  {} {:<20} {}", style("▸").blue(), label, style(value).cyan());
    }
    if stats.llm_edge_count > 0 {
        eprintln!(
            "  {} {:<20} {}",
            style("▸").blue(),
            "Suggested edges",
            style(stats.llm_edge_count).magenta()
        );
    }

    eprintln!("{}", "─".repeat(width));
    eprintln!(
        "  {} {}",
        style("Analyzed in").bold(),
        style(format_duration(Duration::from_millis(stats.duration_ms))).green()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }
}
