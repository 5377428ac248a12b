//! Command-line interface definition.
//!
//! - `repograph analyze <ROOT>` - build the file and function graphs of a directory
//! - `repograph languages` - list recognised extensions and their extractors

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Repograph - dependency and call graphs for multi-language repositories
#[derive(Parser, Debug)]
#[command(
    name = "repograph",
    version,
    about = "Dependency and call graphs for multi-language repositories",
    long_about = "Repograph statically analyzes a repository and produces a file graph\n\
                  (directories, files, import edges) and a function graph (exported\n\
                  functions and the cross-file calls between them). An optional\n\
                  language-model pass can suggest edges static analysis missed."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a repository directory
    Analyze(AnalyzeArgs),

    /// List recognised file extensions
    Languages,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Repository root to analyze
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Write the full result as JSON to FILE (`-` for stdout)
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Maximum number of files to analyze, in discovery order
    #[arg(long, value_name = "N")]
    pub max_files: Option<usize>,

    /// Number of parallel extraction workers
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Skip the language-model enrichment pass
    #[arg(long)]
    pub no_llm: bool,

    /// tsconfig.json / jsconfig.json to read path aliases from
    #[arg(long, value_name = "FILE")]
    pub tsconfig: Option<PathBuf>,

    /// Configuration file (defaults to ROOT/repograph.json)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_analyze_flags() {
        let cli = Cli::try_parse_from([
            "repograph",
            "-v",
            "analyze",
            "repo",
            "--json",
            "-",
            "--max-files",
            "10",
            "--no-llm",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.root, PathBuf::from("repo"));
        assert_eq!(args.json, Some(PathBuf::from("-")));
        assert_eq!(args.max_files, Some(10));
        assert!(args.no_llm);
        assert!(args.concurrency.is_none());
    }

    #[test]
    fn verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["repograph", "-v", "-q", "languages"]).is_err());
    }
}
