//! dirscope - Directory structure summarizer with optional AI analysis.
//!
//! Usage:
//!   dirscope --tree [-p PATH]             Print the directory tree
//!   dirscope --size [--dir-totals]        Print the tree with sizes
//!   dirscope --stats                      Print structure statistics
//!   dirscope --json FILE                  Save the structure as JSON
//!   dirscope --ai "QUESTION"              Ask the analysis service about it
//!   dirscope --all                        All of the above
//!   dirscope --help                       Show help

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::Ordering;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

use dirscope_ai::{AiConfig, AiError, AnalysisClient};
use dirscope_render::{
    DEFAULT_PROMPT_DEPTH, DEFAULT_QUESTION, PromptBuilder, RenderError, SizeOptions,
    StructureDocument, render_stats, render_tree, render_tree_with_sizes,
};
use dirscope_scan::{ScanConfig, ScanError, ScanOutcome, Stats, TreeBuilder};

const EXIT_INVALID_ROOT: u8 = 2;
const EXIT_AI_FAILED: u8 = 3;
const EXIT_JSON_FAILED: u8 = 4;
const EXIT_INTERRUPTED: u8 = 130;

/// Most warnings listed individually in the closing summary.
const WARNINGS_SHOWN: usize = 10;

#[derive(Parser)]
#[command(
    name = "dirscope",
    version,
    about = "Summarize a directory structure",
    long_about = "dirscope scans a directory and prints its tree, sizes and statistics,\n\
                  saves the structure as JSON, and can ask an AI service to analyze it.\n\n\
                  The analysis service reads its API key from DEEPSEEK_API_KEY \
                  (a .env file in the working directory is loaded first)."
)]
struct Cli {
    /// Directory to scan
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Print the directory tree
    #[arg(short, long)]
    tree: bool,

    /// Print the directory tree with file sizes
    #[arg(short, long)]
    size: bool,

    /// With --size, also show the total size of each directory
    #[arg(long)]
    dir_totals: bool,

    /// Save the structure as JSON to FILE
    #[arg(short, long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Print structure statistics
    #[arg(long)]
    stats: bool,

    /// Ask the analysis service a question about the structure
    #[arg(short = 'q', long = "ai", value_name = "QUESTION")]
    question: Option<String>,

    /// Outline depth sent to the analysis service
    #[arg(long, default_value_t = DEFAULT_PROMPT_DEPTH)]
    depth: u32,

    /// Tree, statistics, JSON to --output and analysis with a default question
    #[arg(short, long)]
    all: bool,

    /// JSON file written by --all
    #[arg(short, long, default_value = "file_structure.json")]
    output: PathBuf,

    /// Deepest directory level whose contents are listed (0 lists only the root)
    #[arg(long)]
    max_depth: Option<u32>,

    /// Glob pattern for entry names to skip (repeatable)
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Skip hidden entries (names starting with '.')
    #[arg(long)]
    no_hidden: bool,

    /// Analysis request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Log filter, e.g. "debug" or "dirscope_scan=trace" (overrides RUST_LOG)
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
}

/// How the directory tree is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TreeView {
    Plain,
    Sized(SizeOptions),
}

/// The outputs requested on the command line.
#[derive(Debug, Default)]
struct Plan {
    tree: Option<TreeView>,
    stats: bool,
    json: Option<PathBuf>,
    question: Option<String>,
}

impl Plan {
    fn from_cli(cli: &Cli) -> Self {
        // --size switches the tree to its size-annotated form
        let tree = if cli.size {
            Some(TreeView::Sized(SizeOptions {
                directory_totals: cli.dir_totals,
            }))
        } else {
            cli.tree.then_some(TreeView::Plain)
        };

        let mut plan = Self {
            tree,
            stats: cli.stats,
            json: cli.json.clone(),
            question: cli.question.clone(),
        };

        if cli.all {
            plan.tree.get_or_insert(TreeView::Plain);
            plan.stats = true;
            plan.json.get_or_insert_with(|| cli.output.clone());
            plan.question.get_or_insert_with(|| DEFAULT_QUESTION.to_string());
        }

        plan
    }

    /// The document written by `--json`; statistics are embedded only when requested.
    fn saved_document(&self, outcome: &ScanOutcome, stats: &Stats) -> StructureDocument {
        StructureDocument::from_outcome(outcome, self.stats.then(|| stats.clone()))
    }

    fn is_empty(&self) -> bool {
        self.tree.is_none()
            && !self.stats
            && self.json.is_none()
            && self.question.is_none()
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Failed to load .env file: {e}"),
    }

    let plan = Plan::from_cli(&cli);
    if plan.is_empty() {
        eprintln!(
            "Nothing to do. Use --tree, --size, --stats, --json FILE, --ai QUESTION or --all."
        );
        eprintln!("Run `dirscope --help` for details.");
        return Ok(ExitCode::SUCCESS);
    }

    let builder = TreeBuilder::new();
    let cancel = builder.cancel_handle();

    tokio::select! {
        code = run(&cli, plan, builder) => code,
        Ok(()) = tokio::signal::ctrl_c() => {
            cancel.store(true, Ordering::Relaxed);
            eprintln!();
            eprintln!("Interrupted");
            Ok(ExitCode::from(EXIT_INTERRUPTED))
        }
    }
}

fn init_logging(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Scan, render every requested output, and pick the exit code.
async fn run(cli: &Cli, plan: Plan, builder: TreeBuilder) -> Result<ExitCode> {
    let config = match ScanConfig::builder()
        .root(cli.path.clone())
        .max_depth(cli.max_depth)
        .exclude_patterns(cli.exclude.clone())
        .include_hidden(!cli.no_hidden)
        .build()
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(ExitCode::from(EXIT_INVALID_ROOT));
        }
    };

    eprintln!("Scanning {}...", cli.path.display());

    let outcome = match tokio::task::spawn_blocking(move || builder.build(&config))
        .await
        .wrap_err("Scan task failed")?
    {
        Ok(outcome) => outcome,
        Err(ScanError::Interrupted) => return Ok(ExitCode::from(EXIT_INTERRUPTED)),
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(ExitCode::from(EXIT_INVALID_ROOT));
        }
    };

    eprintln!("Scanned in {:.2}s", outcome.scan_duration.as_secs_f64());
    let stats = outcome.stats();

    match plan.tree {
        Some(TreeView::Plain) => print!("{}", render_tree(&outcome.root)),
        Some(TreeView::Sized(options)) => {
            print!("{}", render_tree_with_sizes(&outcome.root, options));
        }
        None => {}
    }

    if plan.stats {
        if plan.tree.is_some() {
            println!();
        }
        print!("{}", render_stats(&stats, &outcome.root_path));
    }

    let json_failed = match &plan.json {
        Some(path) => write_json(&plan.saved_document(&outcome, &stats), path).is_err(),
        None => false,
    };

    let ai_failed = match &plan.question {
        Some(question) => {
            let document = StructureDocument::from_outcome(&outcome, Some(stats));
            analyze(cli, &document, question).await.is_err()
        }
        None => false,
    };

    report_warnings(&outcome);

    let code = if json_failed {
        ExitCode::from(EXIT_JSON_FAILED)
    } else if ai_failed {
        ExitCode::from(EXIT_AI_FAILED)
    } else {
        ExitCode::SUCCESS
    };
    Ok(code)
}

fn write_json(document: &StructureDocument, path: &Path) -> Result<(), RenderError> {
    match document.write_to(path) {
        Ok(()) => {
            eprintln!("Structure saved to {}", path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {e}");
            Err(e)
        }
    }
}

/// Run the analysis step. Failures are reported here and stay isolated.
async fn analyze(cli: &Cli, document: &StructureDocument, question: &str) -> Result<(), AiError> {
    let result: Result<String, AiError> = async {
        let mut config = AiConfig::from_env()?;
        if let Some(secs) = cli.timeout {
            if secs == 0 {
                return Err(AiError::Config("--timeout must be at least 1".to_string()));
            }
            config.timeout_secs = secs;
        }

        let client = AnalysisClient::new(config)?;
        let prompt = PromptBuilder::new(cli.depth).build(document, question);

        eprintln!("Requesting analysis...");
        client.analyze(&prompt).await
    }
    .await;

    match result {
        Ok(answer) => {
            println!();
            println!("AI analysis:");
            println!("{answer}");
            Ok(())
        }
        Err(e) => {
            eprintln!("AI analysis failed: {e}");
            Err(e)
        }
    }
}

fn report_warnings(outcome: &ScanOutcome) {
    if !outcome.has_warnings() {
        return;
    }

    eprintln!();
    eprintln!("{} warning(s) during scan", outcome.warnings.len());
    for warning in outcome.warnings.iter().take(WARNINGS_SHOWN) {
        eprintln!("  {warning}");
    }
    if outcome.warnings.len() > WARNINGS_SHOWN {
        eprintln!("  ... and {} more", outcome.warnings.len() - WARNINGS_SHOWN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirscope_scan::Node;
    use std::time::Duration;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dirscope").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_operation_is_empty_plan() {
        assert!(Plan::from_cli(&parse(&[])).is_empty());
        assert!(Plan::from_cli(&parse(&["--path", "/tmp", "--depth", "2"])).is_empty());
    }

    #[test]
    fn test_all_enables_everything() {
        let plan = Plan::from_cli(&parse(&["--all", "-o", "out.json"]));
        assert_eq!(plan.tree, Some(TreeView::Plain));
        assert!(plan.stats);
        assert_eq!(plan.json, Some(PathBuf::from("out.json")));
        assert_eq!(plan.question.as_deref(), Some(DEFAULT_QUESTION));
    }

    #[test]
    fn test_all_keeps_explicit_outputs() {
        let plan = Plan::from_cli(&parse(&["-a", "-j", "mine.json", "-q", "Is this Rust?"]));
        assert_eq!(plan.json, Some(PathBuf::from("mine.json")));
        assert_eq!(plan.question.as_deref(), Some("Is this Rust?"));
    }

    #[test]
    fn test_size_options() {
        let plan = Plan::from_cli(&parse(&["--size", "--dir-totals"]));
        assert_eq!(
            plan.tree,
            Some(TreeView::Sized(SizeOptions::with_directory_totals()))
        );

        let plan = Plan::from_cli(&parse(&["-s"]));
        assert_eq!(plan.tree, Some(TreeView::Sized(SizeOptions::default())));
    }

    #[test]
    fn test_size_replaces_plain_tree() {
        let plan = Plan::from_cli(&parse(&["--tree", "--size"]));
        assert_eq!(plan.tree, Some(TreeView::Sized(SizeOptions::default())));

        let plan = Plan::from_cli(&parse(&["--all", "--size", "--dir-totals"]));
        assert_eq!(
            plan.tree,
            Some(TreeView::Sized(SizeOptions::with_directory_totals()))
        );
    }

    #[test]
    fn test_saved_document_embeds_stats_only_when_requested() {
        let mut root = Node::new_directory("proj", 0);
        root.push_child(Node::new_file("a.txt", 10, 0));
        let outcome = ScanOutcome::new(root, PathBuf::from("/proj"), Duration::ZERO, Vec::new());
        let stats = outcome.stats();

        let plan = Plan::from_cli(&parse(&["--json", "out.json"]));
        let document = plan.saved_document(&outcome, &stats);
        assert!(document.stats.is_none());
        assert!(!document.to_json().unwrap().contains("\"stats\""));

        let plan = Plan::from_cli(&parse(&["--json", "out.json", "--stats"]));
        let document = plan.saved_document(&outcome, &stats);
        assert_eq!(document.stats, Some(stats));
    }

    #[test]
    fn test_scan_options() {
        let cli = parse(&[
            "--max-depth",
            "1",
            "--exclude",
            "target",
            "--exclude",
            "*.log",
            "--no-hidden",
        ]);
        assert_eq!(cli.max_depth, Some(1));
        assert_eq!(cli.exclude, vec!["target", "*.log"]);
        assert!(cli.no_hidden);
        assert_eq!(cli.output, PathBuf::from("file_structure.json"));
    }
}
