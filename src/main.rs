use anyhow::{Context, Result};
use bsvsyn_frontend::config::{find_config, OutputFormat};
use bsvsyn_frontend::{parse_with_config, tokenize, Config, Diagnostic, SyntaxKind, SyntaxTree};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};

/// bsvsyn - Syntax front-end for Bluespec SystemVerilog
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to the nearest bsvsyn.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse files and print their syntax trees
    Parse {
        /// Source files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Print the syntax tree (the default when --tokens is not given)
        #[arg(long)]
        tree: bool,

        /// Print the token stream, trivia included
        #[arg(long)]
        tokens: bool,
    },

    /// Parse files and report diagnostics only
    Check {
        /// Source files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// One row of `--tokens` output
#[derive(Serialize)]
struct TokenRow {
    kind: String,
    text: String,
    start: usize,
    end: usize,
    line: usize,
    column: usize,
}

/// Everything printed for one input file
#[derive(Serialize)]
struct FileReport {
    file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<Vec<TokenRow>>,
    diagnostics: Vec<Diagnostic>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether every file parsed without diagnostics
fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Parse {
            files,
            format,
            tree,
            tokens,
        } => {
            let config = load_config(cli.config.as_deref(), &files)?;
            let format = format.map(OutputFormat::from).unwrap_or(config.output.format);
            let show_tree = tree || !tokens;
            parse_files(&files, &config, format, show_tree, tokens)
        }
        Commands::Check { files } => {
            let config = load_config(cli.config.as_deref(), &files)?;
            check_files(&files, &config)
        }
    }
}

/// Load the configuration named on the command line, or the nearest
/// `bsvsyn.toml` above the first input file
fn load_config(explicit: Option<&Path>, files: &[PathBuf]) -> Result<Config> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => files.first().and_then(|f| find_config(f)),
    };

    match path {
        Some(path) => {
            info!("Using configuration {}", path.display());
            Config::from_path(&path)
                .with_context(|| format!("failed to load configuration {}", path.display()))
        }
        None => {
            debug!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Read and parse one file, tagging diagnostics with its path
fn parse_file(path: &Path, config: &Config) -> Result<(String, SyntaxTree, Vec<Diagnostic>)> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    info!("Parsing {}", path.display());

    let (tree, diagnostics) = parse_with_config(&source, &config.parser);
    let diagnostics = diagnostics
        .into_iter()
        .map(|mut d| {
            d.span = d.span.with_file(path.to_path_buf());
            d
        })
        .collect();
    Ok((source, tree, diagnostics))
}

fn token_rows(source: &str, tree: &SyntaxTree) -> Vec<TokenRow> {
    tokenize(source)
        .into_iter()
        .map(|t| {
            let (line, column) = tree.line_col(t.span.start);
            TokenRow {
                kind: format!("{:?}", SyntaxKind::from(t.token)),
                text: source[t.span.clone()].to_string(),
                start: t.span.start,
                end: t.span.end,
                line,
                column,
            }
        })
        .collect()
}

fn parse_files(
    files: &[PathBuf],
    config: &Config,
    format: OutputFormat,
    show_tree: bool,
    show_tokens: bool,
) -> Result<bool> {
    let mut reports = Vec::new();

    for file in files {
        let (source, tree, diagnostics) = parse_file(file, config)?;
        reports.push(FileReport {
            file: file.clone(),
            tree: show_tree.then(|| tree.debug_dump()),
            tokens: show_tokens.then(|| token_rows(&source, &tree)),
            diagnostics,
        });
    }

    let clean = reports.iter().all(|r| r.diagnostics.is_empty());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Text => {
            for report in &reports {
                println!("== {}", report.file.display());
                if let Some(tokens) = &report.tokens {
                    for row in tokens {
                        println!(
                            "{:>4}:{:<3} {:<16} {:?}",
                            row.line, row.column, row.kind, row.text
                        );
                    }
                }
                if let Some(tree) = &report.tree {
                    print!("{}", tree);
                }
                for diagnostic in &report.diagnostics {
                    println!("{}", diagnostic.render());
                }
            }
        }
    }

    Ok(clean)
}

fn check_files(files: &[PathBuf], config: &Config) -> Result<bool> {
    let mut total = 0;
    let mut failed_files = 0;

    for file in files {
        let (_, _, diagnostics) = parse_file(file, config)?;
        if !diagnostics.is_empty() {
            failed_files += 1;
        }
        for diagnostic in &diagnostics {
            println!("{}", diagnostic.render());
        }
        total += diagnostics.len();
    }

    if total == 0 {
        println!("✅ {} file(s) parsed without errors", files.len());
    } else {
        println!("❌ {} error(s) in {} of {} file(s)", total, failed_files, files.len());
    }

    Ok(total == 0)
}
