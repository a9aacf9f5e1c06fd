//! delve CLI: search JSON/YAML documents from the shell.
//!
//! Subcommands:
//! - `find <file> <needle>`: print matching dotted paths
//! - `filter <file> <needle>`: print the pruned document
//! - `flat <file> <needle>`: print a `path → value` map
//! - `get <file> <path>`: print the value at a dotted path
//! - `run <config> <file>`: run a search described by a config file
//!
//! Documents are JSON when the file ends in `.json` (or is `-`, stdin),
//! YAML otherwise. Results print as pretty JSON on stdout.

use std::io::Read;
use std::process;

use clap::{Args, Parser, Subcommand};
use delve::{get_by_path, NeedleSpec, SearchConfig, SearchMode, Value, DEFAULT_DEPTH};

#[derive(Parser)]
#[command(name = "delve")]
#[command(about = "Search nested JSON/YAML documents by key and value", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dotted paths whose key or value matches
    Find(SearchArgs),

    /// Print the document pruned to the matching branches
    Filter(SearchArgs),

    /// Print each matching path with its value
    Flat(SearchArgs),

    /// Print the value at a dotted path
    Get {
        /// Document to read (`-` for JSON on stdin)
        file: String,
        /// Dotted path, e.g. `items.0.name`
        path: String,
    },

    /// Run the search described by a JSON/YAML config file
    Run {
        /// Search config (`needle`, `depth`, `mode`)
        config: String,
        /// Document to read (`-` for JSON on stdin)
        file: String,
    },
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Document to read (`-` for JSON on stdin)
    file: String,

    /// What to look for (a substring unless --regex or --number)
    needle: String,

    /// How many levels to descend
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    depth: usize,

    /// Treat the needle as a regular expression
    #[arg(short, long, conflicts_with = "number")]
    regex: bool,

    /// Treat the needle as a number
    #[arg(short, long)]
    number: bool,

    /// Match case-insensitively (ignored with --number)
    #[arg(short, long)]
    ignore_case: bool,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Find(args) => cmd_search(&args, SearchMode::Find),
        Commands::Filter(args) => cmd_search(&args, SearchMode::Filter),
        Commands::Flat(args) => cmd_search(&args, SearchMode::Flat),
        Commands::Get { file, path } => cmd_get(&file, &path),
        Commands::Run { config, file } => cmd_run(&config, &file),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env("DELVE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_search(args: &SearchArgs, mode: SearchMode) -> Result<(), String> {
    let config = args.to_config(mode)?;
    let document = load_document(&args.file)?;
    let result = config.run(&document).map_err(|e| e.to_string())?;
    print_json(&result)
}

fn cmd_get(file: &str, path: &str) -> Result<(), String> {
    let document = load_document(file)?;
    let value = get_by_path(&document, path).ok_or_else(|| format!("path \"{path}\" not found"))?;
    print_json(value)
}

fn cmd_run(config_path: &str, file: &str) -> Result<(), String> {
    let config = load_config(config_path)?;
    let document = load_document(file)?;
    let result = config.run(&document).map_err(|e| e.to_string())?;
    print_json(&result)
}

impl SearchArgs {
    fn to_config(&self, mode: SearchMode) -> Result<SearchConfig, String> {
        let needle = if self.number {
            let value = self
                .needle
                .parse::<f64>()
                .map_err(|_| format!("\"{}\" is not a number", self.needle))?;
            NeedleSpec::Number { value }
        } else if self.regex {
            NeedleSpec::Regex {
                value: self.needle.clone(),
                ignore_case: self.ignore_case,
            }
        } else {
            NeedleSpec::Contains {
                value: self.needle.clone(),
                ignore_case: self.ignore_case,
            }
        };

        let config = SearchConfig {
            needle,
            depth: self.depth,
            mode,
        };
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Loading
// ═══════════════════════════════════════════════════════════════════════════════

fn read_source(path: &str) -> Result<String, String> {
    if path == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| format!("failed to read stdin: {e}"))?;
        return Ok(content);
    }
    std::fs::read_to_string(path).map_err(|e| format!("failed to read \"{path}\": {e}"))
}

fn parse_source(path: &str, content: &str) -> Result<serde_json::Value, String> {
    let is_json = path == "-"
        || std::path::Path::new(path)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(content).map_err(|e| format!("JSON parse error: {e}"))
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(content).map_err(|e| format!("YAML parse error: {e}"))
    }
}

fn load_document(path: &str) -> Result<Value, String> {
    let content = read_source(path)?;
    let json = parse_source(path, &content)?;
    tracing::debug!(path, "loaded document");
    Ok(Value::from(json))
}

fn load_config(path: &str) -> Result<SearchConfig, String> {
    let content = read_source(path)?;
    let json = parse_source(path, &content)?;
    SearchConfig::from_value(json).map_err(|e| format!("config invalid: {e}"))
}

fn print_json(value: &Value) -> Result<(), String> {
    let out = serde_json::to_string_pretty(value).map_err(|e| format!("failed to print: {e}"))?;
    println!("{out}");
    Ok(())
}
