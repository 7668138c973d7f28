//! dtsgen — generate TypeScript declaration files from JSDoc doclet dumps.
//!
//! Reads the JSON doclet dump produced by `jsdoc -X` (or any tool emitting
//! the same record shape), applies the standard upstream filtering
//! (undocumented, ignored, inherited, private), and emits one `.d.ts`
//! document. Two modes:
//!
//! - **stdin mode**: `jsdoc -X src | dtsgen > types.d.ts`
//! - **file mode**: `dtsgen doclets.json -m mylib -o types.d.ts`

mod emit;
mod model;
mod types;

use anyhow::{Context, Result};
use clap::Parser;
use emit::Options;
use model::{Doclet, SymbolTable};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dtsgen",
    about = "Generate TypeScript declarations from a JSDoc doclet dump"
)]
struct Cli {
    /// Doclet dump (JSON array, `jsdoc -X` format). If omitted, reads from stdin.
    input: Option<PathBuf>,

    /// Output file. If omitted, writes to stdout.
    #[arg(short = 'o', long)]
    destination: Option<PathBuf>,

    /// Wrap the whole document in `export = NAME; declare namespace NAME { ... }`
    #[arg(short = 'm', long)]
    module: Option<String>,

    /// Keep private-access symbols (removed by default)
    #[arg(long)]
    private: bool,

    /// Suppress documentation comments in the output
    #[arg(long)]
    no_comments: bool,

    /// Override a recognized option after flag parsing (repeatable).
    /// KEY is one of destination, module, private, comments; the values
    /// `true`, `false` and `null` are interpreted.
    #[arg(short = 'q', long = "query", value_name = "KEY=VALUE")]
    query: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut options = Options {
        destination: cli.destination.clone(),
        module: cli.module.clone(),
        private: cli.private,
        comments: !cli.no_comments,
    };
    for entry in &cli.query {
        apply_query(&mut options, entry);
    }

    let input = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };

    let doclets: Vec<Doclet> =
        serde_json::from_str(&input).context("failed to parse doclet JSON")?;
    let mut table = SymbolTable::new(doclets);

    // The upstream filter contract — the core never sees these records.
    table.remove_where(|d| d.undocumented);
    table.remove_where(|d| d.ignore);
    table.remove_where(|d| d.inherited);
    if !options.private {
        table.remove_where(|d| d.access.as_deref() == Some("private"));
    }

    match options.destination.clone() {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut sink = BufWriter::new(file);
            emit::publish(&mut table, &options, &mut sink)?;
            sink.flush()
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            emit::publish(&mut table, &options, stdout.lock())?;
        }
    }
    Ok(())
}

/// Apply one `KEY=VALUE` override to the resolved options.
fn apply_query(options: &mut Options, entry: &str) {
    let Some((key, value)) = entry.split_once('=') else {
        eprintln!("warning: ignoring malformed query override: {}", entry);
        return;
    };
    match key {
        "destination" => options.destination = query_string(value).map(PathBuf::from),
        "module" => options.module = query_string(value),
        "private" => options.private = query_bool(value),
        "comments" => options.comments = query_bool(value),
        _ => eprintln!("warning: ignoring unknown query override: {}", key),
    }
}

/// `null` clears a string-valued option; anything else is taken verbatim.
fn query_string(value: &str) -> Option<String> {
    match value {
        "null" => None,
        other => Some(other.to_string()),
    }
}

fn query_bool(value: &str) -> bool {
    !matches!(value, "false" | "null")
}
