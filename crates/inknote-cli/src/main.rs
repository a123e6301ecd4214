//! Inknote CLI - document recalculation tool

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use inknote::prelude::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "inknote")]
#[command(author, version, about = "Recalculate formulas in block documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recalculate every formula block and output the document
    Calc {
        /// Input document (JSON)
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Apply one text edit, recalculate, and output the document
    Edit {
        /// Input document (JSON)
        input: PathBuf,

        /// Key of the text node to edit
        #[arg(short, long)]
        node: String,

        /// New text for the node
        #[arg(short, long)]
        text: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show information about a document
    Info {
        /// Input document (JSON)
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Calc { input, output } => calc(&input, output.as_deref()),
        Commands::Edit {
            input,
            node,
            text,
            output,
        } => edit(&input, &node, &text, output.as_deref()),
        Commands::Info { input } => show_info(&input),
    }
}

fn load(input: &Path) -> Result<Document> {
    let json = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse '{}'", input.display()))
}

fn save(doc: &Document, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(doc).context("Failed to serialize document")?;

    if let Some(path) = output {
        std::fs::write(path, json).with_context(|| format!("Failed to write '{}'", path.display()))
    } else {
        let mut stdout = io::stdout();
        stdout
            .write_all(json.as_bytes())
            .and_then(|_| stdout.write_all(b"\n"))
            .context("Failed to write to stdout")
    }
}

fn calc(input: &Path, output: Option<&Path>) -> Result<()> {
    let mut doc = load(input)?;

    let stats = doc.recalculate();
    eprintln!(
        "Visited {} formula blocks ({} created, {} replaced, {} unchanged, {} inert)",
        stats.formulas_visited, stats.created, stats.replaced, stats.unchanged, stats.inert_blocks
    );

    save(&doc, output)
}

fn edit(input: &Path, node: &str, text: &str, output: Option<&Path>) -> Result<()> {
    let mut doc = load(input)?;

    let key: NodeKey = node
        .parse()
        .with_context(|| format!("Invalid node key '{}'", node))?;
    if doc.parent_of(key).is_none() {
        bail!("No text node with key {} in '{}'", key, input.display());
    }
    doc.set_node_text(key, text)?;

    let stats = doc.pump_mutations();
    eprintln!(
        "Recalculated in {} passes ({} created, {} replaced, {} unchanged)",
        stats.passes, stats.created, stats.replaced, stats.unchanged
    );

    save(&doc, output)
}

fn show_info(input: &Path) -> Result<()> {
    let doc = load(input)?;

    let formula_count = doc.blocks().filter(|b| b.is_formula()).count();
    println!("File: {}", input.display());
    println!("Blocks: {} ({} formulas)", doc.block_count(), formula_count);
    println!();

    for block in doc.blocks() {
        let kind = match block.kind() {
            BlockKind::Formula => "formula",
            BlockKind::Paragraph => "paragraph",
        };
        println!("  [{}] {}: {:?}", block.key(), kind, block.text_content());
        for child in block.children() {
            let bold = if child.is_bold() { " (bold)" } else { "" };
            println!("      [{}] {:?}{}", child.key(), child.text(), bold);
        }
    }

    Ok(())
}
