//! `inspect`: show what the extractor sees in one file

use std::path::Path;

use colored::Colorize;
use docsplice_blocks::{CodeBlock, Extraction, SourceUnit};
use docsplice_core::Settings;
use serde_json::{Value, json};

use crate::error::Result;

/// Run the inspect command
pub fn run_inspect(config: Option<&Path>, path: &Path, json: bool) -> Result<()> {
    let settings = Settings::load(path, config)?;
    let extraction = docsplice_core::inspect(path, &settings)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&to_json(&extraction))?);
    } else {
        print_blocks(&extraction);
    }
    Ok(())
}

fn to_json(extraction: &Extraction) -> Value {
    let unit = &extraction.unit;
    json!({
        "module": unit.name(),
        "lines": unit.line_count(),
        "blocks": (0..unit.blocks().len())
            .map(|index| block_json(unit, index))
            .collect::<Vec<_>>(),
        "failures": extraction.failures,
    })
}

fn block_json(unit: &SourceUnit, index: usize) -> Value {
    let block = &unit.blocks()[index];
    let position = block.position();
    json!({
        "name": block.name(),
        "parent": parent_of(unit, index).map(CodeBlock::name),
        "kind": block.kind().as_str(),
        "declaration_start": block.declaration_start(),
        "indent": position.indent_level(),
        "body_start": position.body_start(),
        "body_end": position.body_end(),
        "documentation": block.documentation().map(|doc| json!({
            "body_start": doc.position().body_start(),
            "body_end": doc.position().body_end(),
            "lines": doc.len(),
        })),
    })
}

/// Innermost non-module block containing the block at `index`.
fn parent_of(unit: &SourceUnit, index: usize) -> Option<&CodeBlock> {
    unit.enclosing(index)
        .into_iter()
        .rev()
        .find(|block| !block.is_module())
}

fn print_blocks(extraction: &Extraction) {
    let unit = &extraction.unit;
    println!(
        "{} {} ({} lines)",
        "Inspect".blue().bold(),
        unit.name().yellow(),
        unit.line_count()
    );
    println!();

    for block in unit.blocks() {
        let position = block.position();
        let documentation = match block.documentation() {
            Some(doc) => format!(
                "doc {}..{}",
                doc.position().body_start(),
                doc.position().body_end()
            )
            .green(),
            None => "undocumented".dimmed(),
        };
        println!(
            "  {:<8} {:<32} decl {:>5}  body {:>5}..{:<5} {}",
            block.kind().as_str().cyan(),
            block.name(),
            block.declaration_start(),
            position.body_start(),
            position.body_end(),
            documentation
        );
    }

    if !extraction.failures.is_empty() {
        println!();
        println!("{}", "Skipped:".red().bold());
        for failure in &extraction.failures {
            println!("  {} {}", "!".red(), failure);
        }
    }
}
