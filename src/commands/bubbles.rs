use anyhow::{Context, Result};
use std::path::Path;

use ecoscrape::analytics::{render_svg, CloudLayout, WordFrequencies};
use ecoscrape::storage::Dataset;

/// Count words of a dataset column and render them as an SVG word cloud
pub fn bubbles(input: &Path, output: &Path, top: usize, text_column: &str) -> Result<()> {
    let dataset = Dataset::load(input)
        .with_context(|| format!("Failed to read dataset {}", input.display()))?;

    let texts = dataset
        .column_values(text_column)
        .with_context(|| format!("Dataset has no '{text_column}' column"))?;

    let frequencies = WordFrequencies::from_texts(texts);
    let words = frequencies.top(top);

    println!("Word Frequencies");
    println!("================");
    println!("  {} words, {} distinct", frequencies.total(), frequencies.len());
    for (rank, (word, count)) in words.iter().enumerate() {
        println!("  {:>3}. {word:<24} {count}", rank + 1);
    }

    let svg = render_svg(&words, &CloudLayout::default()).context("Failed to render word cloud")?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(output, svg)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(path = %output.display(), words = words.len(), "Word cloud written");
    println!("\nWord cloud written to {}", output.display());
    Ok(())
}
