use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

use ecoscrape::classify::formatter::strip_agency_lead;
use ecoscrape::classify::CategoryClassifier;
use ecoscrape::storage::Dataset;

/// Column added to the dataset
pub const CATEGORY_COLUMN: &str = "category";

/// Re-classify a collected dataset into keyword categories
///
/// Writes the dataset back with a `category` column, to `output` if given
/// or over `input` otherwise.
pub fn classify(input: &Path, output: Option<&Path>, text_column: &str) -> Result<()> {
    let mut dataset = Dataset::load(input)
        .with_context(|| format!("Failed to read dataset {}", input.display()))?;

    let classifier = CategoryClassifier::categorized();
    let labels: Vec<String> = dataset
        .column_values(text_column)
        .with_context(|| format!("Dataset has no '{text_column}' column"))?
        .into_iter()
        .map(|text| {
            let cleaned = strip_agency_lead(&text.to_lowercase());
            classifier.category_label(&cleaned).to_string()
        })
        .collect();

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for label in &labels {
        *counts.entry(label.as_str()).or_insert(0) += 1;
    }

    println!("Category Summary");
    println!("================");
    for (label, count) in &counts {
        println!("  {label:<20} {count}");
    }

    dataset.set_column(CATEGORY_COLUMN, labels)?;

    let target = output.unwrap_or(input);
    let written = dataset
        .with_path(target)
        .flush()
        .with_context(|| format!("Failed to write dataset {}", target.display()))?;

    tracing::info!(path = %written.display(), "Classified dataset written");
    println!("\nWritten to {}", written.display());
    Ok(())
}
