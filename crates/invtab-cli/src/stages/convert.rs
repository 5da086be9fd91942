//! Convert stage - parse each text file into a per-document CSV.

use std::fs;
use std::path::Path;

use console::style;
use tracing::warn;

use invtab_core::table::RecordWriter;
use invtab_core::{InvoiceLineParser, InvtabConfig, LineParser};

use super::extract::files_with_extension;

/// Run the line-item parser over every text file in the configured text
/// directory, writing one CSV per document.
pub async fn run(config: &InvtabConfig, validate: bool) -> anyhow::Result<()> {
    let input_dir = &config.paths.text_dir;
    if !input_dir.exists() {
        anyhow::bail!("input directory not found: {}", input_dir.display());
    }

    fs::create_dir_all(&config.paths.table_dir)?;

    let parser =
        InvoiceLineParser::new().with_amount_validation(validate || config.parser.validate_amounts);

    let files = files_with_extension(input_dir, "txt")?;
    let mut processed = 0usize;

    for path in &files {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        let output_path = config.paths.table_dir.join(format!("{}.csv", stem));

        match convert_one(&parser, path, &output_path) {
            Ok(items) => {
                processed += 1;
                tracing::info!(
                    "converted {} -> {} ({} items)",
                    path.display(),
                    output_path.display(),
                    items
                );
            }
            Err(e) => {
                warn!("failed to convert {}: {}", path.display(), e);
            }
        }
    }

    println!(
        "{} Converted {} of {} text files to CSV",
        style("✓").green(),
        processed,
        files.len()
    );

    if processed == 0 {
        anyhow::bail!("no text files were converted from {}", input_dir.display());
    }

    Ok(())
}

fn convert_one(parser: &InvoiceLineParser, input: &Path, output: &Path) -> anyhow::Result<usize> {
    let text = fs::read_to_string(input)?;
    let filename = input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");

    let parsed = parser.parse(&text);

    let mut writer = RecordWriter::create(output)?;
    for item in &parsed.items {
        writer.write_item(item, filename)?;
    }
    writer.flush()?;

    Ok(parsed.items_processed)
}
