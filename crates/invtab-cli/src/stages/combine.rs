//! Combine stage - merge per-document CSVs into the final table.

use console::style;

use invtab_core::{InvtabConfig, combine_tables};

/// Merge every per-document CSV into the combined output file.
pub async fn run(config: &InvtabConfig) -> anyhow::Result<()> {
    let report = combine_tables(&config.paths.table_dir, &config.paths.combined_output)?;

    println!(
        "{} Combined {} of {} CSV files, {} data rows -> {}",
        style("✓").green(),
        report.files_processed,
        report.files_found,
        report.rows_written,
        config.paths.combined_output.display()
    );

    Ok(())
}
