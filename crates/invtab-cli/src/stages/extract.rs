//! Extract stage - convert each input PDF into a text file.

use std::fs;
use std::path::{Path, PathBuf};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use invtab_core::{InvtabConfig, PdfTextExtractor, TextExtractor};

/// Run text extraction over every PDF in the configured input directory.
pub async fn run(config: &InvtabConfig) -> anyhow::Result<()> {
    let input_dir = &config.paths.input_dir;
    if !input_dir.exists() {
        anyhow::bail!("input directory not found: {}", input_dir.display());
    }

    fs::create_dir_all(&config.paths.text_dir)?;

    let files = files_with_extension(input_dir, "pdf")?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let extractor = PdfTextExtractor::new();
    let mut processed = 0usize;

    for path in &files {
        match extract_one(&extractor, path, &config.paths.text_dir) {
            Ok(output_path) => {
                processed += 1;
                tracing::info!(
                    "extracted {} -> {}",
                    path.display(),
                    output_path.display()
                );
            }
            Err(e) => {
                warn!("failed to extract {}: {}", path.display(), e);
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    println!(
        "{} Extracted text from {} of {} PDF files",
        style("✓").green(),
        processed,
        files.len()
    );

    if processed == 0 {
        anyhow::bail!("no PDF files were extracted from {}", input_dir.display());
    }

    Ok(())
}

fn extract_one(
    extractor: &PdfTextExtractor,
    path: &Path,
    text_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let text = extractor.extract_text(path)?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let output_path = text_dir.join(format!("{}.txt", stem));

    fs::write(&output_path, text)?;
    Ok(output_path)
}

/// List files in `dir` with the given extension, case-insensitive, in
/// directory enumeration order.
pub(crate) fn files_with_extension(dir: &Path, extension: &str) -> std::io::Result<Vec<PathBuf>> {
    Ok(fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(extension))
        })
        .collect())
}
