//! CLI application for converting invoice PDFs into a combined CSV table.

mod stages;

use clap::Parser;
use console::style;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use invtab_core::InvtabConfig;

/// Invoice tabulator - convert invoice PDFs into one combined CSV
#[derive(Parser)]
#[command(name = "invtab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Only extract text from PDFs
    #[arg(long, conflicts_with_all = ["convert_only", "combine_only"])]
    extract_only: bool,

    /// Only convert text files to CSV
    #[arg(long, conflicts_with = "combine_only")]
    convert_only: bool,

    /// Only combine existing CSV files
    #[arg(long)]
    combine_only: bool,

    /// Skip the CSV combination step
    #[arg(long)]
    skip_combine: bool,

    /// Log the quantity x unit price arithmetic check for each item
    #[arg(long)]
    validate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = if let Some(path) = cli.config.as_deref() {
        InvtabConfig::from_file(std::path::Path::new(path))?
    } else {
        InvtabConfig::default()
    };

    let run_extract = !(cli.convert_only || cli.combine_only);
    let run_convert = !(cli.extract_only || cli.combine_only);
    let run_combine = !(cli.extract_only || cli.convert_only || cli.skip_combine);

    let mut success = true;

    if run_extract {
        println!("=== STEP 1: Converting PDFs to text files ===");
        if let Err(e) = stages::extract::run(&config).await {
            println!(
                "{} PDF extraction encountered issues: {}",
                style("⚠").yellow(),
                e
            );
            success = false;
        }
    }

    if run_convert {
        println!();
        println!("=== STEP 2: Converting text files to CSV ===");
        if let Err(e) = stages::convert::run(&config, cli.validate).await {
            println!(
                "{} CSV conversion encountered issues: {}",
                style("⚠").yellow(),
                e
            );
            success = false;
        }
    }

    if run_combine {
        println!();
        println!("=== STEP 3: Combining all CSVs into a single file ===");
        if let Err(e) = stages::combine::run(&config).await {
            println!(
                "{} CSV combination encountered issues: {}",
                style("⚠").yellow(),
                e
            );
            success = false;
        }
    }

    println!();
    if success {
        println!(
            "{} Complete workflow processed successfully",
            style("✓").green()
        );
    } else {
        println!(
            "{} Workflow completed with warnings or errors",
            style("⚠").yellow()
        );
    }

    Ok(())
}
