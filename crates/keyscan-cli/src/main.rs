mod commands;
mod output;

use clap::{Parser, Subcommand};
use keyscan_core::error::KeyscanError;
use keyscan_core::report::DEFAULT_EXPORT_NAME;
use std::path::PathBuf;

use commands::SettingsArgs;

#[derive(Parser)]
#[command(
    name = "keyscan",
    version,
    about = "Find keywords in PDF documents, with OCR for scanned pages"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a PDF for keywords and report where each one was found
    Search {
        /// Path to the PDF file
        input_file: PathBuf,

        /// Keyword to search for (repeatable; newlines separate keywords too)
        #[arg(short = 'k', long = "keyword", value_name = "KEYWORD")]
        keywords: Vec<String>,

        /// Keyword list file: .txt (one per line), .csv or .xlsx (first column)
        #[arg(short = 'f', long = "keywords-file", value_name = "FILE")]
        keywords_file: Option<PathBuf>,

        /// Matching mode: pages (default), lines, table or fields
        #[arg(short, long)]
        mode: Option<String>,

        #[command(flatten)]
        settings: SettingsArgs,

        /// Output format: table (default), json or csv
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the results as CSV (default file: keyword_search_results.csv)
        #[arg(
            short = 'O',
            long = "out",
            value_name = "FILE",
            num_args = 0..=1,
            default_missing_value = DEFAULT_EXPORT_NAME
        )]
        out: Option<PathBuf>,
    },
    /// Extract the header-driven table from a PDF
    Table {
        /// Path to the PDF file
        input_file: PathBuf,

        #[command(flatten)]
        settings: SettingsArgs,

        /// Output format: table (default), json or csv
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the table as CSV to this file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Print the extracted lines of a PDF with their page numbers
    Lines {
        /// Path to the PDF file
        input_file: PathBuf,

        #[command(flatten)]
        settings: SettingsArgs,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        output: String,
    },
    /// Inspect and validate search config files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the default config as JSON
    Show,
    /// Validate a config file
    Validate {
        /// Path to JSON config file
        file: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Search {
            input_file,
            keywords,
            keywords_file,
            mode,
            settings,
            output,
            out,
        } => commands::search::run(
            input_file,
            keywords,
            keywords_file,
            mode.as_deref(),
            &settings,
            &output,
            out,
        ),
        Commands::Table {
            input_file,
            settings,
            output,
            out,
        } => commands::table::run(input_file, &settings, &output, out),
        Commands::Lines {
            input_file,
            settings,
            output,
        } => commands::lines::run(input_file, &settings, &output),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(),
            ConfigAction::Validate { file } => commands::config::validate(&file),
        },
    };

    match result {
        Ok(()) => {}
        Err(KeyscanError::MissingInput(msg)) => {
            eprintln!("warning: {msg}");
        }
        Err(e) if e.is_document_error() => {
            eprintln!("Error: unable to process file: {e}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
