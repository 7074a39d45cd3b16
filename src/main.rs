//! svtable - Streaming SV Table Reader
//!
//! Prints a delimiter-separated file as a fixed-width table, one batch at a time.

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::io::Write;
use std::path::PathBuf;
use svtable::{
    Delimiter, EncodingStrategy, ParserConfig, RowFilter, TableLoader, TablePipeline,
};

fn cli() -> Command {
    Command::new("svtable")
        .version(svtable::VERSION)
        .about("Render large delimiter-separated files as fixed-width tables")
        .long_about(
            "svtable streams a comma- or pipe-separated file in bounded batches, \
             validates its structure and prints it as a fixed-width table. Rows can \
             be filtered by the value of a named column.",
        )
        .arg(
            Arg::new("filepath")
                .short('f')
                .long("filepath")
                .help("File Path")
                .required(true),
        )
        .arg(
            Arg::new("filtercolumn")
                .short('c')
                .long("filtercolumn")
                .help("Column to be filtered"),
        )
        .arg(
            Arg::new("filtervalue")
                .short('v')
                .long("filtervalue")
                .help("Value to be filtered by"),
        )
        .arg(
            Arg::new("delimiter")
                .short('d')
                .long("delimiter")
                .help("Field delimiter: comma or pipe")
                .default_value("comma"),
        )
        .arg(
            Arg::new("encoding")
                .short('e')
                .long("encoding")
                .help("Decode with this encoding label instead of detecting it"),
        )
        .arg(
            Arg::new("budget")
                .long("budget")
                .help("Characters tokenized per batch")
                .value_parser(clap::value_parser!(usize)),
        )
}

fn build_config(matches: &ArgMatches) -> Result<ParserConfig> {
    let delimiter_name = matches
        .get_one::<String>("delimiter")
        .map(String::as_str)
        .unwrap_or("comma");
    let delimiter = Delimiter::from_name(delimiter_name)
        .with_context(|| format!("Unsupported delimiter: {}", delimiter_name))?;

    let mut config = ParserConfig::default().with_delimiter(delimiter);
    if let Some(label) = matches.get_one::<String>("encoding") {
        config = config.with_encoding(EncodingStrategy::from_label(label)?);
    }
    if let Some(budget) = matches.get_one::<usize>("budget") {
        config = config.with_batch_budget(*budget);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging for development
    env_logger::init();

    let matches = cli().get_matches();
    let file_path = PathBuf::from(
        matches
            .get_one::<String>("filepath")
            .context("file path argument is required")?,
    );

    let config = build_config(&matches)?;
    let filter = RowFilter::from_options(
        matches.get_one::<String>("filtercolumn").map(String::as_str),
        matches.get_one::<String>("filtervalue").map(String::as_str),
    );

    let mut pipeline = TablePipeline::new(&file_path, config, filter)
        .with_context(|| format!("Cannot open {}", file_path.display()))?;

    let stdout = std::io::stdout();
    while !pipeline.end_of_data() {
        let output = pipeline
            .load()
            .await
            .with_context(|| format!("Failed to parse {}", file_path.display()))?;
        let mut out = stdout.lock();
        out.write_all(output.as_bytes())?;
        out.flush()?;
    }

    Ok(())
}
