//! Command-line front end for content-based file type detection.
//!
//! # Usage
//!
//! Print the detected extension of each file:
//! ```sh
//! retype detect IMG_0001 download.bin
//! ```
//!
//! Rename a batch into a staging directory with XLSX and CSV reports and a
//! ZIP of the result:
//! ```sh
//! retype process scans/* uploads.zip -o renamed --csv --zip renamed.zip
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use retype::{BatchOptions, SAMPLE_SIZE, detect_file_format, process_mixed};
use tracing::Level;

/// Identify files by their content and fix their extensions
#[derive(Parser, Debug)]
#[command(
    name = "retype",
    about = "Identify files by their content and fix their extensions",
    version
)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the detected extension of each file
    Detect {
        /// Files to inspect
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },
    /// Copy files into a staging directory under corrected names
    Process {
        /// Files or ZIP archives to process
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Staging directory for the renamed copies
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Skip the XLSX report
        #[arg(long)]
        no_xlsx: bool,

        /// Also write a CSV report into the staging directory
        #[arg(long)]
        csv: bool,

        /// Package this run's output into a ZIP archive
        #[arg(long, value_name = "PATH")]
        zip: Option<PathBuf>,

        /// Number of leading bytes to inspect
        #[arg(long, default_value_t = SAMPLE_SIZE)]
        sample_size: usize,

        /// Detect files one at a time
        #[arg(long)]
        sequential: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run_detect(files: &[PathBuf]) -> ExitCode {
    let mut error_count = 0;

    for file in files {
        match detect_file_format(file) {
            Ok(Some(format)) => println!("{}: {}", file.display(), format),
            Ok(None) => println!("{}: unknown", file.display()),
            Err(e) => {
                eprintln!("✗ {}: {}", file.display(), e);
                error_count += 1;
            },
        }
    }

    if error_count > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run_process(inputs: &[PathBuf], options: &BatchOptions) -> ExitCode {
    match process_mixed(inputs, options) {
        Ok(report) => {
            for row in &report.rows {
                if row.original_name != row.output_name {
                    println!("{} -> {}", row.original_name, row.output_name);
                }
            }
            println!("{}", report.summary());
            println!("\nOutput: {}", report.staging_dir.display());
            if let Some(xlsx) = &report.xlsx_path {
                println!("Report: {}", xlsx.display());
            }
            if let Some(csv) = &report.csv_path {
                println!("Report: {}", csv.display());
            }
            if let Some(package) = &report.package_path {
                println!("Package: {}", package.display());
            }
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Detect { files } => run_detect(&files),
        Command::Process {
            inputs,
            output,
            no_xlsx,
            csv,
            zip,
            sample_size,
            sequential,
        } => {
            let mut options = BatchOptions::new(output)
                .with_xlsx(!no_xlsx)
                .with_csv(csv)
                .with_sample_size(sample_size)
                .with_parallel(!sequential);
            options.package_path = zip;
            run_process(&inputs, &options)
        },
    }
}
