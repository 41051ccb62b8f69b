//! Retype - content-based file type detection
//!
//! This library identifies a file's real type from its leading bytes rather
//! than its name, and can rename whole batches of files accordingly.
//!
//! # Features
//!
//! - **Magic numbers**: An ordered signature table covering images, audio,
//!   video, documents, archives, executables and fonts
//! - **Container sniffing**: RIFF (wav/avi/webp), EBML (mkv/webm), OGG
//!   (ogg/opus), ISO-BMFF (mp4/heic) and ZIP (docx/xlsx/pptx/apk/jar/epub/odt/ods/odp)
//! - **Text classification**: JSON, HTML, XML and plain text
//! - **Batch renaming**: Parallel detection, collision-free output names,
//!   formatted XLSX and CSV reports, ZIP packaging
//!
//! Undetected content is always `None`; there is no "unknown" format.
//!
//! # Example - Detecting a byte buffer
//!
//! ```
//! use retype::{FormatTag, detect_file_format_from_bytes};
//!
//! let format = detect_file_format_from_bytes(b"%PDF-1.7\n");
//! assert_eq!(format, Some(FormatTag::Pdf));
//! assert_eq!(format.map(FormatTag::extension), Some("pdf"));
//! ```
//!
//! # Example - Detecting a file
//!
//! ```no_run
//! use retype::detect_file_format;
//!
//! # fn main() -> retype::Result<()> {
//! match detect_file_format("IMG_0001")? {
//!     Some(format) => println!("{format}: {}", format.description()),
//!     None => println!("unknown"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Renaming a batch
//!
//! ```no_run
//! use retype::{BatchOptions, process_mixed};
//!
//! # fn main() -> retype::Result<()> {
//! let options = BatchOptions::new("renamed").with_csv(true);
//! let report = process_mixed(&["scan1", "scan2", "uploads.zip"], &options)?;
//! for row in &report.rows {
//!     println!("{} -> {}", row.original_name, row.output_name);
//! }
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod catalog;
pub mod common;
pub mod detection;

pub use common::error::{Error, Result};

pub use detection::{
    FormatTag, SAMPLE_SIZE, detect, detect_file_format, detect_file_format_from_bytes,
    detect_format_from_reader, detect_format_with_sample_size,
};

pub use batch::{BatchOptions, BatchReport, process_archive, process_files, process_mixed};
