//! File format detection by content.
//!
//! Formats are identified from a bounded sample of the leading bytes,
//! independent of the file name. The engine is stateless: an immutable
//! signature table, one disambiguator per container family and a text
//! fallback for content no binary signature claims.

// Submodule declarations
pub mod archive;
pub mod ebml;
pub mod functions;
pub mod isobmff;
pub mod ogg;
pub mod riff;
pub mod signatures;
pub mod text;
pub mod types;
pub mod utils;

// Re-exports
pub use archive::ArchiveMemberSet;
pub use functions::{
    detect, detect_file_format, detect_file_format_from_bytes, detect_format_from_reader,
    detect_format_with_sample_size, read_sample,
};
pub use signatures::{
    ContainerFamily, SIGNATURE_TABLE, SignatureEntry, SignatureLabel, SignatureTable,
};
pub use types::FormatTag;
pub use utils::SAMPLE_SIZE;
