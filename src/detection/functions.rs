//! Core file format detection functions.
//!
//! [`detect`] is the single entry point of the engine; the other functions
//! are conveniences that build the sample and the full-content provider
//! from a byte slice, a reader or a path.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::{trace, warn};

use super::signatures::{self, ContainerFamily, SignatureLabel};
use super::types::FormatTag;
use super::utils::{SAMPLE_SIZE, window};
use super::{archive, ebml, isobmff, ogg, riff, text};
use crate::common::error::Result;

/// Detect the format of a file from its leading bytes.
///
/// `sample` is a bounded prefix of the file (normally [`SAMPLE_SIZE`]
/// bytes). `full_content` is only called when the sample starts with a ZIP
/// local file header, since telling ZIP-based formats apart needs the
/// central directory at the end of the file. An error from the provider is
/// treated like a malformed archive.
///
/// Detection order:
/// 1. ISO-BMFF `ftyp` box (HEIC, then MP4)
/// 2. The ordered signature table; container families are resolved by
///    their disambiguator
/// 3. The text fallback (JSON, HTML, XML, plain text)
///
/// # Returns
///
/// * `Some(FormatTag)` if the content was recognized
/// * `None` if nothing matched
///
/// # Examples
///
/// ```rust
/// use std::borrow::Cow;
/// use retype::{FormatTag, detect};
///
/// let png = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";
/// let format = detect(png, || Ok(Cow::Borrowed(png.as_slice())));
/// assert_eq!(format, Some(FormatTag::Png));
/// ```
pub fn detect<'a, F>(sample: &[u8], full_content: F) -> Option<FormatTag>
where
    F: FnOnce() -> io::Result<Cow<'a, [u8]>>,
{
    if let Some(format) = isobmff::detect_iso_bmff(sample) {
        return Some(format);
    }

    if let Some(entry) = signatures::lookup(sample) {
        trace!(prefix = ?entry.prefix, "signature matched");
        return match entry.label {
            SignatureLabel::Format(format) => Some(format),
            SignatureLabel::Family(family) => resolve_family(family, sample, full_content),
        };
    }

    text::detect_text_format(sample)
}

fn resolve_family<'a, F>(
    family: ContainerFamily,
    sample: &[u8],
    full_content: F,
) -> Option<FormatTag>
where
    F: FnOnce() -> io::Result<Cow<'a, [u8]>>,
{
    match family {
        ContainerFamily::Riff => riff::detect_riff_format(sample),
        ContainerFamily::Ebml => Some(ebml::detect_ebml_format(sample)),
        ContainerFamily::Ogg => Some(ogg::detect_ogg_format(sample)),
        ContainerFamily::Zip => match full_content() {
            Ok(content) => Some(archive::detect_zip_format(&content)),
            Err(err) => {
                warn!(error = %err, "could not read archive content, using generic zip");
                Some(FormatTag::Zip)
            }
        },
    }
}

/// Detect file format from a byte slice holding the whole file.
///
/// # Examples
///
/// ```rust
/// use retype::{FormatTag, detect_file_format_from_bytes};
///
/// assert_eq!(detect_file_format_from_bytes(br#"{"a":1}"#), Some(FormatTag::Json));
/// assert_eq!(detect_file_format_from_bytes(&[0xC3, 0x28, 0x00]), None);
/// ```
pub fn detect_file_format_from_bytes(bytes: &[u8]) -> Option<FormatTag> {
    detect(window(bytes, SAMPLE_SIZE), || Ok(Cow::Borrowed(bytes)))
}

/// Read at most `limit` bytes from the current position of `reader`.
///
/// Only the bytes actually read are allocated, so an oversized `limit` on
/// a short stream is cheap.
pub fn read_sample<R: Read>(reader: &mut R, limit: usize) -> io::Result<Vec<u8>> {
    let mut sample = Vec::with_capacity(limit.min(SAMPLE_SIZE));
    reader.take(limit as u64).read_to_end(&mut sample)?;
    Ok(sample)
}

/// Detect file format from any reader that implements Read + Seek.
///
/// Only the sample is read up front; the rest of the stream is read (from
/// the start) only for ZIP-signature content.
pub fn detect_format_from_reader<R: Read + Seek>(reader: &mut R) -> io::Result<Option<FormatTag>> {
    detect_format_with_sample_size(reader, SAMPLE_SIZE)
}

/// Like [`detect_format_from_reader`], with a custom sample length.
pub fn detect_format_with_sample_size<R: Read + Seek>(
    reader: &mut R,
    sample_size: usize,
) -> io::Result<Option<FormatTag>> {
    reader.seek(SeekFrom::Start(0))?;
    let sample = read_sample(reader, sample_size)?;

    Ok(detect(&sample, || {
        reader.seek(SeekFrom::Start(0))?;
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;
        Ok(Cow::Owned(content))
    }))
}

/// Detect file format from a file path.
///
/// # Examples
///
/// ```rust,no_run
/// use retype::detect_file_format;
///
/// match detect_file_format("upload.bin")? {
///     Some(format) => println!("looks like .{format}"),
///     None => println!("unknown"),
/// }
/// # Ok::<(), retype::Error>(())
/// ```
pub fn detect_file_format<P: AsRef<Path>>(path: P) -> Result<Option<FormatTag>> {
    let mut file = File::open(path)?;
    Ok(detect_format_from_reader(&mut file)?)
}
