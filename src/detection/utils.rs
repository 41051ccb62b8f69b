//! Utility functions and constants for file format detection.

use memchr::memmem;

/// Default length of the sample handed to the detection engine.
pub const SAMPLE_SIZE: usize = 4096;

// Magic number signatures used outside the generic table
pub const ZIP_SIGNATURE: &[u8] = &[0x50, 0x4B, 0x03, 0x04];
pub const FTYP_MARKER: &[u8] = b"ftyp";

/// Bounded prefix of `data`, never longer than `limit`.
#[inline]
pub fn window(data: &[u8], limit: usize) -> &[u8] {
    &data[..data.len().min(limit)]
}

/// Whether `pattern` occurs anywhere in the first `limit` bytes of `data`.
#[inline]
pub fn contains_within(data: &[u8], limit: usize, pattern: &[u8]) -> bool {
    memmem::find(window(data, limit), pattern).is_some()
}

/// Whether `pattern` occurs anywhere in `buffer`.
#[inline]
pub fn find_in_buffer(buffer: &[u8], pattern: &[u8]) -> bool {
    memmem::find(buffer, pattern).is_some()
}
