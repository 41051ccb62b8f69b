//! Static catalog of supported formats.
//!
//! Maps a bare extension (`"jpg"`, no dot) to a short description and the
//! software suggested for opening it. The same keys, plus a handful of
//! extensions that are recognised but never produced by detection, make up
//! the set of extensions a batch run trusts without sniffing.

use phf::{phf_map, phf_set};

/// Description used when an extension is not catalogued.
pub const NO_DESCRIPTION: &str = "(no description)";
/// Software placeholder used when an extension is not catalogued.
pub const NO_SOFTWARE: &str = "-";

/// Catalog entry for one extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// What the format is
    pub description: &'static str,
    /// Suggested viewer or editor
    pub software: &'static str,
}

const fn info(description: &'static str, software: &'static str) -> FormatInfo {
    FormatInfo {
        description,
        software,
    }
}

/// Compile-time catalog keyed by lowercase extension.
static FORMAT_INFO: phf::Map<&'static str, FormatInfo> = phf_map! {
    // Images
    "jpg" => info("JPEG image (lossy, photo)", "IrfanView / XnView MP / Photos (Windows)"),
    "png" => info("PNG image (lossless, transparency)", "IrfanView / XnView MP"),
    "gif" => info("GIF image (palette, may be animated)", "XnView MP"),
    "bmp" => info("BMP image (uncompressed bitmap)", "IrfanView / XnView MP"),
    "tiff" => info("TIFF image (multi-page, lossless or lossy)", "IrfanView / XnView MP"),
    "psd" => info("Adobe Photoshop document", "Photopea (web) / GIMP"),
    "webp" => info("WebP image (compressed)", "IrfanView / web browsers"),
    "heic" => info("HEIC/HEIF image (high efficiency)", "CopyTrans HEIC (Windows) / XnView MP"),
    "ico" => info("Icon (favicon/shortcut)", "IrfanView / XnView MP"),

    // Documents
    "pdf" => info("PDF document", "Adobe Reader / SumatraPDF"),
    "docx" => info("Word document (Office Open XML)", "LibreOffice Writer"),
    "xlsx" => info("Excel spreadsheet (Office Open XML)", "LibreOffice Calc"),
    "pptx" => info("PowerPoint presentation (Office Open XML)", "LibreOffice Impress"),
    "odt" => info("ODT document (OpenDocument)", "LibreOffice Writer"),
    "ods" => info("ODS spreadsheet (OpenDocument)", "LibreOffice Calc"),
    "odp" => info("ODP presentation (OpenDocument)", "LibreOffice Impress"),
    "epub" => info("EPUB e-book", "Calibre / SumatraPDF"),

    // Audio
    "mp3" => info("MP3 audio", "VLC / foobar2000"),
    "flac" => info("FLAC audio (lossless)", "VLC / foobar2000"),
    "ogg" => info("OGG/Vorbis audio", "VLC"),
    "opus" => info("Opus audio", "VLC / foobar2000"),
    "wav" => info("WAV audio (RIFF)", "VLC / Audacity"),

    // Video
    "mp4" => info("MP4 video (H.264/H.265)", "VLC"),
    "mkv" => info("Matroska video", "VLC"),
    "webm" => info("WebM video", "VLC"),
    "avi" => info("AVI video (RIFF)", "VLC"),

    // Archives
    "zip" => info("ZIP archive", "7-Zip / PeaZip"),
    "7z" => info("7-Zip archive", "7-Zip / PeaZip"),
    "gz" => info("gzip (stream compression)", "7-Zip / PeaZip"),
    "bz2" => info("bzip2 (stream compression)", "7-Zip / PeaZip"),
    "xz" => info("XZ (stream compression)", "7-Zip / PeaZip"),
    "rar" => info("RAR archive", "PeaZip (free)"),

    // Text
    "json" => info("JSON (structured text)", "VS Code / Notepad++"),
    "xml" => info("XML (structured text)", "VS Code / Notepad++"),
    "html" => info("HTML (web page)", "Web browser / VS Code"),
    "txt" => info("Plain text", "Notepad++ / VS Code"),

    // Other
    "sqlite" => info("SQLite database", "DB Browser for SQLite"),
    "exe" => info("Windows executable (PE)", "-"),
    "elf" => info("ELF executable (Linux/Unix)", "-"),
    "jar" => info("Java archive (ZIP with classes)", "Java Runtime / 7-Zip"),
    "apk" => info("Android package (ZIP)", "Android Studio / APKTool"),
    "woff" => info("WOFF font", "Font viewers / Brotli"),
    "woff2" => info("WOFF2 font", "Font viewers / Brotli"),
    "ttf" => info("TrueType font", "System font viewer"),
    "otf" => info("OpenType font", "System font viewer"),
};

/// Extensions that are trusted as-is but have no catalog entry.
static EXTRA_KNOWN_EXTENSIONS: phf::Set<&'static str> = phf_set! {
    "pages", "numbers", "key", "dex", "oat", "art", "aab", "log",
    "db", "pb", "proto", "nomedia", "gdoc", "gsheet",
};

fn normalize(ext: &str) -> String {
    ext.strip_prefix('.').unwrap_or(ext).to_ascii_lowercase()
}

/// Catalog entry for an extension (case-insensitive, leading dot optional).
pub fn format_info(ext: &str) -> Option<&'static FormatInfo> {
    FORMAT_INFO.get(normalize(ext).as_str())
}

/// Description for an extension, or [`NO_DESCRIPTION`].
pub fn description(ext: &str) -> &'static str {
    format_info(ext).map_or(NO_DESCRIPTION, |info| info.description)
}

/// Suggested software for an extension, or [`NO_SOFTWARE`].
pub fn recommended_software(ext: &str) -> &'static str {
    format_info(ext).map_or(NO_SOFTWARE, |info| info.software)
}

/// Whether a file already carrying `ext` should keep its name untouched.
pub fn is_known_extension(ext: &str) -> bool {
    let ext = normalize(ext);
    FORMAT_INFO.contains_key(ext.as_str()) || EXTRA_KNOWN_EXTENSIONS.contains(ext.as_str())
}

/// All catalogued extensions with their entries (unordered).
pub fn entries() -> impl Iterator<Item = (&'static str, &'static FormatInfo)> {
    FORMAT_INFO.entries().map(|(ext, info)| (*ext, info))
}
