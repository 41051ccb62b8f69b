//! Detected format enumeration.

use std::fmt;

/// Formats the detection engine can report.
///
/// Undetected content is represented as `None` by every detection function,
/// so this enum has no "unknown" member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormatTag {
    // Images
    /// JPEG image (.jpg)
    Jpg,
    /// Portable Network Graphics (.png)
    Png,
    /// Graphics Interchange Format (.gif)
    Gif,
    /// Windows bitmap (.bmp)
    Bmp,
    /// Tagged Image File Format (.tiff)
    Tiff,
    /// Adobe Photoshop document (.psd)
    Psd,
    /// WebP image (.webp)
    Webp,
    /// HEIC/HEIF image (.heic)
    Heic,
    /// Windows icon (.ico)
    Ico,

    // Audio
    /// MPEG layer III audio with ID3 tag (.mp3)
    Mp3,
    /// Free Lossless Audio Codec (.flac)
    Flac,
    /// Ogg container, Vorbis or otherwise (.ogg)
    Ogg,
    /// Opus audio in Ogg (.opus)
    Opus,
    /// RIFF WAVE audio (.wav)
    Wav,

    // Video
    /// ISO base media file (.mp4)
    Mp4,
    /// Matroska (.mkv)
    Mkv,
    /// WebM (.webm)
    Webm,
    /// RIFF AVI (.avi)
    Avi,

    // Documents
    /// Portable Document Format (.pdf)
    Pdf,
    /// Word Office Open XML (.docx)
    Docx,
    /// Excel Office Open XML (.xlsx)
    Xlsx,
    /// PowerPoint Office Open XML (.pptx)
    Pptx,
    /// OpenDocument Text (.odt)
    Odt,
    /// OpenDocument Spreadsheet (.ods)
    Ods,
    /// OpenDocument Presentation (.odp)
    Odp,
    /// EPUB e-book (.epub)
    Epub,

    // Archives
    /// Generic ZIP archive (.zip)
    Zip,
    /// Android package (.apk)
    Apk,
    /// Java archive (.jar)
    Jar,
    /// 7-Zip archive (.7z)
    SevenZip,
    /// gzip stream (.gz)
    Gz,
    /// bzip2 stream (.bz2)
    Bz2,
    /// xz stream (.xz)
    Xz,
    /// RAR archive, v4 or v5 (.rar)
    Rar,

    // Executables and data
    /// ELF executable (.elf)
    Elf,
    /// Windows PE executable (.exe)
    Exe,
    /// SQLite 3 database (.sqlite)
    Sqlite,

    // Fonts
    /// Web Open Font Format (.woff)
    Woff,
    /// Web Open Font Format 2 (.woff2)
    Woff2,
    /// TrueType font (.ttf)
    Ttf,
    /// OpenType font with CFF outlines (.otf)
    Otf,

    // Text
    /// JSON (.json)
    Json,
    /// HTML (.html)
    Html,
    /// XML (.xml)
    Xml,
    /// Plain ASCII text (.txt)
    Txt,
}

impl FormatTag {
    /// Every tag, in declaration order.
    pub const ALL: [FormatTag; 45] = [
        Self::Jpg,
        Self::Png,
        Self::Gif,
        Self::Bmp,
        Self::Tiff,
        Self::Psd,
        Self::Webp,
        Self::Heic,
        Self::Ico,
        Self::Mp3,
        Self::Flac,
        Self::Ogg,
        Self::Opus,
        Self::Wav,
        Self::Mp4,
        Self::Mkv,
        Self::Webm,
        Self::Avi,
        Self::Pdf,
        Self::Docx,
        Self::Xlsx,
        Self::Pptx,
        Self::Odt,
        Self::Ods,
        Self::Odp,
        Self::Epub,
        Self::Zip,
        Self::Apk,
        Self::Jar,
        Self::SevenZip,
        Self::Gz,
        Self::Bz2,
        Self::Xz,
        Self::Rar,
        Self::Elf,
        Self::Exe,
        Self::Sqlite,
        Self::Woff,
        Self::Woff2,
        Self::Ttf,
        Self::Otf,
        Self::Json,
        Self::Html,
        Self::Xml,
        Self::Txt,
    ];

    /// File extension for this format, without the leading dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
            Self::Psd => "psd",
            Self::Webp => "webp",
            Self::Heic => "heic",
            Self::Ico => "ico",
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
            Self::Opus => "opus",
            Self::Wav => "wav",
            Self::Mp4 => "mp4",
            Self::Mkv => "mkv",
            Self::Webm => "webm",
            Self::Avi => "avi",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Xlsx => "xlsx",
            Self::Pptx => "pptx",
            Self::Odt => "odt",
            Self::Ods => "ods",
            Self::Odp => "odp",
            Self::Epub => "epub",
            Self::Zip => "zip",
            Self::Apk => "apk",
            Self::Jar => "jar",
            Self::SevenZip => "7z",
            Self::Gz => "gz",
            Self::Bz2 => "bz2",
            Self::Xz => "xz",
            Self::Rar => "rar",
            Self::Elf => "elf",
            Self::Exe => "exe",
            Self::Sqlite => "sqlite",
            Self::Woff => "woff",
            Self::Woff2 => "woff2",
            Self::Ttf => "ttf",
            Self::Otf => "otf",
            Self::Json => "json",
            Self::Html => "html",
            Self::Xml => "xml",
            Self::Txt => "txt",
        }
    }

    /// Parse an extension back into a tag.
    ///
    /// Matching is case-insensitive and accepts an optional leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.strip_prefix('.').unwrap_or(ext);
        Self::ALL
            .into_iter()
            .find(|tag| tag.extension().eq_ignore_ascii_case(ext))
    }

    /// Human-readable description from the format catalog.
    pub fn description(self) -> &'static str {
        crate::catalog::description(self.extension())
    }

    /// Suggested software for opening this format, from the format catalog.
    pub fn recommended_software(self) -> &'static str {
        crate::catalog::recommended_software(self.extension())
    }

    /// Whether this tag was produced by the text fallback rather than a
    /// binary signature.
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Json | Self::Html | Self::Xml | Self::Txt)
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
