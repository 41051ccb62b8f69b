//! ZIP-based format detection.
//!
//! Office Open XML, OpenDocument, EPUB, APK and JAR files are all ZIP
//! archives. They are told apart by the member names and, for the
//! OpenDocument/EPUB family, by the content of the `mimetype` member.

use std::collections::HashSet;
use std::io::{Cursor, Read};

use tracing::debug;
use zip::ZipArchive;

use super::types::FormatTag;
use super::utils::find_in_buffer;

const MIMETYPE_MEMBER: &str = "mimetype";
/// Longest prefix of the `mimetype` member that is inspected.
const MIMETYPE_READ_LIMIT: u64 = 160;

/// Mimetype strings mapped to formats, tested in order with substring
/// matching (template variants such as `...text-template` resolve to the
/// base format).
const MIMETYPE_FORMATS: [(&[u8], FormatTag); 4] = [
    (b"application/epub+zip", FormatTag::Epub),
    (b"application/vnd.oasis.opendocument.text", FormatTag::Odt),
    (b"application/vnd.oasis.opendocument.spreadsheet", FormatTag::Ods),
    (b"application/vnd.oasis.opendocument.presentation", FormatTag::Odp),
];

/// Member names of an archive plus the head of its `mimetype` member.
#[derive(Debug, Clone, Default)]
pub struct ArchiveMemberSet {
    names: HashSet<String>,
    mimetype: Option<Vec<u8>>,
}

impl ArchiveMemberSet {
    /// Open `content` as a ZIP archive and collect its members.
    ///
    /// A `mimetype` member that exists but cannot be read (unsupported
    /// compression, encryption) is recorded as absent content rather than
    /// failing the whole archive.
    pub fn from_bytes(content: &[u8]) -> zip::result::ZipResult<Self> {
        let mut archive = ZipArchive::new(Cursor::new(content))?;
        let names: HashSet<String> = archive.file_names().map(str::to_owned).collect();

        let mimetype = if names.contains(MIMETYPE_MEMBER) {
            read_mimetype(&mut archive)
        } else {
            None
        };

        Ok(Self { names, mimetype })
    }

    /// Build a member set directly, without an archive.
    pub fn from_parts<I, S>(names: I, mimetype: Option<&[u8]>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            mimetype: mimetype.map(<[u8]>::to_vec),
        }
    }

    /// Whether a member with exactly this path exists.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    fn any_starts_with(&self, prefix: &str) -> bool {
        self.names.iter().any(|name| name.starts_with(prefix))
    }

    fn any_ends_with(&self, suffix: &str) -> bool {
        self.names.iter().any(|name| name.ends_with(suffix))
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// First bytes of the `mimetype` member, if one was read.
    pub fn mimetype(&self) -> Option<&[u8]> {
        self.mimetype.as_deref()
    }

    /// Name the archive. First matching rule wins:
    /// Word, Excel, PowerPoint, APK, JAR, then the `mimetype` member,
    /// otherwise plain ZIP.
    pub fn classify(&self) -> FormatTag {
        if self.any_starts_with("word/") {
            return FormatTag::Docx;
        }
        if self.any_starts_with("xl/") {
            return FormatTag::Xlsx;
        }
        if self.any_starts_with("ppt/") {
            return FormatTag::Pptx;
        }

        if self.contains("AndroidManifest.xml") && self.contains("classes.dex") {
            return FormatTag::Apk;
        }

        if self.contains("META-INF/MANIFEST.MF") && self.any_ends_with(".class") {
            return FormatTag::Jar;
        }

        if self.contains(MIMETYPE_MEMBER)
            && let Some(format) = self.mimetype().and_then(detect_format_from_mimetype)
        {
            return format;
        }

        FormatTag::Zip
    }
}

/// Map the content of a `mimetype` member to a format.
pub fn detect_format_from_mimetype(mimetype: &[u8]) -> Option<FormatTag> {
    MIMETYPE_FORMATS
        .iter()
        .find(|(needle, _)| find_in_buffer(mimetype, needle))
        .map(|&(_, format)| format)
}

fn read_mimetype<R: Read + std::io::Seek>(archive: &mut ZipArchive<R>) -> Option<Vec<u8>> {
    let member = archive.by_name(MIMETYPE_MEMBER).ok()?;
    let mut buffer = Vec::with_capacity(MIMETYPE_READ_LIMIT as usize);
    match member.take(MIMETYPE_READ_LIMIT).read_to_end(&mut buffer) {
        Ok(_) => Some(buffer),
        Err(err) => {
            debug!(error = %err, "unreadable mimetype member");
            None
        }
    }
}

/// Resolve a ZIP archive to its concrete format.
///
/// Content that cannot be opened as an archive (truncated, corrupt) is
/// reported as a generic ZIP; this never fails.
pub fn detect_zip_format(content: &[u8]) -> FormatTag {
    match ArchiveMemberSet::from_bytes(content) {
        Ok(members) => members.classify(),
        Err(err) => {
            debug!(error = %err, len = content.len(), "malformed archive, using generic zip");
            FormatTag::Zip
        }
    }
}
