//! Output-name planning for a batch.
//!
//! A file whose extension is already known keeps its name. Otherwise the
//! content is sniffed, and the detected extension is appended only when the
//! file has no extension at all; a wrong-but-present extension is reported
//! but left in place.

use std::collections::HashSet;
use std::io;
use std::path::Path;

use crate::catalog;
use crate::detection::FormatTag;

/// How an output name was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    /// The existing extension is in the known set; content was not read
    Trusted,
    /// The content was sniffed
    Detected,
}

/// Planned output name and the extension recorded for the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedName {
    pub output_name: String,
    /// Lowercase extension without the dot; `None` when undetected
    pub extension: Option<String>,
    pub source: NameSource,
}

/// Extension of a file name, as `Path::extension` sees it.
///
/// Dotfiles such as `.bashrc` have none; `name.` has an empty one.
pub fn current_extension(name: &str) -> Option<&str> {
    Path::new(name).extension().and_then(|ext| ext.to_str())
}

/// Decide the output name for `name`.
///
/// `detect` is only called when the current extension is not trusted; its
/// I/O error is passed through.
pub fn plan_output_name<F>(name: &str, detect: F) -> io::Result<PlannedName>
where
    F: FnOnce() -> io::Result<Option<FormatTag>>,
{
    let current = current_extension(name);

    if let Some(ext) = current
        && catalog::is_known_extension(ext)
    {
        return Ok(PlannedName {
            output_name: name.to_owned(),
            extension: Some(ext.to_ascii_lowercase()),
            source: NameSource::Trusted,
        });
    }

    let detected = detect()?;
    let output_name = match (detected, current) {
        (Some(tag), None) => format!("{name}.{tag}"),
        _ => name.to_owned(),
    };

    Ok(PlannedName {
        output_name,
        extension: detected.map(|tag| tag.extension().to_owned()),
        source: NameSource::Detected,
    })
}

/// Names already used in the staging directory.
///
/// Comparison ignores ASCII case so that case-insensitive filesystems do
/// not silently overwrite an earlier file.
#[derive(Debug, Default)]
pub struct StagingNames {
    taken: HashSet<String>,
}

impl StagingNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `name` as taken without claiming it for a new file.
    pub fn reserve(&mut self, name: &str) {
        self.taken.insert(name.to_ascii_lowercase());
    }

    /// Reserve `name`, or the first free `stem (n).ext` variant.
    pub fn claim(&mut self, name: &str) -> String {
        if self.taken.insert(name.to_ascii_lowercase()) {
            return name.to_owned();
        }

        let (stem, ext) = match name.rfind('.') {
            Some(dot) if dot > 0 => name.split_at(dot),
            _ => (name, ""),
        };

        (2..)
            .map(|n| format!("{stem} ({n}){ext}"))
            .find(|candidate| self.taken.insert(candidate.to_ascii_lowercase()))
            .unwrap_or_else(|| name.to_owned())
    }

    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_extension() {
        assert_eq!(current_extension("photo.JPG"), Some("JPG"));
        assert_eq!(current_extension("archive.tar.gz"), Some("gz"));
        assert_eq!(current_extension("IMG_0001"), None);
        assert_eq!(current_extension(".bashrc"), None);
        assert_eq!(current_extension("trailing."), Some(""));
    }

    #[test]
    fn test_known_extension_is_trusted_without_detection() {
        let plan = plan_output_name("Report.PDF", || panic!("must not sniff")).unwrap();
        assert_eq!(plan.output_name, "Report.PDF");
        assert_eq!(plan.extension.as_deref(), Some("pdf"));
        assert_eq!(plan.source, NameSource::Trusted);
    }

    #[test]
    fn test_extra_known_extension_is_trusted() {
        let plan = plan_output_name("app.log", || Ok(Some(FormatTag::Txt))).unwrap();
        assert_eq!(plan.output_name, "app.log");
        assert_eq!(plan.extension.as_deref(), Some("log"));
    }

    #[test]
    fn test_missing_extension_is_appended() {
        let plan = plan_output_name("IMG_0001", || Ok(Some(FormatTag::Jpg))).unwrap();
        assert_eq!(plan.output_name, "IMG_0001.jpg");
        assert_eq!(plan.extension.as_deref(), Some("jpg"));
        assert_eq!(plan.source, NameSource::Detected);
    }

    #[test]
    fn test_unknown_extension_is_kept_but_reported() {
        let plan = plan_output_name("scan.dat", || Ok(Some(FormatTag::Png))).unwrap();
        assert_eq!(plan.output_name, "scan.dat");
        assert_eq!(plan.extension.as_deref(), Some("png"));
    }

    #[test]
    fn test_undetected_keeps_name() {
        let plan = plan_output_name("blob", || Ok(None)).unwrap();
        assert_eq!(plan.output_name, "blob");
        assert_eq!(plan.extension, None);
    }

    #[test]
    fn test_detection_error_is_propagated() {
        let result = plan_output_name("blob", || {
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"))
        });
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_staging_names_dedupe() {
        let mut names = StagingNames::new();
        assert_eq!(names.claim("a.jpg"), "a.jpg");
        assert_eq!(names.claim("a.jpg"), "a (2).jpg");
        assert_eq!(names.claim("A.JPG"), "A (3).JPG");
        assert_eq!(names.claim("blob"), "blob");
        assert_eq!(names.claim("blob"), "blob (2)");
        assert_eq!(names.claim(".env"), ".env");
        assert_eq!(names.claim(".env"), ".env (2)");
        assert_eq!(names.len(), 7);
    }

    #[test]
    fn test_reserved_name_is_never_claimed() {
        let mut names = StagingNames::new();
        names.reserve("Bundle.zip");
        names.reserve("bundle.zip");
        assert_eq!(names.len(), 1);
        assert_eq!(names.claim("bundle.zip"), "bundle (2).zip");
    }
}
