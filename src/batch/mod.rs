//! Batch renaming of files by detected content.
//!
//! Every input is sniffed (unless its extension is already trusted), copied
//! into a staging directory under its output name, and listed in a
//! [`BatchReport`]. The report is written into the staging directory as a
//! formatted XLSX workbook (and optionally CSV), and the files of the run
//! can be packaged as a single ZIP archive.
//!
//! # Examples
//!
//! ```rust,no_run
//! use retype::batch::{BatchOptions, process_mixed};
//!
//! let options = BatchOptions::new("renamed")
//!     .with_csv(true)
//!     .with_package("renamed_result.zip");
//! let report = process_mixed(&["IMG_0001", "uploads.zip"], &options)?;
//! println!("{}", report.summary());
//! # Ok::<(), retype::Error>(())
//! ```

// Submodule declarations
pub mod naming;
pub mod package;
pub mod report;
pub mod xlsx;

// Re-exports
pub use naming::{NameSource, PlannedName, StagingNames, plan_output_name};
pub use package::package_files;
pub use report::{BatchReport, FormatCounts, ReportRow, summary, write_csv, write_csv_file};
pub use xlsx::{write_xlsx, write_xlsx_file};

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::common::error::{Error, Result};
use crate::detection::{SAMPLE_SIZE, detect_format_with_sample_size};

/// Configuration for a batch run.
///
/// # Examples
///
/// ```rust
/// use retype::batch::BatchOptions;
///
/// let options = BatchOptions::new("out")
///     .with_csv(true)
///     .with_parallel(false);
/// assert_eq!(options.csv_file_name, "rename_report.csv");
/// assert!(options.write_xlsx);
/// ```
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Directory that receives the renamed copies (created if missing)
    pub staging_dir: PathBuf,
    /// Whether to write the XLSX report into the staging directory
    pub write_xlsx: bool,
    /// File name of the XLSX report
    pub xlsx_file_name: String,
    /// Whether to write the CSV report into the staging directory
    pub write_csv: bool,
    /// File name of the CSV report
    pub csv_file_name: String,
    /// Where to write a ZIP of this run's output, if anywhere.
    ///
    /// The package holds the files copied in this run plus its reports;
    /// files left in the staging directory by earlier runs are not included.
    pub package_path: Option<PathBuf>,
    /// Number of leading bytes handed to the detection engine
    pub sample_size: usize,
    /// Detect files on the rayon thread pool
    pub parallel: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            staging_dir: PathBuf::from("retype_output"),
            write_xlsx: true,
            xlsx_file_name: "rename_report.xlsx".to_owned(),
            write_csv: false,
            csv_file_name: "rename_report.csv".to_owned(),
            package_path: None,
            sample_size: SAMPLE_SIZE,
            parallel: true,
        }
    }
}

impl BatchOptions {
    /// Options with defaults and the given staging directory.
    pub fn new(staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
            ..Self::default()
        }
    }

    /// Set whether the XLSX report is written.
    #[inline]
    pub fn with_xlsx(mut self, write_xlsx: bool) -> Self {
        self.write_xlsx = write_xlsx;
        self
    }

    /// Set the XLSX report file name.
    #[inline]
    pub fn with_xlsx_file_name(mut self, name: impl Into<String>) -> Self {
        self.xlsx_file_name = name.into();
        self
    }

    /// Set whether the CSV report is written.
    #[inline]
    pub fn with_csv(mut self, write_csv: bool) -> Self {
        self.write_csv = write_csv;
        self
    }

    /// Set the CSV report file name.
    #[inline]
    pub fn with_csv_file_name(mut self, name: impl Into<String>) -> Self {
        self.csv_file_name = name.into();
        self
    }

    /// Package this run's output into a ZIP at `path`.
    #[inline]
    pub fn with_package(mut self, path: impl Into<PathBuf>) -> Self {
        self.package_path = Some(path.into());
        self
    }

    /// Set the detection sample length (at least one byte).
    #[inline]
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size.max(1);
        self
    }

    /// Enable or disable parallel detection.
    #[inline]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Per-input decision, made before anything is copied.
#[derive(Debug)]
struct Analysis {
    source: PathBuf,
    original_name: String,
    plan: PlannedName,
}

fn file_name_of(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| Error::InvalidPath(path.display().to_string()))
}

fn analyze(path: &Path, sample_size: usize) -> Result<Analysis> {
    let original_name = file_name_of(path)?;
    let plan = plan_output_name(&original_name, || {
        let mut file = File::open(path)?;
        detect_format_with_sample_size(&mut file, sample_size)
    })?;

    debug!(
        file = %path.display(),
        output = %plan.output_name,
        extension = plan.extension.as_deref().unwrap_or(""),
        source = ?plan.source,
        "planned"
    );

    Ok(Analysis {
        source: path.to_path_buf(),
        original_name,
        plan,
    })
}

/// Names already present at the top level of `dir`.
fn existing_names(dir: &Path) -> Result<StagingNames> {
    let mut names = StagingNames::new();
    for entry in fs::read_dir(dir)? {
        names.reserve(&entry?.file_name().to_string_lossy());
    }
    Ok(names)
}

/// File name of `package` if it would be written directly into `staging`.
fn package_name_in(staging: &Path, package: &Path) -> Result<Option<String>> {
    let parent = match package.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.exists() || parent.canonicalize()? != staging.canonicalize()? {
        return Ok(None);
    }
    Ok(package.file_name().map(|name| name.to_string_lossy().into_owned()))
}

/// Detect, rename and copy `paths` into the staging directory.
///
/// Rows come back in input order even when detection runs in parallel.
/// Output names never overwrite each other, the reports, the package or
/// files already in the staging directory; a clash gets a ` (n)` suffix.
pub fn process_files<P>(paths: &[P], options: &BatchOptions) -> Result<BatchReport>
where
    P: AsRef<Path> + Sync,
{
    let staging = options.staging_dir.as_path();
    fs::create_dir_all(staging)?;
    info!(inputs = paths.len(), staging = %staging.display(), "processing batch");

    let analyses: Vec<Analysis> = if options.parallel {
        paths
            .par_iter()
            .map(|path| analyze(path.as_ref(), options.sample_size))
            .collect::<Result<_>>()?
    } else {
        paths
            .iter()
            .map(|path| analyze(path.as_ref(), options.sample_size))
            .collect::<Result<_>>()?
    };

    let mut names = existing_names(staging)?;
    if let Some(package) = &options.package_path
        && let Some(name) = package_name_in(staging, package)?
    {
        names.reserve(&name);
    }
    let xlsx_name = options.write_xlsx.then(|| names.claim(&options.xlsx_file_name));
    let csv_name = options.write_csv.then(|| names.claim(&options.csv_file_name));

    let mut rows = Vec::with_capacity(analyses.len());
    for analysis in analyses {
        let output_name = names.claim(&analysis.plan.output_name);
        fs::copy(&analysis.source, staging.join(&output_name))?;
        rows.push(ReportRow {
            original_name: analysis.original_name,
            output_name,
            extension: analysis.plan.extension,
        });
    }

    let xlsx_path = xlsx_name.as_ref().map(|name| staging.join(name));
    if let Some(path) = &xlsx_path {
        write_xlsx_file(path, &rows)?;
        debug!(report = %path.display(), "xlsx report written");
    }

    let csv_path = csv_name.as_ref().map(|name| staging.join(name));
    if let Some(path) = &csv_path {
        write_csv_file(path, &rows)?;
        debug!(report = %path.display(), "csv report written");
    }

    let package_path = match &options.package_path {
        Some(path) => {
            let members: Vec<&str> = rows
                .iter()
                .map(|row| row.output_name.as_str())
                .chain(xlsx_name.as_deref())
                .chain(csv_name.as_deref())
                .collect();
            let written = package_files(staging, &members, path)?;
            info!(package = %path.display(), files = written, "batch output packaged");
            Some(path.clone())
        }
        None => None,
    };

    let counts = FormatCounts::from_rows(&rows);
    info!(files = rows.len(), detected = counts.total(), "batch complete");

    Ok(BatchReport {
        rows,
        counts,
        staging_dir: staging.to_path_buf(),
        xlsx_path,
        csv_path,
        package_path,
    })
}

/// Whether an input should be expanded rather than renamed.
fn is_zip_input(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

/// Regular files under `dir`, sorted by path.
fn collect_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Extract `zip_path` into `target` and list the extracted files.
fn expand_archive(zip_path: &Path, target: &Path) -> Result<Vec<PathBuf>> {
    let mut archive = ZipArchive::new(BufReader::new(File::open(zip_path)?))?;
    archive.extract(target)?;
    debug!(archive = %zip_path.display(), members = archive.len(), "expanded");
    collect_files(target)
}

/// Process every file inside a single ZIP archive.
pub fn process_archive<P: AsRef<Path>>(zip_path: P, options: &BatchOptions) -> Result<BatchReport> {
    let workspace = tempfile::tempdir()?;
    let files = expand_archive(zip_path.as_ref(), workspace.path())?;
    process_files(&files, options)
}

/// Process loose files and ZIP archives together.
///
/// Each `.zip` input is expanded into its own scratch directory and its
/// files take the archive's place in the input order.
pub fn process_mixed<P: AsRef<Path>>(paths: &[P], options: &BatchOptions) -> Result<BatchReport> {
    let workspace = tempfile::tempdir()?;
    let mut scratch_names = StagingNames::new();
    let mut collected = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if !is_zip_input(path) {
            collected.push(path.to_path_buf());
            continue;
        }

        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidPath(path.display().to_string()))?;
        let target = workspace.path().join(scratch_names.claim(&stem));
        fs::create_dir_all(&target)?;
        collected.extend(expand_archive(path, &target)?);
    }

    process_files(&collected, options)
}
