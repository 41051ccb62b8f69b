//! ZIP packaging of a batch's output.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use tracing::debug;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::common::error::Result;

/// Archive the named files of `dir` into `output`, deflated, in the given
/// order. Returns the number of files written.
///
/// Only the listed names are packaged; anything else in `dir` (such as the
/// output of an earlier run) is left out.
pub fn package_files<S: AsRef<str>>(dir: &Path, names: &[S], output: &Path) -> Result<usize> {
    let file = File::create(output)?;
    let mut zip_writer = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for name in names {
        let name = name.as_ref();
        debug!(member = name, "packaging");
        zip_writer.start_file(name, options)?;
        io::copy(&mut File::open(dir.join(name))?, &mut zip_writer)?;
    }

    zip_writer.finish()?;
    Ok(names.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn test_package_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"alpha").unwrap();
        std::fs::write(dir.path().join("b.bin"), b"\x00\x01").unwrap();

        let out_dir = tempfile::tempdir().unwrap();
        let output = out_dir.path().join("result.zip");
        assert_eq!(package_files(dir.path(), &["b.bin", "a.txt"], &output).unwrap(), 2);

        let mut archive = ZipArchive::new(File::open(&output).unwrap()).unwrap();
        let names: Vec<_> = archive.file_names().map(str::to_owned).collect();
        assert_eq!(names.len(), 2);

        let mut content = String::new();
        archive.by_name("a.txt").unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "alpha");
    }

    #[test]
    fn test_unlisted_files_are_left_out() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("old.txt"), b"previous run").unwrap();
        std::fs::write(dir.path().join("new.txt"), b"this run").unwrap();
        let output = dir.path().join("result.zip");

        assert_eq!(package_files(dir.path(), &["new.txt"], &output).unwrap(), 1);
        let archive = ZipArchive::new(File::open(&output).unwrap()).unwrap();
        assert_eq!(archive.file_names().collect::<Vec<_>>(), ["new.txt"]);
    }

    #[test]
    fn test_missing_member_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("result.zip");
        let result = package_files(dir.path(), &["absent.txt"], &output);
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }
}
