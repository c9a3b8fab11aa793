//! Persisting generated classes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{GenError, GenResult};

pub const FILE_EXTENSION: &str = "java";

/// Rendered source for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub record_name: String,
    pub contents: String,
}

impl GeneratedFile {
    pub fn file_name(&self) -> String {
        format!("{}.{FILE_EXTENSION}", self.record_name)
    }
}

/// `a.b.c` → `<root>/a/b/c`; an empty package is the root itself.
pub fn package_dir(output_root: &Path, package: &str) -> PathBuf {
    package
        .split('.')
        .filter(|segment| !segment.is_empty())
        .fold(output_root.to_path_buf(), |dir, segment| dir.join(segment))
}

/// Write one file per record under the package directory.
///
/// Existing files are overwritten. The first failure stops the run; files
/// written before it stay on disk.
pub fn write(package: &str, output_root: &Path, files: &[GeneratedFile]) -> GenResult<Vec<PathBuf>> {
    let dir = package_dir(output_root, package);
    fs::create_dir_all(&dir).map_err(|source| GenError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = dir.join(file.file_name());
        fs::write(&path, &file.contents).map_err(|source| GenError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "generated class");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, contents: &str) -> GeneratedFile {
        GeneratedFile { record_name: name.to_string(), contents: contents.to_string() }
    }

    #[test]
    fn package_maps_to_nested_directories() {
        let root = Path::new("/out");
        assert_eq!(package_dir(root, "base.pojo"), PathBuf::from("/out/base/pojo"));
        assert_eq!(package_dir(root, ""), PathBuf::from("/out"));
    }

    #[test]
    fn writes_one_file_per_record_and_is_rerunnable() {
        let tmp = tempfile::tempdir().unwrap();
        let files = [file("User", "class User {}"), file("Address", "class Address {}")];

        let first = write("com.example", tmp.path(), &files).unwrap();
        let second = write("com.example", tmp.path(), &files).unwrap();
        assert_eq!(first, second);

        let dir = tmp.path().join("com").join("example");
        assert_eq!(fs::read_to_string(dir.join("User.java")).unwrap(), "class User {}");
        assert_eq!(fs::read_to_string(dir.join("Address.java")).unwrap(), "class Address {}");
    }

    #[test]
    fn overwrites_existing_files() {
        let tmp = tempfile::tempdir().unwrap();
        write("p", tmp.path(), &[file("A", "old")]).unwrap();
        write("p", tmp.path(), &[file("A", "new")]).unwrap();
        assert_eq!(fs::read_to_string(tmp.path().join("p/A.java")).unwrap(), "new");
    }

    #[test]
    fn failure_aborts_remaining_writes_but_keeps_earlier_ones() {
        let tmp = tempfile::tempdir().unwrap();
        // a directory where B.java should go makes that write fail
        fs::create_dir_all(tmp.path().join("p/B.java")).unwrap();
        let files = [file("A", "a"), file("B", "b"), file("C", "c")];

        let err = write("p", tmp.path(), &files).unwrap_err();
        assert!(matches!(&err, GenError::Write { path, .. } if path.ends_with("B.java")));
        assert!(tmp.path().join("p/A.java").is_file());
        assert!(!tmp.path().join("p/C.java").exists());
    }

    #[test]
    fn unusable_output_root_is_a_create_dir_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "not a dir").unwrap();

        let err = write("p", &blocker, &[file("A", "a")]).unwrap_err();
        assert!(matches!(err, GenError::CreateDir { .. }));
    }
}
