use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

const TMP_SUFFIX: &str = "tmp";

/// Sibling staging path: `budget.json` becomes `budget.json.tmp`.
pub fn staging_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Replaces `path` with `data`. The bytes go to the staging file first and
/// are renamed over the target, so a failed write leaves the old content.
pub fn replace_file(path: &Path, data: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = staging_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    drop(file);
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn staging_path_keeps_the_extension() {
        assert_eq!(
            staging_path(Path::new("data/budget.json")),
            PathBuf::from("data/budget.json.tmp")
        );
        assert_eq!(
            staging_path(Path::new("data/budget")),
            PathBuf::from("data/budget.tmp")
        );
    }

    #[test]
    fn replace_creates_parents_and_leaves_no_staging_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("entry.json");
        replace_file(&path, "first").unwrap();
        replace_file(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn blocked_staging_file_keeps_previous_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("entry.json");
        replace_file(&path, "kept").unwrap();
        fs::create_dir_all(staging_path(&path)).unwrap();

        assert!(replace_file(&path, "lost").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "kept");
    }
}
