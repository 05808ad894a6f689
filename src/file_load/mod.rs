use std::path::{Path, PathBuf};

// One numbered CSV extract for a table, e.g. `person_3.csv`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardFile {
    table: String,
    index: u32,
    path: PathBuf,
}

impl ShardFile {
    pub fn new(base_dir: &Path, table: &str, index: u32) -> Self {
        let path = base_dir.join(Self::file_name_for(table, index));
        Self {
            table: table.to_string(),
            index,
            path,
        }
    }

    fn file_name_for(table: &str, index: u32) -> String {
        format!("{}_{}.csv", table, index)
    }

    pub fn file_name(&self) -> String {
        Self::file_name_for(&self.table, self.index)
    }

    // A shard is only loaded when it is a regular file ending in `.csv`
    pub fn is_loadable(&self) -> bool {
        self.path.is_file() && has_csv_extension(&self.path)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub fn has_csv_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("csv")
}

/// Every candidate shard of `table`, in index order `1..=shard_count`.
pub fn shard_files<'a>(
    base_dir: &'a Path,
    table: &'a str,
    shard_count: u32,
) -> impl Iterator<Item = ShardFile> + 'a {
    (1..=shard_count).map(move |index| ShardFile::new(base_dir, table, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn builds_expected_file_names() {
        let shard = ShardFile::new(Path::new("/data/out"), "drug_exposure", 7);
        assert_eq!(shard.file_name(), "drug_exposure_7.csv");
        assert_eq!(shard.path(), Path::new("/data/out/drug_exposure_7.csv"));
        assert_eq!(shard.table(), "drug_exposure");
        assert_eq!(shard.index(), 7);
    }

    #[test]
    fn enumerates_indices_from_one() {
        let indices: Vec<u32> = shard_files(Path::new("."), "person", 20)
            .map(|s| s.index())
            .collect();
        assert_eq!(indices, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn extension_check_is_exact() {
        assert!(has_csv_extension(Path::new("person_1.csv")));
        assert!(!has_csv_extension(Path::new("person_1.CSV")));
        assert!(!has_csv_extension(Path::new("person_1.csv.gz")));
        assert!(!has_csv_extension(Path::new("person_1")));
    }

    #[test]
    fn only_existing_regular_files_are_loadable() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("person_1.csv"), "id\n1\n").unwrap();
        fs::create_dir(dir.path().join("person_2.csv")).unwrap();

        assert!(ShardFile::new(dir.path(), "person", 1).is_loadable());
        assert!(!ShardFile::new(dir.path(), "person", 2).is_loadable());
        assert!(!ShardFile::new(dir.path(), "person", 3).is_loadable());
    }
}
