//! Tabular CSV dataset with a fixed header row
//!
//! The dataset is loaded (or seeded with a placeholder row) at the start of
//! a run, grows in memory, and is written back once by [`Dataset::flush`].
//! `flush` consumes the dataset, so a run cannot write it twice.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{ArticleRecord, Source};
use crate::utils::error::StorageError;

/// In-memory CSV table bound to a file path
#[derive(Debug, Clone)]
pub struct Dataset {
    path: PathBuf,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    /// Rows present before this run started
    loaded_rows: usize,
}

impl Dataset {
    /// Load an existing dataset with the expected columns, or seed a new one
    ///
    /// A new dataset starts with `placeholder` as its only row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::SchemaMismatch` if the file exists with a
    /// different header row
    pub fn open_or_seed(
        path: impl Into<PathBuf>,
        columns: &[&str],
        placeholder: &[&str],
    ) -> Result<Self, StorageError> {
        let path = path.into();
        let expected: Vec<String> = columns.iter().map(|c| c.to_string()).collect();

        if path.is_file() {
            let dataset = Self::load(&path)?;
            if dataset.headers != expected {
                return Err(StorageError::SchemaMismatch {
                    expected,
                    found: dataset.headers,
                });
            }
            tracing::info!(
                path = %path.display(),
                rows = dataset.len(),
                "Loaded existing dataset"
            );
            return Ok(dataset);
        }

        if placeholder.len() != expected.len() {
            return Err(StorageError::RowWidth {
                expected: expected.len(),
                found: placeholder.len(),
            });
        }

        tracing::info!(path = %path.display(), "Seeding new dataset");
        Ok(Self {
            path,
            headers: expected,
            rows: vec![placeholder.iter().map(|v| v.to_string()).collect()],
            loaded_rows: 0,
        })
    }

    /// Dataset for a news source, using its column layout
    pub fn for_source(path: impl Into<PathBuf>, source: Source) -> Result<Self, StorageError> {
        Self::open_or_seed(path, source.columns(), source.placeholder_row())
    }

    /// Load any CSV file with a header row
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)?;

        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let rows = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

        let loaded_rows = rows.len();
        Ok(Self {
            path: path.to_path_buf(),
            headers,
            rows,
            loaded_rows,
        })
    }

    /// Redirect the eventual flush to another file
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows added since the dataset was opened (the seed row included)
    pub fn appended(&self) -> usize {
        self.rows.len() - self.loaded_rows
    }

    pub fn column_index(&self, name: &str) -> Result<usize, StorageError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| StorageError::MissingColumn(name.to_string()))
    }

    /// Append one row
    ///
    /// # Errors
    ///
    /// Returns `StorageError::RowWidth` if the row does not fit the header
    pub fn append(&mut self, row: Vec<String>) -> Result<(), StorageError> {
        if row.len() != self.headers.len() {
            return Err(StorageError::RowWidth {
                expected: self.headers.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn append_record(&mut self, record: &ArticleRecord) -> Result<(), StorageError> {
        self.append(record.to_row())
    }

    /// Replace a column's values, adding the column if it does not exist yet
    pub fn set_column(&mut self, name: &str, values: Vec<String>) -> Result<(), StorageError> {
        if values.len() != self.rows.len() {
            return Err(StorageError::RowWidth {
                expected: self.rows.len(),
                found: values.len(),
            });
        }

        match self.column_index(name) {
            Ok(index) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[index] = value;
                }
            }
            Err(_) => {
                self.headers.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }

    /// Values of one column in row order
    pub fn column_values(&self, name: &str) -> Result<Vec<&str>, StorageError> {
        let index = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[index].as_str()).collect())
    }

    /// Value of a column in the last row
    pub fn last_value(&self, name: &str) -> Result<Option<&str>, StorageError> {
        let index = self.column_index(name)?;
        Ok(self.rows.last().map(|row| row[index].as_str()))
    }

    /// Write the dataset to its path
    ///
    /// The table goes to a sibling temp file first and is then renamed over
    /// the target, so an interrupted write never truncates the old file.
    pub fn flush(self) -> Result<PathBuf, StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = temp_path(&self.path);
        {
            let mut writer = csv::Writer::from_path(&tmp_path)?;
            writer.write_record(&self.headers)?;
            for row in &self.rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        tracing::info!(
            path = %self.path.display(),
            rows = self.rows.len(),
            appended = self.appended(),
            "Dataset written"
        );
        Ok(self.path)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
