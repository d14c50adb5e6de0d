use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::scoring::AssessmentResult;
use crate::Error;

/// Holds the latest assessment result. Last write wins.
pub trait ResultStore {
    fn put(&mut self, result: &AssessmentResult) -> Result<(), Error>;

    /// `None` when nothing usable has been stored; callers should send the
    /// user back to the start of the assessment.
    fn get(&self) -> Result<Option<AssessmentResult>, Error>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    result: Option<AssessmentResult>,
}

impl ResultStore for MemoryStore {
    fn put(&mut self, result: &AssessmentResult) -> Result<(), Error> {
        self.result = Some(result.clone());
        Ok(())
    }

    fn get(&self) -> Result<Option<AssessmentResult>, Error> {
        Ok(self.result.clone())
    }
}

/// Stores the result as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultStore for JsonFileStore {
    fn put(&mut self, result: &AssessmentResult) -> Result<(), Error> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer(&mut writer, result)?;
        writer.flush()?;
        tracing::debug!(path = %self.path.display(), "result stored");
        Ok(())
    }

    fn get(&self) -> Result<Option<AssessmentResult>, Error> {
        let f = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "no stored result");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_reader(BufReader::new(f)) {
            Ok(result) => Ok(Some(result)),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "stored result is unreadable");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scoring::{calculate_results, NoJitter};
    use crate::{AnswerStore, QUESTIONS};

    fn result() -> AssessmentResult {
        calculate_results(&QUESTIONS, &AnswerStore::default(), &mut NoJitter)
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::default();
        assert!(store.get().unwrap().is_none());
        let result = result();
        store.put(&result).unwrap();
        assert_eq!(store.get().unwrap(), Some(result));
    }

    #[test]
    fn test_json_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("results.json"));
        assert!(store.get().unwrap().is_none());

        let first = result();
        store.put(&first).unwrap();
        assert_eq!(store.get().unwrap(), Some(first));

        let mut second = result();
        second.overall_confidence = 99;
        store.put(&second).unwrap();
        assert_eq!(store.get().unwrap().map(|r| r.overall_confidence), Some(99));
    }

    #[test]
    fn test_json_file_store_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(JsonFileStore::new(path).get().unwrap().is_none());
    }
}
