use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use uuid::Uuid;

use crate::model::shift::ShiftRecord;
use crate::repository::traits::ShiftRepository;

const SHIFTS_FILE_NAME: &str = "shifts.json";

/// Shifts kept as one pretty-printed JSON array. Every mutation rewrites the
/// whole file.
#[derive(Clone)]
pub struct FileShiftRepository {
    file_path: PathBuf,
}

impl FileShiftRepository {
    pub fn new(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)?;
        let repo = FileShiftRepository { file_path: data_dir.join(SHIFTS_FILE_NAME) };

        if !repo.file_path.exists() {
            repo.store(&[])?;
            log::debug!("created empty shift store at {}", repo.file_path.display());
        }
        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load(&self) -> Result<Vec<ShiftRecord>> {
        let reader = BufReader::new(File::open(&self.file_path)?);
        let shifts: Vec<ShiftRecord> = serde_json::from_reader(reader)
            .map_err(|e| anyhow!("Corrupt shift store {}: {}", self.file_path.display(), e))?;
        Ok(shifts)
    }

    fn store(&self, shifts: &[ShiftRecord]) -> Result<()> {
        let mut writer = BufWriter::new(File::create(&self.file_path)?);
        serde_json::to_writer_pretty(&mut writer, shifts)?;
        writer.flush()?;
        Ok(())
    }

    /// Loads, lets `change` edit the records, and writes them back only if
    /// it succeeded.
    fn modify<T>(&self, change: impl FnOnce(&mut Vec<ShiftRecord>) -> Result<T>) -> Result<T> {
        let mut shifts = self.load()?;
        let outcome = change(&mut shifts)?;
        self.store(&shifts)?;
        Ok(outcome)
    }
}

impl ShiftRepository for FileShiftRepository {
    fn create(&self, shift: ShiftRecord) -> Result<ShiftRecord> {
        self.modify(|shifts| {
            if shifts.iter().any(|s| s.id == shift.id) {
                return Err(anyhow!("Shift with ID {} already exists", shift.id));
            }
            shifts.push(shift.clone());
            Ok(())
        })?;
        log::debug!("stored shift {}", shift.id);
        Ok(shift)
    }

    fn list(&self) -> Result<Vec<ShiftRecord>> {
        let shifts = self.load()?;
        log::debug!("read {} shifts from {}", shifts.len(), self.file_path.display());
        Ok(shifts)
    }

    fn update(&self, shift: &ShiftRecord) -> Result<()> {
        self.modify(|shifts| {
            let slot = shifts
                .iter_mut()
                .find(|s| s.id == shift.id)
                .ok_or_else(|| anyhow!("Shift with ID {} not found", shift.id))?;
            *slot = shift.clone();
            Ok(())
        })?;
        log::debug!("updated shift {}", shift.id);
        Ok(())
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        self.modify(|shifts| {
            let pos = shifts
                .iter()
                .position(|s| s.id == *id)
                .ok_or_else(|| anyhow!("Shift with ID {} not found", id))?;
            shifts.remove(pos);
            Ok(())
        })?;
        log::debug!("deleted shift {}", id);
        Ok(())
    }
}
