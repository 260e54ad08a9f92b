use crate::model::shift::ShiftRecord;
use anyhow::{anyhow, Result};
use uuid::Uuid;

/// Storage for shift records. The statistics code never calls this; hosts
/// load records through it and hand the slice over.
pub trait ShiftRepository {
    fn create(&self, shift: ShiftRecord) -> Result<ShiftRecord>;
    fn list(&self) -> Result<Vec<ShiftRecord>>;
    fn update(&self, shift: &ShiftRecord) -> Result<()>;
    fn delete(&self, id: &Uuid) -> Result<()>;

    /// Resolves a full id or an unambiguous prefix of one, as shown in
    /// shortened listings.
    fn find_by_prefix(&self, prefix: &str) -> Result<ShiftRecord> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Err(anyhow!("Shift id is required"));
        }

        let mut matches: Vec<ShiftRecord> = self
            .list()?
            .into_iter()
            .filter(|s| s.id.to_string().starts_with(&prefix))
            .collect();

        match matches.len() {
            1 => Ok(matches.remove(0)),
            0 => Err(anyhow!("No shift with id '{}'", prefix)),
            n => Err(anyhow!("Ambiguous id '{}' matches {} shifts", prefix, n)),
        }
    }
}
