use crate::commands::Outcome;
use crate::error::Result;
use crate::model::{NewWellnessEntry, Snapshot};
use uuid::Uuid;

/// One entry per date: an entry for a date already present replaces it wholesale,
/// including its id. Otherwise the entry goes to the head of the list.
pub fn upsert(draft: &mut Snapshot, new: &NewWellnessEntry, id: Uuid) -> Result<Outcome> {
    new.validate()?;
    let entry = new.clone().into_entry(id);

    match draft.wellness.iter().position(|e| e.date == new.date) {
        Some(index) => {
            let previous = std::mem::replace(&mut draft.wellness[index], entry);
            Ok(Outcome::Upserted {
                id,
                replaced: Some(previous.id),
            })
        }
        None => {
            draft.wellness.insert(0, entry);
            Ok(Outcome::Upserted { id, replaced: None })
        }
    }
}
