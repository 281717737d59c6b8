use crate::{checkpoint::Checkpoint, modlist::ModReference, probe::ModUpdateRecord};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSets {
    pub needs_update: Vec<ModReference>,
    /// Always a subset of `needs_update`.
    pub priority_handoff: Vec<ModReference>,
}

pub fn classify(records: &[ModUpdateRecord], checkpoint: &Checkpoint) -> UpdateSets {
    let mut sets = UpdateSets::default();
    for record in records {
        let Some(updated) = record.updated else {
            continue;
        };
        if updated > checkpoint.last_update {
            sets.needs_update.push(record.reference.clone());
            if updated > checkpoint.priority {
                sets.priority_handoff.push(record.reference.clone());
            }
        }
    }
    sets
}
