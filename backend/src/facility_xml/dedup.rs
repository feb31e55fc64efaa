use std::collections::{HashMap, HashSet};

use crate::db::facilities_models::{Program, ProgramAttributes};
use crate::facility_xml::types::{ImportBatch, ProgramRef};
use crate::logger::debug;

/// Collapses programs repeated across facilities. Lives for one import call.
#[derive(Debug, Default)]
pub struct ProgramDeduplicator {
    /// Interest-type tag to its canonical id. The mapping is the identity,
    /// the first occurrence of a tag fixes it.
    interest_types: HashMap<String, String>,
    /// (program identifier, program full name)
    seen_programs: HashSet<(String, String)>,
}

impl ProgramDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canonical id and whether the tag was new.
    fn resolve_interest_type(&mut self, tag: &str) -> (String, bool) {
        match self.interest_types.get(tag) {
            Some(id) => (id.clone(), false),
            None => {
                self.interest_types.insert(tag.to_string(), tag.to_string());
                (tag.to_string(), true)
            }
        }
    }

    pub fn is_seen(&self, program: &ProgramRef) -> bool {
        self.seen_programs.contains(&program.key())
    }

    pub fn distinct_programs(&self) -> usize {
        self.seen_programs.len()
    }

    pub fn distinct_interest_types(&self) -> usize {
        self.interest_types.len()
    }

    /// Appends the Program row, and the ProgramAttributes row for a new
    /// interest type, the first time a program key is seen.
    ///
    /// Returns true if the program was new. The facility join row is the
    /// caller's concern and is added either way.
    pub fn register(&mut self, program: &ProgramRef, batch: &mut ImportBatch) -> bool {
        let key = program.key();
        if self.seen_programs.contains(&key) {
            return false;
        }

        let interest_type_id = match program.interest_type.as_deref() {
            Some(tag) => {
                let (id, is_new) = self.resolve_interest_type(tag);
                if is_new {
                    batch.program_attributes.push(ProgramAttributes {
                        interest_type_id: id.clone(),
                        program_common_name: program.common_name.clone(),
                        program_acronym_name: program.acronym_name.clone(),
                        program_description: program.description.clone(),
                        electronic_address: program.electronic_address.clone(),
                        electronic_address_typename: program.electronic_address_typename.clone(),
                    });
                } else {
                    note_dropped_attributes(program, &id, batch);
                }
                Some(id)
            }
            None => None,
        };

        batch.programs.push(Program {
            program_identifier: program.identifier.clone(),
            program_full_name: program.full_name.clone(),
            interest_type_id,
        });

        self.seen_programs.insert(key);
        true
    }
}

/// First-seen attributes win. Differing later ones are dropped, only a debug line records it.
fn note_dropped_attributes(program: &ProgramRef, interest_type_id: &str, batch: &ImportBatch) {
    let kept = batch.program_attributes
        .iter()
        .find(|a| a.interest_type_id == interest_type_id);

    if let Some(kept) = kept {
        if kept.program_common_name != program.common_name
            || kept.program_acronym_name != program.acronym_name
            || kept.program_description != program.description
        {
            debug(&format!(
                "Keeping first attributes for interest type {}, ignoring those of program {} ({})",
                interest_type_id, program.identifier, program.full_name
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(id: &str, name: &str, interest: Option<&str>, common: &str) -> ProgramRef {
        ProgramRef {
            identifier: id.to_string(),
            full_name: name.to_string(),
            interest_type: interest.map(str::to_string),
            common_name: Some(common.to_string()),
            acronym_name: None,
            description: None,
            electronic_address: None,
            electronic_address_typename: None,
        }
    }

    #[test]
    fn test_same_key_registered_once() {
        let mut dedup = ProgramDeduplicator::new();
        let mut batch = ImportBatch::default();

        assert!(dedup.register(&program("P1", "Clean Air", Some("AIR"), "Air"), &mut batch));
        assert!(!dedup.register(&program("P1", "Clean Air", Some("AIR"), "Air"), &mut batch));

        assert_eq!(batch.programs.len(), 1);
        assert_eq!(batch.program_attributes.len(), 1);
        assert_eq!(dedup.distinct_programs(), 1);
    }

    #[test]
    fn test_identifier_and_name_both_form_identity() {
        let mut dedup = ProgramDeduplicator::new();
        let mut batch = ImportBatch::default();

        dedup.register(&program("P1", "Clean Air", Some("AIR"), "Air"), &mut batch);
        dedup.register(&program("P2", "Clean Air", Some("AIR"), "Air"), &mut batch);
        dedup.register(&program("P1", "Clean Air Permits", Some("AIR"), "Air"), &mut batch);

        assert_eq!(batch.programs.len(), 3);
        assert!(dedup.is_seen(&program("P2", "Clean Air", None, "")));
        assert!(!dedup.is_seen(&program("P2", "Clean Water", None, "")));
    }

    #[test]
    fn test_first_attributes_win_per_interest_type() {
        let mut dedup = ProgramDeduplicator::new();
        let mut batch = ImportBatch::default();

        dedup.register(&program("P1", "Clean Air", Some("AIR"), "First"), &mut batch);
        dedup.register(&program("P2", "Air Toxics", Some("AIR"), "Second"), &mut batch);

        assert_eq!(batch.programs.len(), 2);
        assert_eq!(batch.program_attributes.len(), 1);
        assert_eq!(batch.program_attributes[0].program_common_name.as_deref(), Some("First"));
        assert_eq!(batch.programs[1].interest_type_id.as_deref(), Some("AIR"));
        assert_eq!(dedup.distinct_interest_types(), 1);
    }

    #[test]
    fn test_program_without_interest_type() {
        let mut dedup = ProgramDeduplicator::new();
        let mut batch = ImportBatch::default();

        dedup.register(&program("P3", "Unlabelled", None, "None"), &mut batch);

        assert_eq!(batch.programs.len(), 1);
        assert_eq!(batch.programs[0].interest_type_id, None);
        assert!(batch.program_attributes.is_empty());
    }
}
