//! Facility XML import.
//!
//! Document -> per-facility records -> de-duplicated row buffers -> one
//! batched write. A malformed document or a failed write fails the call, a
//! malformed facility only skips that facility.

pub mod types;
pub mod document;
pub mod extractor;
pub mod dedup;

use std::path::Path;
use std::time::Instant;

use crate::db::DatabaseHandle;
use crate::db::facilities_models::FacilityProgram;
use crate::error::ImportError;
use crate::logger::{debug, error, info};

use document::{load_document, XmlElement};
use extractor::{extract_facility, facility_nodes};
use dedup::ProgramDeduplicator;

pub use types::{FacilityRecord, ImportBatch, ImportSummary, ProgramRef, TableRowCounts};

/// Builds the row buffers for every valid facility under `root`.
pub fn build_import_batch(root: &XmlElement) -> ImportBatch {
    let mut batch = ImportBatch::default();
    let mut dedup = ProgramDeduplicator::new();

    let nodes = facility_nodes(root);
    batch.facility_nodes = nodes.len();
    debug(&format!("Found {} FacilitySite elements", nodes.len()));

    for node in nodes {
        match extract_facility(node) {
            Ok(record) => {
                debug(&format!("Processing facility with registryId={}", record.registry_id()));
                append_record(record, &mut dedup, &mut batch);
            }
            Err(e) => {
                error(&e.to_string());
                batch.skipped += 1;
            }
        }
    }

    let counts = batch.row_counts();
    debug(&format!("Facilities to insert: {}", counts.facilities));
    debug(&format!("Coordinates to insert: {}", counts.coordinates));
    debug(&format!("Locations to insert: {}", counts.locations));
    debug(&format!("Programs to insert: {}", counts.programs));
    debug(&format!("ProgramAttributes to insert: {}", counts.program_attributes));
    debug(&format!("FacilityPrograms to insert: {}", counts.facility_programs));

    batch
}

fn append_record(record: FacilityRecord, dedup: &mut ProgramDeduplicator, batch: &mut ImportBatch) {
    let FacilityRecord { facility, coordinate, location, program } = record;
    let registry_id = facility.registry_id.clone();

    batch.facilities.push(facility);
    batch.coordinates.push(coordinate);
    batch.locations.push(location);

    if let Some(program) = program {
        dedup.register(&program, batch);
        batch.facility_programs.push(FacilityProgram {
            registry_id,
            program_identifier: program.identifier,
            program_full_name: program.full_name,
        });
    }
}

/// Imports an already parsed document.
pub fn import_document(db: &DatabaseHandle, root: &XmlElement) -> Result<ImportSummary, ImportError> {
    let batch = build_import_batch(root);

    let inserted = db.write_facility_batch(&batch).map_err(|e| {
        error(&format!("Database error occurred: {:#}", e));
        ImportError::Database(e)
    })?;

    Ok(ImportSummary {
        facility_nodes: batch.facility_nodes,
        skipped: batch.skipped,
        buffered: batch.row_counts(),
        inserted,
    })
}

/// Imports a facility XML file into the database.
pub fn import_facilities_xml(db: &DatabaseHandle, xml_path: &Path) -> Result<ImportSummary, ImportError> {
    info(&format!("import_facilities_xml(): {:?}", xml_path));
    let start = Instant::now();

    let root = load_document(xml_path).inspect_err(|e| error(&e.to_string()))?;
    let summary = import_document(db, &root)?;

    info(&format!(
        "Imported {:?}: {} of {} facilities valid, {} new facility rows, {} new programs ({} ms)",
        xml_path,
        summary.buffered.facilities,
        summary.facility_nodes,
        summary.inserted.facilities,
        summary.inserted.programs,
        start.elapsed().as_millis(),
    ));

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::document::parse_document;

    const EXAMPLE: &str = r#"<?xml version="1.0"?>
        <FacilityList>
            <FacilitySite registryId="A">
                <LatitudeMeasure>40.1</LatitudeMeasure>
                <LongitudeMeasure>-70.2</LongitudeMeasure>
                <Program>
                    <ProgramIdentifier>P1</ProgramIdentifier>
                    <ProgramFullName>Clean Air</ProgramFullName>
                    <ProgramInterestType>AIR</ProgramInterestType>
                </Program>
            </FacilitySite>
            <FacilitySite registryId="B">
                <LatitudeMeasure>bad</LatitudeMeasure>
                <LongitudeMeasure>-70.3</LongitudeMeasure>
            </FacilitySite>
            <FacilitySite registryId="C">
                <Program>
                    <ProgramIdentifier>P1</ProgramIdentifier>
                    <ProgramFullName>Clean Air</ProgramFullName>
                    <ProgramInterestType>AIR</ProgramInterestType>
                </Program>
            </FacilitySite>
        </FacilityList>"#;

    #[test]
    fn test_build_batch_from_example() {
        let root = parse_document(EXAMPLE).unwrap();
        let batch = build_import_batch(&root);

        assert_eq!(batch.facility_nodes, 3);
        assert_eq!(batch.skipped, 1);

        let ids: Vec<_> = batch.facilities.iter().map(|f| f.registry_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "C"]);
        assert_eq!(batch.coordinates.len(), 2);
        assert_eq!(batch.locations.len(), 2);
        assert_eq!(batch.programs.len(), 1);
        assert_eq!(batch.program_attributes.len(), 1);

        let joins: Vec<_> = batch.facility_programs.iter()
            .map(|fp| (fp.registry_id.as_str(), fp.program_identifier.as_str(), fp.program_full_name.as_str()))
            .collect();
        assert_eq!(joins, vec![("A", "P1", "Clean Air"), ("C", "P1", "Clean Air")]);
    }

    #[test]
    fn test_skipped_facility_leaves_no_rows() {
        let root = parse_document(r#"<Root>
            <FacilitySite registryId="X">
                <FacilitySiteName>Broken program</FacilitySiteName>
                <Program><ProgramFullName>No id</ProgramFullName></Program>
            </FacilitySite>
            <FacilitySite><FacilitySiteName>No registry id</FacilitySiteName></FacilitySite>
        </Root>"#).unwrap();

        let batch = build_import_batch(&root);
        assert_eq!(batch.skipped, 2);
        assert_eq!(batch.row_counts(), TableRowCounts::default());
    }
}
