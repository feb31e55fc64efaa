//! Row buffers and result types for the facility XML import.

use serde::Serialize;

use crate::db::facilities_models::{
    Coordinate, Facility, FacilityProgram, Location, Program, ProgramAttributes,
};

/// The program block nested in a facility, as read from the document.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramRef {
    pub identifier: String,
    /// Missing full names are stored as an empty string, it is part of the key.
    pub full_name: String,
    pub interest_type: Option<String>,
    pub common_name: Option<String>,
    pub acronym_name: Option<String>,
    pub description: Option<String>,
    pub electronic_address: Option<String>,
    pub electronic_address_typename: Option<String>,
}

impl ProgramRef {
    pub fn key(&self) -> (String, String) {
        (self.identifier.clone(), self.full_name.clone())
    }
}

/// Everything one valid facility contributes to the import.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityRecord {
    pub facility: Facility,
    pub coordinate: Coordinate,
    pub location: Location,
    pub program: Option<ProgramRef>,
}

impl FacilityRecord {
    pub fn registry_id(&self) -> &str {
        &self.facility.registry_id
    }
}

/// Per-table buffers for one import call, filled in document order.
#[derive(Debug, Default, Clone)]
pub struct ImportBatch {
    pub facilities: Vec<Facility>,
    pub coordinates: Vec<Coordinate>,
    pub locations: Vec<Location>,
    pub programs: Vec<Program>,
    pub program_attributes: Vec<ProgramAttributes>,
    pub facility_programs: Vec<FacilityProgram>,
    /// FacilitySite elements found in the document.
    pub facility_nodes: usize,
    /// Facility records rejected by the extractor.
    pub skipped: usize,
}

/// Row counts per target table, either buffered or actually inserted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableRowCounts {
    pub facilities: usize,
    pub coordinates: usize,
    pub locations: usize,
    pub programs: usize,
    pub program_attributes: usize,
    pub facility_programs: usize,
}

impl ImportBatch {
    pub fn row_counts(&self) -> TableRowCounts {
        TableRowCounts {
            facilities: self.facilities.len(),
            coordinates: self.coordinates.len(),
            locations: self.locations.len(),
            programs: self.programs.len(),
            program_attributes: self.program_attributes.len(),
            facility_programs: self.facility_programs.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub facility_nodes: usize,
    pub skipped: usize,
    /// Rows built from the document.
    pub buffered: TableRowCounts,
    /// Rows that were new to the database. Lower than `buffered` on re-import.
    pub inserted: TableRowCounts,
}
