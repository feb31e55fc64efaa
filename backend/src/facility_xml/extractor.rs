//! Turns `FacilitySite` elements into flat rows.
//!
//! Each facility is extracted on its own and either yields a complete
//! `FacilityRecord` or a `RecordError`. Nothing is appended to the batch until
//! the whole facility, including its program block, has been validated.

use crate::db::facilities_models::{Coordinate, Facility, Location};
use crate::error::RecordError;
use crate::helpers::{non_empty_text, parse_float};
use crate::facility_xml::document::XmlElement;
use crate::facility_xml::types::{FacilityRecord, ProgramRef};

pub const FACILITY_TAG: &str = "FacilitySite";
pub const REGISTRY_ID_ATTR: &str = "registryId";

/// All facility elements under the root, in document order.
pub fn facility_nodes(root: &XmlElement) -> Vec<&XmlElement> {
    root.descendants_named(FACILITY_TAG)
}

fn text(node: &XmlElement, name: &str) -> Option<String> {
    non_empty_text(node.child_text(name))
}

/// Reads `<Block><ElectronicAddressText/><ElectronicAddressTypeName/></Block>`.
fn electronic_address(node: &XmlElement, block: &str) -> (Option<String>, Option<String>) {
    match node.child(block) {
        Some(addr) => (
            text(addr, "ElectronicAddressText"),
            text(addr, "ElectronicAddressTypeName"),
        ),
        None => (None, None),
    }
}

/// Present but unparseable coordinates reject the facility, including
/// whitespace-only text. Absent or empty elements are None.
fn coordinate_value(
    node: &XmlElement,
    tag: &str,
    field: &'static str,
    registry_id: &str,
) -> Result<Option<f64>, RecordError> {
    match node.child_text(tag).filter(|t| !t.is_empty()) {
        Some(raw) => parse_float(raw)
            .map(Some)
            .ok_or_else(|| RecordError::InvalidCoordinate {
                registry_id: registry_id.to_string(),
                field,
                value: raw.to_string(),
            }),
        None => Ok(None),
    }
}

fn extract_program(program: &XmlElement, registry_id: &str) -> Result<ProgramRef, RecordError> {
    let identifier = text(program, "ProgramIdentifier").ok_or_else(|| {
        RecordError::MissingProgramIdentifier {
            registry_id: registry_id.to_string(),
        }
    })?;

    let (electronic_address, electronic_address_typename) =
        electronic_address(program, "ProgramProfileElectronicAddress");

    Ok(ProgramRef {
        identifier,
        full_name: text(program, "ProgramFullName").unwrap_or_default(),
        interest_type: text(program, "ProgramInterestType"),
        common_name: text(program, "ProgramCommonName"),
        acronym_name: text(program, "ProgramAcronymName"),
        description: text(program, "ProgramDescription"),
        electronic_address,
        electronic_address_typename,
    })
}

/// Extracts one facility element.
pub fn extract_facility(node: &XmlElement) -> Result<FacilityRecord, RecordError> {
    let registry_id = node
        .attr(REGISTRY_ID_ATTR)
        .filter(|id| !id.is_empty())
        .ok_or(RecordError::MissingRegistryId)?
        .to_string();

    let latitude = coordinate_value(node, "LatitudeMeasure", "latitude", &registry_id)?;
    let longitude = coordinate_value(node, "LongitudeMeasure", "longitude", &registry_id)?;

    let program = match node.child("Program") {
        Some(p) => Some(extract_program(p, &registry_id)?),
        None => None,
    };

    let (electronic_address, electronic_address_typename) =
        electronic_address(node, "GeneralProfileElectronicAddress");

    Ok(FacilityRecord {
        facility: Facility {
            registry_id: registry_id.clone(),
            facility_site_name: text(node, "FacilitySiteName"),
            location_address_text: text(node, "LocationAddressText"),
            electronic_address,
            electronic_address_typename,
        },
        coordinate: Coordinate {
            registry_id: registry_id.clone(),
            latitude_measure: latitude,
            longitude_measure: longitude,
            horizontal_coordinate_reference_system_datum_name:
                text(node, "HorizontalCoordinateReferenceSystemDatumName"),
            horizontal_collection_method_name: text(node, "HorizontalCollectionMethodName"),
        },
        location: Location {
            registry_id,
            location_zip_code: text(node, "LocationZIPCode"),
            locality_name: text(node, "LocalityName"),
            location_address_state_code: text(node, "LocationAddressStateCode"),
        },
        program,
    })
}
