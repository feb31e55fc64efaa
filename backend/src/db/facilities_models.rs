use diesel::prelude::*;
use crate::db::facilities_schema::*;

// Owned Strings throughout, the import buffers are built row by row and then
// handed to batch inserts in chunks.

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = facilities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_default_value = false)]
pub struct Facility {
    pub registry_id: String,
    pub facility_site_name: Option<String>,
    pub location_address_text: Option<String>,
    pub electronic_address: Option<String>,
    pub electronic_address_typename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = coordinates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_default_value = false)]
pub struct Coordinate {
    pub registry_id: String,
    pub latitude_measure: Option<f64>,
    pub longitude_measure: Option<f64>,
    pub horizontal_coordinate_reference_system_datum_name: Option<String>,
    pub horizontal_collection_method_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = locations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_default_value = false)]
pub struct Location {
    pub registry_id: String,
    pub location_zip_code: Option<String>,
    pub locality_name: Option<String>,
    pub location_address_state_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = programs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_default_value = false)]
pub struct Program {
    pub program_identifier: String,
    pub program_full_name: String,
    pub interest_type_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = program_attributes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_default_value = false)]
pub struct ProgramAttributes {
    pub interest_type_id: String,
    pub program_common_name: Option<String>,
    pub program_acronym_name: Option<String>,
    pub program_description: Option<String>,
    pub electronic_address: Option<String>,
    pub electronic_address_typename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Queryable, Selectable, Insertable)]
#[diesel(table_name = facility_programs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FacilityProgram {
    pub registry_id: String,
    pub program_identifier: String,
    pub program_full_name: String,
}

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = job_titles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_default_value = false)]
pub struct JobTitle {
    pub job_title: String,
    pub department: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_default_value = false)]
pub struct Employee {
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub job_title: Option<String>,
    pub years_of_experience: Option<i32>,
    pub salary: Option<f64>,
}
