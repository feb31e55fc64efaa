use serial_test::serial;

use facilitydb_backend::db::views::ViewKind;
use facilitydb_backend::employee_import::import_employees_json;
use facilitydb_backend::facility_xml::import_facilities_xml;

mod helpers;
use helpers as h;

#[test]
#[serial]
fn test_facilities_by_state() {
    let t = h::test_db_setup();
    let xml_path = t.write_file("facilities.xml", &h::fixture("facilities_example.xml"));
    import_facilities_xml(&t.db, &xml_path).expect("Import failed");

    let rows = t.db.read_view_rows(ViewKind::FacilitiesByState).unwrap();

    // B is skipped, so NH never appears.
    assert_eq!(rows, vec![
        vec!["MA".to_string(), "2".to_string()],
        vec!["VT".to_string(), "1".to_string()],
    ]);
}

#[test]
#[serial]
fn test_programs_by_interest_type() {
    let t = h::test_db_setup();
    let xml_path = t.write_file("facilities.xml", &h::fixture("facilities_example.xml"));
    import_facilities_xml(&t.db, &xml_path).expect("Import failed");

    let rows = t.db.programs_by_interest_type().unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].interest_type_id.as_deref(), Some("AIR"));
    assert_eq!(rows[0].program_count, 1);
    assert_eq!(rows[0].program_common_name.as_deref(), Some("Air Program"));
    assert_eq!(rows[1].interest_type_id.as_deref(), Some("NPDES"));
    assert_eq!(rows[1].program_common_name.as_deref(), Some("Water Program"));
}

#[test]
#[serial]
fn test_avg_salary_by_job() {
    let t = h::test_db_setup();
    let json_path = t.write_file("employees.json", &h::fixture("employees.json"));
    import_employees_json(&t.db, &json_path).expect("Import failed");

    let rows = t.db.read_view_rows(ViewKind::AvgSalaryByJob).unwrap();

    assert_eq!(ViewKind::AvgSalaryByJob.columns().len(), 3);
    assert_eq!(rows, vec![
        vec!["Engineer".to_string(), "90000.00".to_string(), "2".to_string()],
        vec!["Manager".to_string(), "120000.50".to_string(), "1".to_string()],
    ]);
}

#[test]
#[serial]
fn test_views_are_empty_on_new_database() {
    let t = h::test_db_setup();

    for kind in [ViewKind::FacilitiesByState, ViewKind::AvgSalaryByJob, ViewKind::ProgramsByInterestType] {
        assert!(t.db.read_view_rows(kind).unwrap().is_empty(), "{} not empty", kind.view_name());
    }
}
