use serial_test::serial;

use facilitydb_backend::ImportError;
use facilitydb_backend::employee_import::import_employees_json;

mod helpers;
use helpers as h;

#[test]
#[serial]
fn test_import_employees() {
    let t = h::test_db_setup();
    let json_path = t.write_file("employees.json", &h::fixture("employees.json"));

    let summary = import_employees_json(&t.db, &json_path).expect("Import failed");

    assert_eq!(summary.records, 6);
    assert_eq!(summary.skipped, 3);
    assert_eq!(summary.employees_inserted, 3);
    assert_eq!(summary.job_titles_inserted, 2);

    let employees = t.db.get_all_employees().unwrap();
    let ids: Vec<i32> = employees.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(employees[1].age, Some(41));
    assert_eq!(employees[1].salary, Some(80000.0));
    assert_eq!(employees[2].phone, None);
    assert_eq!(employees[2].years_of_experience, None);

    let titles: Vec<(String, Option<String>)> = t.db.get_all_job_titles().unwrap()
        .into_iter()
        .map(|j| (j.job_title, j.department))
        .collect();
    assert_eq!(titles, vec![
        ("Engineer".to_string(), Some("R&D".to_string())),
        ("Manager".to_string(), Some("Admin".to_string())),
    ]);
}

#[test]
#[serial]
fn test_reimport_employees_changes_nothing() {
    let t = h::test_db_setup();
    let json_path = t.write_file("employees.json", &h::fixture("employees.json"));

    import_employees_json(&t.db, &json_path).expect("First import failed");
    let counts_once = t.db.table_counts().unwrap();

    let summary = import_employees_json(&t.db, &json_path).expect("Second import failed");

    assert_eq!(summary.employees_inserted, 0);
    assert_eq!(summary.job_titles_inserted, 0);
    assert_eq!(t.db.table_counts().unwrap(), counts_once);
}

#[test]
#[serial]
fn test_document_must_be_an_array() {
    let t = h::test_db_setup();
    let json_path = t.write_file("object.json", r#"{"id": 1}"#);

    let res = import_employees_json(&t.db, &json_path);
    assert!(matches!(res, Err(ImportError::NotAnArray)), "got {:?}", res);

    let json_path = t.write_file("broken.json", r#"[{"id": 1,"#);
    let res = import_employees_json(&t.db, &json_path);
    assert!(matches!(res, Err(ImportError::Json(_))), "got {:?}", res);

    assert_eq!(t.db.table_counts().unwrap().employees, 0);
}
