//! Employee JSON import: a flat array of records into job_titles and employees.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::db::DatabaseHandle;
use crate::db::facilities_models::{Employee, JobTitle};
use crate::error::{ImportError, RecordError};
use crate::helpers::{parse_float, parse_integer};
use crate::logger::{debug, error, info};

/// Keys every record must carry. A null value is allowed.
const REQUIRED_KEYS: [&str; 8] = [
    "job_title",
    "department",
    "first_name",
    "last_name",
    "email",
    "phone",
    "gender",
    "years_of_experience",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeImportSummary {
    pub records: usize,
    pub skipped: usize,
    pub job_titles_buffered: usize,
    pub employees_buffered: usize,
    pub job_titles_inserted: usize,
    pub employees_inserted: usize,
}

/// Integers, floats truncated toward zero, and integer strings. Not bools.
fn value_as_int(value: &Value) -> Option<i32> {
    let n = match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i,
            None => n.as_f64().filter(|f| f.is_finite())?.trunc() as i64,
        },
        Value::String(s) => parse_integer(s)?,
        _ => return None,
    };
    i32::try_from(n).ok()
}

fn value_as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float(s),
        _ => None,
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn field_text(record: &Map<String, Value>, key: &str) -> Option<String> {
    record.get(key).and_then(value_as_text)
}

/// Validates one record. The job title row is None when the title is null.
pub fn parse_employee(value: &Value) -> Result<(Employee, Option<JobTitle>), RecordError> {
    let record = value.as_object().ok_or(RecordError::MissingEmployeeId)?;

    let raw_id = match record.get("id") {
        None | Some(Value::Null) => return Err(RecordError::MissingEmployeeId),
        Some(v) => v,
    };
    let id_label = value_as_text(raw_id).unwrap_or_default();

    let invalid = |field: &'static str| RecordError::InvalidField { id: id_label.clone(), field };

    let id = value_as_int(raw_id).ok_or_else(|| invalid("id"))?;
    let age = record.get("age").and_then(value_as_int).ok_or_else(|| invalid("age"))?;
    let salary = record.get("salary").and_then(value_as_float).ok_or_else(|| invalid("salary"))?;

    if let Some(key) = REQUIRED_KEYS.iter().find(|k| !record.contains_key(**k)) {
        return Err(RecordError::MissingKey { id: id_label.clone(), key });
    }

    let years_of_experience = match record.get("years_of_experience") {
        None | Some(Value::Null) => None,
        Some(v) => Some(value_as_int(v).ok_or_else(|| invalid("years_of_experience"))?),
    };

    let job_title = field_text(record, "job_title");
    let job_title_row = job_title.clone().map(|title| JobTitle {
        job_title: title,
        department: field_text(record, "department"),
    });

    let employee = Employee {
        id,
        first_name: field_text(record, "first_name"),
        last_name: field_text(record, "last_name"),
        email: field_text(record, "email"),
        phone: field_text(record, "phone"),
        gender: field_text(record, "gender"),
        age: Some(age),
        job_title,
        years_of_experience,
        salary: Some(salary),
    };

    Ok((employee, job_title_row))
}

/// Validated rows of a document. The first department seen for a job title is kept.
#[derive(Debug, Default)]
pub struct EmployeeBatch {
    pub job_titles: Vec<JobTitle>,
    pub employees: Vec<Employee>,
    pub records: usize,
    pub skipped: usize,
}

pub fn build_employee_batch(records: &[Value]) -> EmployeeBatch {
    let mut batch = EmployeeBatch {
        records: records.len(),
        ..Default::default()
    };
    let mut seen_titles: HashSet<String> = HashSet::new();

    for value in records {
        match parse_employee(value) {
            Ok((employee, job_title)) => {
                if let Some(title) = job_title {
                    if seen_titles.insert(title.job_title.clone()) {
                        batch.job_titles.push(title);
                    }
                }
                batch.employees.push(employee);
            }
            Err(e) => {
                error(&e.to_string());
                batch.skipped += 1;
            }
        }
    }

    debug(&format!(
        "JobTitles to insert: {}, Employees to insert: {}",
        batch.job_titles.len(),
        batch.employees.len()
    ));

    batch
}

/// Imports an employee JSON file into the database.
pub fn import_employees_json(db: &DatabaseHandle, json_path: &Path) -> Result<EmployeeImportSummary, ImportError> {
    info(&format!("import_employees_json(): {:?}", json_path));

    let content = fs::read_to_string(json_path).map_err(|source| ImportError::Io {
        path: json_path.to_path_buf(),
        source,
    })?;

    let data: Value = serde_json::from_str(&content).inspect_err(|e| {
        error(&format!("Error processing JSON: {}", e));
    })?;
    let records = data.as_array().ok_or(ImportError::NotAnArray)?;

    let batch = build_employee_batch(records);

    let (job_titles_inserted, employees_inserted) = db
        .write_employee_batch(&batch.job_titles, &batch.employees)
        .map_err(|e| {
            error(&format!("Database error occurred: {:#}", e));
            ImportError::Database(e)
        })?;

    info(&format!(
        "Imported {:?}: {} of {} employee records valid, {} new employees",
        json_path,
        batch.employees.len(),
        batch.records,
        employees_inserted
    ));

    Ok(EmployeeImportSummary {
        records: batch.records,
        skipped: batch.skipped,
        job_titles_buffered: batch.job_titles.len(),
        employees_buffered: batch.employees.len(),
        job_titles_inserted,
        employees_inserted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_record() -> Value {
        json!({
            "id": 7,
            "first_name": "Ada",
            "last_name": "Byron",
            "email": "ada@example.com",
            "phone": "555-0100",
            "gender": "Female",
            "age": 36,
            "job_title": "Engineer",
            "department": "R&D",
            "years_of_experience": 12,
            "salary": 98000.5
        })
    }

    #[test]
    fn test_parse_valid_employee() {
        let (employee, title) = parse_employee(&valid_record()).unwrap();
        assert_eq!(employee.id, 7);
        assert_eq!(employee.age, Some(36));
        assert_eq!(employee.salary, Some(98000.5));
        assert_eq!(employee.years_of_experience, Some(12));
        assert_eq!(title, Some(JobTitle {
            job_title: "Engineer".to_string(),
            department: Some("R&D".to_string()),
        }));
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let mut record = valid_record();
        record["age"] = json!("41");
        record["salary"] = json!("51000");
        let (employee, _) = parse_employee(&record).unwrap();
        assert_eq!(employee.age, Some(41));
        assert_eq!(employee.salary, Some(51000.0));
    }

    #[test]
    fn test_float_age_is_truncated() {
        let mut record = valid_record();
        record["age"] = json!(29.9);
        let (employee, _) = parse_employee(&record).unwrap();
        assert_eq!(employee.age, Some(29));
    }

    #[test]
    fn test_missing_id() {
        let mut record = valid_record();
        record.as_object_mut().unwrap().remove("id");
        assert_eq!(parse_employee(&record).unwrap_err(), RecordError::MissingEmployeeId);
    }

    #[test]
    fn test_invalid_age_and_salary() {
        let mut record = valid_record();
        record["age"] = json!("thirty");
        assert_eq!(
            parse_employee(&record).unwrap_err(),
            RecordError::InvalidField { id: "7".to_string(), field: "age" }
        );

        let mut record = valid_record();
        record["salary"] = json!(null);
        assert_eq!(
            parse_employee(&record).unwrap_err(),
            RecordError::InvalidField { id: "7".to_string(), field: "salary" }
        );
    }

    #[test]
    fn test_missing_key() {
        let mut record = valid_record();
        record.as_object_mut().unwrap().remove("department");
        assert_eq!(
            parse_employee(&record).unwrap_err(),
            RecordError::MissingKey { id: "7".to_string(), key: "department" }
        );
    }

    #[test]
    fn test_batch_keeps_first_department_per_title() {
        let mut second = valid_record();
        second["id"] = json!(8);
        second["department"] = json!("Operations");
        let mut broken = valid_record();
        broken["id"] = json!(9);
        broken["age"] = json!(true);

        let batch = build_employee_batch(&[valid_record(), second, broken]);

        assert_eq!(batch.records, 3);
        assert_eq!(batch.skipped, 1);
        assert_eq!(batch.employees.len(), 2);
        assert_eq!(batch.job_titles.len(), 1);
        assert_eq!(batch.job_titles[0].department.as_deref(), Some("R&D"));
    }
}
