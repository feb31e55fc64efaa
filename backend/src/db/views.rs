//! Read access to the summary views created by the migration.

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Nullable, Text};
use anyhow::Result;
use serde::Serialize;

use crate::db::DatabaseHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    FacilitiesByState,
    AvgSalaryByJob,
    ProgramsByInterestType,
}

impl ViewKind {
    pub fn view_name(&self) -> &'static str {
        match self {
            ViewKind::FacilitiesByState => "facilities_by_state",
            ViewKind::AvgSalaryByJob => "avg_salary_by_job",
            ViewKind::ProgramsByInterestType => "programs_by_interest_type",
        }
    }

    /// Column headers, in select order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            ViewKind::FacilitiesByState => &["State", "FacilityCount"],
            ViewKind::AvgSalaryByJob => &["Job Title", "Avg Salary", "Employee Count"],
            ViewKind::ProgramsByInterestType => &["Interest Type ID", "Program Count", "Program Common Name"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, QueryableByName, Serialize)]
pub struct FacilitiesByState {
    #[diesel(sql_type = Text)]
    pub state: String,
    #[diesel(sql_type = BigInt)]
    pub facility_count: i64,
}

#[derive(Debug, Clone, PartialEq, QueryableByName, Serialize)]
pub struct AvgSalaryByJob {
    #[diesel(sql_type = Nullable<Text>)]
    pub job_title: Option<String>,
    #[diesel(sql_type = Nullable<Double>)]
    pub avg_salary: Option<f64>,
    #[diesel(sql_type = BigInt)]
    pub employee_count: i64,
}

#[derive(Debug, Clone, PartialEq, QueryableByName, Serialize)]
pub struct ProgramsByInterestType {
    #[diesel(sql_type = Nullable<Text>)]
    pub interest_type_id: Option<String>,
    #[diesel(sql_type = BigInt)]
    pub program_count: i64,
    #[diesel(sql_type = Nullable<Text>)]
    pub program_common_name: Option<String>,
}

fn cell<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

impl DatabaseHandle {
    pub fn facilities_by_state(&self) -> Result<Vec<FacilitiesByState>> {
        self.do_read(|db_conn| {
            diesel::sql_query("SELECT state, facility_count FROM facilities_by_state ORDER BY facility_count DESC, state")
                .load::<FacilitiesByState>(db_conn)
        })
    }

    pub fn avg_salary_by_job(&self) -> Result<Vec<AvgSalaryByJob>> {
        self.do_read(|db_conn| {
            diesel::sql_query(
                "SELECT job_title, avg_salary, employee_count FROM avg_salary_by_job ORDER BY job_title"
            )
            .load::<AvgSalaryByJob>(db_conn)
        })
    }

    pub fn programs_by_interest_type(&self) -> Result<Vec<ProgramsByInterestType>> {
        self.do_read(|db_conn| {
            diesel::sql_query(
                "SELECT interest_type_id, program_count, program_common_name FROM programs_by_interest_type ORDER BY program_count DESC, interest_type_id"
            )
            .load::<ProgramsByInterestType>(db_conn)
        })
    }

    /// Rows of a view as display strings, matching `ViewKind::columns()`.
    /// NULL becomes an empty string.
    pub fn read_view_rows(&self, kind: ViewKind) -> Result<Vec<Vec<String>>> {
        let rows = match kind {
            ViewKind::FacilitiesByState => self.facilities_by_state()?
                .into_iter()
                .map(|r| vec![r.state, r.facility_count.to_string()])
                .collect(),
            ViewKind::AvgSalaryByJob => self.avg_salary_by_job()?
                .into_iter()
                .map(|r| vec![
                    cell(&r.job_title),
                    r.avg_salary.map(|s| format!("{:.2}", s)).unwrap_or_default(),
                    r.employee_count.to_string(),
                ])
                .collect(),
            ViewKind::ProgramsByInterestType => self.programs_by_interest_type()?
                .into_iter()
                .map(|r| vec![
                    cell(&r.interest_type_id),
                    r.program_count.to_string(),
                    cell(&r.program_common_name),
                ])
                .collect(),
        };
        Ok(rows)
    }
}
