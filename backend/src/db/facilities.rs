use diesel::prelude::*;
use anyhow::Result;
use serde::Serialize;

use crate::db::facilities_models::*;
use crate::db::DatabaseHandle;
use crate::facility_xml::{ImportBatch, TableRowCounts};
use crate::logger::{debug, error};

pub type FacilitiesDbHandle = DatabaseHandle;

/// Rows per INSERT statement. Employees have the widest rows, 10 columns.
pub const INSERT_CHUNK_SIZE: usize = 1000;

macro_rules! insert_or_ignore_chunks {
    ($fn_name:ident, $table:path, $row:ty) => {
        /// INSERT OR IGNORE in chunks, returns the number of rows that were new.
        pub fn $fn_name(db_conn: &mut SqliteConnection, rows: &[$row]) -> QueryResult<usize> {
            let mut inserted = 0;
            for chunk in rows.chunks(INSERT_CHUNK_SIZE) {
                inserted += diesel::insert_or_ignore_into($table)
                    .values(chunk)
                    .execute(db_conn)?;
            }
            Ok(inserted)
        }
    };
}

insert_or_ignore_chunks!(insert_or_ignore_facilities, crate::db::facilities_schema::facilities::table, Facility);
insert_or_ignore_chunks!(insert_or_ignore_coordinates, crate::db::facilities_schema::coordinates::table, Coordinate);
insert_or_ignore_chunks!(insert_or_ignore_locations, crate::db::facilities_schema::locations::table, Location);
insert_or_ignore_chunks!(insert_or_ignore_programs, crate::db::facilities_schema::programs::table, Program);
insert_or_ignore_chunks!(insert_or_ignore_program_attributes, crate::db::facilities_schema::program_attributes::table, ProgramAttributes);
insert_or_ignore_chunks!(insert_or_ignore_facility_programs, crate::db::facilities_schema::facility_programs::table, FacilityProgram);
insert_or_ignore_chunks!(insert_or_ignore_job_titles, crate::db::facilities_schema::job_titles::table, JobTitle);
insert_or_ignore_chunks!(insert_or_ignore_employees, crate::db::facilities_schema::employees::table, Employee);

/// Row counts of every table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub facilities: i64,
    pub coordinates: i64,
    pub locations: i64,
    pub programs: i64,
    pub program_attributes: i64,
    pub facility_programs: i64,
    pub job_titles: i64,
    pub employees: i64,
}

impl FacilitiesDbHandle {
    /// Writes the import buffers parents first, inside one transaction.
    ///
    /// Rows whose primary key already exists are skipped, so writing the
    /// same batch again changes nothing. Any storage error rolls back the
    /// whole batch.
    pub fn write_facility_batch(&self, batch: &ImportBatch) -> Result<TableRowCounts> {
        self.do_write(|db_conn| {
            db_conn.transaction::<_, diesel::result::Error, _>(|conn| {
                let counts = TableRowCounts {
                    facilities: insert_or_ignore_facilities(conn, &batch.facilities)?,
                    coordinates: insert_or_ignore_coordinates(conn, &batch.coordinates)?,
                    locations: insert_or_ignore_locations(conn, &batch.locations)?,
                    programs: insert_or_ignore_programs(conn, &batch.programs)?,
                    program_attributes: insert_or_ignore_program_attributes(conn, &batch.program_attributes)?,
                    facility_programs: insert_or_ignore_facility_programs(conn, &batch.facility_programs)?,
                };
                debug(&format!("write_facility_batch(): inserted {:?}", counts));
                Ok(counts)
            })
        })
    }

    /// Job titles first, then employees, in one transaction.
    /// Returns (new job titles, new employees).
    pub fn write_employee_batch(&self, job_titles: &[JobTitle], employees: &[Employee]) -> Result<(usize, usize)> {
        self.do_write(|db_conn| {
            db_conn.transaction::<_, diesel::result::Error, _>(|conn| {
                let titles = insert_or_ignore_job_titles(conn, job_titles)?;
                let people = insert_or_ignore_employees(conn, employees)?;
                Ok((titles, people))
            })
        })
    }

    pub fn table_counts(&self) -> Result<TableCounts> {
        use crate::db::facilities_schema::*;

        self.do_read(|db_conn| {
            Ok(TableCounts {
                facilities: facilities::table.count().get_result(db_conn)?,
                coordinates: coordinates::table.count().get_result(db_conn)?,
                locations: locations::table.count().get_result(db_conn)?,
                programs: programs::table.count().get_result(db_conn)?,
                program_attributes: program_attributes::table.count().get_result(db_conn)?,
                facility_programs: facility_programs::table.count().get_result(db_conn)?,
                job_titles: job_titles::table.count().get_result(db_conn)?,
                employees: employees::table.count().get_result(db_conn)?,
            })
        })
    }

    pub fn get_facility(&self, facility_registry_id: &str) -> Option<Facility> {
        use crate::db::facilities_schema::facilities::dsl::*;

        let res = self.do_read(|db_conn| {
            facilities
                .filter(registry_id.eq(facility_registry_id))
                .select(Facility::as_select())
                .first(db_conn)
                .optional()
        });

        match res {
            Ok(x) => x,
            Err(e) => {
                error(&format!("get_facility(): {}", e));
                None
            }
        }
    }

    pub fn get_coordinate(&self, facility_registry_id: &str) -> Option<Coordinate> {
        use crate::db::facilities_schema::coordinates::dsl::*;

        let res = self.do_read(|db_conn| {
            coordinates
                .filter(registry_id.eq(facility_registry_id))
                .select(Coordinate::as_select())
                .first(db_conn)
                .optional()
        });

        match res {
            Ok(x) => x,
            Err(e) => {
                error(&format!("get_coordinate(): {}", e));
                None
            }
        }
    }

    /// Sorted by registry id.
    pub fn get_all_facilities(&self) -> Result<Vec<Facility>> {
        use crate::db::facilities_schema::facilities::dsl::*;

        self.do_read(|db_conn| {
            facilities
                .order(registry_id)
                .select(Facility::as_select())
                .load(db_conn)
        })
    }

    pub fn get_all_programs(&self) -> Result<Vec<Program>> {
        use crate::db::facilities_schema::programs::dsl::*;

        self.do_read(|db_conn| {
            programs
                .order((program_identifier, program_full_name))
                .select(Program::as_select())
                .load(db_conn)
        })
    }

    pub fn get_all_program_attributes(&self) -> Result<Vec<ProgramAttributes>> {
        use crate::db::facilities_schema::program_attributes::dsl::*;

        self.do_read(|db_conn| {
            program_attributes
                .order(interest_type_id)
                .select(ProgramAttributes::as_select())
                .load(db_conn)
        })
    }

    pub fn get_all_facility_programs(&self) -> Result<Vec<FacilityProgram>> {
        use crate::db::facilities_schema::facility_programs::dsl::*;

        self.do_read(|db_conn| {
            facility_programs
                .order((registry_id, program_identifier, program_full_name))
                .select(FacilityProgram::as_select())
                .load(db_conn)
        })
    }

    pub fn get_all_employees(&self) -> Result<Vec<Employee>> {
        use crate::db::facilities_schema::employees::dsl::*;

        self.do_read(|db_conn| {
            employees
                .order(id)
                .select(Employee::as_select())
                .load(db_conn)
        })
    }

    pub fn get_all_job_titles(&self) -> Result<Vec<JobTitle>> {
        use crate::db::facilities_schema::job_titles::dsl::*;

        self.do_read(|db_conn| {
            job_titles
                .order(job_title)
                .select(JobTitle::as_select())
                .load(db_conn)
        })
    }
}
