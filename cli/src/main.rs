use std::path::{Path, PathBuf};
use std::process::exit;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;
use anyhow::{Context, Result, anyhow};

use facilitydb_backend::DatabaseHandle;
use facilitydb_backend::db::views::ViewKind;
use facilitydb_backend::employee_import::import_employees_json;
use facilitydb_backend::facility_xml::import_facilities_xml;
use facilitydb_backend::get_default_db_path;
use facilitydb_backend::logger::{self, format_duration};

fn open_db(db_path: &Path) -> Result<DatabaseHandle> {
    DatabaseHandle::open(db_path)
        .with_context(|| format!("Failed to open database: {:?}", db_path))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn import_xml(db_path: &Path, xml_path: &Path, json: bool) -> Result<()> {
    let db = open_db(db_path)?;
    let start = Instant::now();

    let summary = import_facilities_xml(&db, xml_path)?;

    if json {
        return print_json(&summary);
    }

    println!("Facility elements: {}", summary.facility_nodes);
    println!("Skipped records:   {}", summary.skipped);
    println!("{:<20} {:>10} {:>10}", "Table", "Buffered", "Inserted");
    let rows = [
        ("facilities", summary.buffered.facilities, summary.inserted.facilities),
        ("coordinates", summary.buffered.coordinates, summary.inserted.coordinates),
        ("locations", summary.buffered.locations, summary.inserted.locations),
        ("programs", summary.buffered.programs, summary.inserted.programs),
        ("program_attributes", summary.buffered.program_attributes, summary.inserted.program_attributes),
        ("facility_programs", summary.buffered.facility_programs, summary.inserted.facility_programs),
    ];
    for (table, buffered, inserted) in rows {
        println!("{:<20} {:>10} {:>10}", table, buffered, inserted);
    }
    println!("Data inserted successfully in {}", format_duration(start.elapsed()));

    Ok(())
}

fn import_json(db_path: &Path, json_path: &Path, json: bool) -> Result<()> {
    let db = open_db(db_path)?;
    let start = Instant::now();

    let summary = import_employees_json(&db, json_path)?;

    if json {
        return print_json(&summary);
    }

    println!("Employee records: {}", summary.records);
    println!("Skipped records:  {}", summary.skipped);
    println!("Job titles:       {} new of {}", summary.job_titles_inserted, summary.job_titles_buffered);
    println!("Employees:        {} new of {}", summary.employees_inserted, summary.employees_buffered);
    println!("Data inserted successfully in {}", format_duration(start.elapsed()));

    Ok(())
}

fn show_view(db_path: &Path, view: ViewArg) -> Result<()> {
    let db = open_db(db_path)?;
    let kind = ViewKind::from(view);

    let rows = db.read_view_rows(kind)?;

    println!("{}", kind.columns().join("\t"));
    for row in rows.iter() {
        println!("{}", row.join("\t"));
    }

    Ok(())
}

fn show_counts(db_path: &Path, json: bool) -> Result<()> {
    let db = open_db(db_path)?;
    let counts = db.table_counts()?;

    if json {
        return print_json(&counts);
    }

    println!("facilities:         {}", counts.facilities);
    println!("coordinates:        {}", counts.coordinates);
    println!("locations:          {}", counts.locations);
    println!("programs:           {}", counts.programs);
    println!("program_attributes: {}", counts.program_attributes);
    println!("facility_programs:  {}", counts.facility_programs);
    println!("job_titles:         {}", counts.job_titles);
    println!("employees:          {}", counts.employees);

    Ok(())
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Facility registry and employee data importer", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the SQLite database file.
    /// If not provided, the FACILITYDB_DB environment variable will be used,
    /// then the default location in the application data directory.
    #[arg(long, global = true, value_name = "FILE_PATH", env = "FACILITYDB_DB")]
    db_path: Option<PathBuf>,

    /// Log level for this run: silent, error, warn, info or debug.
    /// Overrides the LOG_LEVEL environment variable.
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Import a facility registry XML document
    #[command(arg_required_else_help = true)]
    ImportXml {
        #[arg(value_name = "FILE_PATH")]
        path: PathBuf,

        /// Print the import summary as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Import an employee JSON array
    #[command(arg_required_else_help = true)]
    ImportJson {
        #[arg(value_name = "FILE_PATH")]
        path: PathBuf,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the rows of a summary view, tab separated
    #[command(arg_required_else_help = true)]
    ShowView {
        #[arg(value_enum)]
        view: ViewArg,
    },

    /// Print the row count of every table
    Counts {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ViewArg {
    FacilitiesByState,
    AvgSalaryByJob,
    ProgramsByInterestType,
}

impl From<ViewArg> for ViewKind {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::FacilitiesByState => ViewKind::FacilitiesByState,
            ViewArg::AvgSalaryByJob => ViewKind::AvgSalaryByJob,
            ViewArg::ProgramsByInterestType => ViewKind::ProgramsByInterestType,
        }
    }
}

fn main() {
    // May define FACILITYDB_DB or FACILITYDB_DIR. Clap reads FACILITYDB_DB via `env`.
    if dotenv().is_err() {
        logger::debug("No .env file found or failed to load.");
    }

    let cli = Cli::parse();

    if let Some(level) = cli.log_level.as_deref() {
        if !logger::set_log_level_str(level) {
            let current = logger::get_log_level();
            logger::warn(&format!("Unknown log level '{}', keeping {}", level, current.as_str()));
            eprintln!("Unknown log level '{}', keeping {}", level, current.as_str());
        }
    }

    // Precedence:
    // - given with --db-path
    // - set with env var FACILITYDB_DB
    // - get_default_db_path()
    let db_path = match cli.db_path {
        Some(path) => path,
        None => match get_default_db_path() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Failed to get the database path: {}", e);
                eprintln!("Use the --db-path option or set the FACILITYDB_DB environment variable.");
                exit(1);
            }
        },
    };

    let command_result = match cli.command {
        Commands::ImportXml { path, json } => {
            if !path.is_file() {
                Err(anyhow!("XML file does not exist: {:?}", path))
            } else {
                import_xml(&db_path, &path, json)
            }
        }

        Commands::ImportJson { path, json } => {
            if !path.is_file() {
                Err(anyhow!("JSON file does not exist: {:?}", path))
            } else {
                import_json(&db_path, &path, json)
            }
        }

        Commands::ShowView { view } => show_view(&db_path, view),

        Commands::Counts { json } => show_counts(&db_path, json),
    };

    if let Err(e) = command_result {
        eprintln!("Error executing command: {:#}", e);
        exit(1);
    }
}
