//! CSV dataset loading. Headers and cells are trimmed on read; required
//! columns are checked against the header row before any record is parsed.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::records::{NonItRecord, ResourceRecord, RoleSkillsRecord};

pub const CERTIFICATIONS_FILE: &str = "Dataset_certifications.csv";
pub const INTERNSHIPS_FILE: &str = "Dataset_internship.csv";
pub const PROJECTS_FILE: &str = "Dataset_projects.csv";
pub const ROLE_SKILLS_FILE: &str = "job_roles_skills_detailed.csv";
pub const NONIT_FILE: &str = "Dataset_NonIT.csv";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} is missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: String },
}

/// The three IT resource tables, each in file row order.
#[derive(Debug, Clone, Default)]
pub struct ItResources {
    pub certifications: Vec<ResourceRecord>,
    pub internships: Vec<ResourceRecord>,
    pub projects: Vec<ResourceRecord>,
}

pub fn load_it_resources(data_dir: &Path) -> Result<ItResources, LoadError> {
    let resources = ItResources {
        certifications: read_resource_table(&data_dir.join(CERTIFICATIONS_FILE), "Certification")?,
        internships: read_resource_table(&data_dir.join(INTERNSHIPS_FILE), "Internship")?,
        projects: read_resource_table(&data_dir.join(PROJECTS_FILE), "Project")?,
    };
    info!(
        "Loaded IT resources: {} certifications, {} internships, {} projects",
        resources.certifications.len(),
        resources.internships.len(),
        resources.projects.len()
    );
    Ok(resources)
}

pub fn load_role_skills(data_dir: &Path) -> Result<Vec<RoleSkillsRecord>, LoadError> {
    let rows: Vec<RoleSkillsRecord> = read_table(
        &data_dir.join(ROLE_SKILLS_FILE),
        &[&["Job Role", "Job_Role"], &["Skills", "Skill"]],
    )?;
    info!("Loaded {} role skill rows", rows.len());
    Ok(rows)
}

/// Loads the Non-IT table, dropping any row with an empty cell. Aggregate
/// resource columns may be absent from the file entirely.
pub fn load_nonit_records(data_dir: &Path) -> Result<Vec<NonItRecord>, LoadError> {
    let rows: Vec<NonItRecord> = read_table(
        &data_dir.join(NONIT_FILE),
        &[&["Branch"], &["Job Role", "Job_Role"], &["Skills", "Skill"]],
    )?;
    let total = rows.len();
    let rows = drop_incomplete(rows);
    debug!("Dropped {} incomplete Non-IT rows", total - rows.len());
    info!("Loaded {} Non-IT rows", rows.len());
    Ok(rows)
}

/// Keeps rows whose required cells are non-empty. An aggregate cell counts as
/// missing only when its column exists, which the loader encodes as
/// `Some("")` before this point.
fn drop_incomplete(rows: Vec<NonItRecord>) -> Vec<NonItRecord> {
    rows.into_iter()
        .filter(|r| !r.branch.is_empty() && !r.job_role.is_empty() && !r.skills.is_empty())
        .filter(|r| {
            [&r.certifications, &r.internships, &r.projects]
                .iter()
                .all(|cell| cell.as_deref() != Some(""))
        })
        .collect()
}

fn read_resource_table(path: &Path, resource_column: &str) -> Result<Vec<ResourceRecord>, LoadError> {
    let resource = [resource_column];
    read_table(path, &[&["Job_Role", "Job Role"], &["Skill", "Skills"], &resource])
}

/// Reads a headed CSV into typed records after checking that each group of
/// alternative column names has at least one member present.
fn read_table<T>(path: &Path, required: &[&[&str]]) -> Result<Vec<T>, LoadError>
where
    T: DeserializeOwned + NormalizeEmpty,
{
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let headers = reader.headers().map_err(csv_err)?.clone();
    for alternatives in required {
        if !alternatives.iter().any(|name| headers.iter().any(|h| h == *name)) {
            return Err(LoadError::MissingColumn {
                path: path.to_path_buf(),
                column: alternatives.join("' or '"),
            });
        }
    }

    let mut rows = Vec::new();
    for record in reader.deserialize::<T>() {
        let mut row = record.map_err(csv_err)?;
        row.normalize_empty(&headers);
        rows.push(row);
    }
    Ok(rows)
}

/// Post-parse fixups that depend on which columns the file actually has.
trait NormalizeEmpty {
    fn normalize_empty(&mut self, _headers: &StringRecord) {}
}

impl NormalizeEmpty for ResourceRecord {}
impl NormalizeEmpty for RoleSkillsRecord {}

impl NormalizeEmpty for NonItRecord {
    // An empty cell parses as `None`; mark it `Some("")` when the column
    // exists so it can be told apart from an absent column.
    fn normalize_empty(&mut self, headers: &StringRecord) {
        let has = |name: &str| headers.iter().any(|h| h == name);
        for (name, cell) in [
            ("Certifications", &mut self.certifications),
            ("Internships", &mut self.internships),
            ("Projects", &mut self.projects),
        ] {
            if cell.is_none() && has(name) {
                *cell = Some(String::new());
            }
        }
    }
}
