use serde::{Deserialize, Serialize};

/// One row of the certification, internship or project tables. The resource
/// column name differs per table; missing cells become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    #[serde(rename = "Job_Role", alias = "Job Role", default)]
    pub job_role: String,
    #[serde(rename = "Skill", alias = "Skills", default)]
    pub skill: String,
    #[serde(
        rename = "Certification",
        alias = "Internship",
        alias = "Project",
        default
    )]
    pub resource: String,
}

/// One row of the detailed role → skills table. Skills are comma-separated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleSkillsRecord {
    #[serde(rename = "Job Role", alias = "Job_Role", default)]
    pub job_role: String,
    #[serde(rename = "Skills", alias = "Skill", default)]
    pub skills: String,
}

/// One row of the Non-IT dataset. The aggregate resource columns are
/// optional; `None` means the table has no such column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NonItRecord {
    #[serde(rename = "Branch", default)]
    pub branch: String,
    #[serde(rename = "Job Role", alias = "Job_Role", default)]
    pub job_role: String,
    #[serde(rename = "Skills", alias = "Skill", default)]
    pub skills: String,
    #[serde(rename = "Certifications", default)]
    pub certifications: Option<String>,
    #[serde(rename = "Internships", default)]
    pub internships: Option<String>,
    #[serde(rename = "Projects", default)]
    pub projects: Option<String>,
}
