// Recruitment process prompt templates.

pub const RECRUITMENT_SYSTEM: &str = "\
You are a campus placement advisor for engineering and commerce students. \
Answer in plain text with short numbered points. \
If you are unsure about a company's current process, say so instead of guessing.";

pub const RECRUITMENT_PROMPT: &str = "\
What is the recruitment process for fresher {job_role} at {company_name}. \
Give the brief info about the steps of round after application?. \
Give the info in 8 - 10. \
Give the minimum eligibile criteria of Percentage";

pub fn recruitment_prompt(company_name: &str, job_role: &str) -> String {
    RECRUITMENT_PROMPT
        .replace("{job_role}", job_role)
        .replace("{company_name}", company_name)
}
