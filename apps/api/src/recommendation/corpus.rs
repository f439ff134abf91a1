use crate::data::loader::ItResources;
use crate::models::records::ResourceRecord;

/// The three mutually exclusive resource categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Certifications,
    Internships,
    Projects,
}

/// Documents and their category labels, index-aligned. Order is fixed at
/// build time and matches the feature vectors and cluster labels.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<String>,
    labels: Vec<Category>,
}

impl Corpus {
    pub fn push(&mut self, document: String, label: Category) {
        self.documents.push(document);
        self.labels.push(label);
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    pub fn labels(&self) -> &[Category] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Synthesizes one `"{role} {skill} {resource}"` document per record:
/// certifications first, then internships, then projects, in row order.
pub fn build_corpus(resources: &ItResources) -> Corpus {
    let mut corpus = Corpus::default();
    for (records, label) in [
        (&resources.certifications, Category::Certifications),
        (&resources.internships, Category::Internships),
        (&resources.projects, Category::Projects),
    ] {
        for record in records {
            corpus.push(document_text(record), label);
        }
    }
    corpus
}

fn document_text(record: &ResourceRecord) -> String {
    format!("{} {} {}", record.job_role, record.skill, record.resource)
}
