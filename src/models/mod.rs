//! Data models for job postings and the shared keyword filter

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A working-student job posting scraped from one employer source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub employer: String,
    pub title: String,
    pub url: String,
    pub location: Option<String>,
    pub discovered_at: DateTime<Utc>,
}

impl JobRecord {
    /// Build a record with an id derived from employer and URL, so the same
    /// posting seen twice (e.g. on consecutive result pages) collapses to
    /// one entry.
    pub fn new(employer: &str, title: &str, url: &str) -> Self {
        let id = format!("{:x}", md5::compute(format!("{employer}:{url}")));

        Self {
            id,
            employer: employer.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            location: None,
            discovered_at: Utc::now(),
        }
    }

    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }
}

/// Keyword variants identifying working-student postings.
///
/// One instance is built in `main` and passed by reference into every
/// source, so the variant lists cannot drift apart per fetcher.
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    title_keywords: Vec<String>,
    seniority_keywords: Vec<String>,
}

impl FilterCriteria {
    pub fn working_student() -> Self {
        Self {
            title_keywords: vec![
                "working student".to_string(),
                "werkstudent".to_string(),
                "werkstudium".to_string(),
            ],
            seniority_keywords: vec!["student".to_string()],
        }
    }

    /// Case-insensitive substring match against the title variants
    pub fn matches_title(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.title_keywords.iter().any(|kw| title.contains(kw))
    }

    /// Case-insensitive match against the seniority variants (Personio
    /// marks student roles in a dedicated field rather than the title)
    pub fn matches_seniority(&self, seniority: &str) -> bool {
        let seniority = seniority.to_lowercase();
        self.seniority_keywords.iter().any(|kw| seniority.contains(kw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_match_is_case_insensitive() {
        let criteria = FilterCriteria::working_student();

        assert!(criteria.matches_title("Werkstudent (m/w/d) Controlling"));
        assert!(criteria.matches_title("WORKING STUDENT - Data Engineering"));
        assert!(criteria.matches_title("Praktikum / Werkstudium Marketing"));
    }

    #[test]
    fn unrelated_titles_are_rejected() {
        let criteria = FilterCriteria::working_student();

        assert!(!criteria.matches_title("Senior Engineer"));
        assert!(!criteria.matches_title("Intern - Propulsion"));
        assert!(!criteria.matches_title(""));
    }

    #[test]
    fn seniority_match_covers_combined_values() {
        let criteria = FilterCriteria::working_student();

        assert!(criteria.matches_seniority("Student/Working Student"));
        assert!(criteria.matches_seniority("student"));
        assert!(!criteria.matches_seniority("Senior"));
    }

    #[test]
    fn record_id_is_stable_per_employer_and_url() {
        let a = JobRecord::new("BMW", "Werkstudent IT", "https://example.com/j/1");
        let b = JobRecord::new("BMW", "Werkstudent IT (repeat)", "https://example.com/j/1");
        let c = JobRecord::new("Other", "Werkstudent IT", "https://example.com/j/1");

        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
    }
}
