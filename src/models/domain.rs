use serde::{Deserialize, Serialize};

/// Seniority the user is searching at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    #[default]
    Mid,
    Senior,
    Lead,
}

/// Preferred work arrangement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    Remote,
    #[default]
    Hybrid,
    Onsite,
    /// Any arrangement; disables work-mode filtering.
    Flexible,
}

/// A user's job-search preference profile
///
/// Text fields use the empty string for "unset". Records persisted by older
/// clients may lack fields; those take the defaults below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub job_title: String,
    pub experience_level: ExperienceLevel,
    pub salary_min: String,
    pub salary_max: String,
    pub work_type: WorkType,
    pub industries: String,
    pub skills: String,
    pub remote_preference: bool,
    pub willing_to_relocate: bool,
    pub location: String,
}

impl UserPreferences {
    /// Whether the profile is specific enough to filter jobs with.
    ///
    /// Requires a title, skills and at least one salary bound.
    pub fn has_completed_profile(&self) -> bool {
        is_set(&self.job_title)
            && is_set(&self.skills)
            && (is_set(&self.salary_min) || is_set(&self.salary_max))
    }

    /// Percentage (0-100) of the profile checklist that is filled in
    pub fn completeness(&self) -> u8 {
        let checklist = [
            is_set(&self.job_title),
            is_set(&self.skills),
            is_set(&self.salary_min) || is_set(&self.salary_max),
            is_set(&self.industries),
            is_set(&self.location),
        ];

        let filled = checklist.iter().filter(|done| **done).count();
        ((filled as f64 / checklist.len() as f64) * 100.0).round() as u8
    }

    /// Lower salary bound, if set and numeric
    pub fn min_salary(&self) -> Option<u64> {
        parse_salary_bound(&self.salary_min)
    }

    /// Upper salary bound, if set and numeric
    pub fn max_salary(&self) -> Option<u64> {
        parse_salary_bound(&self.salary_max)
    }

    /// Preference skills, trimmed and lowercased, blanks dropped
    pub fn skill_list(&self) -> Vec<String> {
        self.skills
            .split(',')
            .map(|skill| skill.trim().to_lowercase())
            .filter(|skill| !skill.is_empty())
            .collect()
    }

    /// Shallow-merge an update onto this record
    pub fn merge(&mut self, update: PreferencesUpdate) {
        let PreferencesUpdate {
            job_title,
            experience_level,
            salary_min,
            salary_max,
            work_type,
            industries,
            skills,
            remote_preference,
            willing_to_relocate,
            location,
        } = update;

        if let Some(v) = job_title { self.job_title = v; }
        if let Some(v) = experience_level { self.experience_level = v; }
        if let Some(v) = salary_min { self.salary_min = v; }
        if let Some(v) = salary_max { self.salary_max = v; }
        if let Some(v) = work_type { self.work_type = v; }
        if let Some(v) = industries { self.industries = v; }
        if let Some(v) = skills { self.skills = v; }
        if let Some(v) = remote_preference { self.remote_preference = v; }
        if let Some(v) = willing_to_relocate { self.willing_to_relocate = v; }
        if let Some(v) = location { self.location = v; }
    }
}

#[inline]
fn is_set(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Parse a free-text salary bound such as "80000", "80,000" or "$80000".
/// Anything that is not a plain non-negative number counts as unset.
fn parse_salary_bound(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '_') && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let value: f64 = cleaned.parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value.round() as u64)
    } else {
        None
    }
}

/// Partial preference record; `None` fields are left untouched on merge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferencesUpdate {
    pub job_title: Option<String>,
    pub experience_level: Option<ExperienceLevel>,
    pub salary_min: Option<String>,
    pub salary_max: Option<String>,
    pub work_type: Option<WorkType>,
    pub industries: Option<String>,
    pub skills: Option<String>,
    pub remote_preference: Option<bool>,
    pub willing_to_relocate: Option<bool>,
    pub location: Option<String>,
}

/// A job listing as delivered by the external listing provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub remote: bool,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub salary_text: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Written by the ranker; ignored on input.
    #[serde(default)]
    pub match_score: f64,
}

/// Scoring weights; each is the maximum contribution of its signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub skills: f64,
    pub title: f64,
    pub remote: f64,
    pub salary: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 30.0,
            title: 25.0,
            remote: 20.0,
            salary: 15.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_preferences() -> UserPreferences {
        UserPreferences {
            job_title: "Software Engineer".to_string(),
            skills: "Python, React".to_string(),
            salary_min: "80000".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let prefs = UserPreferences::default();
        assert_eq!(prefs.experience_level, ExperienceLevel::Mid);
        assert_eq!(prefs.work_type, WorkType::Hybrid);
        assert!(prefs.job_title.is_empty());
        assert!(!prefs.remote_preference);
    }

    #[test]
    fn test_completed_profile_requires_title_skills_and_salary() {
        assert!(complete_preferences().has_completed_profile());

        let mut prefs = complete_preferences();
        prefs.job_title.clear();
        assert!(!prefs.has_completed_profile());

        let mut prefs = complete_preferences();
        prefs.skills = "   ".to_string();
        assert!(!prefs.has_completed_profile());

        let mut prefs = complete_preferences();
        prefs.salary_min.clear();
        assert!(!prefs.has_completed_profile());

        prefs.salary_max = "120000".to_string();
        assert!(prefs.has_completed_profile());
    }

    #[test]
    fn test_completeness_percentage() {
        assert_eq!(UserPreferences::default().completeness(), 0);
        assert_eq!(complete_preferences().completeness(), 60);

        let mut prefs = complete_preferences();
        prefs.industries = "fintech".to_string();
        prefs.location = "Berlin".to_string();
        assert_eq!(prefs.completeness(), 100);
    }

    #[test]
    fn test_completeness_does_not_imply_completed_profile() {
        let prefs = UserPreferences {
            job_title: "Designer".to_string(),
            industries: "media".to_string(),
            location: "Lisbon".to_string(),
            ..Default::default()
        };
        assert_eq!(prefs.completeness(), 60);
        assert!(!prefs.has_completed_profile());
    }

    #[test]
    fn test_salary_bound_parsing() {
        assert_eq!(parse_salary_bound("80000"), Some(80000));
        assert_eq!(parse_salary_bound(" $80,000 "), Some(80000));
        assert_eq!(parse_salary_bound(""), None);
        assert_eq!(parse_salary_bound("lots"), None);
        assert_eq!(parse_salary_bound("-5"), None);
    }

    #[test]
    fn test_skill_list_normalized() {
        let prefs = UserPreferences {
            skills: " Python,React ,, rust".to_string(),
            ..Default::default()
        };
        assert_eq!(prefs.skill_list(), vec!["python", "react", "rust"]);
    }

    #[test]
    fn test_merge_is_shallow() {
        let mut prefs = complete_preferences();
        prefs.merge(PreferencesUpdate {
            work_type: Some(WorkType::Remote),
            skills: Some("Go".to_string()),
            ..Default::default()
        });

        assert_eq!(prefs.work_type, WorkType::Remote);
        assert_eq!(prefs.skills, "Go");
        assert_eq!(prefs.job_title, "Software Engineer");
        assert_eq!(prefs.salary_min, "80000");
    }

    #[test]
    fn test_partial_record_deserializes_with_defaults() {
        let prefs: UserPreferences =
            serde_json::from_str(r#"{"jobTitle":"Analyst","workType":"remote"}"#).unwrap();
        assert_eq!(prefs.job_title, "Analyst");
        assert_eq!(prefs.work_type, WorkType::Remote);
        assert_eq!(prefs.experience_level, ExperienceLevel::Mid);
    }
}
