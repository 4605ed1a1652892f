use crate::models::JobPosting;
use regex::Regex;
use std::sync::OnceLock;

/// Substrings that mark a posting as remote-friendly
const REMOTE_KEYWORDS: [&str; 5] = ["remote", "work from home", "wfh", "telecommute", "distributed"];

static SALARY_RE: OnceLock<Regex> = OnceLock::new();

/// Matches "$60,000", "60000", "$60K", "$150,000" and similar.
///
/// Groups: 1 = leading 2-3 digits, 2 = first thousands triplet,
/// 3 = second triplet, 4 = k suffix. The number must not touch other digits
/// on either side, which forces "60000" to split as 60|000 instead of
/// stopping after "600". Letters next to it ("USD", "pa") are fine.
fn salary_regex() -> &'static Regex {
    SALARY_RE.get_or_init(|| {
        Regex::new(r"(?:^|\D)\$?(\d{2,3})(?:[,.]?(\d{3}))?(?:[,.]?(\d{3}))?\s*([kK])?(?:\D|$)")
            .expect("salary pattern is valid")
    })
}

/// Extract a yearly salary figure from free text
///
/// The first match wins. Only the leading digits and the first triplet are
/// used; a `k` suffix scales values below 1000 by a thousand. Returns `None`
/// when the text carries no recognizable figure, which callers must treat as
/// "unknown" rather than zero.
pub fn extract_salary(text: &str) -> Option<u64> {
    let caps = salary_regex().captures(text)?;

    let leading = caps.get(1)?.as_str();
    let thousands = caps.get(2).map_or("", |m| m.as_str());
    let value: u64 = format!("{leading}{thousands}").parse().ok()?;

    if caps.get(4).is_some() && value < 1000 {
        Some(value * 1000)
    } else {
        Some(value)
    }
}

/// Salary for a posting: the formatted salary text first, then the snippet
pub fn job_salary(job: &JobPosting) -> Option<u64> {
    job.salary_text
        .as_deref()
        .and_then(extract_salary)
        .or_else(|| extract_salary(&job.snippet))
}

/// Whether any of the given texts mentions remote work
pub fn mentions_remote(location: &str, title: &str, snippet: &str) -> bool {
    [location, title, snippet].iter().any(|field| {
        let field = field.to_lowercase();
        REMOTE_KEYWORDS.iter().any(|keyword| field.contains(keyword))
    })
}

/// Classify a posting as remote from its location, title and snippet
#[inline]
pub fn is_remote(job: &JobPosting) -> bool {
    mentions_remote(&job.location, &job.title, &job.snippet)
}
