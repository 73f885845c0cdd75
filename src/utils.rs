// src/utils.rs
use regex::Regex;

/// Normalize a job title (or any label) for file system usage
pub fn sanitize_for_filename(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Date-stamped CSV export filename; falls back to "search" when no job
/// is attached to the session
pub fn export_filename(job_title: Option<&str>) -> String {
    let label = match job_title {
        Some(title) if !title.trim().is_empty() => sanitize_for_filename(title.trim()),
        _ => "search".to_string(),
    };
    format!(
        "candidates_{}_{}.csv",
        label,
        chrono::Utc::now().format("%Y-%m-%d")
    )
}

/// Extract the numeric list id from a ClickUp list URL
/// (e.g. https://app.clickup.com/12345)
pub fn extract_list_id(url: &str) -> Option<String> {
    let pattern = Regex::new(r"clickup\.com/(\d+)").ok()?;
    pattern
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_for_filename() {
        assert_eq!(sanitize_for_filename("Backend Developer"), "backend_developer");
        assert_eq!(sanitize_for_filename("data-engineer"), "data-engineer");
        assert_eq!(sanitize_for_filename("QA / Tester"), "qa___tester");
    }

    #[test]
    fn test_export_filename_uses_title_or_fallback() {
        let named = export_filename(Some("Backend Developer"));
        assert!(named.starts_with("candidates_backend_developer_"));
        assert!(named.ends_with(".csv"));

        let fallback = export_filename(None);
        assert!(fallback.starts_with("candidates_search_"));

        let blank = export_filename(Some("   "));
        assert!(blank.starts_with("candidates_search_"));
    }

    #[test]
    fn test_extract_list_id() {
        assert_eq!(
            extract_list_id("https://app.clickup.com/12345"),
            Some("12345".to_string())
        );
        assert_eq!(
            extract_list_id("https://app.clickup.com/901100123456/v/li/777"),
            Some("901100123456".to_string())
        );
        assert_eq!(extract_list_id("https://example.com/12345"), None);
        assert_eq!(extract_list_id("https://app.clickup.com/"), None);
    }
}
