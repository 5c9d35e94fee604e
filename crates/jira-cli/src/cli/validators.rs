//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

use crate::session::normalize_host;

/// Validate and normalize an issue key.
///
/// Expected format: `PROJECT-123`, where the project part starts with a
/// letter and continues with letters, digits or underscores. The key is
/// upper-cased.
///
/// Examples: `PROJ-1`, `ab_2-15` (becomes `AB_2-15`)
pub fn validate_issue_key(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Issue key cannot be empty".to_string());
    }

    let Some((project, number)) = s.rsplit_once('-') else {
        return Err(format!(
            "Invalid issue key: '{s}'. Expected format: PROJECT-123"
        ));
    };

    validate_project_key(project).map_err(|e| format!("Invalid issue key '{s}': {e}"))?;

    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!(
            "Invalid issue key '{s}': the part after the last '-' must be a number"
        ));
    }

    Ok(s.to_ascii_uppercase())
}

/// Validate and upper-case a project key.
pub fn validate_project_key(s: &str) -> Result<String, String> {
    let s = s.trim();
    let mut chars = s.chars();
    match chars.next() {
        None => return Err("project key cannot be empty".to_string()),
        Some(c) if !c.is_ascii_alphabetic() => {
            return Err("project key must start with a letter".to_string());
        }
        Some(_) => {}
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err("project key may only contain letters, digits and underscores".to_string());
    }
    Ok(s.to_ascii_uppercase())
}

/// Validate and normalize a host argument.
///
/// Surrounding whitespace and trailing slashes are removed; a scheme is kept.
pub fn validate_host(s: &str) -> Result<String, String> {
    let host = normalize_host(s);
    if host.is_empty() {
        return Err("Host cannot be empty".to_string());
    }
    if host.chars().any(char::is_whitespace) {
        return Err(format!("Host cannot contain whitespace: '{host}'"));
    }
    Ok(host)
}

/// Reject empty or whitespace-only text.
pub fn validate_not_blank(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("Value cannot be empty".to_string());
    }
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case::canonical("PROJ-123", "PROJ-123")]
    #[case::lowercase("proj-7", "PROJ-7")]
    #[case::whitespace("  ABC-1 ", "ABC-1")]
    #[case::digits_and_underscore("A1_B-42", "A1_B-42")]
    fn test_valid_issue_keys(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(validate_issue_key(input), Ok(expected.to_string()));
    }

    #[rstest]
    #[case::empty("")]
    #[case::no_dash("PROJ123")]
    #[case::no_number("PROJ-")]
    #[case::non_numeric("PROJ-abc")]
    #[case::leading_digit("1PROJ-1")]
    #[case::no_project("-12")]
    #[case::extra_dash("PR-OJ-1")]
    #[case::inner_space("PR OJ-1")]
    fn test_invalid_issue_keys(#[case] input: &str) {
        assert!(validate_issue_key(input).is_err(), "accepted {input:?}");
    }

    #[rstest]
    #[case::bare("jira.example.com", "jira.example.com")]
    #[case::trailing("https://jira.example.com///", "https://jira.example.com")]
    #[case::padded("  http://localhost:8080/ ", "http://localhost:8080")]
    fn test_valid_hosts(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(validate_host(input), Ok(expected.to_string()));
    }

    #[rstest]
    #[case::empty("")]
    #[case::slashes("///")]
    #[case::inner_space("jira example.com")]
    fn test_invalid_hosts(#[case] input: &str) {
        assert!(validate_host(input).is_err());
    }

    #[test]
    fn test_not_blank() {
        assert!(validate_not_blank("  \t").is_err());
        assert_eq!(validate_not_blank(" Done "), Ok(" Done ".to_string()));
    }

    proptest! {
        #[test]
        fn prop_generated_keys_are_accepted_and_uppercased(
            project in "[a-zA-Z][a-zA-Z0-9_]{0,9}",
            number in 0u32..100_000,
        ) {
            let key = format!("{project}-{number}");
            let validated = validate_issue_key(&key).unwrap();
            prop_assert_eq!(validated, key.to_ascii_uppercase());
        }
    }
}
