use regex::Regex;
use std::sync::OnceLock;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static OFFERING_CODE_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
    })
}

fn offering_code_re() -> &'static Regex {
    OFFERING_CODE_RE.get_or_init(|| Regex::new(r"^[A-Z]{3}\d{4}$").unwrap())
}

/// Appends a message when `value` is empty or whitespace-only.
pub fn require_non_blank(errors: &mut Vec<String>, field_name: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{} is required and cannot be empty", field_name));
    }
}

pub fn is_valid_email(email: &str) -> bool {
    email_re().is_match(email)
}

/// Three uppercase letters followed by four digits, e.g. ABC1234.
pub fn is_valid_offering_code(code: &str) -> bool {
    offering_code_re().is_match(code)
}

pub fn require_range<T: PartialOrd + std::fmt::Display + Copy>(
    errors: &mut Vec<String>,
    field_name: &str,
    value: T,
    min: T,
    max: T,
) {
    // Membership form so non-comparable values (NaN scores) are rejected.
    if !(value >= min && value <= max) {
        errors.push(format!("{} must be between {} and {}", field_name, min, max));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_blank() {
        let mut errors = Vec::new();
        require_non_blank(&mut errors, "Name", "Jane");
        assert!(errors.is_empty());

        require_non_blank(&mut errors, "Name", "   ");
        assert_eq!(errors, vec!["Name is required and cannot be empty"]);
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane@example.c"));
    }

    #[test]
    fn test_is_valid_offering_code() {
        assert!(is_valid_offering_code("ABC1234"));
        assert!(!is_valid_offering_code("ab1234"));
        assert!(!is_valid_offering_code("ABCD123"));
        assert!(!is_valid_offering_code("AB12345"));
        assert!(!is_valid_offering_code("ABC1234X"));
    }

    #[test]
    fn test_require_range() {
        let mut errors = Vec::new();
        require_range(&mut errors, "Credits", 3, 1, 6);
        assert!(errors.is_empty());

        require_range(&mut errors, "Credits", 7, 1, 6);
        assert_eq!(errors, vec!["Credits must be between 1 and 6"]);
    }

    #[test]
    fn test_require_range_rejects_nan() {
        let mut errors = Vec::new();
        require_range(&mut errors, "Score", f64::NAN, 0.0, 100.0);
        assert_eq!(errors, vec!["Score must be between 0 and 100"]);
    }
}
