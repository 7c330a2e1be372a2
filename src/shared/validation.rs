use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for hex colors accepted by the renderer
    /// - Valid: "#000", "#0008", "#1a2b3c", "#1A2B3C80"
    /// - Invalid: "000000", "#12345", "red", "#ggg"
    pub static ref HEX_COLOR_REGEX: Regex =
        Regex::new(r"^#(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap();
}

/// Checks that a caller-supplied artifact name stays a single flat file name
/// inside the output directory.
pub fn validate_artifact_stem(stem: &str) -> Result<(), ValidationError> {
    let invalid = stem.is_empty()
        || stem.starts_with('.')
        || stem.contains("..")
        || stem.contains(['/', '\\'])
        || stem.chars().any(char::is_control);

    if invalid {
        let mut err = ValidationError::new("artifact_name");
        err.message = Some(
            "filename must be a plain name without path separators, '..' or a leading '.'".into(),
        );
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_regex_valid() {
        assert!(HEX_COLOR_REGEX.is_match("#000"));
        assert!(HEX_COLOR_REGEX.is_match("#000a"));
        assert!(HEX_COLOR_REGEX.is_match("#111111"));
        assert!(HEX_COLOR_REGEX.is_match("#EEeeEE"));
        assert!(HEX_COLOR_REGEX.is_match("#11223344"));
    }

    #[test]
    fn test_hex_color_regex_invalid() {
        assert!(!HEX_COLOR_REGEX.is_match("000000")); // no hash
        assert!(!HEX_COLOR_REGEX.is_match("#12345")); // odd length
        assert!(!HEX_COLOR_REGEX.is_match("#ggg")); // not hex
        assert!(!HEX_COLOR_REGEX.is_match("red"));
        assert!(!HEX_COLOR_REGEX.is_match(""));
    }

    #[test]
    fn test_validate_artifact_stem() {
        assert!(validate_artifact_stem("a").is_ok());
        assert!(validate_artifact_stem("product-42 label").is_ok());
        assert!(validate_artifact_stem("v1.2").is_ok());

        assert!(validate_artifact_stem("").is_err());
        assert!(validate_artifact_stem("../etc/passwd").is_err());
        assert!(validate_artifact_stem("nested/name").is_err());
        assert!(validate_artifact_stem("nested\\name").is_err());
        assert!(validate_artifact_stem(".hidden").is_err());
        assert!(validate_artifact_stem("bad\nname").is_err());
    }
}
