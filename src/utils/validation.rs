//! Centralized validation and helper functions.

/// Security-related constants for input validation
pub const MAX_FILENAME_LENGTH: usize = 255;
pub const MIN_FILE_CONTENT_SIZE: usize = 1;

/// Security validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Filename too long: exceeds {MAX_FILENAME_LENGTH} characters")]
    FilenameTooLong,
    #[error("Invalid filename: contains path traversal or invalid characters")]
    InvalidFilename,
    #[error("Empty filename provided")]
    EmptyFilename,
    #[error("File content appears malformed or invalid")]
    InvalidFileContent,
    #[error("File appears to be binary, expected plain text")]
    BinaryContent,
}

/// Secure filename validation to prevent directory traversal and other attacks
///
/// Validates and sanitizes filenames by:
/// - Checking length limits
/// - Preventing directory traversal (../, ..\\)
/// - Removing potentially dangerous characters
/// - Ensuring filename is not empty after sanitization
///
/// # Errors
///
/// Returns `ValidationError::EmptyFilename` if the filename is empty,
/// `ValidationError::FilenameTooLong` if it exceeds the limit, or
/// `ValidationError::InvalidFilename` if it contains invalid characters.
pub fn validate_filename(filename: &str) -> Result<String, ValidationError> {
    if filename.trim().is_empty() {
        return Err(ValidationError::EmptyFilename);
    }

    if filename.len() > MAX_FILENAME_LENGTH {
        return Err(ValidationError::FilenameTooLong);
    }

    // Prevent directory traversal attacks
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(ValidationError::InvalidFilename);
    }

    // Check for null bytes and other dangerous characters
    if filename.contains('\0') || filename.chars().any(|c| ('\x01'..='\x1F').contains(&c)) {
        return Err(ValidationError::InvalidFilename);
    }

    // Sanitize filename by keeping letters and digits of any script plus a few separators
    let sanitized = filename
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '.' || *c == '-' || *c == '_' || *c == ' ')
        .collect::<String>();

    if sanitized.trim().is_empty() {
        return Err(ValidationError::InvalidFilename);
    }

    // Prevent hidden files (starting with .) unless it's a known extension
    if sanitized.starts_with('.') && !has_known_extension(&sanitized) {
        return Err(ValidationError::InvalidFilename);
    }

    Ok(sanitized)
}

/// Check if filename has a known plain-text document extension
fn has_known_extension(filename: &str) -> bool {
    let safe_extensions = [".txt", ".text", ".md", ".csv", ".tsv", ".html", ".htm", ".rst"];

    safe_extensions
        .iter()
        .any(|ext| filename.to_lowercase().ends_with(ext))
}

/// Check if content appears to be binary
///
/// Heuristic: more than 1% control bytes (other than tab, newline, carriage
/// return, form feed, vertical tab) in the first 1024 bytes. Bytes >= 0x80 are
/// not counted, so UTF-8 text in any script passes.
#[must_use]
pub fn is_binary_content(bytes: &[u8]) -> bool {
    let sample_size = std::cmp::min(bytes.len(), 1024);

    // For very small samples only a NUL byte is conclusive
    if sample_size < 10 {
        return bytes.contains(&0);
    }

    let control_count = bytes[..sample_size]
        .iter()
        .filter(|&&b| b < 9 || (b > 13 && b < 32) || b == 127)
        .count();

    control_count * 100 > sample_size
}

/// Validate uploaded document content and decode it as text
///
/// # Errors
///
/// Returns `ValidationError::InvalidFileContent` if the content is empty or not
/// UTF-8, or `ValidationError::BinaryContent` if it looks like a binary file.
pub fn validate_text_content(content: &[u8]) -> Result<String, ValidationError> {
    if content.len() < MIN_FILE_CONTENT_SIZE {
        return Err(ValidationError::InvalidFileContent);
    }

    if is_binary_content(content) {
        return Err(ValidationError::BinaryContent);
    }

    std::str::from_utf8(content)
        .map(str::to_string)
        .map_err(|_| ValidationError::InvalidFileContent)
}

/// Comprehensive input validation combining filename and content checks
///
/// # Errors
///
/// Returns a `ValidationError` if filename validation or content validation fails.
pub fn validate_upload(
    filename: Option<&str>,
    content: &[u8],
) -> Result<(Option<String>, String), ValidationError> {
    let validated_filename = if let Some(name) = filename {
        Some(validate_filename(name)?)
    } else {
        None
    };

    let text = validate_text_content(content)?;
    Ok((validated_filename, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_filename_safe() {
        assert!(validate_filename("essay.txt").is_ok());
        assert!(validate_filename("my-file.md").is_ok());
        assert!(validate_filename("data_file.txt").is_ok());
        assert!(validate_filename("chapter 123.txt").is_ok());
    }

    #[test]
    fn test_validate_filename_dangerous() {
        // Directory traversal attempts
        assert!(validate_filename("../etc/passwd").is_err());
        assert!(validate_filename("..\\windows\\system32").is_err());
        assert!(validate_filename("test/../../secret").is_err());

        // Null bytes and control characters
        assert!(validate_filename("test\0.txt").is_err());
        assert!(validate_filename("test\x01.txt").is_err());

        let long_name = "a".repeat(300);
        assert!(matches!(
            validate_filename(&long_name),
            Err(ValidationError::FilenameTooLong)
        ));

        assert!(matches!(
            validate_filename("   "),
            Err(ValidationError::EmptyFilename)
        ));

        // Hidden files without known extensions
        assert!(validate_filename(".hidden").is_err());
        assert!(validate_filename(".notes.txt").is_ok());
    }

    #[test]
    fn test_validate_filename_sanitization() {
        let result = validate_filename("test@#$%file.txt").unwrap();
        assert_eq!(result, "testfile.txt");

        let result = validate_filename("реферат.txt").unwrap();
        assert_eq!(result, "реферат.txt");

        assert_eq!(validate_filename("курсовая").unwrap(), "курсовая");
        assert_eq!(validate_filename("доклад.docx").unwrap(), "доклад.docx");
        assert_eq!(
            validate_filename("курсовая работа.txt").unwrap(),
            "курсовая работа.txt"
        );
        assert_eq!(validate_filename("论文 2.txt").unwrap(), "论文 2.txt");
    }

    #[test]
    fn test_is_binary_content() {
        assert!(!is_binary_content(b"Plain text with\ttabs\nand newlines\r\n"));
        assert!(!is_binary_content("Текст на русском языке, достаточно длинный".as_bytes()));
        assert!(is_binary_content(&[0u8; 100]));
        assert!(is_binary_content(b"\x7fELF\x02\x01\x01\x00\x00\x00\x00\x00"));
        assert!(is_binary_content(b"a\0b"));
        assert!(!is_binary_content(b"short"));
    }

    #[test]
    fn test_validate_text_content() {
        assert_eq!(validate_text_content(b"hello").unwrap(), "hello");
        assert!(matches!(
            validate_text_content(b""),
            Err(ValidationError::InvalidFileContent)
        ));
        assert!(matches!(
            validate_text_content(&[0u8; 64]),
            Err(ValidationError::BinaryContent)
        ));
        assert!(matches!(
            validate_text_content(&[0x66, 0x6f, 0xff, 0xfe]),
            Err(ValidationError::InvalidFileContent)
        ));
    }

    #[test]
    fn test_validate_upload_complete() {
        let (name, text) = validate_upload(Some("essay.txt"), b"some text").unwrap();
        assert_eq!(name.as_deref(), Some("essay.txt"));
        assert_eq!(text, "some text");

        let (name, _) = validate_upload(None, b"some text").unwrap();
        assert!(name.is_none());

        assert!(validate_upload(Some("../etc/passwd"), b"some text").is_err());
        assert!(validate_upload(Some("essay.txt"), &[0u8; 64]).is_err());
    }

    #[test]
    fn test_has_known_extension() {
        assert!(has_known_extension(".txt"));
        assert!(has_known_extension("notes.MD"));
        assert!(!has_known_extension(".exe"));
        assert!(!has_known_extension(".hidden"));
    }
}
