//! Command validator - syntactic pre-check on raw command text
//!
//! Runs strictly before credit and rule evaluation: an invalid command never
//! consumes a credit and never reaches the matcher. Pure and side-effect-free;
//! callers decide how to record a rejection.

/// Validate raw command text.
///
/// The check applies to the whitespace-trimmed text. Returns the rejection
/// reason on failure.
pub fn validate_command(command_text: &str) -> Result<(), String> {
    let text = command_text.trim();

    if text.is_empty() {
        return Err("Command cannot be empty".to_string());
    }

    if text.chars().any(is_forbidden_control) {
        return Err("Command contains invalid control characters".to_string());
    }

    // Operators can join commands but never open or close one
    if text.starts_with([';', '&', '|']) {
        return Err("Command cannot start with operators".to_string());
    }
    if text.ends_with([';', '&', '|']) {
        return Err("Command cannot end with operators".to_string());
    }

    if has_run(text, ';') {
        return Err("Invalid syntax: multiple semicolons".to_string());
    }
    if has_run(text, '|') {
        return Err("Invalid syntax: multiple pipes".to_string());
    }
    if has_run(text, '&') {
        return Err("Invalid syntax: multiple ampersands".to_string());
    }

    Ok(())
}

/// Control characters outside the printable range, excluding tab (0x09),
/// newline (0x0A) and carriage return (0x0D)
fn is_forbidden_control(c: char) -> bool {
    matches!(c, '\x00'..='\x08' | '\x0B' | '\x0C' | '\x0E'..='\x1F')
}

/// True if `needle` occurs two or more times in a row
fn has_run(text: &str, needle: char) -> bool {
    let mut prev_matched = false;
    for c in text.chars() {
        let matched = c == needle;
        if matched && prev_matched {
            return true;
        }
        prev_matched = matched;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_commands() {
        assert!(validate_command("ls -la").is_ok());
        assert!(validate_command("git status").is_ok());
        assert!(validate_command("echo hello; echo world").is_ok());
        assert!(validate_command("cat a.txt | grep foo").is_ok());
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert_eq!(validate_command("").unwrap_err(), "Command cannot be empty");
        assert_eq!(
            validate_command("   \t ").unwrap_err(),
            "Command cannot be empty"
        );
    }

    #[test]
    fn test_rejects_control_characters() {
        assert_eq!(
            validate_command("echo \x07bell").unwrap_err(),
            "Command contains invalid control characters"
        );
        assert_eq!(
            validate_command("ls\x00").unwrap_err(),
            "Command contains invalid control characters"
        );
    }

    #[test]
    fn test_allows_tab_and_newline() {
        assert!(validate_command("echo a\tb").is_ok());
        assert!(validate_command("echo a\nb").is_ok());
    }

    #[test]
    fn test_rejects_leading_and_trailing_operators() {
        assert_eq!(
            validate_command("| ls").unwrap_err(),
            "Command cannot start with operators"
        );
        assert_eq!(
            validate_command(";ls").unwrap_err(),
            "Command cannot start with operators"
        );
        assert_eq!(
            validate_command("ls &").unwrap_err(),
            "Command cannot end with operators"
        );
        // Trailing whitespace is trimmed before the check
        assert_eq!(
            validate_command("ls | ").unwrap_err(),
            "Command cannot end with operators"
        );
    }

    #[test]
    fn test_rejects_operator_runs() {
        assert_eq!(
            validate_command("ls ;; pwd").unwrap_err(),
            "Invalid syntax: multiple semicolons"
        );
        assert_eq!(
            validate_command("ls || pwd").unwrap_err(),
            "Invalid syntax: multiple pipes"
        );
        assert_eq!(
            validate_command("ls && pwd").unwrap_err(),
            "Invalid syntax: multiple ampersands"
        );
    }

    #[test]
    fn test_single_operators_inside_are_fine() {
        assert!(validate_command("ls ; pwd").is_ok());
        assert!(validate_command("ps aux | grep sshd | wc -l").is_ok());
    }
}
