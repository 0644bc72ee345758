//! Rule matcher
//!
//! First-match-wins evaluation over rules in (priority, id) order. Patterns
//! are unanchored regexes matched anywhere in the command text, same as the
//! stored rule semantics admins author against.

use gate_core::entities::Rule;
use regex::Regex;
use tracing::warn;

use super::error::{ServiceError, ServiceResult};

/// Find the first rule whose pattern matches the command text.
///
/// `rules` must already be in evaluation order. A rule whose stored pattern
/// no longer compiles is skipped with a warning rather than failing the
/// whole admission.
pub fn first_match<'a>(rules: &'a [Rule], command_text: &str) -> Option<&'a Rule> {
    for rule in rules {
        match Regex::new(&rule.pattern) {
            Ok(re) => {
                if re.is_match(command_text) {
                    return Some(rule);
                }
            }
            Err(e) => {
                warn!(rule_id = rule.id, error = %e, "skipping rule with invalid stored pattern");
            }
        }
    }
    None
}

/// Validate that a pattern compiles as a regex
pub fn validate_pattern(pattern: &str) -> ServiceResult<()> {
    Regex::new(pattern)
        .map(|_| ())
        .map_err(|e| ServiceError::from(gate_core::DomainError::InvalidPattern(e.to_string())))
}

/// Find existing rules with the same pattern but a different action.
///
/// A deliberately narrow heuristic: only byte-identical patterns count as a
/// conflict. Overlapping-but-different patterns are legitimate layering
/// (priority decides), and regex equivalence in general is undecidable.
pub fn find_conflicts<'a>(rules: &'a [Rule], pattern: &str, exclude_id: Option<i64>) -> Vec<&'a Rule> {
    rules
        .iter()
        .filter(|r| r.pattern == pattern && Some(r.id) != exclude_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_core::entities::RuleAction;

    fn rule(id: i64, pattern: &str, action: RuleAction, priority: i32) -> Rule {
        Rule::new(id, pattern.into(), action, None, priority, None)
    }

    #[test]
    fn test_first_match_respects_order() {
        let rules = vec![
            rule(1, r"rm\s+-rf\s+/", RuleAction::AutoReject, 0),
            rule(2, "^rm", RuleAction::RequireApproval, 1),
        ];

        let matched = first_match(&rules, "rm -rf /").unwrap();
        assert_eq!(matched.id, 1);

        let matched = first_match(&rules, "rm notes.txt").unwrap();
        assert_eq!(matched.id, 2);
    }

    #[test]
    fn test_first_match_is_unanchored() {
        let rules = vec![rule(1, r"git\s+(status|log)", RuleAction::AutoAccept, 1)];
        assert!(first_match(&rules, "cd repo && git status").is_some());
    }

    #[test]
    fn test_no_match() {
        let rules = vec![rule(1, "^ls", RuleAction::AutoAccept, 1)];
        assert!(first_match(&rules, "make build").is_none());
    }

    #[test]
    fn test_invalid_stored_pattern_is_skipped() {
        let rules = vec![
            rule(1, "(unclosed", RuleAction::AutoReject, 0),
            rule(2, "^ls", RuleAction::AutoAccept, 1),
        ];
        let matched = first_match(&rules, "ls -la").unwrap();
        assert_eq!(matched.id, 2);
    }

    #[test]
    fn test_validate_pattern() {
        assert!(validate_pattern(r"^git\s+status$").is_ok());
        assert!(validate_pattern("(unclosed").is_err());
    }

    #[test]
    fn test_find_conflicts_exact_pattern_only() {
        let rules = vec![
            rule(1, "^ls", RuleAction::AutoAccept, 1),
            rule(2, "^ls.*", RuleAction::AutoReject, 1),
        ];

        let conflicts = find_conflicts(&rules, "^ls", None);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].id, 1);

        // The rule being updated does not conflict with itself
        assert!(find_conflicts(&rules, "^ls", Some(1)).is_empty());
    }
}
