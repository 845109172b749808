//! Changed Terragrunt stacks, as listed by the pipeline's diff step.

use serde::Serialize;

/// Ordered list of stacks touched by the change
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChangedScope(Vec<String>);

impl ChangedScope {
    /// Parse a newline-delimited list. Blank lines are dropped; kept entries
    /// are not trimmed.
    pub fn parse(value: &str) -> Self {
        Self(
            value
                .split('\n')
                .filter(|s| !s.trim().is_empty())
                .map(String::from)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn stacks(&self) -> &[String] {
        &self.0
    }
}

impl std::fmt::Display for ChangedScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "None");
        }
        let quoted: Vec<String> = self.0.iter().map(|s| format!("`{s}`")).collect();
        write!(f, "{}", quoted.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_dropped() {
        let scope = ChangedScope::parse("a\n\nb\n  \nc");
        assert_eq!(scope.stacks(), ["a", "b", "c"]);
        assert_eq!(scope.to_string(), "`a`, `b`, `c`");
    }

    #[test]
    fn test_empty_renders_none() {
        assert_eq!(ChangedScope::parse("").to_string(), "None");
        assert_eq!(ChangedScope::parse("\n  \n\t\n").to_string(), "None");
        assert!(ChangedScope::default().is_empty());
    }

    #[test]
    fn test_single_stack() {
        let scope = ChangedScope::parse("live/prod/vpc\n");
        assert_eq!(scope.to_string(), "`live/prod/vpc`");
    }
}
