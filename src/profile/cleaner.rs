// src/profile/cleaner.rs
//! Text canonicalization applied to assembled profile blobs and scraped text.
//!
//! The rules run in table order, each as one global substitution over the
//! output of the previous rule. Reordering them changes the output.

use regex::{NoExpand, Regex};
use std::sync::LazyLock;

pub struct Rule {
    pub name: &'static str,
    pub pattern: &'static str,
    pub replacement: &'static str,
}

pub const RULES: [Rule; 8] = [
    Rule {
        name: "newline_to_space",
        pattern: r"\n",
        replacement: " ",
    },
    Rule {
        name: "collapse_whitespace",
        pattern: r"\s(\s)+",
        replacement: " ",
    },
    Rule {
        name: "collapse_comma_runs",
        pattern: r",\s(,\s)+",
        replacement: ", ",
    },
    Rule {
        name: "collapse_period_runs",
        pattern: r"\.\s(\.\s)+",
        replacement: ". ",
    },
    Rule {
        name: "period_comma",
        pattern: r"\.,",
        replacement: ".",
    },
    Rule {
        name: "comma_period",
        pattern: r",\.",
        replacement: ".",
    },
    Rule {
        name: "comma_space_period",
        pattern: r",\s\.\s",
        replacement: ". ",
    },
    Rule {
        name: "strip_backslashes",
        pattern: r"\\",
        replacement: "",
    },
];

static COMPILED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|rule| Regex::new(rule.pattern).expect("cleaner rule patterns are valid"))
        .collect()
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CleanMode {
    /// Apply the rule table once. Matches text already stored in the corpora.
    #[default]
    SinglePass,
    /// Re-apply the rule table until the text stops changing.
    Fixpoint,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextCleaner {
    mode: CleanMode,
}

impl TextCleaner {
    pub fn new(mode: CleanMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> CleanMode {
        self.mode
    }

    pub fn clean(&self, text: &str) -> String {
        match self.mode {
            CleanMode::SinglePass => apply_rules(text),
            CleanMode::Fixpoint => {
                // After the first pass every further change shortens the text.
                let mut current = apply_rules(text);
                loop {
                    let next = apply_rules(&current);
                    if next == current {
                        return current;
                    }
                    current = next;
                }
            }
        }
    }
}

fn apply_rules(text: &str) -> String {
    COMPILED
        .iter()
        .zip(RULES.iter())
        .fold(text.to_string(), |acc, (regex, rule)| {
            regex.replace_all(&acc, NoExpand(rule.replacement)).into_owned()
        })
}

/// Single-pass cleanup with the default rule table.
pub fn clean(text: &str) -> String {
    TextCleaner::default().clean(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_order() {
        let names: Vec<&str> = RULES.iter().map(|rule| rule.name).collect();
        assert_eq!(
            names,
            [
                "newline_to_space",
                "collapse_whitespace",
                "collapse_comma_runs",
                "collapse_period_runs",
                "period_comma",
                "comma_period",
                "comma_space_period",
                "strip_backslashes",
            ]
        );
    }

    #[test]
    fn test_newlines_become_spaces() {
        assert_eq!(clean("a\nb"), "a b");
        assert_eq!(clean("a\n\nb"), "a b");
    }

    #[test]
    fn test_backslashes_removed() {
        assert_eq!(clean("a\\b"), "ab");
        assert_eq!(clean("C:\\\\path"), "C:path");
    }

    #[test]
    fn test_separator_runs_collapse() {
        assert_eq!(clean("a,  , b"), "a, b");
        assert_eq!(clean("a, , , b"), "a, b");
        assert_eq!(clean("a. . . b"), "a. b");
        assert_eq!(clean("a, . b"), "a. b");
        assert_eq!(clean("end.,"), "end.");
        assert_eq!(clean("x,.y"), "x.y");
    }

    #[test]
    fn test_mixed_separators_follow_rule_order() {
        // ".," becomes "." only after the period-run rule has already run,
        // so the freshly created ". . " survives a single pass.
        assert_eq!(clean("x., ., y"), "x. . y");
    }

    #[test]
    fn test_single_pass_is_not_idempotent() {
        let once = clean("x., ., y");
        let twice = clean(&once);
        assert_ne!(once, twice);
        assert_eq!(twice, "x. y");
    }

    #[test]
    fn test_fixpoint_is_idempotent() {
        let cleaner = TextCleaner::new(CleanMode::Fixpoint);
        let inputs = [
            "x., ., y",
            "a,\n, , .,. b\\",
            "Summary. . , , , Rust, , . ",
            "plain text",
        ];
        for input in inputs {
            let once = cleaner.clean(input);
            assert_eq!(cleaner.clean(&once), once, "input: {:?}", input);
        }
        assert_eq!(cleaner.clean("x., ., y"), "x. y");
    }

    #[test]
    fn test_clean_output_has_no_newlines_or_backslashes() {
        let out = clean("line one\\\nline two\r\n\t, , done. . ");
        assert!(!out.contains('\n'));
        assert!(!out.contains('\\'));
        assert!(!out.contains(", , "));
        assert!(!out.contains(". . "));
    }
}
