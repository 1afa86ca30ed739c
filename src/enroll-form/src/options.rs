//! Form variant configuration.
//!
//! The demo ships in two flavors: the full form with the conditional comment
//! rule and helper text, and a cut-down basic form without either.

/// Tunable behavior for one form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormOptions {
    /// Show hint text under inputs.
    pub helper_text: bool,
    /// Enforce the comment rules only while High risk is selected.
    ///
    /// When disabled, the comment field is free text with no rules at all.
    pub conditional_comment_rule: bool,
}

impl FormOptions {
    /// The full form: conditional comment rule plus helper text.
    pub fn full() -> Self {
        Self {
            helper_text: true,
            conditional_comment_rule: true,
        }
    }

    /// The cut-down form: no comment rule, no helper text.
    pub fn basic() -> Self {
        Self {
            helper_text: false,
            conditional_comment_rule: false,
        }
    }

    /// Override the helper text setting.
    pub fn with_helper_text(mut self, enabled: bool) -> Self {
        self.helper_text = enabled;
        self
    }

    /// Override the conditional comment rule.
    pub fn with_conditional_comment_rule(mut self, enabled: bool) -> Self {
        self.conditional_comment_rule = enabled;
        self
    }
}

impl Default for FormOptions {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_is_the_default() {
        assert_eq!(FormOptions::default(), FormOptions::full());
        assert!(FormOptions::full().conditional_comment_rule);
        assert!(FormOptions::full().helper_text);
    }

    #[test]
    fn test_basic_disables_extras() {
        let options = FormOptions::basic();
        assert!(!options.helper_text);
        assert!(!options.conditional_comment_rule);
    }

    #[test]
    fn test_builder_overrides() {
        let options = FormOptions::full().with_helper_text(false);
        assert!(!options.helper_text);
        assert!(options.conditional_comment_rule);
    }
}
