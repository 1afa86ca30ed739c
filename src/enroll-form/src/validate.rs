//! Pure validation rules for the New Account form.
//!
//! [`validate`] rebuilds the full report on every call: every rule runs
//! against the current record, and a field is either present in the report
//! with exactly one message or absent. Nothing is cached between calls, so a
//! stale error can never outlive the edit that fixed it.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::options::FormOptions;
use crate::values::{DEPENDENTS_UNSET, FieldId, FormValues};

// ============================================================================
// Rule Bounds
// ============================================================================

/// Inclusive length bounds for the full name.
pub const FULL_NAME_MIN: usize = 2;
pub const FULL_NAME_MAX: usize = 100;

/// Minimum opening amount.
pub const INVESTMENT_MIN: f64 = 100.0;

/// Inclusive dependents range once a choice is made.
pub const DEPENDENTS_MIN: i32 = 0;
pub const DEPENDENTS_MAX: i32 = 5;

/// Inclusive length bounds for the risk comment.
pub const COMMENT_MIN: usize = 20;
pub const COMMENT_MAX: usize = 100;

// ============================================================================
// Messages
// ============================================================================

pub const MSG_FULL_NAME_REQUIRED: &str = "Your name is mandatory!!";
pub const MSG_FULL_NAME_TOO_SHORT: &str = "Full name must be at least 2 characters";
pub const MSG_FULL_NAME_TOO_LONG: &str = "Full name must be at most 100 characters";
pub const MSG_INVESTMENT_REQUIRED: &str = "Initial investment is required";
pub const MSG_INVESTMENT_TOO_SMALL: &str = "Initial investment must be at least 100";
pub const MSG_RISK_REQUIRED: &str = "Select at least one risk level";
pub const MSG_COMMENT_REQUIRED: &str = "A comment is required when High risk is selected";
pub const MSG_COMMENT_TOO_SHORT: &str = "Comment must be at least 20 characters";
pub const MSG_COMMENT_TOO_LONG: &str = "Comment must be at most 100 characters";
pub const MSG_DEPENDENTS_REQUIRED: &str = "Choose how many dependents you have";
pub const MSG_DEPENDENTS_OUT_OF_RANGE: &str = "Dependents must be between 0 and 5";
pub const MSG_TERMS_REQUIRED: &str = "You must accept the terms and conditions";

// ============================================================================
// Validation Report
// ============================================================================

/// Validation outcome keyed by field.
///
/// An absent key means the field passed every rule. Serializes as a flat
/// `{ "fieldName": "message" }` object for the debug panes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<FieldId, String>,
}

impl ValidationReport {
    /// The message for `field`, if it failed a rule.
    pub fn error(&self, field: FieldId) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Returns true when `field` failed a rule.
    pub fn has_error(&self, field: FieldId) -> bool {
        self.errors.contains_key(&field)
    }

    /// Returns true when every field passed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Failing fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> + '_ {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: FieldId, message: &'static str) {
        self.errors.insert(field, message.to_string());
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (field, message) in &self.errors {
            map.serialize_entry(field.as_str(), message)?;
        }
        map.end()
    }
}

// ============================================================================
// Entry Points
// ============================================================================

/// Validate a record against the full rule set.
pub fn validate(values: &FormValues) -> ValidationReport {
    validate_with(values, &FormOptions::full())
}

/// Validate a record under a specific form variant.
///
/// The basic variant drops the comment rules entirely; every other rule is
/// shared between variants.
pub fn validate_with(values: &FormValues, options: &FormOptions) -> ValidationReport {
    let mut report = ValidationReport::default();
    if let Some(message) = full_name_error(values) {
        report.insert(FieldId::FullName, message);
    }
    if let Some(message) = initial_investment_error(values) {
        report.insert(FieldId::InitialInvestment, message);
    }
    if let Some(message) = investment_risk_error(values) {
        report.insert(FieldId::InvestmentRisk, message);
    }
    if options.conditional_comment_rule
        && let Some(message) = comment_error(values)
    {
        report.insert(FieldId::CommentAboutInvestmentRisk, message);
    }
    if let Some(message) = dependents_error(values) {
        report.insert(FieldId::Dependents, message);
    }
    if let Some(message) = accepted_terms_error(values) {
        report.insert(FieldId::AcceptedTermsAndConditions, message);
    }
    report
}

// ============================================================================
// Per-field Rules
// ============================================================================

fn full_name_error(values: &FormValues) -> Option<&'static str> {
    if values.full_name.is_empty() {
        return Some(MSG_FULL_NAME_REQUIRED);
    }
    let len = values.full_name.chars().count();
    if len < FULL_NAME_MIN {
        Some(MSG_FULL_NAME_TOO_SHORT)
    } else if len > FULL_NAME_MAX {
        Some(MSG_FULL_NAME_TOO_LONG)
    } else {
        None
    }
}

fn initial_investment_error(values: &FormValues) -> Option<&'static str> {
    match values.initial_investment {
        None => Some(MSG_INVESTMENT_REQUIRED),
        Some(amount) if amount.is_nan() || amount < INVESTMENT_MIN => {
            Some(MSG_INVESTMENT_TOO_SMALL)
        }
        Some(_) => None,
    }
}

fn investment_risk_error(values: &FormValues) -> Option<&'static str> {
    values
        .investment_risk
        .is_empty()
        .then_some(MSG_RISK_REQUIRED)
}

// Cross-field rule: High risk makes the comment mandatory. Without High the
// comment may stay empty, but once typed it obeys the same length bounds.
fn comment_error(values: &FormValues) -> Option<&'static str> {
    let comment = &values.comment_about_investment_risk;
    if comment.is_empty() {
        return values.has_high_risk().then_some(MSG_COMMENT_REQUIRED);
    }
    let len = comment.chars().count();
    if len < COMMENT_MIN {
        Some(MSG_COMMENT_TOO_SHORT)
    } else if len > COMMENT_MAX {
        Some(MSG_COMMENT_TOO_LONG)
    } else {
        None
    }
}

fn dependents_error(values: &FormValues) -> Option<&'static str> {
    if values.dependents == DEPENDENTS_UNSET {
        Some(MSG_DEPENDENTS_REQUIRED)
    } else if !(DEPENDENTS_MIN..=DEPENDENTS_MAX).contains(&values.dependents) {
        Some(MSG_DEPENDENTS_OUT_OF_RANGE)
    } else {
        None
    }
}

fn accepted_terms_error(values: &FormValues) -> Option<&'static str> {
    (!values.accepted_terms_and_conditions).then_some(MSG_TERMS_REQUIRED)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::RiskLevel;
    use pretty_assertions::assert_eq;

    fn valid_record() -> FormValues {
        FormValues {
            full_name: "Jane Doe".into(),
            initial_investment: Some(1000.0),
            investment_risk: [RiskLevel::Low].into_iter().collect(),
            comment_about_investment_risk: "this is a sufficiently long comment".into(),
            dependents: 2,
            accepted_terms_and_conditions: true,
        }
    }

    #[test]
    fn test_valid_record_produces_empty_report() {
        let report = validate(&valid_record());
        assert!(report.is_empty());
        assert_eq!(report.len(), 0);
    }

    #[test]
    fn test_empty_record_fails_every_required_rule() {
        let report = validate(&FormValues::default());
        assert_eq!(report.error(FieldId::FullName), Some(MSG_FULL_NAME_REQUIRED));
        assert_eq!(
            report.error(FieldId::InitialInvestment),
            Some(MSG_INVESTMENT_REQUIRED)
        );
        assert_eq!(report.error(FieldId::InvestmentRisk), Some(MSG_RISK_REQUIRED));
        assert_eq!(
            report.error(FieldId::Dependents),
            Some(MSG_DEPENDENTS_REQUIRED)
        );
        assert_eq!(
            report.error(FieldId::AcceptedTermsAndConditions),
            Some(MSG_TERMS_REQUIRED)
        );
        // Comment stays valid while empty and High is not selected.
        assert_eq!(report.error(FieldId::CommentAboutInvestmentRisk), None);
    }

    #[test]
    fn test_full_name_length_bounds() {
        let mut values = valid_record();
        values.full_name = "J".into();
        assert_eq!(
            validate(&values).error(FieldId::FullName),
            Some(MSG_FULL_NAME_TOO_SHORT)
        );

        values.full_name = "x".repeat(101);
        assert_eq!(
            validate(&values).error(FieldId::FullName),
            Some(MSG_FULL_NAME_TOO_LONG)
        );

        values.full_name = "x".repeat(100);
        assert_eq!(validate(&values).error(FieldId::FullName), None);
    }

    #[test]
    fn test_full_name_length_counts_characters_not_bytes() {
        let mut values = valid_record();
        // Two characters, four bytes.
        values.full_name = "Øy".into();
        assert_eq!(validate(&values).error(FieldId::FullName), None);
    }

    #[test]
    fn test_investment_below_minimum_fails() {
        let mut values = valid_record();
        values.initial_investment = Some(99.9);
        assert_eq!(
            validate(&values).error(FieldId::InitialInvestment),
            Some(MSG_INVESTMENT_TOO_SMALL)
        );

        values.initial_investment = Some(100.0);
        assert_eq!(validate(&values).error(FieldId::InitialInvestment), None);
    }

    #[test]
    fn test_high_risk_makes_comment_mandatory() {
        let mut values = valid_record();
        values.investment_risk.insert(RiskLevel::High);
        values.comment_about_investment_risk.clear();
        assert_eq!(
            validate(&values).error(FieldId::CommentAboutInvestmentRisk),
            Some(MSG_COMMENT_REQUIRED)
        );

        values.comment_about_investment_risk = "too short".into();
        assert_eq!(
            validate(&values).error(FieldId::CommentAboutInvestmentRisk),
            Some(MSG_COMMENT_TOO_SHORT)
        );

        values.comment_about_investment_risk = "a comment long enough to pass".into();
        assert_eq!(
            validate(&values).error(FieldId::CommentAboutInvestmentRisk),
            None
        );
    }

    #[test]
    fn test_comment_optional_without_high_risk() {
        let mut values = valid_record();
        values.investment_risk.clear();
        values.investment_risk.insert(RiskLevel::Medium);

        values.comment_about_investment_risk.clear();
        assert_eq!(
            validate(&values).error(FieldId::CommentAboutInvestmentRisk),
            None
        );

        // Once typed, the length bounds still apply.
        values.comment_about_investment_risk = "nineteen chars here".into();
        assert_eq!(values.comment_about_investment_risk.chars().count(), 19);
        assert_eq!(
            validate(&values).error(FieldId::CommentAboutInvestmentRisk),
            Some(MSG_COMMENT_TOO_SHORT)
        );

        values.comment_about_investment_risk = "c".repeat(101);
        assert_eq!(
            validate(&values).error(FieldId::CommentAboutInvestmentRisk),
            Some(MSG_COMMENT_TOO_LONG)
        );
    }

    #[test]
    fn test_dependents_sentinel_counts_as_missing() {
        let mut values = valid_record();
        values.dependents = DEPENDENTS_UNSET;
        assert_eq!(
            validate(&values).error(FieldId::Dependents),
            Some(MSG_DEPENDENTS_REQUIRED)
        );

        values.dependents = 6;
        assert_eq!(
            validate(&values).error(FieldId::Dependents),
            Some(MSG_DEPENDENTS_OUT_OF_RANGE)
        );

        values.dependents = 0;
        assert_eq!(validate(&values).error(FieldId::Dependents), None);
    }

    #[test]
    fn test_dependents_error_is_independent_of_other_fields() {
        let values = FormValues {
            dependents: DEPENDENTS_UNSET,
            ..FormValues::default()
        };
        assert!(validate(&values).has_error(FieldId::Dependents));

        let mut values = valid_record();
        values.dependents = DEPENDENTS_UNSET;
        assert!(validate(&values).has_error(FieldId::Dependents));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let mut values = valid_record();
        values.full_name.clear();
        values.investment_risk.insert(RiskLevel::High);
        values.comment_about_investment_risk = "short".into();

        let first = validate(&values);
        let second = validate(&values);
        assert_eq!(first, second);
    }

    #[test]
    fn test_basic_variant_skips_comment_rules() {
        let mut values = valid_record();
        values.investment_risk.insert(RiskLevel::High);
        values.comment_about_investment_risk = "short".into();

        let full = validate_with(&values, &FormOptions::full());
        assert!(full.has_error(FieldId::CommentAboutInvestmentRisk));

        let basic = validate_with(&values, &FormOptions::basic());
        assert!(!basic.has_error(FieldId::CommentAboutInvestmentRisk));
        assert!(basic.is_empty());
    }

    #[test]
    fn test_report_serializes_as_flat_object() {
        let values = FormValues {
            dependents: 9,
            ..FormValues::default()
        };
        let report = validate(&values);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["fullName"], MSG_FULL_NAME_REQUIRED);
        assert_eq!(json["dependents"], MSG_DEPENDENTS_OUT_OF_RANGE);
        assert!(json.get("commentAboutInvestmentRisk").is_none());
    }

    #[test]
    fn test_report_iterates_in_form_order() {
        let report = validate(&FormValues::default());
        let fields: Vec<FieldId> = report.iter().map(|(field, _)| field).collect();
        let mut sorted = fields.clone();
        sorted.sort();
        assert_eq!(fields, sorted);
        assert_eq!(fields.first(), Some(&FieldId::FullName));
    }
}
