//! Form data model for the New Account demo.
//!
//! The record mirrors the submission payload: six fields keyed by
//! [`FieldId`], held together in [`FormValues`], and mutated through a
//! [`FieldStore`] with typed [`FieldEdit`] operations.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Risk Levels
// ============================================================================

/// Investment risk bucket the applicant can opt into.
///
/// Declaration order is display order, riskiest first, and the derived `Ord`
/// keeps selections sorted the same way inside [`FormValues`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Every level, riskiest first.
    pub const ALL: [RiskLevel; 3] = [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low];

    /// Canonical name as it appears in the submission record.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Field Identifiers
// ============================================================================

/// Stable identifier for each form field.
///
/// Keys validation errors and touched flags. The string form is the camelCase
/// key the submission record uses, and the derived `Ord` follows form order so
/// keyed collections iterate top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    FullName,
    InitialInvestment,
    InvestmentRisk,
    CommentAboutInvestmentRisk,
    Dependents,
    AcceptedTermsAndConditions,
}

impl FieldId {
    /// Every field, in form order.
    pub const ALL: [FieldId; 6] = [
        FieldId::FullName,
        FieldId::InitialInvestment,
        FieldId::InvestmentRisk,
        FieldId::CommentAboutInvestmentRisk,
        FieldId::Dependents,
        FieldId::AcceptedTermsAndConditions,
    ];

    /// camelCase name matching the submission record key.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::FullName => "fullName",
            FieldId::InitialInvestment => "initialInvestment",
            FieldId::InvestmentRisk => "investmentRisk",
            FieldId::CommentAboutInvestmentRisk => "commentAboutInvestmentRisk",
            FieldId::Dependents => "dependents",
            FieldId::AcceptedTermsAndConditions => "acceptedTermsAndConditions",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Form Values
// ============================================================================

/// Sentinel for the dependents dropdown before the user picks a number.
pub const DEPENDENTS_UNSET: i32 = -1;

/// Complete form record.
///
/// Serializes with camelCase keys so a dump of this struct matches the
/// submission payload field for field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    /// Applicant name. Starts empty.
    pub full_name: String,
    /// Opening amount. `None` until the user enters a number.
    pub initial_investment: Option<f64>,
    /// Chosen risk buckets, kept sorted riskiest first.
    pub investment_risk: BTreeSet<RiskLevel>,
    /// Free-text note about the chosen risk.
    pub comment_about_investment_risk: String,
    /// Number of dependents, or [`DEPENDENTS_UNSET`] before a choice is made.
    pub dependents: i32,
    /// Terms and conditions checkbox.
    pub accepted_terms_and_conditions: bool,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            initial_investment: None,
            investment_risk: BTreeSet::new(),
            comment_about_investment_risk: String::new(),
            dependents: DEPENDENTS_UNSET,
            accepted_terms_and_conditions: false,
        }
    }
}

impl FormValues {
    /// Returns true when the High risk bucket is selected.
    ///
    /// This is the trigger for the conditional comment rule.
    pub fn has_high_risk(&self) -> bool {
        self.investment_risk.contains(&RiskLevel::High)
    }
}

// ============================================================================
// Field Edits
// ============================================================================

/// A typed write to a single field.
///
/// Each variant carries the full replacement value for its field, so applying
/// an edit can never leave a field half-updated.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    FullName(String),
    InitialInvestment(Option<f64>),
    InvestmentRisk(BTreeSet<RiskLevel>),
    CommentAboutInvestmentRisk(String),
    Dependents(i32),
    AcceptedTermsAndConditions(bool),
}

impl FieldEdit {
    /// The field this edit targets.
    pub fn field(&self) -> FieldId {
        match self {
            FieldEdit::FullName(_) => FieldId::FullName,
            FieldEdit::InitialInvestment(_) => FieldId::InitialInvestment,
            FieldEdit::InvestmentRisk(_) => FieldId::InvestmentRisk,
            FieldEdit::CommentAboutInvestmentRisk(_) => FieldId::CommentAboutInvestmentRisk,
            FieldEdit::Dependents(_) => FieldId::Dependents,
            FieldEdit::AcceptedTermsAndConditions(_) => FieldId::AcceptedTermsAndConditions,
        }
    }
}

// ============================================================================
// Field Store
// ============================================================================

/// Holds the current record alongside the initial one it was built from.
///
/// `reset` always restores the construction-time record, however many edits
/// have landed since.
#[derive(Debug, Clone)]
pub struct FieldStore {
    initial: FormValues,
    current: FormValues,
}

impl FieldStore {
    /// Create a store seeded with `initial` as both the current and the
    /// reset-target record.
    pub fn new(initial: FormValues) -> Self {
        Self {
            current: initial.clone(),
            initial,
        }
    }

    /// Apply a single field edit to the current record.
    pub fn set(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::FullName(value) => self.current.full_name = value,
            FieldEdit::InitialInvestment(value) => self.current.initial_investment = value,
            FieldEdit::InvestmentRisk(value) => self.current.investment_risk = value,
            FieldEdit::CommentAboutInvestmentRisk(value) => {
                self.current.comment_about_investment_risk = value;
            }
            FieldEdit::Dependents(value) => self.current.dependents = value,
            FieldEdit::AcceptedTermsAndConditions(value) => {
                self.current.accepted_terms_and_conditions = value;
            }
        }
    }

    /// The current record.
    pub fn snapshot(&self) -> &FormValues {
        &self.current
    }

    /// The record the store was constructed with.
    pub fn initial(&self) -> &FormValues {
        &self.initial
    }

    /// Restore every field to its initial value.
    pub fn reset(&mut self) {
        self.current = self.initial.clone();
    }
}

impl Default for FieldStore {
    fn default() -> Self {
        Self::new(FormValues::default())
    }
}

// ============================================================================
// Tests
// ============================================================================
