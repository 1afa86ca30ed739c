//! Keyboard focus order for the New Account form.
//!
//! Focus is typed: every focusable element is a [`FocusStop`], declared in
//! tab order, and [`FocusCycle`] walks that order with wraparound at both
//! ends. Each risk checkbox is its own stop, matching how the original form
//! tabbed through them one by one.

use enroll_form::{FieldId, RiskLevel};

/// Direction of focus movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    /// Tab, Down
    Forward,
    /// Shift+Tab, Up
    Backward,
}

/// Every focusable element, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusStop {
    FullName,
    InitialInvestment,
    RiskHigh,
    RiskMedium,
    RiskLow,
    Comment,
    Dependents,
    Terms,
    Submit,
}

impl FocusStop {
    /// Tab order.
    pub const ALL: [FocusStop; 9] = [
        FocusStop::FullName,
        FocusStop::InitialInvestment,
        FocusStop::RiskHigh,
        FocusStop::RiskMedium,
        FocusStop::RiskLow,
        FocusStop::Comment,
        FocusStop::Dependents,
        FocusStop::Terms,
        FocusStop::Submit,
    ];

    /// The form field this stop edits, if any. The three risk checkboxes all
    /// map to the one `investmentRisk` field.
    pub fn field(self) -> Option<FieldId> {
        match self {
            FocusStop::FullName => Some(FieldId::FullName),
            FocusStop::InitialInvestment => Some(FieldId::InitialInvestment),
            FocusStop::RiskHigh | FocusStop::RiskMedium | FocusStop::RiskLow => {
                Some(FieldId::InvestmentRisk)
            }
            FocusStop::Comment => Some(FieldId::CommentAboutInvestmentRisk),
            FocusStop::Dependents => Some(FieldId::Dependents),
            FocusStop::Terms => Some(FieldId::AcceptedTermsAndConditions),
            FocusStop::Submit => None,
        }
    }

    /// The risk level toggled by this stop, for the three checkbox stops.
    pub fn risk_level(self) -> Option<RiskLevel> {
        match self {
            FocusStop::RiskHigh => Some(RiskLevel::High),
            FocusStop::RiskMedium => Some(RiskLevel::Medium),
            FocusStop::RiskLow => Some(RiskLevel::Low),
            _ => None,
        }
    }

    /// Returns true for the stops that accept typed text.
    pub fn is_text_input(self) -> bool {
        matches!(
            self,
            FocusStop::FullName | FocusStop::InitialInvestment | FocusStop::Comment
        )
    }

    fn index(self) -> usize {
        FocusStop::ALL
            .iter()
            .position(|stop| *stop == self)
            .unwrap_or(0)
    }
}

/// Tracks which stop currently has focus.
///
/// # Example
///
/// ```rust
/// use enroll_tui::focus::{FocusCycle, FocusStop};
///
/// let mut focus = FocusCycle::new();
/// assert_eq!(focus.current(), FocusStop::FullName);
///
/// focus.prev();
/// assert_eq!(focus.current(), FocusStop::Submit); // Wrapped around
/// ```
#[derive(Debug, Clone)]
pub struct FocusCycle {
    current: FocusStop,
}

impl FocusCycle {
    /// Start at the top of the form.
    pub fn new() -> Self {
        Self {
            current: FocusStop::FullName,
        }
    }

    /// The stop that currently has focus.
    pub fn current(&self) -> FocusStop {
        self.current
    }

    /// Check whether a given stop is focused.
    pub fn is_focused(&self, stop: FocusStop) -> bool {
        self.current == stop
    }

    /// Move focus to the next stop, wrapping past the end.
    pub fn next(&mut self) {
        let index = (self.current.index() + 1) % FocusStop::ALL.len();
        self.current = FocusStop::ALL[index];
    }

    /// Move focus to the previous stop, wrapping past the start.
    pub fn prev(&mut self) {
        let index = self
            .current
            .index()
            .checked_sub(1)
            .unwrap_or(FocusStop::ALL.len() - 1);
        self.current = FocusStop::ALL[index];
    }

    /// Move focus in the given direction.
    pub fn move_focus(&mut self, direction: FocusDirection) {
        match direction {
            FocusDirection::Forward => self.next(),
            FocusDirection::Backward => self.prev(),
        }
    }

    /// Jump back to the top of the form.
    pub fn first(&mut self) {
        self.current = FocusStop::FullName;
    }
}

impl Default for FocusCycle {
    fn default() -> Self {
        Self::new()
    }
}
