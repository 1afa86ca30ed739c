//! Enroll Theme - Indigo visual identity for the New Account demo
//!
//! A muted slate base with an indigo accent. All colors are constants shared
//! by every widget so the form reads as one surface.

use ratatui::style::Color;

// ============================================================
// BRAND COLORS
// ============================================================

/// Primary indigo - main accent color
pub const ACCENT: Color = Color::Rgb(129, 140, 248); // #818CF8

/// Soft indigo - secondary highlights
pub const ACCENT_SOFT: Color = Color::Rgb(165, 180, 252); // #A5B4FC

// ============================================================
// BACKGROUND COLORS
// ============================================================

/// Surface level 0 - darkest surface, card interior
pub const SURFACE_0: Color = Color::Rgb(15, 23, 42); // #0F172A

/// Surface level 1 - inputs and bars
pub const SURFACE_1: Color = Color::Rgb(30, 41, 59); // #1E293B

// ============================================================
// TEXT COLORS
// ============================================================

/// Primary text
pub const TEXT: Color = Color::Rgb(226, 232, 240); // #E2E8F0

/// Dimmed text - labels and key hints
pub const TEXT_DIM: Color = Color::Rgb(148, 163, 184); // #94A3B8

/// Muted text - placeholders and helper text
pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

// ============================================================
// SEMANTIC COLORS
// ============================================================

/// Success - completed submissions
pub const SUCCESS: Color = Color::Rgb(134, 239, 172); // #86EFAC

/// Warning - busy and timeout notices
pub const WARNING: Color = Color::Rgb(253, 224, 71); // #FDE047

/// Error - validation errors and failed submissions
pub const ERROR: Color = Color::Rgb(251, 113, 133); // #FB7185

// ============================================================
// BORDER COLORS
// ============================================================

/// Default border
pub const BORDER: Color = Color::Rgb(51, 65, 85); // #334155

/// Focused border
pub const BORDER_FOCUS: Color = ACCENT;
