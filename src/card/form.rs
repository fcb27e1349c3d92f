//! The card form and its validation gate.
//!
//! `FormState` is the single source of truth for what the user typed. The
//! preview is recomputed from it; nothing else keeps a copy.

use super::date;
use super::style::{Background, CardFont};
use chrono::NaiveDate;
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Sample digest shown on first launch.
pub const DEFAULT_CONTENT: &str = "人生如茶，需要慢慢品味。在忙碌的生活中，我们常常忘记停下脚步，感受生活的美好。真正的智慧不在于知道多少，而在于懂得如何生活。";
/// Sample source shown on first launch.
pub const DEFAULT_SOURCE: &str = "《生活的艺术》";
/// Sample author shown on first launch.
pub const DEFAULT_AUTHOR: &str = "莫奈黄";

// ─────────────────────────────────────────────────────────────────────────────
// Form State
// ─────────────────────────────────────────────────────────────────────────────

/// Current values of every form control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    /// Digest body text
    pub content: String,
    /// Where the quote comes from
    pub source: String,
    /// Author handle, shown with an `@` prefix
    pub author: String,
    /// Date field as typed (`YYYY-MM-DD`, may be empty)
    pub date: String,
    /// Selected background theme
    pub background: Background,
    /// Selected card font
    pub font: CardFont,
}

impl FormState {
    /// An empty form with default styles.
    pub fn empty() -> Self {
        Self {
            content: String::new(),
            source: String::new(),
            author: String::new(),
            date: String::new(),
            background: Background::default(),
            font: CardFont::default(),
        }
    }

    /// The form as it appears on first launch, dated `today`.
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            content: DEFAULT_CONTENT.to_string(),
            source: DEFAULT_SOURCE.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            date: date::format_input_date(today),
            ..Self::empty()
        }
    }

    /// Check the required fields in order: content, source, author.
    ///
    /// Only the first failing field is reported.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.content.trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        if self.source.trim().is_empty() {
            return Err(ValidationError::EmptySource);
        }
        if self.author.trim().is_empty() {
            return Err(ValidationError::EmptyAuthor);
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Validation Error
// ─────────────────────────────────────────────────────────────────────────────

/// Reasons the generate action refuses to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Digest body is blank
    EmptyContent,
    /// Source is blank
    EmptySource,
    /// Author is blank
    EmptyAuthor,
    /// Date field holds something that is not a date
    InvalidDate,
}

impl ValidationError {
    /// Alert text shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::EmptyContent => "请输入文摘内容！",
            ValidationError::EmptySource => "请输入出处！",
            ValidationError::EmptyAuthor => "请输入视频号作者！",
            ValidationError::InvalidDate => "日期格式无效，请使用 YYYY-MM-DD！",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}
