//! Preview state: the card as it should currently look.
//!
//! `PreviewState` mirrors the structure of the card: one container carrying
//! the background class and five text elements carrying the font class. It is
//! recomputed from `FormState` and is never edited directly by the UI.

use super::date;
use super::form::FormState;
use super::style::{Background, CardFont};
use crate::error::Result;
use chrono::NaiveDate;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Base class every card container carries.
pub const CONTAINER_CLASS: &str = "paper-container";
/// Heading printed at the top of every card.
pub const CARD_TITLE: &str = "每日文摘";

/// Shown in place of an empty digest body.
pub const CONTENT_PLACEHOLDER: &str = "请输入文摘内容...";
/// Shown in place of an empty source.
pub const SOURCE_PLACEHOLDER: &str = "请输入出处";
/// Shown in place of an empty author.
pub const AUTHOR_PLACEHOLDER: &str = "请输入视频号作者";
/// Shown on the date line while the date field is malformed.
pub const INVALID_DATE_TEXT: &str = "日期格式无效";

/// Prefix of the source line.
pub const SOURCE_PREFIX: &str = "——";
/// Prefix of the author line.
pub const AUTHOR_PREFIX: &str = "@";

// ─────────────────────────────────────────────────────────────────────────────
// Style Classes
// ─────────────────────────────────────────────────────────────────────────────

/// A style class attached to a card node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleClass {
    /// `paper-container`
    Container,
    /// `bg-*`
    Background(Background),
    /// `font-*`
    Font(CardFont),
}

impl StyleClass {
    /// Class name as it would appear in a class attribute.
    pub fn name(&self) -> &'static str {
        match self {
            StyleClass::Container => CONTAINER_CLASS,
            StyleClass::Background(bg) => bg.class_name(),
            StyleClass::Font(font) => font.class_name(),
        }
    }
}

/// Ordered set of style classes; adding a present class is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<StyleClass>);

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class unless it is already present.
    pub fn add(&mut self, class: StyleClass) {
        if !self.contains(class) {
            self.0.push(class);
        }
    }

    /// Remove every occurrence of `class`.
    pub fn remove(&mut self, class: StyleClass) {
        self.0.retain(|c| *c != class);
    }

    pub fn contains(&self, class: StyleClass) -> bool {
        self.0.contains(&class)
    }

    /// Replace the whole list.
    pub fn set(&mut self, classes: impl IntoIterator<Item = StyleClass>) {
        self.0.clear();
        for class in classes {
            self.add(class);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleClass> {
        self.0.iter()
    }

    /// Space-separated class attribute.
    pub fn to_attribute(&self) -> String {
        self.0
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Card Elements
// ─────────────────────────────────────────────────────────────────────────────

/// The five text nodes of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Title,
    Date,
    Text,
    Source,
    Author,
}

impl ElementKind {
    /// All elements in top-to-bottom order.
    #[cfg(test)]
    pub const ALL: [ElementKind; 5] = [
        ElementKind::Title,
        ElementKind::Date,
        ElementKind::Text,
        ElementKind::Source,
        ElementKind::Author,
    ];

    fn index(self) -> usize {
        match self {
            ElementKind::Title => 0,
            ElementKind::Date => 1,
            ElementKind::Text => 2,
            ElementKind::Source => 3,
            ElementKind::Author => 4,
        }
    }
}

/// Visible text and classes of one card element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardElement {
    pub text: String,
    pub classes: ClassList,
}

// ─────────────────────────────────────────────────────────────────────────────
// Preview State
// ─────────────────────────────────────────────────────────────────────────────

/// Derived view of the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewState {
    container: ClassList,
    elements: [CardElement; 5],
    date_valid: bool,
}

impl Default for PreviewState {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewState {
    /// A card with default styles and no text apart from the title.
    pub fn new() -> Self {
        let mut state = Self {
            container: ClassList::new(),
            elements: Default::default(),
            date_valid: true,
        };
        state.elements[ElementKind::Title.index()].text = CARD_TITLE.to_string();
        state.apply_background(Background::default());
        state.apply_font(CardFont::default());
        state
    }

    /// Build the preview for `form` in one pass.
    ///
    /// The returned state is complete even when the date is malformed; the
    /// date error is returned alongside it.
    pub fn from_form(form: &FormState, today: NaiveDate) -> (Self, Result<()>) {
        let mut state = Self::new();
        let date_result = state.sync(form, today);
        (state, date_result)
    }

    /// Recompute every part of the preview from `form`.
    pub fn sync(&mut self, form: &FormState, today: NaiveDate) -> Result<()> {
        self.apply_background(form.background);
        self.apply_font(form.font);
        self.render_preview(form);
        self.apply_date(&form.date, today)
    }

    /// Replace the container classes with the base class plus `choice`.
    pub fn apply_background(&mut self, choice: Background) {
        self.container
            .set([StyleClass::Container, StyleClass::Background(choice)]);
    }

    /// Strip every known font class from the text elements, then add `choice`.
    pub fn apply_font(&mut self, choice: CardFont) {
        for element in &mut self.elements {
            for font in CardFont::all() {
                element.classes.remove(StyleClass::Font(*font));
            }
        }
        for element in &mut self.elements {
            element.classes.add(StyleClass::Font(choice));
        }
    }

    /// Update the date line from the date field.
    ///
    /// A malformed date leaves `INVALID_DATE_TEXT` on the card and returns
    /// `Error::InvalidDate`.
    pub fn apply_date(&mut self, selected: &str, today: NaiveDate) -> Result<()> {
        let slot = &mut self.elements[ElementKind::Date.index()];
        match date::resolve_display_date(selected, today) {
            Ok(text) => {
                slot.text = text;
                self.date_valid = true;
                Ok(())
            }
            Err(err) => {
                slot.text = INVALID_DATE_TEXT.to_string();
                self.date_valid = false;
                Err(err)
            }
        }
    }

    /// Recompute the body, source and author lines.
    pub fn render_preview(&mut self, form: &FormState) {
        let content = non_empty_or(&form.content, CONTENT_PLACEHOLDER);
        let source = non_empty_or(&form.source, SOURCE_PLACEHOLDER);
        let author = non_empty_or(&form.author, AUTHOR_PLACEHOLDER);

        self.elements[ElementKind::Text.index()].text = content.to_string();
        self.elements[ElementKind::Source.index()].text = format!("{}{}", SOURCE_PREFIX, source);
        self.elements[ElementKind::Author.index()].text = format!("{}{}", AUTHOR_PREFIX, author);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn element(&self, kind: ElementKind) -> &CardElement {
        &self.elements[kind.index()]
    }

    pub fn text(&self, kind: ElementKind) -> &str {
        &self.element(kind).text
    }

    pub fn container_classes(&self) -> &ClassList {
        &self.container
    }

    /// Whether the date line shows a real date.
    pub fn date_valid(&self) -> bool {
        self.date_valid
    }

    /// Background theme currently applied to the container.
    pub fn background(&self) -> Background {
        self.container
            .iter()
            .find_map(|c| match c {
                StyleClass::Background(bg) => Some(*bg),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Font currently applied to the text elements.
    pub fn font(&self) -> CardFont {
        self.element(ElementKind::Text)
            .classes
            .iter()
            .find_map(|c| match c {
                StyleClass::Font(font) => Some(*font),
                _ => None,
            })
            .unwrap_or_default()
    }
}

/// Empty means empty: a field holding only spaces is shown as typed.
fn non_empty_or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
