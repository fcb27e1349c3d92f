//! Digest card model for Paper Digest
//!
//! This module holds everything that describes a card independently of how it
//! is shown: the form the user fills in, the derived preview state, the card
//! styles and the geometry shared by the on-screen painter and the exporter.
//!
//! # Architecture
//!
//! - `style.rs` - Background themes, card fonts and their palettes
//! - `form.rs` - `FormState`, defaults and the generate-time validation gate
//! - `date.rs` - Date input parsing and `YYYY年MM月DD日` formatting
//! - `preview.rs` - `PreviewState`, a pure projection of `FormState`
//! - `layout.rs` - Positioned text lines for painting and rasterizing

pub mod date;
pub mod form;
pub mod layout;
pub mod preview;
pub mod style;

pub use form::{FormState, ValidationError};
pub use layout::CardLayout;
pub use preview::PreviewState;
pub use style::{Background, CardFont, Rgb};
