//! Card Export Module for Paper Digest
//!
//! This module turns the current card into a PNG file or a block of plain
//! text on the clipboard.
//!
//! # Architecture
//!
//! - `artifact.rs` - The exported image and its `文摘_<millis>.png` name
//! - `svg.rs` - Card layout serialized as an SVG document
//! - `rasterizer.rs` - Font database loading and resvg rasterization
//! - `sink.rs` - Output routes (save dialog bridge, direct download)
//! - `pipeline.rs` - The download state machine tying the above together
//! - `clipboard.rs` - Plain-text copy with a fallback writer

pub mod artifact;
pub mod clipboard;
pub mod pipeline;
pub mod rasterizer;
pub mod sink;
pub mod svg;

pub use clipboard::{plain_text_block, ClipboardPipeline, ContextClipboard, SystemClipboard};
pub use pipeline::{ExportOutcome, ExportPipeline, LoadEvent};
pub use rasterizer::{RasterOptions, SystemFontLoader};
pub use sink::select_sink;
