//! `thor` — a small modal terminal text editor.
//!
//! ## Reading guide
//! - **`buffer::Document`**: the lines of the file, each carrying its rendered form and syntax
//!   classes. Every edit re-highlights the touched line and cascades forward while block-comment
//!   state keeps changing.
//! - **`row` / `highlight` / `syntax`**: tab expansion, column mapping and the per-line
//!   classifier driven by a `SyntaxProfile`.
//! - **`input::KeyDecoder`**: turns raw terminal bytes into `Key`s.
//! - **`render`**: composes a whole frame (text rows, status bar, message bar) into one buffer.
//! - **`editor::Editor`**: modes, key dispatch, prompts, search, clipboard and file I/O.
//! - **`terminal`**: raw mode guard plus the stdin/stdout implementations of the I/O seams.

pub mod buffer;
pub mod clipboard;
pub mod config;
pub mod editor;
pub mod highlight;
pub mod input;
pub mod render;
pub mod row;
pub mod search;
pub mod syntax;
pub mod terminal;
pub mod types;
pub mod utils;
