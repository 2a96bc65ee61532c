//! # regen-merge
//!
//! A section-preserving merge engine for regenerated source files. Code
//! generators overwrite their output on every run; this crate lets them do
//! that without destroying the hand-written customizations that live inside
//! marker-delimited regions of the previously generated file.
//!
//! ## How it works
//!
//! The engine is a two-phase, marker-delimited, stack-based parser/renderer:
//!
//! 1. **Parse** — the old file is split into lines and folded into a tree of
//!    named [`Section`]s. A section opens on a line containing
//!    `SECTION-START[name]` and closes on the next balancing line containing
//!    `SECTION-END`. The tokens match anywhere on the line, so they embed in
//!    any comment syntax of the language being generated.
//! 2. **Edit** — a [`SectionEditor`] substitutes freshly generated content
//!    into the sections it knows about and leaves everything else alone.
//! 3. **Render** — the tree is serialized back to text. Sections the editor
//!    never touched come out byte-identical to what was parsed.
//!
//! Unbalanced markers never pass silently: a start marker without its end,
//! or a stray end marker, aborts the merge with a [`MergeError`] naming the
//! offending line.
//!
//! ## Example
//!
//! ```rust
//! use regen_merge::Merger;
//!
//! let old = "\
//! // SECTION-START[imports]
//! use std::fmt;
//! // SECTION-END
//! fn handwritten() {}
//! ";
//!
//! let merger = Merger::default();
//! let out = merger
//!     .regenerate(old, &[("imports", "use std::fmt;\nuse std::io;")])
//!     .unwrap();
//!
//! assert!(out.modified);
//! assert!(out.content.contains("use std::io;"));
//! assert!(out.content.contains("fn handwritten"));
//! ```

pub mod editor;
pub mod error;
pub mod lines;
pub mod markers;
pub mod merger;
pub mod parser;
pub mod section;

// Re-export primary public API
pub use editor::{ContentMap, FnEditor, SectionEditor};
pub use error::MergeError;
pub use lines::{LineSplitter, LineTransform, TextTransform};
pub use markers::{END_TOKEN, MarkerConfig, MarkerMatcher, START_TOKEN, TokenMarkers};
pub use merger::{MergeOutput, Merger, MergerConfig};
pub use parser::SectionParser;
pub use section::{Mode, ROOT_SECTION, Section};
