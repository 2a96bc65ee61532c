//! Line splitting and joining.
//!
//! [`LineSplitter`] is the substrate the engine runs on: it breaks a document
//! into lines, feeds each one (then an end-of-input sentinel) to a
//! [`LineTransform`], and joins whatever the transform hands back. A
//! transform may answer any call with nothing at all, which is how the
//! section parser swallows the entire document line by line and responds
//! with a single synthetic line, the rendered output, once the sentinel
//! arrives.

use crate::error::MergeError;

/// Per-line callback driven by [`LineSplitter`].
pub trait LineTransform {
    /// Handle one input line, or the end-of-input sentinel.
    ///
    /// `line` is `Some` for every input line in order, then `None` exactly
    /// once. Returning `Ok(None)` discards the line from the output.
    fn next_line(&mut self, line: Option<&str>) -> Result<Option<String>, MergeError>;
}

/// A whole-text edit that can be chained behind a [`LineSplitter`].
pub trait TextTransform {
    /// Transform `text` into the edited result.
    fn edit(&mut self, text: &str) -> Result<String, MergeError>;

    /// Whether the most recent [`edit`](TextTransform::edit) changed anything.
    fn modified(&self) -> bool;
}

/// Splits input into lines, runs a [`LineTransform`] over them, and joins
/// the surviving replacements back into one string.
///
/// Every non-empty replacement is emitted followed by a single newline,
/// except the last, which carries no forced newline: the sentinel's
/// synthetic replacement brings its own. Output equality against the input
/// is tracked in the modified flag; a chained [`TextTransform`], if
/// configured, runs on this splitter's output and merges its flag in.
pub struct LineSplitter<T: LineTransform> {
    transform: T,
    next: Option<Box<dyn TextTransform>>,
    modified: bool,
}

impl<T: LineTransform> LineSplitter<T> {
    pub fn new(transform: T) -> Self {
        Self {
            transform,
            next: None,
            modified: false,
        }
    }

    /// Chain another transform to run on this one's output.
    pub fn chain(mut self, next: Box<dyn TextTransform>) -> Self {
        self.next = Some(next);
        self
    }
}

impl<T: LineTransform> TextTransform for LineSplitter<T> {
    fn edit(&mut self, text: &str) -> Result<String, MergeError> {
        let mut out = String::new();
        for line in text.lines() {
            if let Some(replacement) = self.transform.next_line(Some(line))? {
                push_replacement(&mut out, &replacement);
            }
        }
        if let Some(replacement) = self.transform.next_line(None)? {
            push_replacement(&mut out, &replacement);
        }

        self.modified = out != text;
        if let Some(next) = self.next.as_mut() {
            let chained = next.edit(&out)?;
            self.modified = self.modified || next.modified();
            return Ok(chained);
        }
        Ok(out)
    }

    fn modified(&self) -> bool {
        self.modified
    }
}

fn push_replacement(out: &mut String, replacement: &str) {
    if replacement.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(replacement);
}
