//! Two-phase section parsing and rendering.
//!
//! Phase one is a stack machine fed one line at a time: a start marker pushes
//! a new section, an end marker closes the innermost open one, and every
//! other line lands in the head or tail buffer of whichever section sits on
//! top of the stack. Phase two fires when the end-of-input sentinel arrives:
//! the stack must have unwound back to the root, at which point the optional
//! editing hook runs against the tree and the whole document is serialized
//! in one pass.
//!
//! End markers carry no name, so closing always pops the innermost open
//! section; nesting is enforced purely by the stack. Marker lines are
//! stored and re-emitted verbatim, comment prefixes included, which is what
//! makes an edit-free pass byte-faithful.

use crate::editor::SectionEditor;
use crate::error::MergeError;
use crate::lines::LineTransform;
use crate::markers::MarkerMatcher;
use crate::section::{Mode, Section};

/// Stack-based parser and renderer for marker-delimited documents.
///
/// Implements [`LineTransform`]: feed it lines through a
/// [`LineSplitter`](crate::lines::LineSplitter) and it answers the sentinel
/// call with the fully rendered document. One parser handles one document;
/// the tree it builds lives only for that single pass.
pub struct SectionParser<'a> {
    markers: &'a dyn MarkerMatcher,
    editor: Option<&'a mut dyn SectionEditor>,
    stack: Vec<Section>,
}

impl<'a> SectionParser<'a> {
    pub fn new(markers: &'a dyn MarkerMatcher) -> Self {
        Self {
            markers,
            editor: None,
            stack: vec![Section::root()],
        }
    }

    /// Parser with an editing hook applied between parsing and rendering.
    pub fn with_editor(markers: &'a dyn MarkerMatcher, editor: &'a mut dyn SectionEditor) -> Self {
        Self {
            markers,
            editor: Some(editor),
            stack: vec![Section::root()],
        }
    }

    /// Consume one input line, updating the tree under construction.
    fn consume(&mut self, line: &str) -> Result<(), MergeError> {
        if let Some(name) = self.markers.match_start(line) {
            self.open_section(name.to_owned(), line);
            return Ok(());
        }
        if self.markers.match_end(line) {
            return self.close_section(line);
        }

        let current = self.current();
        match current.mode {
            Mode::Head => {
                current.head.push_str(line);
                current.head.push('\n');
            }
            Mode::Tail => {
                current.tail.push_str(line);
                current.tail.push('\n');
            }
        }
        Ok(())
    }

    fn open_section(&mut self, name: String, line: &str) {
        let parent = self.current();
        match parent.mode {
            Mode::Head => parent.mode = Mode::Tail,
            Mode::Tail => {
                // Second-or-later sibling: the gap collected since the
                // previous sibling becomes the replayed head.
                parent.level += 1;
                parent.head = std::mem::take(&mut parent.tail);
            }
        }

        tracing::trace!(section = %name, "start marker");
        let mut child = Section::new(name);
        child.starting_line = Some(line.to_owned());
        self.stack.push(child);
    }

    fn close_section(&mut self, line: &str) -> Result<(), MergeError> {
        if self.stack.len() == 1 {
            return Err(MergeError::StrayEndMarker {
                line: line.to_owned(),
            });
        }
        let mut closed = self.stack.pop().expect("stack holds more than the root");
        closed.ending_line = Some(line.to_owned());
        tracing::trace!(section = %closed.name, "end marker");
        self.current().children.push(closed);
        Ok(())
    }

    /// Finish parsing: verify marker balance and hand back the root.
    fn finish(&mut self) -> Result<Section, MergeError> {
        let popped = self.stack.pop().expect("parser stack always holds the root");
        if !self.stack.is_empty() {
            // The popped section is the innermost one still open.
            return Err(MergeError::UnterminatedSection {
                starting_line: popped.starting_line.clone().unwrap_or_default(),
            });
        }
        Ok(popped)
    }

    fn current(&mut self) -> &mut Section {
        self.stack.last_mut().expect("parser stack always holds the root")
    }
}

impl LineTransform for SectionParser<'_> {
    fn next_line(&mut self, line: Option<&str>) -> Result<Option<String>, MergeError> {
        match line {
            Some(line) => {
                self.consume(line)?;
                Ok(None)
            }
            None => {
                let mut root = self.finish()?;
                tracing::debug!(sections = root.size() - 1, "document parsed");
                if let Some(editor) = self.editor.as_mut() {
                    editor.edit(&mut root);
                }
                Ok(Some(render(&root)))
            }
        }
    }
}

/// Parse `text` into its section tree without rendering.
pub fn parse(text: &str, markers: &dyn MarkerMatcher) -> Result<Section, MergeError> {
    let mut parser = SectionParser::new(markers);
    for line in text.lines() {
        parser.consume(line)?;
    }
    parser.finish()
}

/// Serialize a section tree back into document text.
pub fn render(section: &Section) -> String {
    let mut out = String::new();
    render_into(section, &mut out);
    out
}

/// Serialize `section` into `out`.
///
/// A section that accumulated `level > 0` from repeated sibling gaps is
/// replayed once per level step, head, children, and tail included. Level 0,
/// the common case, is a single faithful emission of marker + head +
/// children + tail + marker.
pub fn render_into(section: &Section, out: &mut String) {
    for _ in 0..=section.level {
        if let Some(line) = &section.starting_line {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&section.head);
        for child in &section.children {
            render_into(child, out);
        }
        out.push_str(&section.tail);
        if let Some(line) = &section.ending_line {
            out.push_str(line);
            out.push('\n');
        }
    }
}
