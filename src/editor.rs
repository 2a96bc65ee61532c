//! The editing seam.
//!
//! Between parsing and rendering, the merger hands the tree to a
//! [`SectionEditor`]. Whatever the editor leaves untouched renders
//! byte-identical to the parsed input; whatever it replaces is emitted in
//! place of the old content, marker lines intact. [`ContentMap`] covers the
//! common regeneration flow of substituting template output by section name;
//! [`FnEditor`] adapts a closure for anything more unusual.

use std::collections::BTreeMap;

use crate::section::Section;

/// An editing step applied to the parsed tree before rendering.
pub trait SectionEditor {
    fn edit(&mut self, root: &mut Section);
}

/// Adapter turning a closure over the root section into a [`SectionEditor`].
pub struct FnEditor<F>(pub F);

impl<F: FnMut(&mut Section)> SectionEditor for FnEditor<F> {
    fn edit(&mut self, root: &mut Section) {
        (self.0)(root)
    }
}

/// Replaces the bodies of named sections with freshly generated content.
///
/// The surrounding tool expands its templates, collects the output per
/// section name, and lets the map substitute each name that exists in the
/// old document. Entries with no matching section are ignored; the names
/// actually substituted are readable via [`applied`](ContentMap::applied)
/// afterwards, so a caller can tell which customization slots existed.
#[derive(Debug, Clone, Default)]
pub struct ContentMap {
    entries: BTreeMap<String, String>,
    applied: Vec<String>,
}

impl ContentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `content` as the replacement body for sections named `name`.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) -> &mut Self {
        self.entries.insert(name.into(), content.into());
        self
    }

    /// Names substituted by the most recent edit, in document order.
    pub fn applied(&self) -> &[String] {
        &self.applied
    }

    fn apply(&mut self, section: &mut Section) {
        for child in &mut section.children {
            if let Some(content) = self.entries.get(&child.name).cloned() {
                tracing::debug!(section = %child.name, "substituting generated content");
                child.set_content(&content);
                self.applied.push(child.name.clone());
            } else {
                // A replaced section has no children left; only untouched
                // ones are worth descending into.
                self.apply(child);
            }
        }
    }
}

impl SectionEditor for ContentMap {
    fn edit(&mut self, root: &mut Section) {
        self.applied.clear();
        self.apply(root);
    }
}
