//! The section tree.
//!
//! A parsed document is a tree of [`Section`] nodes: one synthetic root for
//! the document itself, plus one node per start/end marker pair. Content
//! lives in two line buffers per node. `head` collects lines seen before the
//! first nested child opens; `tail` collects lines seen after the most recent
//! child closes. The split matters because an editing step replaces `head`
//! (the section body) while the parser still needs somewhere to put trailing
//! lines once a child has closed.

/// Name of the synthetic root section that stands for the whole document.
pub const ROOT_SECTION: &str = "<root>";

/// Which buffer a section is currently collecting into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No child has opened yet; ordinary lines go to `head`.
    Head,
    /// At least one child has opened; ordinary lines go to `tail`.
    Tail,
}

/// One marked region of a document, or the document itself for the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Identifier parsed from the start marker.
    pub name: String,
    /// The literal line that opened this section, marker and any comment
    /// prefix included. `None` for the root.
    pub starting_line: Option<String>,
    /// The literal line that closed this section. `None` for the root, and
    /// for sections still open mid-parse.
    pub ending_line: Option<String>,
    /// Lines collected before the first nested child, each newline-terminated.
    pub head: String,
    /// Lines collected after the most recently closed child.
    pub tail: String,
    /// Nested sections in document order.
    pub children: Vec<Section>,
    /// Collection mode; transitions `Head -> Tail` exactly once, when the
    /// first child opens.
    pub mode: Mode,
    /// Replay counter: bumped for every second-or-later child that opens
    /// while this section is already in `Tail` mode. Governs how many times
    /// the renderer re-emits this section.
    pub level: u32,
}

impl Section {
    /// Create an empty section with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            starting_line: None,
            ending_line: None,
            head: String::new(),
            tail: String::new(),
            children: Vec::new(),
            mode: Mode::Head,
            level: 0,
        }
    }

    /// Create the synthetic root section.
    pub fn root() -> Self {
        Self::new(ROOT_SECTION)
    }

    pub fn is_root(&self) -> bool {
        self.name == ROOT_SECTION && self.starting_line.is_none()
    }

    /// Direct child with the given name, if any.
    pub fn child(&self, name: &str) -> Option<&Section> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Mutable direct child with the given name, if any.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// First section with the given name in this subtree, pre-order,
    /// this section itself included.
    pub fn find(&self, name: &str) -> Option<&Section> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    /// Mutable variant of [`find`](Section::find).
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Section> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(name))
    }

    /// Whether this subtree contains a section with the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Names of every section below this one, pre-order.
    pub fn section_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        for child in &self.children {
            out.push(child.name.as_str());
            child.collect_names(out);
        }
    }

    /// Total number of sections in this subtree, this one included.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(|c| c.size()).sum::<usize>()
    }

    /// Replace this section's entire body with `text`.
    ///
    /// `head` becomes `text` normalized to newline-terminated lines; children
    /// and tail are dropped. Replay state accumulated during parsing is reset
    /// so the replacement renders exactly once. The marker lines are kept.
    pub fn set_content(&mut self, text: &str) {
        self.head.clear();
        push_lines(&mut self.head, text);
        self.tail.clear();
        self.children.clear();
        self.mode = Mode::Head;
        self.level = 0;
    }

    /// Append `text` to the content collected so far: the head before any
    /// child has opened, the tail after.
    pub fn append_content(&mut self, text: &str) {
        let buf = match self.mode {
            Mode::Head => &mut self.head,
            Mode::Tail => &mut self.tail,
        };
        push_lines(buf, text);
    }
}

/// Append `text` to `buf` line by line, terminating each line with a newline.
fn push_lines(buf: &mut String, text: &str) {
    for line in text.lines() {
        buf.push_str(line);
        buf.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, head: &str) -> Section {
        let mut s = Section::new(name);
        s.head = head.to_string();
        s
    }

    #[test]
    fn test_root_defaults() {
        let root = Section::root();
        assert!(root.is_root());
        assert_eq!(root.name, ROOT_SECTION);
        assert_eq!(root.mode, Mode::Head);
        assert_eq!(root.level, 0);
        assert!(root.starting_line.is_none());
        assert!(root.ending_line.is_none());
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_child_and_find() {
        let mut root = Section::root();
        let mut outer = leaf("outer", "o\n");
        outer.children.push(leaf("inner", "i\n"));
        root.children.push(outer);
        root.children.push(leaf("other", "x\n"));

        assert!(root.child("outer").is_some());
        assert!(root.child("inner").is_none(), "child() is direct-only");
        assert_eq!(root.find("inner").unwrap().head, "i\n");
        root.child_mut("other").unwrap().head.push_str("y\n");
        assert_eq!(root.child("other").unwrap().head, "x\ny\n");
        assert!(root.contains("other"));
        assert!(!root.contains("missing"));
        assert_eq!(root.section_names(), vec!["outer", "inner", "other"]);
        assert_eq!(root.size(), 4);
    }

    #[test]
    fn test_find_prefers_document_order() {
        let mut root = Section::root();
        root.children.push(leaf("dup", "first\n"));
        root.children.push(leaf("dup", "second\n"));
        assert_eq!(root.find("dup").unwrap().head, "first\n");
    }

    #[test]
    fn test_set_content_resets_replay_state() {
        let mut section = leaf("body", "old\n");
        section.tail = "trailing\n".to_string();
        section.children.push(leaf("nested", "n\n"));
        section.mode = Mode::Tail;
        section.level = 2;

        section.set_content("fresh line one\nfresh line two");

        assert_eq!(section.head, "fresh line one\nfresh line two\n");
        assert!(section.tail.is_empty());
        assert!(section.children.is_empty());
        assert_eq!(section.mode, Mode::Head);
        assert_eq!(section.level, 0);
    }

    #[test]
    fn test_append_content_targets_active_buffer() {
        let mut section = leaf("body", "a\n");
        section.append_content("b");
        assert_eq!(section.head, "a\nb\n");
        assert!(section.tail.is_empty());

        section.mode = Mode::Tail;
        section.append_content("c");
        assert_eq!(section.head, "a\nb\n");
        assert_eq!(section.tail, "c\n");
    }

    #[test]
    fn test_append_empty_is_noop() {
        let mut section = leaf("body", "a\n");
        section.append_content("");
        assert_eq!(section.head, "a\n");
    }
}
