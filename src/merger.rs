//! Top-level merge facade.
//!
//! [`Merger`] wires the pipeline together: raw text through the line
//! splitter, into the section parser, through the editing step, and back out
//! through the renderer. One merger can serve many documents, since each
//! call owns its own parse tree; processing files in parallel is a matter of
//! separate calls, not shared state.

use serde::{Deserialize, Serialize};

use crate::editor::{ContentMap, SectionEditor};
use crate::error::MergeError;
use crate::lines::{LineSplitter, TextTransform};
use crate::markers::{MarkerConfig, MarkerMatcher, TokenMarkers};
use crate::parser::{self, SectionParser};
use crate::section::Section;

/// Configuration for a [`Merger`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergerConfig {
    #[serde(default)]
    pub markers: MarkerConfig,
}

/// The merge pipeline entry point.
pub struct Merger {
    matcher: Box<dyn MarkerMatcher>,
}

impl Merger {
    pub fn new(config: MergerConfig) -> Self {
        Self {
            matcher: Box::new(TokenMarkers::new(config.markers)),
        }
    }

    /// Use a custom marker recognition strategy.
    pub fn with_matcher(matcher: Box<dyn MarkerMatcher>) -> Self {
        Self { matcher }
    }

    /// Re-emit `text` with no editing step: parse and render only.
    ///
    /// For balanced level-0 input this reproduces the text exactly; its real
    /// job is validating marker structure before a tool decides to write
    /// anything back.
    pub fn edit(&self, text: &str) -> Result<MergeOutput, MergeError> {
        self.run(text, SectionParser::new(self.matcher.as_ref()))
    }

    /// Run the full pipeline with `editor` applied between parse and render.
    pub fn merge(
        &self,
        text: &str,
        editor: &mut dyn SectionEditor,
    ) -> Result<MergeOutput, MergeError> {
        self.run(
            text,
            SectionParser::with_editor(self.matcher.as_ref(), editor),
        )
    }

    /// Merge freshly generated content into the named sections of `text`.
    ///
    /// Names without a matching section are ignored, so a generator can
    /// offer every slot it knows and let the old file pick.
    pub fn regenerate(
        &self,
        text: &str,
        replacements: &[(&str, &str)],
    ) -> Result<MergeOutput, MergeError> {
        let mut map = ContentMap::new();
        for (name, content) in replacements {
            map.insert(*name, *content);
        }
        self.merge(text, &mut map)
    }

    /// Parse `text` into its section tree, for lookup or custom editing.
    pub fn parse(&self, text: &str) -> Result<Section, MergeError> {
        parser::parse(text, self.matcher.as_ref())
    }

    /// Whether `text` contains a section named `name`.
    pub fn has_section(&self, text: &str, name: &str) -> Result<bool, MergeError> {
        Ok(self.parse(text)?.contains(name))
    }

    fn run(&self, text: &str, parser: SectionParser<'_>) -> Result<MergeOutput, MergeError> {
        let mut splitter = LineSplitter::new(parser);
        let content = splitter.edit(text)?;
        let modified = splitter.modified();
        tracing::debug!(modified, bytes = content.len(), "merge complete");
        Ok(MergeOutput { content, modified })
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new(MergerConfig::default())
    }
}

/// Result of one merge pass.
#[derive(Debug, Clone)]
pub struct MergeOutput {
    /// The merged document text.
    pub content: String,
    /// Whether the output differs from the input.
    pub modified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATED: &str = "\
package demo;
// SECTION-START[body]
class Demo {
    // SECTION-START[methods]
    void custom() {}
    // SECTION-END
}
// SECTION-END
";

    #[test]
    fn test_edit_round_trips_unchanged() {
        let merger = Merger::default();
        let out = merger.edit(GENERATED).unwrap();
        assert_eq!(out.content, GENERATED);
        assert!(!out.modified);
    }

    #[test]
    fn test_edit_is_idempotent() {
        let merger = Merger::default();
        let once = merger.edit(GENERATED).unwrap();
        let twice = merger.edit(&once.content).unwrap();
        assert_eq!(once.content, twice.content);
        assert!(!twice.modified);
    }

    #[test]
    fn test_regenerate_targets_one_section() {
        let merger = Merger::default();
        let out = merger
            .regenerate(
                GENERATED,
                &[("methods", "    void custom() {}\n    void extra() {}")],
            )
            .unwrap();

        assert!(out.modified);
        let expected = "\
package demo;
// SECTION-START[body]
class Demo {
    // SECTION-START[methods]
    void custom() {}
    void extra() {}
    // SECTION-END
}
// SECTION-END
";
        assert_eq!(out.content, expected);
    }

    #[test]
    fn test_regenerate_without_matching_slot_is_noop() {
        let merger = Merger::default();
        let out = merger
            .regenerate(GENERATED, &[("no-such-slot", "content")])
            .unwrap();
        assert_eq!(out.content, GENERATED);
        assert!(!out.modified);
    }

    #[test]
    fn test_merge_with_closure_editor() {
        let merger = Merger::default();
        let mut editor = crate::editor::FnEditor(|root: &mut Section| {
            if let Some(section) = root.find_mut("methods") {
                section.set_content("    void renamed() {}");
            }
        });
        let out = merger.merge(GENERATED, &mut editor).unwrap();
        assert!(out.modified);
        assert!(out.content.contains("void renamed()"));
        assert!(out.content.contains("package demo;"));
        assert!(out.content.contains("class Demo {"));
    }

    #[test]
    fn test_has_section() {
        let merger = Merger::default();
        assert!(merger.has_section(GENERATED, "body").unwrap());
        assert!(merger.has_section(GENERATED, "methods").unwrap());
        assert!(!merger.has_section(GENERATED, "fields").unwrap());
    }

    #[test]
    fn test_structural_error_surfaces() {
        let merger = Merger::default();
        let err = merger
            .edit("// SECTION-START[x]\nnever closed\n")
            .unwrap_err();
        assert_eq!(
            err,
            MergeError::UnterminatedSection {
                starting_line: "// SECTION-START[x]".to_string()
            }
        );
    }

    #[test]
    fn test_empty_document() {
        let merger = Merger::default();
        let out = merger.edit("").unwrap();
        assert_eq!(out.content, "");
        assert!(!out.modified);
    }

    #[test]
    fn test_custom_marker_tokens() {
        let config: MergerConfig = serde_json::from_str(
            r#"{"markers": {"start_token": "CUSTOM[", "end_token": "CUSTOM-END"}}"#,
        )
        .unwrap();
        let merger = Merger::new(config);
        let text = "-- CUSTOM[body]\nline\n-- CUSTOM-END\n";
        let out = merger.regenerate(text, &[("body", "fresh")]).unwrap();
        assert_eq!(out.content, "-- CUSTOM[body]\nfresh\n-- CUSTOM-END\n");
    }

    #[test]
    fn test_crlf_input_normalizes() {
        let merger = Merger::default();
        let out = merger
            .edit("A\r\nSECTION-START[X]\r\nB\r\nSECTION-END\r\n")
            .unwrap();
        assert_eq!(out.content, "A\nSECTION-START[X]\nB\nSECTION-END\n");
        assert!(out.modified);
    }
}
