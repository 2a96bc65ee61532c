//! Marker recognition.
//!
//! Sections are delimited by literal marker tokens that may sit anywhere on a
//! line, so the syntax embeds in whatever comment style the generated
//! language uses: `// SECTION-START[name]` in Java, `# SECTION-START[name]`
//! in a shell script, `<!-- SECTION-START[name] -->` in XML. Recognition is
//! substring search rather than line-anchored matching, which is what lets
//! the tokens survive arbitrary comment prefixes and suffixes.

use serde::{Deserialize, Serialize};

/// Literal token opening a start marker; the section name follows,
/// terminated by `]`.
pub const START_TOKEN: &str = "SECTION-START[";

/// Literal token closing the innermost open section.
pub const END_TOKEN: &str = "SECTION-END";

/// Marker token configuration.
///
/// The defaults are the compatibility-critical literals understood by
/// previously generated files; override them only for a target syntax in
/// which those literals cannot appear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerConfig {
    #[serde(default = "default_start_token")]
    pub start_token: String,
    #[serde(default = "default_end_token")]
    pub end_token: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            start_token: default_start_token(),
            end_token: default_end_token(),
        }
    }
}

fn default_start_token() -> String {
    START_TOKEN.into()
}
fn default_end_token() -> String {
    END_TOKEN.into()
}

/// Recognition strategy for marker lines.
///
/// The parser consults `match_start` before `match_end`, so an end token that
/// happens to be a substring of the start token cannot shadow it.
pub trait MarkerMatcher: Send + Sync {
    /// If `line` carries a start marker, return the section name.
    ///
    /// A line containing the start token but no closing `]` after it is not
    /// a marker; implementations must return `None` so the line falls
    /// through to ordinary content.
    fn match_start<'l>(&self, line: &'l str) -> Option<&'l str>;

    /// Whether `line` carries an end marker.
    fn match_end(&self, line: &str) -> bool;
}

/// Default matcher: substring search for the configured tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenMarkers {
    config: MarkerConfig,
}

impl TokenMarkers {
    pub fn new(config: MarkerConfig) -> Self {
        Self { config }
    }
}

impl MarkerMatcher for TokenMarkers {
    fn match_start<'l>(&self, line: &'l str) -> Option<&'l str> {
        let at = line.find(&self.config.start_token)?;
        let rest = &line[at + self.config.start_token.len()..];
        let close = rest.find(']')?;
        Some(&rest[..close])
    }

    fn match_end(&self, line: &str) -> bool {
        line.contains(&self.config.end_token)
    }
}
