//! Element namespaces

use serde::Serialize;
use std::fmt;

/// Namespace label of an element.
///
/// Serialization and escaping rules differ between the three, so this is a
/// closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Namespace {
    #[serde(rename = "HTML")]
    Html,
    #[serde(rename = "SVG")]
    Svg,
    #[serde(rename = "MATHML")]
    MathMl,
}

impl Namespace {
    /// Canonical label (`"HTML"`, `"SVG"`, `"MATHML"`)
    pub fn label(self) -> &'static str {
        match self {
            Namespace::Html => "HTML",
            Namespace::Svg => "SVG",
            Namespace::MathMl => "MATHML",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
