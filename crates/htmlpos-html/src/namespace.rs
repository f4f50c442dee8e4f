//! Namespace resolution

use html5ever::{Namespace as RawNamespace, ns};
use htmlpos_dom::Namespace;

use crate::{ProjectionError, Result};

/// Map an engine namespace onto its label.
///
/// Only HTML, SVG and MathML are valid element namespaces. Anything else is
/// an out-of-contract value from the engine and is reported, never replaced
/// by a default.
pub fn resolve_namespace(raw: &RawNamespace) -> Result<Namespace> {
    if *raw == ns!(html) {
        Ok(Namespace::Html)
    } else if *raw == ns!(svg) {
        Ok(Namespace::Svg)
    } else if *raw == ns!(mathml) {
        Ok(Namespace::MathMl)
    } else {
        Err(ProjectionError::UnknownNamespace {
            namespace: raw.to_string(),
        })
    }
}
