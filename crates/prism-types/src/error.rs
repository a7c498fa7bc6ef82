//! Layout graph construction errors

use thiserror::Error;

use crate::layout::LayoutResourceKind;

/// Errors that can occur while assembling a layout graph
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LayoutError {
    /// A second entry for a resource kind already present in the set
    #[error("Duplicate resource kind in layout: {kind}")]
    DuplicateResourceKind {
        /// The duplicated kind
        kind: LayoutResourceKind,
    },
}
