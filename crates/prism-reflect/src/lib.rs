//! Prism Reflection
//!
//! Read-only queries over a compiled Prism program: the source-level shape
//! of every type and the binding layout the target assigned to it.
//!
//! This crate provides:
//! - Type classification, scalar and resource shape/access extraction
//! - Parameter categories with descriptor-table remapping
//! - Offsets, spaces, sizes, alignments, and strides per category
//! - Entry-point and program metadata
//! - User-attribute access
//! - Type specialization through a pluggable specializer
//!
//! Every query takes its handle as an `Option` and answers an absent or
//! mismatched handle with a sentinel (`None`, `0`, or a `None` enum
//! variant) instead of failing.
//!
//! # Usage
//!
//! ```ignore
//! use prism_reflect::{category, element_type_layout, Reflection};
//!
//! let reflection = Reflection::new(program_layout);
//! for index in 0..reflection.parameter_count() {
//!     let param = reflection.parameter_by_index(index);
//!     let binding = prism_reflect::binding_index(param);
//!     // ...
//! }
//! ```

#![warn(missing_docs)]

/// Report a graph shape reflection does not know how to describe
///
/// The query still answers with its sentinel; this only leaves a trace for
/// whoever is debugging the front-end that produced the shape.
macro_rules! unexpected {
    ($($arg:tt)+) => {
        ::tracing::warn!(target: "prism_reflect::unexpected", $($arg)+)
    };
}

pub mod attribute;
pub mod category;
pub mod config;
pub mod diagnostic;
pub mod entry_point;
pub mod error;
pub mod hash;
pub mod kind;
pub mod layout_reflect;
pub mod program;
pub mod resource;
pub mod services;
pub mod specialize;
pub mod type_param;
pub mod type_reflect;
pub mod var_layout;
pub mod variable;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

// Re-export main types
pub use category::{category, category_by_index, category_count, remap_category, ParameterCategory};
pub use config::{DiagnosticsFormat, ReflectionConfig};
pub use diagnostic::{Blob, Diagnostic, DiagnosticSink, ErrorCode, JsonDiagnostic};
pub use error::{AttributeValueError, ConfigError, ReflectError};
pub use hash::compute_string_hash;
pub use kind::{kind, scalar_type, ScalarType, TypeKind};
pub use layout_reflect::{
    alignment, container_var_layout, element_stride, element_type_layout, element_var_layout,
    size, UNBOUNDED_SIZE,
};
pub use program::Reflection;
pub use resource::{
    resource_access, resource_result_type, resource_shape, ResourceAccess, ResourceBaseShape,
    ResourceShape,
};
pub use services::{
    ExistentialSpecializer, LayoutTable, NamedTypes, TypeLayoutProvider, TypeResolver,
    TypeSpecializer,
};
pub use specialize::{specialize_type, Specialized};
pub use var_layout::{binding_index, binding_space, offset, space};
