//! Prism Type and Layout Graphs
//!
//! Immutable graphs produced by the front-end and the layout engine and
//! consumed by reflection: source-level types and declarations, and the
//! per-target resource layouts computed for them.

#![warn(missing_docs)]

pub mod attr;
pub mod decl;
pub mod error;
pub mod layout;
pub mod program;
pub mod ty;

pub use attr::{AttributeArg, AttributeValue, UserAttribute};
pub use decl::{
    DeclRef, FuncDecl, GenericParamDecl, InterfaceDecl, Modifier, NumThreads, StructDecl, VarDecl,
};
pub use error::LayoutError;
pub use layout::{
    LayoutResourceKind, LayoutShape, LayoutSize, MatrixLayoutMode, ResourceInfo, ResourceInfoSet,
    Semantic, TypeLayout, TypeResourceInfo, VarLayout, VarResourceInfo,
};
pub use program::{
    EntryPointFlags, EntryPointLayout, HashedStringPool, ProgramLayout, SpecializationParam,
    SpecializationParamKind, Stage,
};
pub use ty::{
    Access, BaseType, BufferKind, BufferType, FeedbackKind, ParameterGroupKind,
    ParameterGroupType, StreamKind, TextureBaseShape, TextureShape, TextureType, Type,
};
