//! Source-level type queries
//!
//! These look at a [`Type`] on its own, independent of any target layout.

use prism_types::{Type, VarDecl};

use crate::layout_reflect::UNBOUNDED_SIZE;

/// Name of a nominal type
///
/// Structs, interfaces and generic parameters have names. The anonymous
/// struct synthesized for the members of a `cbuffer` block does not.
pub fn type_name(ty: Option<&Type>) -> Option<&str> {
    match ty? {
        Type::Struct(decl) if decl.implicit_group_element => None,
        Type::Struct(decl) => Some(decl.name.as_str()),
        Type::Interface(decl) => Some(decl.name.as_str()),
        Type::GenericParam(decl) => Some(decl.name.as_str()),
        _ => None,
    }
}

/// Number of instance fields of a struct type
pub fn field_count(ty: Option<&Type>) -> u32 {
    match ty.and_then(Type::as_struct) {
        Some(decl) => decl.fields.len() as u32,
        None => 0,
    }
}

/// Field declaration of a struct type at `index`
pub fn field_by_index(ty: Option<&Type>, index: u32) -> Option<&VarDecl> {
    ty?.as_struct()?
        .fields
        .get(index as usize)
        .map(|field| field.as_ref())
}

/// Declared length of an array (unsized arrays report 0), or component
/// count of a vector
///
/// A length past `usize::MAX` saturates to [`UNBOUNDED_SIZE`].
pub fn element_count(ty: Option<&Type>) -> usize {
    match ty {
        Some(Type::Array { length, .. }) => {
            length.map_or(0, |n| usize::try_from(n).unwrap_or(UNBOUNDED_SIZE))
        }
        Some(Type::Vector { count, .. }) => *count as usize,
        _ => 0,
    }
}

/// Element type of an array, parameter group, vector, or matrix
pub fn element_type(ty: Option<&Type>) -> Option<&Type> {
    match ty? {
        Type::Array { element, .. }
        | Type::Vector { element, .. }
        | Type::Matrix { element, .. } => Some(element.as_ref()),
        Type::ParameterGroup(group) => Some(group.element.as_ref()),
        _ => None,
    }
}

/// Row count: matrix rows, or 1 for vectors and scalars
pub fn row_count(ty: Option<&Type>) -> u32 {
    match ty {
        Some(Type::Matrix { rows, .. }) => *rows,
        Some(Type::Vector { .. }) | Some(Type::Scalar(_)) => 1,
        _ => 0,
    }
}

/// Column count: matrix columns, vector components, or 1 for scalars
pub fn column_count(ty: Option<&Type>) -> u32 {
    match ty {
        Some(Type::Matrix { columns, .. }) => *columns,
        Some(Type::Vector { count, .. }) => *count,
        Some(Type::Scalar(_)) => 1,
        _ => 0,
    }
}
