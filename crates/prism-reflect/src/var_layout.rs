//! Variable-layout queries: where a declared variable landed
//!
//! Offsets and spaces are looked up directly first. When the variable has
//! no entry for the requested category, the lookup is retried once with the
//! category remapped against the variable's type layout, so a host asking
//! for the shader-resource register of a texture on a descriptor-table
//! target gets the descriptor slot instead of 0.
//!
//! Only the matched entry's own space is reported. A register-space offset
//! recorded on an enclosing variable is not added in.

use prism_types::{LayoutResourceKind, Stage, TypeLayout, VarDecl, VarLayout, VarResourceInfo};

use crate::category::{category, remap_category, ParameterCategory};

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

fn find_info(var_layout: &VarLayout, category: ParameterCategory) -> Option<&VarResourceInfo> {
    let direct = category
        .resource_kind()
        .and_then(|kind| var_layout.find_resource_info(kind));
    if direct.is_some() {
        return direct;
    }

    let remapped = remap_category(Some(var_layout.type_layout.as_ref()), category);
    if remapped == category {
        return None;
    }
    remapped
        .resource_kind()
        .and_then(|kind| var_layout.find_resource_info(kind))
}

/// Declared variable behind the layout
pub fn variable(var_layout: Option<&VarLayout>) -> Option<&VarDecl> {
    var_layout?.var.as_deref()
}

/// Type layout of the variable
pub fn type_layout(var_layout: Option<&VarLayout>) -> Option<&TypeLayout> {
    var_layout.map(|vl| vl.type_layout.as_ref())
}

/// Category of the variable, taken from its type layout
pub fn var_category(var_layout: Option<&VarLayout>) -> ParameterCategory {
    category(type_layout(var_layout))
}

/// Offset of the variable in units of `category`
pub fn offset(var_layout: Option<&VarLayout>, category: ParameterCategory) -> usize {
    var_layout
        .and_then(|vl| find_info(vl, category))
        .map_or(0, |info| to_usize(info.index))
}

/// Register space or descriptor set of the variable for `category`
pub fn space(var_layout: Option<&VarLayout>, category: ParameterCategory) -> usize {
    var_layout
        .and_then(|vl| find_info(vl, category))
        .map_or(0, |info| to_usize(info.space))
}

/// Offset in the variable's own category
pub fn binding_index(var_layout: Option<&VarLayout>) -> usize {
    offset(var_layout, var_category(var_layout))
}

/// Space in the variable's own category
pub fn binding_space(var_layout: Option<&VarLayout>) -> usize {
    space(var_layout, var_category(var_layout))
}

/// Semantic name, when the variable has a semantic
pub fn semantic_name(var_layout: Option<&VarLayout>) -> Option<&str> {
    var_layout?.semantic.as_ref().map(|s| s.name.as_str())
}

/// Semantic index, or 0 when the variable has no semantic
pub fn semantic_index(var_layout: Option<&VarLayout>) -> usize {
    var_layout
        .and_then(|vl| vl.semantic.as_ref())
        .map_or(0, |s| to_usize(s.index))
}

/// Pipeline stage a varying parameter belongs to
///
/// Only variables with a varying input or output entry report a stage.
pub fn stage(var_layout: Option<&VarLayout>) -> Stage {
    let Some(var_layout) = var_layout else {
        return Stage::None;
    };

    let is_varying = var_layout
        .find_resource_info(LayoutResourceKind::VaryingInput)
        .is_some()
        || var_layout
            .find_resource_info(LayoutResourceKind::VaryingOutput)
            .is_some();

    if is_varying {
        var_layout.stage
    } else {
        Stage::None
    }
}

/// Placement of the variable's pending existential data
pub fn pending_data_layout(var_layout: Option<&VarLayout>) -> Option<&VarLayout> {
    var_layout?.pending_var_layout.as_deref()
}
