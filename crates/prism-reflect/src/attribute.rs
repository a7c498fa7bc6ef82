//! User-defined attribute accessor
//!
//! Attributes hang off struct, interface, and generic-parameter
//! declarations (reached through their type) and off variables. Argument
//! values are only available for literals the front-end resolved; asking
//! for the wrong literal kind is an error, never a reinterpretation.

use prism_types::{AttributeValue, Type, UserAttribute, VarDecl};

use crate::error::AttributeValueError;

fn declared_attributes(ty: &Type) -> &[UserAttribute] {
    match ty {
        Type::Struct(decl) => decl.attributes.as_slice(),
        Type::Interface(decl) => decl.attributes.as_slice(),
        Type::GenericParam(decl) => decl.attributes.as_slice(),
        _ => &[],
    }
}

fn find_by_name<'a>(attributes: &'a [UserAttribute], name: &str) -> Option<&'a UserAttribute> {
    attributes.iter().find(|attr| attr.name == name)
}

/// Number of user attributes on the declaration behind a type
pub fn type_attribute_count(ty: Option<&Type>) -> u32 {
    ty.map_or(0, |ty| declared_attributes(ty).len() as u32)
}

/// User attribute at `index` on the declaration behind a type
pub fn type_attribute_by_index(ty: Option<&Type>, index: u32) -> Option<&UserAttribute> {
    declared_attributes(ty?).get(index as usize)
}

/// First user attribute named `name` on the declaration behind a type
pub fn find_type_attribute_by_name<'a>(
    ty: Option<&'a Type>,
    name: &str,
) -> Option<&'a UserAttribute> {
    find_by_name(declared_attributes(ty?), name)
}

/// Number of user attributes on a variable
pub fn variable_attribute_count(var: Option<&VarDecl>) -> u32 {
    var.map_or(0, |v| v.attributes.len() as u32)
}

/// User attribute at `index` on a variable
pub fn variable_attribute_by_index(var: Option<&VarDecl>, index: u32) -> Option<&UserAttribute> {
    var?.attributes.get(index as usize)
}

/// First user attribute named `name` on a variable
pub fn find_variable_attribute_by_name<'a>(
    var: Option<&'a VarDecl>,
    name: &str,
) -> Option<&'a UserAttribute> {
    find_by_name(&var?.attributes, name)
}

/// Attribute name
pub fn attribute_name(attr: Option<&UserAttribute>) -> Option<&str> {
    attr.map(|a| a.name.as_str())
}

/// Number of positional arguments
pub fn argument_count(attr: Option<&UserAttribute>) -> u32 {
    attr.map_or(0, |a| a.args.len() as u32)
}

/// Checked type of the argument at `index`
pub fn argument_type(attr: Option<&UserAttribute>, index: u32) -> Option<&Type> {
    attr?.args.get(index as usize)?.ty.as_deref()
}

fn argument_value(attr: &UserAttribute, index: u32) -> Result<&AttributeValue, AttributeValueError> {
    attr.args
        .get(index as usize)
        .map(|arg| &arg.value)
        .ok_or(AttributeValueError::IndexOutOfRange {
            index: index as usize,
            count: attr.args.len(),
        })
}

fn value_kind(value: &AttributeValue) -> &'static str {
    match value {
        AttributeValue::Int(_) => "int",
        AttributeValue::Float(_) => "float",
        AttributeValue::String(_) => "string",
        AttributeValue::Expr(_) => "expression",
    }
}

/// Integer value of the argument at `index`
pub fn as_int(attr: &UserAttribute, index: u32) -> Result<i32, AttributeValueError> {
    match argument_value(attr, index)? {
        AttributeValue::Int(value) => Ok(*value as i32),
        other => Err(AttributeValueError::KindMismatch {
            expected: "int",
            found: value_kind(other),
        }),
    }
}

/// Floating-point value of the argument at `index`
///
/// Only floating-point literals qualify; an integer literal is a mismatch.
pub fn as_float(attr: &UserAttribute, index: u32) -> Result<f32, AttributeValueError> {
    match argument_value(attr, index)? {
        AttributeValue::Float(value) => Ok(*value as f32),
        other => Err(AttributeValueError::KindMismatch {
            expected: "float",
            found: value_kind(other),
        }),
    }
}

/// String contents of the argument at `index`
pub fn as_str(attr: &UserAttribute, index: u32) -> Result<&str, AttributeValueError> {
    match argument_value(attr, index)? {
        AttributeValue::String(value) => Ok(value.as_str()),
        other => Err(AttributeValueError::KindMismatch {
            expected: "string",
            found: value_kind(other),
        }),
    }
}
