//! User-defined attributes (`[MyAttr(1, 2.0, "three")]`)

use std::sync::Arc;

use crate::ty::Type;

/// Value of a single attribute argument as resolved by the front-end
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Integer literal (after constant folding)
    Int(i64),
    /// Floating-point literal
    Float(f64),
    /// String literal (contents, without quotes)
    String(String),
    /// Any other expression; carries its source text for display only
    Expr(String),
}

/// One positional argument of a user attribute
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeArg {
    /// Checked type of the argument expression
    pub ty: Option<Arc<Type>>,
    /// Resolved value
    pub value: AttributeValue,
}

impl AttributeArg {
    /// Integer argument
    pub fn int(value: i64) -> Self {
        AttributeArg {
            ty: Some(Type::scalar(crate::BaseType::Int)),
            value: AttributeValue::Int(value),
        }
    }

    /// Float argument
    pub fn float(value: f64) -> Self {
        AttributeArg {
            ty: Some(Type::scalar(crate::BaseType::Float)),
            value: AttributeValue::Float(value),
        }
    }

    /// String argument
    pub fn string(value: impl Into<String>) -> Self {
        AttributeArg {
            ty: None,
            value: AttributeValue::String(value.into()),
        }
    }

    /// Unresolvable expression argument
    pub fn expr(source: impl Into<String>) -> Self {
        AttributeArg {
            ty: None,
            value: AttributeValue::Expr(source.into()),
        }
    }
}

/// A user-defined attribute attached to a declaration
#[derive(Debug, Clone, PartialEq)]
pub struct UserAttribute {
    /// Attribute name, without brackets
    pub name: String,
    /// Positional arguments
    pub args: Vec<AttributeArg>,
}

impl UserAttribute {
    /// Create an attribute with no arguments
    pub fn new(name: impl Into<String>) -> Self {
        UserAttribute {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument
    pub fn with_arg(mut self, arg: AttributeArg) -> Self {
        self.args.push(arg);
        self
    }
}
