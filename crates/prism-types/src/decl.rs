//! Declarations referenced from the type graph
//!
//! Struct, interface, and generic parameter types are nominal: two types
//! are the same exactly when they point at the same declaration. [`DeclRef`]
//! captures that by comparing and hashing the `Arc` address, so the type
//! graph can derive `Eq`/`Hash` structurally while declarations stay
//! identity-compared.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use crate::attr::UserAttribute;
use crate::ty::Type;

/// Identity-compared shared reference to a declaration
pub struct DeclRef<T>(Arc<T>);

impl<T> DeclRef<T> {
    /// Wrap a declaration
    pub fn new(decl: T) -> Self {
        DeclRef(Arc::new(decl))
    }

    /// Wrap an already shared declaration
    pub fn from_arc(decl: Arc<T>) -> Self {
        DeclRef(decl)
    }

    /// Borrow the shared pointer
    pub fn as_arc(&self) -> &Arc<T> {
        &self.0
    }
}

impl<T> Clone for DeclRef<T> {
    fn clone(&self) -> Self {
        DeclRef(Arc::clone(&self.0))
    }
}

impl<T> Deref for DeclRef<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> PartialEq for DeclRef<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Eq for DeclRef<T> {}

impl<T> Hash for DeclRef<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for DeclRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Modifiers a variable declaration may carry that reflection can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Effect-framework `shared`
    Shared,
    /// `[[vk::push_constant]]`
    PushConstant,
}

/// A declared variable: struct field, global parameter, or entry-point parameter
#[derive(Debug, Clone)]
pub struct VarDecl {
    /// Source name
    pub name: String,
    /// Name to expose through reflection instead of `name`
    /// (set on the implicit variable behind a `cbuffer` block)
    pub reflection_name: Option<String>,
    /// Declared type
    pub ty: Arc<Type>,
    /// Modifiers attached to the declaration
    pub modifiers: Vec<Modifier>,
    /// User-defined attributes, in source order
    pub attributes: Vec<UserAttribute>,
}

impl VarDecl {
    /// Create a plain variable declaration
    pub fn new(name: impl Into<String>, ty: Arc<Type>) -> Self {
        VarDecl {
            name: name.into(),
            reflection_name: None,
            ty,
            modifiers: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Set the reflection name
    pub fn with_reflection_name(mut self, name: impl Into<String>) -> Self {
        self.reflection_name = Some(name.into());
        self
    }

    /// Add a modifier
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Add a user attribute
    pub fn with_attribute(mut self, attribute: UserAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// A struct declaration
#[derive(Debug, Clone)]
pub struct StructDecl {
    /// Struct name
    pub name: String,
    /// Instance fields, in declaration order
    pub fields: Vec<Arc<VarDecl>>,
    /// Interfaces this struct declares conformance to
    pub conforms_to: Vec<DeclRef<InterfaceDecl>>,
    /// User-defined attributes
    pub attributes: Vec<UserAttribute>,
    /// Set on the anonymous struct synthesized for the members of a
    /// `cbuffer`/`tbuffer` block; such structs have no reflectable name
    pub implicit_group_element: bool,
}

impl StructDecl {
    /// Create an empty struct declaration
    pub fn new(name: impl Into<String>) -> Self {
        StructDecl {
            name: name.into(),
            fields: Vec::new(),
            conforms_to: Vec::new(),
            attributes: Vec::new(),
            implicit_group_element: false,
        }
    }

    /// Add a field
    pub fn with_field(mut self, field: VarDecl) -> Self {
        self.fields.push(Arc::new(field));
        self
    }

    /// Declare conformance to an interface
    pub fn conforming_to(mut self, interface: DeclRef<InterfaceDecl>) -> Self {
        self.conforms_to.push(interface);
        self
    }

    /// Add a user attribute
    pub fn with_attribute(mut self, attribute: UserAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Mark as the synthesized element struct of a parameter group
    pub fn implicit(mut self) -> Self {
        self.implicit_group_element = true;
        self
    }
}

/// An interface declaration
#[derive(Debug, Clone)]
pub struct InterfaceDecl {
    /// Interface name
    pub name: String,
    /// User-defined attributes
    pub attributes: Vec<UserAttribute>,
}

impl InterfaceDecl {
    /// Create an interface declaration
    pub fn new(name: impl Into<String>) -> Self {
        InterfaceDecl {
            name: name.into(),
            attributes: Vec::new(),
        }
    }
}

/// A global generic type parameter (`type_param T : IFoo;`)
#[derive(Debug, Clone)]
pub struct GenericParamDecl {
    /// Parameter name
    pub name: String,
    /// Interface constraints, in declaration order
    pub constraints: Vec<Arc<Type>>,
    /// User-defined attributes
    pub attributes: Vec<UserAttribute>,
}

impl GenericParamDecl {
    /// Create an unconstrained generic parameter
    pub fn new(name: impl Into<String>) -> Self {
        GenericParamDecl {
            name: name.into(),
            constraints: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Add a constraint
    pub fn with_constraint(mut self, constraint: Arc<Type>) -> Self {
        self.constraints.push(constraint);
        self
    }
}

/// `[numthreads(x, y, z)]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumThreads {
    /// X axis
    pub x: u32,
    /// Y axis
    pub y: u32,
    /// Z axis
    pub z: u32,
}

/// An entry-point function declaration
#[derive(Debug, Clone)]
pub struct FuncDecl {
    /// Function name as written in source
    pub name: String,
    /// Thread-group size attribute, if present
    pub num_threads: Option<NumThreads>,
    /// User-defined attributes
    pub attributes: Vec<UserAttribute>,
}

impl FuncDecl {
    /// Create a function declaration without attributes
    pub fn new(name: impl Into<String>) -> Self {
        FuncDecl {
            name: name.into(),
            num_threads: None,
            attributes: Vec::new(),
        }
    }

    /// Attach `[numthreads(x, y, z)]`
    pub fn with_num_threads(mut self, x: u32, y: u32, z: u32) -> Self {
        self.num_threads = Some(NumThreads { x, y, z });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decl_ref_identity() {
        let a = DeclRef::new(StructDecl::new("Light"));
        let b = DeclRef::new(StructDecl::new("Light"));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_nominal_struct_types() {
        let decl = DeclRef::new(StructDecl::new("Material"));
        let t1 = Type::Struct(decl.clone());
        let t2 = Type::Struct(decl);
        let t3 = Type::Struct(DeclRef::new(StructDecl::new("Material")));
        assert_eq!(t1, t2);
        assert_ne!(t1, t3);
    }
}
