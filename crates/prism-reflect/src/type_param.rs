//! Specialization-parameter queries
//!
//! Generic type parameters have a name and interface constraints.
//! Existential slots have neither and only report their index.

use prism_types::{GenericParamDecl, SpecializationParam, SpecializationParamKind, Type};

fn generic_decl(param: &SpecializationParam) -> Option<&GenericParamDecl> {
    match &param.kind {
        SpecializationParamKind::Generic(decl) => Some(decl.as_arc().as_ref()),
        SpecializationParamKind::Existential(_) => None,
    }
}

/// Name of a generic type parameter
pub fn name(param: Option<&SpecializationParam>) -> Option<&str> {
    generic_decl(param?).map(|decl| decl.name.as_str())
}

/// Position in the program's specialization parameter list
pub fn index(param: Option<&SpecializationParam>) -> u32 {
    param.map_or(0, |p| p.index)
}

/// Number of interface constraints on a generic type parameter
pub fn constraint_count(param: Option<&SpecializationParam>) -> u32 {
    param
        .and_then(generic_decl)
        .map_or(0, |decl| decl.constraints.len() as u32)
}

/// Constraint at `index` on a generic type parameter
pub fn constraint_by_index(param: Option<&SpecializationParam>, index: u32) -> Option<&Type> {
    generic_decl(param?)?
        .constraints
        .get(index as usize)
        .map(|c| c.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_types::{DeclRef, InterfaceDecl};
    use std::sync::Arc;

    #[test]
    fn test_generic_param() {
        let iface = Arc::new(Type::Interface(DeclRef::new(InterfaceDecl::new("ILight"))));
        let param = SpecializationParam {
            index: 1,
            kind: SpecializationParamKind::Generic(DeclRef::new(
                GenericParamDecl::new("TLight").with_constraint(iface),
            )),
        };
        assert_eq!(name(Some(&param)), Some("TLight"));
        assert_eq!(index(Some(&param)), 1);
        assert_eq!(constraint_count(Some(&param)), 1);
        assert_eq!(
            crate::type_reflect::type_name(constraint_by_index(Some(&param), 0)),
            Some("ILight")
        );
        assert!(constraint_by_index(Some(&param), 1).is_none());
    }

    #[test]
    fn test_existential_param_has_no_name() {
        let iface = Arc::new(Type::Interface(DeclRef::new(InterfaceDecl::new("IMaterial"))));
        let param = SpecializationParam {
            index: 0,
            kind: SpecializationParamKind::Existential(iface),
        };
        assert_eq!(name(Some(&param)), None);
        assert_eq!(constraint_count(Some(&param)), 0);
        assert!(constraint_by_index(Some(&param), 0).is_none());
        assert_eq!(index(None), 0);
    }
}
