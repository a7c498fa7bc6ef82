//! Declared-variable queries

use prism_types::{Modifier, Type, VarDecl};

/// Name the variable is reflected under
///
/// A parameter group declared as `cbuffer Foo { ... }` reflects as `Foo`
/// even though its synthesized variable has another name.
pub fn name(var: Option<&VarDecl>) -> Option<&str> {
    let var = var?;
    Some(var.reflection_name.as_deref().unwrap_or(var.name.as_str()))
}

/// Declared type of the variable
pub fn var_type(var: Option<&VarDecl>) -> Option<&Type> {
    var.map(|v| v.ty.as_ref())
}

/// The variable's modifier of the given kind, if it carries one
pub fn find_modifier(var: Option<&VarDecl>, modifier: Modifier) -> Option<&Modifier> {
    var?.modifiers.iter().find(|m| **m == modifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_types::BaseType;

    #[test]
    fn test_reflection_name_overrides_name() {
        let plain = VarDecl::new("exposure", Type::scalar(BaseType::Float));
        assert_eq!(name(Some(&plain)), Some("exposure"));

        let renamed = VarDecl::new("PRISM_parameterGroup_PerFrame", Type::scalar(BaseType::Float))
            .with_reflection_name("PerFrame");
        assert_eq!(name(Some(&renamed)), Some("PerFrame"));
        assert_eq!(name(None), None);
    }

    #[test]
    fn test_find_modifier() {
        let var = VarDecl::new("pc", Type::scalar(BaseType::UInt)).with_modifier(Modifier::PushConstant);
        assert_eq!(find_modifier(Some(&var), Modifier::PushConstant), Some(&Modifier::PushConstant));
        assert_eq!(find_modifier(Some(&var), Modifier::Shared), None);
        assert_eq!(find_modifier(None, Modifier::Shared), None);
        assert_eq!(var_type(Some(&var)), Some(&Type::Scalar(BaseType::UInt)));
    }
}
