//! Collaborator capabilities
//!
//! Reflection never builds types or layouts itself. When a host asks for a
//! type by name, a layout for an arbitrary type, or a specialization, the
//! request is forwarded to one of these capabilities. Each comes with a
//! table-driven reference implementation that hosts and tests can fill in
//! directly.

use std::fmt;
use std::sync::Arc;

use prism_types::{DeclRef, InterfaceDecl, Type, TypeLayout};
use rustc_hash::FxHashMap;

use crate::diagnostic::{Diagnostic, DiagnosticSink, ErrorCode};
use crate::error::ReflectError;

/// Looks up types by source-level name
pub trait TypeResolver: Send + Sync {
    /// Resolve a type expression such as `"Light"` or `"float4"`
    ///
    /// # Returns
    /// * `Ok(ty)` - The resolved type
    /// * `Err(ReflectError::TypeNotFound)` - Nothing by that name
    fn resolve(&self, name: &str) -> Result<Arc<Type>, ReflectError>;
}

/// Computes target layouts for types on demand
pub trait TypeLayoutProvider: Send + Sync {
    /// Layout of `ty` under the program's target rules, if one can be computed
    fn layout_of(&self, ty: &Type) -> Option<Arc<TypeLayout>>;
}

/// Fills the existential slots of a type
pub trait TypeSpecializer: Send + Sync {
    /// Specialize `base` with one concrete type per slot
    ///
    /// # Arguments
    /// * `base` - Unspecialized type
    /// * `args` - Concrete types, in slot order
    /// * `sink` - Receives a diagnostic for every problem found
    ///
    /// # Returns
    /// The specialized type, or `None` after reporting why not
    fn specialize(&self, base: &Type, args: &[&Type], sink: &mut DiagnosticSink)
        -> Option<Arc<Type>>;

    /// Short name for logging
    fn name(&self) -> &str {
        "specializer"
    }
}

impl fmt::Debug for dyn TypeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TypeResolver")
    }
}

impl fmt::Debug for dyn TypeLayoutProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TypeLayoutProvider")
    }
}

impl fmt::Debug for dyn TypeSpecializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeSpecializer")
            .field("name", &self.name())
            .finish()
    }
}

/// Name table resolver
#[derive(Debug, Clone, Default)]
pub struct NamedTypes {
    types: FxHashMap<String, Arc<Type>>,
}

impl NamedTypes {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `ty` under `name`, replacing any earlier entry
    pub fn insert(&mut self, name: impl Into<String>, ty: Arc<Type>) {
        self.types.insert(name.into(), ty);
    }

    /// Builder form of [`NamedTypes::insert`]
    pub fn with_type(mut self, name: impl Into<String>, ty: Arc<Type>) -> Self {
        self.insert(name, ty);
        self
    }

    /// Number of registered names
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no names are registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeResolver for NamedTypes {
    fn resolve(&self, name: &str) -> Result<Arc<Type>, ReflectError> {
        self.types
            .get(name)
            .cloned()
            .ok_or_else(|| ReflectError::TypeNotFound {
                name: name.to_string(),
            })
    }
}

/// Precomputed layouts keyed by type
#[derive(Debug, Clone, Default)]
pub struct LayoutTable {
    layouts: FxHashMap<Arc<Type>, Arc<TypeLayout>>,
}

impl LayoutTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the layout of its own type
    ///
    /// Layouts without a type cannot be looked up and are dropped.
    pub fn insert(&mut self, layout: Arc<TypeLayout>) {
        if let Some(ty) = layout.ty.clone() {
            self.layouts.insert(ty, layout);
        }
    }

    /// Builder form of [`LayoutTable::insert`]
    pub fn with_layout(mut self, layout: Arc<TypeLayout>) -> Self {
        self.insert(layout);
        self
    }

    /// Number of recorded layouts
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    /// Whether no layouts are recorded
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

impl TypeLayoutProvider for LayoutTable {
    fn layout_of(&self, ty: &Type) -> Option<Arc<TypeLayout>> {
        self.layouts.get(ty).cloned()
    }
}

/// Specializer for interface-typed fields
///
/// A slot is any interface-typed position reachable from the base type
/// through struct fields, array elements, parameter-group elements, and
/// structured-buffer elements, visited depth-first in declaration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExistentialSpecializer;

impl ExistentialSpecializer {
    /// Create the specializer
    pub fn new() -> Self {
        ExistentialSpecializer
    }

    /// Interfaces of every slot of `ty`, in slot order
    pub fn slots(ty: &Type) -> Vec<&DeclRef<InterfaceDecl>> {
        let mut slots = Vec::new();
        collect_slots(ty, &mut slots);
        slots
    }
}

fn collect_slots<'a>(ty: &'a Type, slots: &mut Vec<&'a DeclRef<InterfaceDecl>>) {
    match ty {
        Type::Interface(decl) => slots.push(decl),
        Type::Struct(decl) => {
            for field in &decl.fields {
                collect_slots(&field.ty, slots);
            }
        }
        Type::Array { element, .. } => collect_slots(element, slots),
        Type::ParameterGroup(group) => collect_slots(&group.element, slots),
        Type::Buffer(buffer) => {
            if let Some(element) = &buffer.element {
                collect_slots(element, slots);
            }
        }
        _ => {}
    }
}

fn conforms(arg: &Type, interface: &DeclRef<InterfaceDecl>) -> bool {
    match arg {
        Type::Struct(decl) => decl.conforms_to.contains(interface),
        Type::Interface(decl) => decl == interface,
        Type::ExistentialSpecialized { base, .. } => conforms(base, interface),
        _ => false,
    }
}

impl TypeSpecializer for ExistentialSpecializer {
    fn specialize(
        &self,
        base: &Type,
        args: &[&Type],
        sink: &mut DiagnosticSink,
    ) -> Option<Arc<Type>> {
        let slots = Self::slots(base);
        if slots.is_empty() {
            sink.report_error(&ReflectError::NotSpecializable {
                ty: base.to_string(),
            });
            return None;
        }

        if slots.len() != args.len() {
            sink.report_error(&ReflectError::ArgumentCountMismatch {
                expected: slots.len(),
                actual: args.len(),
            });
            return None;
        }

        let mut ok = true;
        for (slot, arg) in slots.iter().zip(args) {
            if !conforms(arg, slot) {
                sink.report_error(&ReflectError::DoesNotConform {
                    arg: arg.to_string(),
                    interface: slot.name.clone(),
                });
                ok = false;
            } else if matches!(arg, Type::Interface(_)) {
                sink.report(
                    Diagnostic::warning(format!(
                        "argument `{}` leaves a slot of `{}` unspecialized",
                        arg, slot.name
                    ))
                    .with_code(ErrorCode("W4001"))
                    .with_help("pass a concrete type that conforms to the interface"),
                );
            }
        }
        if !ok {
            return None;
        }

        Some(Arc::new(Type::ExistentialSpecialized {
            base: Arc::new(base.clone()),
            args: args.iter().map(|arg| Arc::new((*arg).clone())).collect(),
        }))
    }

    fn name(&self) -> &str {
        "existential"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_types::{BaseType, StructDecl, VarDecl};

    fn light_interface() -> DeclRef<InterfaceDecl> {
        DeclRef::new(InterfaceDecl::new("ILight"))
    }

    fn scene(light: &DeclRef<InterfaceDecl>) -> Arc<Type> {
        Arc::new(Type::Struct(DeclRef::new(
            StructDecl::new("Scene")
                .with_field(VarDecl::new("exposure", Type::scalar(BaseType::Float)))
                .with_field(VarDecl::new(
                    "lights",
                    Type::array(Arc::new(Type::Interface(light.clone())), Some(2)),
                ))
                .with_field(VarDecl::new("sun", Arc::new(Type::Interface(light.clone())))),
        )))
    }

    fn point_light(light: &DeclRef<InterfaceDecl>) -> Arc<Type> {
        Arc::new(Type::Struct(DeclRef::new(
            StructDecl::new("PointLight").conforming_to(light.clone()),
        )))
    }

    #[test]
    fn test_named_types() {
        let table = NamedTypes::new().with_type("float", Type::scalar(BaseType::Float));
        assert_eq!(table.len(), 1);
        assert_eq!(*table.resolve("float").unwrap(), Type::Scalar(BaseType::Float));
        assert_eq!(
            table.resolve("Missing"),
            Err(ReflectError::TypeNotFound {
                name: "Missing".to_string()
            })
        );
    }

    #[test]
    fn test_layout_table_is_structural() {
        let layout = Arc::new(TypeLayout::new(Type::vector(BaseType::Float, 4)).with_uniform(16, 16));
        let table = LayoutTable::new().with_layout(layout);
        let lookup = Type::vector(BaseType::Float, 4);
        assert!(table.layout_of(&lookup).is_some());
        assert!(table.layout_of(&Type::Scalar(BaseType::Float)).is_none());
    }

    #[test]
    fn test_slots_in_declaration_order() {
        let light = light_interface();
        let base = scene(&light);
        assert_eq!(ExistentialSpecializer::slots(&base).len(), 2);
    }

    #[test]
    fn test_specialize_success() {
        let light = light_interface();
        let base = scene(&light);
        let arg = point_light(&light);
        let mut sink = DiagnosticSink::new();

        let ty = ExistentialSpecializer::new()
            .specialize(&base, &[&*arg, &*arg], &mut sink)
            .unwrap();
        assert!(sink.is_empty());
        assert!(matches!(&*ty, Type::ExistentialSpecialized { args, .. } if args.len() == 2));
    }

    #[test]
    fn test_specialize_not_specializable() {
        let mut sink = DiagnosticSink::new();
        assert!(ExistentialSpecializer
            .specialize(&Type::Scalar(BaseType::Float), &[], &mut sink)
            .is_none());
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.iter().next().and_then(|d| d.code()).map(|c| c.as_str()), Some("E4002"));
    }

    #[test]
    fn test_specialize_count_mismatch() {
        let light = light_interface();
        let mut sink = DiagnosticSink::new();
        let result = ExistentialSpecializer.specialize(&scene(&light), &[&*point_light(&light)], &mut sink);
        assert!(result.is_none());
        assert_eq!(sink.iter().next().and_then(|d| d.code()).map(|c| c.as_str()), Some("E4003"));
    }

    #[test]
    fn test_specialize_reports_every_nonconforming_arg() {
        let light = light_interface();
        let float = Type::Scalar(BaseType::Float);
        let mut sink = DiagnosticSink::new();
        let result = ExistentialSpecializer.specialize(&scene(&light), &[&float, &float], &mut sink);
        assert!(result.is_none());
        assert_eq!(sink.len(), 2);
        assert!(sink.iter().all(|d| d.message().contains("ILight")));
    }

    #[test]
    fn test_interface_argument_warns() {
        let light = light_interface();
        let abstract_light = Type::Interface(light.clone());
        let mut sink = DiagnosticSink::new();
        let result = ExistentialSpecializer.specialize(
            &scene(&light),
            &[&abstract_light, &*point_light(&light)],
            &mut sink,
        );
        assert!(result.is_some());
        assert_eq!(sink.len(), 1);
        assert!(!sink.has_errors());
        assert_eq!(sink.iter().next().and_then(|d| d.code()).map(|c| c.as_str()), Some("W4001"));
    }
}
