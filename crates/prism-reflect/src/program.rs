//! Program-level reflection
//!
//! [`Reflection`] wraps one compiled program's layout together with the
//! collaborators that can build new types and layouts on demand. Plain
//! queries borrow it shared. Operations that may allocate new graph nodes
//! (`find_type_by_name`, `type_layout`, specialization) borrow it mutably
//! and keep every node they hand out alive for as long as the reflection
//! object lives, so raw pointers to those nodes stay valid.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use prism_types::{
    EntryPointLayout, LayoutResourceKind, ProgramLayout, SpecializationParam,
    SpecializationParamKind, Type, TypeLayout, VarLayout,
};

use crate::config::ReflectionConfig;
use crate::error::ReflectError;
use crate::layout_reflect::{field_by_index, field_count, reflection_size, unwrap_parameter_group};
use crate::services::{TypeLayoutProvider, TypeResolver, TypeSpecializer};

/// Reflection over one compiled program
#[derive(Debug)]
pub struct Reflection {
    layout: Arc<ProgramLayout>,
    config: ReflectionConfig,
    resolver: Option<Box<dyn TypeResolver>>,
    layout_provider: Option<Box<dyn TypeLayoutProvider>>,
    specializer: Option<Box<dyn TypeSpecializer>>,
    retained_types: FxHashSet<Arc<Type>>,
    retained_layouts: FxHashMap<Arc<Type>, Arc<TypeLayout>>,
}

impl Reflection {
    /// Reflect over `layout` with the default configuration and no collaborators
    pub fn new(layout: ProgramLayout) -> Self {
        Self::from_arc(Arc::new(layout))
    }

    /// Reflect over a shared program layout
    pub fn from_arc(layout: Arc<ProgramLayout>) -> Self {
        Reflection {
            layout,
            config: ReflectionConfig::default(),
            resolver: None,
            layout_provider: None,
            specializer: None,
            retained_types: FxHashSet::default(),
            retained_layouts: FxHashMap::default(),
        }
    }

    /// Use `config`
    pub fn with_config(mut self, config: ReflectionConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolve type names with `resolver`
    pub fn with_resolver(mut self, resolver: impl TypeResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Compute type layouts with `provider`
    pub fn with_layout_provider(mut self, provider: impl TypeLayoutProvider + 'static) -> Self {
        self.layout_provider = Some(Box::new(provider));
        self
    }

    /// Specialize types with `specializer`
    pub fn with_specializer(mut self, specializer: impl TypeSpecializer + 'static) -> Self {
        self.specializer = Some(Box::new(specializer));
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ReflectionConfig {
        &self.config
    }

    /// The underlying program layout
    pub fn program_layout(&self) -> &ProgramLayout {
        &self.layout
    }

    pub(crate) fn specializer(&self) -> Option<&dyn TypeSpecializer> {
        self.specializer.as_deref()
    }

    // ========================================================================
    // Global parameters
    // ========================================================================

    /// Layout of the global scope as a struct, looking through an implicit
    /// global constant buffer
    pub fn global_struct_layout(&self) -> &TypeLayout {
        unwrap_parameter_group(&self.layout.parameters_layout.type_layout)
    }

    /// Layout of the global scope as a variable
    pub fn global_params_var_layout(&self) -> &VarLayout {
        &self.layout.parameters_layout
    }

    /// Number of global shader parameters
    pub fn parameter_count(&self) -> u32 {
        field_count(Some(self.global_struct_layout()))
    }

    /// Global shader parameter at `index`
    pub fn parameter_by_index(&self, index: u32) -> Option<&VarLayout> {
        field_by_index(Some(self.global_struct_layout()), index)
    }

    /// Register of the implicit global constant buffer, or 0 without one
    pub fn global_constant_buffer_binding(&self) -> usize {
        self.layout
            .parameters_layout
            .find_resource_info(LayoutResourceKind::ConstantBuffer)
            .map_or(0, |info| usize::try_from(info.index).unwrap_or(usize::MAX))
    }

    /// Size in bytes of the implicit global constant buffer
    pub fn global_constant_buffer_size(&self) -> usize {
        self.global_struct_layout()
            .find_resource_info(LayoutResourceKind::Uniform)
            .map_or(0, |info| reflection_size(info.count))
    }

    // ========================================================================
    // Specialization parameters
    // ========================================================================

    /// Number of specialization parameters
    pub fn type_parameter_count(&self) -> u32 {
        self.layout.specialization_params.len() as u32
    }

    /// Specialization parameter at `index`
    pub fn type_parameter_by_index(&self, index: u32) -> Option<&SpecializationParam> {
        self.layout
            .specialization_params
            .get(index as usize)
            .map(|p| p.as_ref())
    }

    /// Generic type parameter named `name`
    ///
    /// Existential slots have no name and are never found.
    pub fn find_type_parameter(&self, name: &str) -> Option<&SpecializationParam> {
        self.layout
            .specialization_params
            .iter()
            .find(|param| match &param.kind {
                SpecializationParamKind::Generic(decl) => decl.name == name,
                SpecializationParamKind::Existential(_) => false,
            })
            .map(|p| p.as_ref())
    }

    // ========================================================================
    // Entry points
    // ========================================================================

    /// Number of entry points
    pub fn entry_point_count(&self) -> usize {
        self.layout.entry_points.len()
    }

    /// Entry point at `index`
    pub fn entry_point_by_index(&self, index: usize) -> Option<&EntryPointLayout> {
        self.layout.entry_points.get(index).map(|ep| ep.as_ref())
    }

    /// Entry point whose function is named `name`
    pub fn find_entry_point_by_name(&self, name: &str) -> Option<&EntryPointLayout> {
        self.layout
            .entry_points
            .iter()
            .find(|ep| match &ep.func {
                Some(func) => func.name == name,
                None => ep.name == name,
            })
            .map(|ep| ep.as_ref())
    }

    // ========================================================================
    // Hashed strings
    // ========================================================================

    /// Number of string literals passed through `getStringHash`
    pub fn hashed_string_count(&self) -> usize {
        self.layout.hashed_strings.len()
    }

    /// Hashed string literal at `index`
    pub fn hashed_string(&self, index: usize) -> Option<&str> {
        self.layout.hashed_strings.get(index)
    }

    // ========================================================================
    // On-demand types and layouts
    // ========================================================================

    /// Resolve a type by source-level name
    ///
    /// Resolution failures and panics inside the resolver come back as
    /// `None`.
    pub fn find_type_by_name(&mut self, name: &str) -> Option<Arc<Type>> {
        let Some(resolver) = self.resolver.as_deref() else {
            tracing::debug!(name, "no type resolver installed");
            return None;
        };

        tracing::debug!(name, "resolving type by name");
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| resolver.resolve(name)));
        let error = match outcome {
            Ok(Ok(ty)) => return Some(self.retain_type(ty)),
            Ok(Err(err)) => err,
            Err(payload) => ReflectError::from_panic("resolving a type name", &*payload),
        };
        self.swallowed(&error);
        None
    }

    /// Layout of `ty` under the program's target rules
    ///
    /// Layouts are cached per structurally equal type.
    pub fn type_layout(&mut self, ty: &Type) -> Option<Arc<TypeLayout>> {
        if let Some(layout) = self.retained_layouts.get(ty) {
            return Some(Arc::clone(layout));
        }
        let provider = self.layout_provider.as_deref()?;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| provider.layout_of(ty)));
        match outcome {
            Ok(Some(layout)) => Some(self.retain_layout(ty, layout)),
            Ok(None) => {
                tracing::debug!(ty = %ty, "no layout available");
                None
            }
            Err(payload) => {
                let error = ReflectError::from_panic("computing a type layout", &*payload);
                self.swallowed(&error);
                None
            }
        }
    }

    /// Number of nodes kept alive on behalf of callers
    pub fn retained_count(&self) -> usize {
        self.retained_types.len() + self.retained_layouts.len()
    }

    /// Keep `ty` alive, handing back the node already retained for an equal type
    pub(crate) fn retain_type(&mut self, ty: Arc<Type>) -> Arc<Type> {
        if let Some(existing) = self.retained_types.get(&*ty) {
            return Arc::clone(existing);
        }
        self.retained_types.insert(Arc::clone(&ty));
        ty
    }

    fn retain_layout(&mut self, ty: &Type, layout: Arc<TypeLayout>) -> Arc<TypeLayout> {
        Arc::clone(
            self.retained_layouts
                .entry(Arc::new(ty.clone()))
                .or_insert(layout),
        )
    }

    fn swallowed(&self, error: &ReflectError) {
        if self.config.warn_on_swallowed_failure {
            tracing::warn!(error = %error, "reflection query failed");
        } else {
            tracing::debug!(error = %error, "reflection query failed");
        }
    }
}
