//! Layout graph: target-specific resource consumption of types and variables
//!
//! A [`TypeLayout`] records how many units of each resource kind one value of
//! a type consumes under a target's rules. A [`VarLayout`] records where one
//! declared variable starts inside its parent, per resource kind. Both keep
//! their per-kind entries in a [`ResourceInfoSet`], which never holds two
//! entries of the same kind.

use std::fmt;
use std::ops::Add;
use std::sync::Arc;

use crate::decl::VarDecl;
use crate::error::LayoutError;
use crate::program::Stage;
use crate::ty::Type;

/// Kinds of binding resource a layout can consume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutResourceKind {
    /// Constant-buffer register (`b`)
    ConstantBuffer,
    /// Shader-resource view register (`t`)
    ShaderResource,
    /// Unordered-access view register (`u`)
    UnorderedAccess,
    /// Varying input slot
    VaryingInput,
    /// Varying output slot
    VaryingOutput,
    /// Sampler register (`s`)
    SamplerState,
    /// Bytes of uniform data
    Uniform,
    /// Descriptor-table slot (Vulkan `binding`)
    DescriptorTableSlot,
    /// Specialization constant id
    SpecializationConstant,
    /// Push-constant buffer
    PushConstantBuffer,
    /// Whole register space / descriptor set
    RegisterSpace,
    /// Target-agnostic resource slot
    GenericResource,
    /// Ray payload
    RayPayload,
    /// Hit attributes
    HitAttributes,
    /// Callable-shader payload
    CallablePayload,
    /// Shader record
    ShaderRecord,
    /// Existential type parameter slot
    ExistentialTypeParam,
    /// Existential object parameter slot
    ExistentialObjectParam,
}

impl fmt::Display for LayoutResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayoutResourceKind::ConstantBuffer => "constant buffer",
            LayoutResourceKind::ShaderResource => "shader resource",
            LayoutResourceKind::UnorderedAccess => "unordered access",
            LayoutResourceKind::VaryingInput => "varying input",
            LayoutResourceKind::VaryingOutput => "varying output",
            LayoutResourceKind::SamplerState => "sampler state",
            LayoutResourceKind::Uniform => "uniform",
            LayoutResourceKind::DescriptorTableSlot => "descriptor table slot",
            LayoutResourceKind::SpecializationConstant => "specialization constant",
            LayoutResourceKind::PushConstantBuffer => "push constant buffer",
            LayoutResourceKind::RegisterSpace => "register space",
            LayoutResourceKind::GenericResource => "generic resource",
            LayoutResourceKind::RayPayload => "ray payload",
            LayoutResourceKind::HitAttributes => "hit attributes",
            LayoutResourceKind::CallablePayload => "callable payload",
            LayoutResourceKind::ShaderRecord => "shader record",
            LayoutResourceKind::ExistentialTypeParam => "existential type parameter",
            LayoutResourceKind::ExistentialObjectParam => "existential object parameter",
        };
        f.write_str(name)
    }
}

/// A resource count that may be unbounded (`Texture2D t[]`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutSize {
    /// A finite count
    Finite(u64),
    /// An unbounded count
    Infinite,
}

impl LayoutSize {
    /// Zero units
    pub const ZERO: LayoutSize = LayoutSize::Finite(0);

    /// Whether the size is finite
    pub fn is_finite(self) -> bool {
        matches!(self, LayoutSize::Finite(_))
    }

    /// The finite value, if any
    pub fn finite_value(self) -> Option<u64> {
        match self {
            LayoutSize::Finite(n) => Some(n),
            LayoutSize::Infinite => None,
        }
    }
}

impl Default for LayoutSize {
    fn default() -> Self {
        LayoutSize::ZERO
    }
}

impl Add for LayoutSize {
    type Output = LayoutSize;

    fn add(self, rhs: LayoutSize) -> LayoutSize {
        match (self, rhs) {
            (LayoutSize::Finite(a), LayoutSize::Finite(b)) => match a.checked_add(b) {
                Some(sum) => LayoutSize::Finite(sum),
                None => LayoutSize::Infinite,
            },
            _ => LayoutSize::Infinite,
        }
    }
}

impl From<u64> for LayoutSize {
    fn from(n: u64) -> Self {
        LayoutSize::Finite(n)
    }
}

/// An entry keyed by resource kind
pub trait ResourceInfo {
    /// Create an empty entry for `kind`
    fn empty(kind: LayoutResourceKind) -> Self;

    /// Resource kind this entry describes
    fn kind(&self) -> LayoutResourceKind;
}

/// Per-kind consumption of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeResourceInfo {
    /// Resource kind
    pub kind: LayoutResourceKind,
    /// Units of `kind` consumed
    pub count: LayoutSize,
}

impl ResourceInfo for TypeResourceInfo {
    fn empty(kind: LayoutResourceKind) -> Self {
        TypeResourceInfo {
            kind,
            count: LayoutSize::ZERO,
        }
    }

    fn kind(&self) -> LayoutResourceKind {
        self.kind
    }
}

/// Per-kind placement of a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarResourceInfo {
    /// Resource kind
    pub kind: LayoutResourceKind,
    /// Offset (register, binding, or byte offset) relative to the parent
    pub index: u64,
    /// Register space / descriptor set offset recorded for this kind
    pub space: u64,
}

impl ResourceInfo for VarResourceInfo {
    fn empty(kind: LayoutResourceKind) -> Self {
        VarResourceInfo {
            kind,
            index: 0,
            space: 0,
        }
    }

    fn kind(&self) -> LayoutResourceKind {
        self.kind
    }
}

/// Ordered set of resource infos with at most one entry per kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceInfoSet<I> {
    entries: Vec<I>,
}

impl<I> Default for ResourceInfoSet<I> {
    fn default() -> Self {
        ResourceInfoSet {
            entries: Vec::new(),
        }
    }
}

impl<I: ResourceInfo> ResourceInfoSet<I> {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the entry for `kind`
    pub fn find(&self, kind: LayoutResourceKind) -> Option<&I> {
        self.entries.iter().find(|info| info.kind() == kind)
    }

    /// Find the entry for `kind`, appending an empty one if missing
    pub fn find_or_add(&mut self, kind: LayoutResourceKind) -> &mut I {
        let position = match self.entries.iter().position(|info| info.kind() == kind) {
            Some(position) => position,
            None => {
                self.entries.push(I::empty(kind));
                self.entries.len() - 1
            }
        };
        &mut self.entries[position]
    }

    /// Insert a fully formed entry, rejecting a second entry of the same kind
    pub fn try_insert(&mut self, info: I) -> Result<(), LayoutError> {
        if self.find(info.kind()).is_some() {
            return Err(LayoutError::DuplicateResourceKind { kind: info.kind() });
        }
        self.entries.push(info);
        Ok(())
    }

    /// Entry at `index`, in insertion order
    pub fn get(&self, index: usize) -> Option<&I> {
        self.entries.get(index)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &I> {
        self.entries.iter()
    }
}

/// Row- or column-major storage of a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixLayoutMode {
    /// Row-major
    RowMajor,
    /// Column-major
    ColumnMajor,
}

/// Shape-specific part of a [`TypeLayout`]
#[derive(Debug, Clone)]
pub enum LayoutShape {
    /// No further structure (scalars, vectors, textures, samplers, ...)
    Simple,

    /// Struct layout with one var layout per field
    Struct {
        /// Field layouts, in declaration order
        fields: Vec<Arc<VarLayout>>,
    },

    /// Array layout
    Array {
        /// Layout of one element
        element: Arc<TypeLayout>,
        /// Byte stride between uniform elements
        uniform_stride: u64,
    },

    /// Parameter group layout (`ConstantBuffer<T>`, `ParameterBlock<T>`, ...)
    ParameterGroup {
        /// Layout of the group's own binding (e.g. the constant-buffer descriptor)
        container: Arc<VarLayout>,
        /// Layout of the element variable, offset inside the group
        element_var: Arc<VarLayout>,
        /// Element type layout with the container's resources already offset
        offset_element: Arc<TypeLayout>,
    },

    /// Structured buffer layout
    StructuredBuffer {
        /// Layout of one element
        element: Arc<TypeLayout>,
    },

    /// Matrix layout
    Matrix {
        /// Row count
        rows: u32,
        /// Column count
        columns: u32,
        /// Storage mode
        mode: MatrixLayoutMode,
    },

    /// Layout of a type whose existential slots have been filled
    ExistentialSpecialized {
        /// Layout of the unspecialized type
        base: Arc<TypeLayout>,
        /// Where the data for the filled slots lives
        pending_data_var: Option<Arc<VarLayout>>,
    },

    /// Layout of a generic type parameter
    GenericParam {
        /// Index of the parameter in the program's specialization params
        param_index: u32,
    },
}

/// Computed layout for one type under one target's rules
#[derive(Debug, Clone)]
pub struct TypeLayout {
    /// The type this layout was computed for
    pub ty: Option<Arc<Type>>,
    /// Per-kind consumption
    pub resource_infos: ResourceInfoSet<TypeResourceInfo>,
    /// Uniform alignment in bytes
    pub uniform_alignment: u64,
    /// Layout of data whose placement was deferred until specialization
    pub pending_data_type_layout: Option<Arc<TypeLayout>>,
    /// Shape-specific structure
    pub shape: LayoutShape,
}

impl TypeLayout {
    /// Create a simple layout for `ty` that consumes nothing
    pub fn new(ty: Arc<Type>) -> Self {
        TypeLayout {
            ty: Some(ty),
            resource_infos: ResourceInfoSet::new(),
            uniform_alignment: 1,
            pending_data_type_layout: None,
            shape: LayoutShape::Simple,
        }
    }

    /// Add `count` units of `kind` to this layout
    pub fn with_resource(self, kind: LayoutResourceKind, count: u64) -> Self {
        self.with_resource_size(kind, LayoutSize::Finite(count))
    }

    /// Add a possibly unbounded amount of `kind` to this layout
    pub fn with_resource_size(mut self, kind: LayoutResourceKind, size: LayoutSize) -> Self {
        let info = self.resource_infos.find_or_add(kind);
        info.count = info.count + size;
        self
    }

    /// Add uniform bytes and set the uniform alignment
    pub fn with_uniform(self, size: u64, alignment: u64) -> Self {
        let mut layout = self.with_resource(LayoutResourceKind::Uniform, size);
        layout.uniform_alignment = alignment;
        layout
    }

    /// Set the shape
    pub fn with_shape(mut self, shape: LayoutShape) -> Self {
        self.shape = shape;
        self
    }

    /// Set the pending-data layout
    pub fn with_pending_data(mut self, pending: Arc<TypeLayout>) -> Self {
        self.pending_data_type_layout = Some(pending);
        self
    }

    /// Find the consumption entry for `kind`
    pub fn find_resource_info(&self, kind: LayoutResourceKind) -> Option<&TypeResourceInfo> {
        self.resource_infos.find(kind)
    }

    /// The type this layout describes
    pub fn ty(&self) -> Option<&Type> {
        self.ty.as_deref()
    }
}

/// A semantic attached to a varying variable (`TEXCOORD3`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Semantic {
    /// Semantic name without the index (`TEXCOORD`)
    pub name: String,
    /// Semantic index (`3`)
    pub index: u64,
}

/// A declared variable paired with its layout and placement
#[derive(Debug, Clone)]
pub struct VarLayout {
    /// The declaration, if the variable is user-visible
    pub var: Option<Arc<VarDecl>>,
    /// Layout of the variable's type
    pub type_layout: Arc<TypeLayout>,
    /// Per-kind placement
    pub resource_infos: ResourceInfoSet<VarResourceInfo>,
    /// Semantic, present only for variables declared with one
    pub semantic: Option<Semantic>,
    /// Stage of a varying input/output
    pub stage: Stage,
    /// Placement of data whose layout was deferred until specialization
    pub pending_var_layout: Option<Arc<VarLayout>>,
}

impl VarLayout {
    /// Create a var layout with no placement
    pub fn new(var: Option<Arc<VarDecl>>, type_layout: Arc<TypeLayout>) -> Self {
        VarLayout {
            var,
            type_layout,
            resource_infos: ResourceInfoSet::new(),
            semantic: None,
            stage: Stage::None,
            pending_var_layout: None,
        }
    }

    /// Place the variable at `index` in `space` for `kind`
    pub fn with_binding(mut self, kind: LayoutResourceKind, index: u64, space: u64) -> Self {
        let info = self.resource_infos.find_or_add(kind);
        info.index = index;
        info.space = space;
        self
    }

    /// Attach a semantic
    pub fn with_semantic(mut self, name: impl Into<String>, index: u64) -> Self {
        self.semantic = Some(Semantic {
            name: name.into(),
            index,
        });
        self
    }

    /// Set the varying stage
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }

    /// Set the pending-data placement
    pub fn with_pending(mut self, pending: Arc<VarLayout>) -> Self {
        self.pending_var_layout = Some(pending);
        self
    }

    /// Find the placement entry for `kind`
    pub fn find_resource_info(&self, kind: LayoutResourceKind) -> Option<&VarResourceInfo> {
        self.resource_infos.find(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ty::BaseType;

    #[test]
    fn test_find_or_add_keeps_kinds_unique() {
        let mut set: ResourceInfoSet<TypeResourceInfo> = ResourceInfoSet::new();
        set.find_or_add(LayoutResourceKind::Uniform).count = LayoutSize::Finite(16);
        set.find_or_add(LayoutResourceKind::Uniform).count = LayoutSize::Finite(32);
        set.find_or_add(LayoutResourceKind::ShaderResource);
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.find(LayoutResourceKind::Uniform).map(|i| i.count),
            Some(LayoutSize::Finite(32))
        );
    }

    #[test]
    fn test_try_insert_rejects_duplicate() {
        let mut set: ResourceInfoSet<VarResourceInfo> = ResourceInfoSet::new();
        let info = VarResourceInfo {
            kind: LayoutResourceKind::SamplerState,
            index: 2,
            space: 0,
        };
        assert!(set.try_insert(info).is_ok());
        assert_eq!(
            set.try_insert(info),
            Err(LayoutError::DuplicateResourceKind {
                kind: LayoutResourceKind::SamplerState
            })
        );
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_layout_size_add() {
        assert_eq!(
            LayoutSize::Finite(2) + LayoutSize::Finite(3),
            LayoutSize::Finite(5)
        );
        assert_eq!(LayoutSize::Finite(2) + LayoutSize::Infinite, LayoutSize::Infinite);
        assert_eq!(
            LayoutSize::Finite(u64::MAX) + LayoutSize::Finite(1),
            LayoutSize::Infinite
        );
        assert_ne!(LayoutSize::Infinite, LayoutSize::ZERO);
    }

    #[test]
    fn test_with_resource_accumulates() {
        let layout = TypeLayout::new(Type::scalar(BaseType::Float))
            .with_resource(LayoutResourceKind::ShaderResource, 1)
            .with_resource(LayoutResourceKind::ShaderResource, 2);
        assert_eq!(layout.resource_infos.len(), 1);
        assert_eq!(
            layout
                .find_resource_info(LayoutResourceKind::ShaderResource)
                .map(|i| i.count),
            Some(LayoutSize::Finite(3))
        );
    }
}
