//! Parameter categories
//!
//! A category is the client-facing name of a [`LayoutResourceKind`], plus
//! two summaries: `None` for a layout that consumes nothing and `Mixed` for
//! one that consumes several kinds at once.
//!
//! Targets that merge constant buffers, textures and samplers into one
//! descriptor table record those bindings under `DescriptorTableSlot`.
//! [`remap_category`] lets a caller that asks for the pre-merge category
//! find them anyway.

use prism_types::{LayoutResourceKind, LayoutShape, TypeLayout, TypeResourceInfo};

use crate::kind::{kind, TypeKind};

/// Client-facing resource category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum ParameterCategory {
    /// Consumes nothing
    #[default]
    None = 0,
    /// Consumes more than one kind
    Mixed = 1,
    /// Constant-buffer register
    ConstantBuffer = 2,
    /// Shader-resource register
    ShaderResource = 3,
    /// Unordered-access register
    UnorderedAccess = 4,
    /// Varying input
    VaryingInput = 5,
    /// Varying output
    VaryingOutput = 6,
    /// Sampler register
    SamplerState = 7,
    /// Uniform bytes
    Uniform = 8,
    /// Descriptor-table slot
    DescriptorTableSlot = 9,
    /// Specialization constant
    SpecializationConstant = 10,
    /// Push-constant buffer
    PushConstantBuffer = 11,
    /// Register space
    RegisterSpace = 12,
    /// Target-agnostic resource
    Generic = 13,
    /// Ray payload
    RayPayload = 14,
    /// Hit attributes
    HitAttributes = 15,
    /// Callable payload
    CallablePayload = 16,
    /// Shader record
    ShaderRecord = 17,
    /// Existential type parameter
    ExistentialTypeParam = 18,
    /// Existential object parameter
    ExistentialObjectParam = 19,
}

impl ParameterCategory {
    /// Every category, in raw-value order
    pub const ALL: [ParameterCategory; 20] = [
        ParameterCategory::None,
        ParameterCategory::Mixed,
        ParameterCategory::ConstantBuffer,
        ParameterCategory::ShaderResource,
        ParameterCategory::UnorderedAccess,
        ParameterCategory::VaryingInput,
        ParameterCategory::VaryingOutput,
        ParameterCategory::SamplerState,
        ParameterCategory::Uniform,
        ParameterCategory::DescriptorTableSlot,
        ParameterCategory::SpecializationConstant,
        ParameterCategory::PushConstantBuffer,
        ParameterCategory::RegisterSpace,
        ParameterCategory::Generic,
        ParameterCategory::RayPayload,
        ParameterCategory::HitAttributes,
        ParameterCategory::CallablePayload,
        ParameterCategory::ShaderRecord,
        ParameterCategory::ExistentialTypeParam,
        ParameterCategory::ExistentialObjectParam,
    ];

    /// Raw value for the C ABI
    pub fn as_raw(self) -> u32 {
        self as u32
    }

    /// Decode a raw value; unknown values are `None`
    pub fn from_raw(raw: u32) -> Self {
        Self::ALL
            .get(raw as usize)
            .copied()
            .unwrap_or(ParameterCategory::None)
    }

    /// The resource kind this category names; `None` and `Mixed` name none
    pub fn resource_kind(self) -> Option<LayoutResourceKind> {
        use LayoutResourceKind as K;

        Some(match self {
            ParameterCategory::None | ParameterCategory::Mixed => return None,
            ParameterCategory::ConstantBuffer => K::ConstantBuffer,
            ParameterCategory::ShaderResource => K::ShaderResource,
            ParameterCategory::UnorderedAccess => K::UnorderedAccess,
            ParameterCategory::VaryingInput => K::VaryingInput,
            ParameterCategory::VaryingOutput => K::VaryingOutput,
            ParameterCategory::SamplerState => K::SamplerState,
            ParameterCategory::Uniform => K::Uniform,
            ParameterCategory::DescriptorTableSlot => K::DescriptorTableSlot,
            ParameterCategory::SpecializationConstant => K::SpecializationConstant,
            ParameterCategory::PushConstantBuffer => K::PushConstantBuffer,
            ParameterCategory::RegisterSpace => K::RegisterSpace,
            ParameterCategory::Generic => K::GenericResource,
            ParameterCategory::RayPayload => K::RayPayload,
            ParameterCategory::HitAttributes => K::HitAttributes,
            ParameterCategory::CallablePayload => K::CallablePayload,
            ParameterCategory::ShaderRecord => K::ShaderRecord,
            ParameterCategory::ExistentialTypeParam => K::ExistentialTypeParam,
            ParameterCategory::ExistentialObjectParam => K::ExistentialObjectParam,
        })
    }
}

impl From<LayoutResourceKind> for ParameterCategory {
    fn from(kind: LayoutResourceKind) -> Self {
        use LayoutResourceKind as K;

        match kind {
            K::ConstantBuffer => ParameterCategory::ConstantBuffer,
            K::ShaderResource => ParameterCategory::ShaderResource,
            K::UnorderedAccess => ParameterCategory::UnorderedAccess,
            K::VaryingInput => ParameterCategory::VaryingInput,
            K::VaryingOutput => ParameterCategory::VaryingOutput,
            K::SamplerState => ParameterCategory::SamplerState,
            K::Uniform => ParameterCategory::Uniform,
            K::DescriptorTableSlot => ParameterCategory::DescriptorTableSlot,
            K::SpecializationConstant => ParameterCategory::SpecializationConstant,
            K::PushConstantBuffer => ParameterCategory::PushConstantBuffer,
            K::RegisterSpace => ParameterCategory::RegisterSpace,
            K::GenericResource => ParameterCategory::Generic,
            K::RayPayload => ParameterCategory::RayPayload,
            K::HitAttributes => ParameterCategory::HitAttributes,
            K::CallablePayload => ParameterCategory::CallablePayload,
            K::ShaderRecord => ParameterCategory::ShaderRecord,
            K::ExistentialTypeParam => ParameterCategory::ExistentialTypeParam,
            K::ExistentialObjectParam => ParameterCategory::ExistentialObjectParam,
        }
    }
}

/// The layout whose entries a category query counts
///
/// For a parameter group whose container binding consumes something, the
/// group's own binding site is what occupies a category slot, not its
/// payload.
fn category_layout(type_layout: &TypeLayout) -> &TypeLayout {
    if let LayoutShape::ParameterGroup { container, .. } = &type_layout.shape {
        if !container.type_layout.resource_infos.is_empty() {
            return &container.type_layout;
        }
    }
    type_layout
}

/// Category of a type layout
pub fn category(type_layout: Option<&TypeLayout>) -> ParameterCategory {
    let Some(type_layout) = type_layout else {
        return ParameterCategory::None;
    };

    let infos = &category_layout(type_layout).resource_infos;
    match infos.len() {
        0 => ParameterCategory::None,
        1 => infos
            .get(0)
            .map(|info| info.kind.into())
            .unwrap_or(ParameterCategory::None),
        _ => ParameterCategory::Mixed,
    }
}

/// Number of categories a type layout consumes
pub fn category_count(type_layout: Option<&TypeLayout>) -> u32 {
    type_layout.map_or(0, |tl| category_layout(tl).resource_infos.len() as u32)
}

/// Category at `index`, in the layout's entry order
pub fn category_by_index(type_layout: Option<&TypeLayout>, index: u32) -> ParameterCategory {
    type_layout
        .and_then(|tl| category_layout(tl).resource_infos.get(index as usize))
        .map_or(ParameterCategory::None, |info: &TypeResourceInfo| {
            info.kind.into()
        })
}

/// Whether the layout has an entry for `category`
pub(crate) fn has_entry(type_layout: &TypeLayout, category: ParameterCategory) -> bool {
    category
        .resource_kind()
        .is_some_and(|kind| type_layout.find_resource_info(kind).is_some())
}

/// Map a requested category onto the one the layout actually records
///
/// A direct entry always wins. Otherwise, if the layout records a
/// descriptor-table slot and the requested category is the natural one for
/// the array-stripped type (constant buffer, shader resource, sampler),
/// the answer is `DescriptorTableSlot`. Anything else comes back unchanged.
pub fn remap_category(
    type_layout: Option<&TypeLayout>,
    requested: ParameterCategory,
) -> ParameterCategory {
    let Some(type_layout) = type_layout else {
        return requested;
    };

    if has_entry(type_layout, requested) {
        return requested;
    }

    if type_layout
        .find_resource_info(LayoutResourceKind::DescriptorTableSlot)
        .is_none()
    {
        return requested;
    }

    let ty = type_layout.ty().map(|ty| ty.unwrap_arrays());
    let aliases = match kind(ty) {
        TypeKind::ConstantBuffer => requested == ParameterCategory::ConstantBuffer,
        TypeKind::Resource => requested == ParameterCategory::ShaderResource,
        TypeKind::SamplerState => requested == ParameterCategory::SamplerState,
        _ => false,
    };

    if aliases {
        ParameterCategory::DescriptorTableSlot
    } else {
        requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_types::{BaseType, ParameterGroupKind, ParameterGroupType, Type, VarLayout};
    use std::sync::Arc;

    fn sampler_layout() -> TypeLayout {
        TypeLayout::new(Arc::new(Type::SamplerState { comparison: false }))
            .with_resource(LayoutResourceKind::DescriptorTableSlot, 1)
    }

    #[test]
    fn test_category_cardinality() {
        let float = Type::scalar(BaseType::Float);
        let empty = TypeLayout::new(float.clone());
        assert_eq!(category(Some(&empty)), ParameterCategory::None);
        assert_eq!(category_count(Some(&empty)), 0);

        let single = TypeLayout::new(float.clone()).with_uniform(4, 4);
        assert_eq!(category(Some(&single)), ParameterCategory::Uniform);

        let mixed = TypeLayout::new(float)
            .with_uniform(16, 16)
            .with_resource(LayoutResourceKind::DescriptorTableSlot, 1);
        assert_eq!(category(Some(&mixed)), ParameterCategory::Mixed);
        assert_eq!(category_count(Some(&mixed)), 2);
        assert_eq!(category_by_index(Some(&mixed), 0), ParameterCategory::Uniform);
        assert_eq!(
            category_by_index(Some(&mixed), 1),
            ParameterCategory::DescriptorTableSlot
        );
        assert_eq!(category_by_index(Some(&mixed), 2), ParameterCategory::None);

        assert_eq!(category(None), ParameterCategory::None);
        assert_eq!(category_count(None), 0);
    }

    #[test]
    fn test_parameter_group_uses_container() {
        let element_ty = Type::scalar(BaseType::Float);
        let group_ty = Arc::new(Type::ParameterGroup(ParameterGroupType {
            kind: ParameterGroupKind::ConstantBuffer,
            element: element_ty.clone(),
        }));
        let element = Arc::new(TypeLayout::new(element_ty).with_uniform(4, 4));
        let container_tl = Arc::new(
            TypeLayout::new(group_ty.clone()).with_resource(LayoutResourceKind::ConstantBuffer, 1),
        );
        let group = TypeLayout::new(group_ty)
            .with_uniform(4, 4)
            .with_resource(LayoutResourceKind::ConstantBuffer, 1)
            .with_shape(LayoutShape::ParameterGroup {
                container: Arc::new(VarLayout::new(None, container_tl)),
                element_var: Arc::new(VarLayout::new(None, element.clone())),
                offset_element: element,
            });

        assert_eq!(category(Some(&group)), ParameterCategory::ConstantBuffer);
        assert_eq!(category_count(Some(&group)), 1);
    }

    #[test]
    fn test_remap_to_descriptor_table_slot() {
        let layout = sampler_layout();
        assert_eq!(
            remap_category(Some(&layout), ParameterCategory::SamplerState),
            ParameterCategory::DescriptorTableSlot
        );
        assert_eq!(
            remap_category(Some(&layout), ParameterCategory::ShaderResource),
            ParameterCategory::ShaderResource
        );
        assert_eq!(
            remap_category(None, ParameterCategory::SamplerState),
            ParameterCategory::SamplerState
        );
    }

    #[test]
    fn test_remap_prefers_direct_entry() {
        let layout = TypeLayout::new(Arc::new(Type::SamplerState { comparison: true }))
            .with_resource(LayoutResourceKind::SamplerState, 1)
            .with_resource(LayoutResourceKind::DescriptorTableSlot, 1);
        assert_eq!(
            remap_category(Some(&layout), ParameterCategory::SamplerState),
            ParameterCategory::SamplerState
        );
    }

    #[test]
    fn test_remap_is_idempotent() {
        let layouts = [
            sampler_layout(),
            TypeLayout::new(Type::scalar(BaseType::Float)).with_uniform(4, 4),
            TypeLayout::new(Type::array(
                Arc::new(Type::SamplerState { comparison: false }),
                Some(4),
            ))
            .with_resource(LayoutResourceKind::DescriptorTableSlot, 1),
        ];
        for layout in &layouts {
            for requested in ParameterCategory::ALL {
                let once = remap_category(Some(layout), requested);
                let twice = remap_category(Some(layout), once);
                assert_eq!(once, twice, "{requested:?}");
            }
        }
    }

    #[test]
    fn test_raw_round_trip() {
        for category in ParameterCategory::ALL {
            assert_eq!(ParameterCategory::from_raw(category.as_raw()), category);
        }
        assert_eq!(ParameterCategory::from_raw(999), ParameterCategory::None);
    }

    #[test]
    fn test_kind_category_correspondence() {
        for category in ParameterCategory::ALL {
            if let Some(kind) = category.resource_kind() {
                assert_eq!(ParameterCategory::from(kind), category);
            }
        }
    }
}
