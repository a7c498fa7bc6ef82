//! Type-layout queries: size, alignment, stride, and shape traversal
//!
//! Every accessor answers with a sentinel when the layout is absent or has
//! the wrong shape, so calls can be chained without checking each step.

use prism_types::{LayoutShape, LayoutSize, MatrixLayoutMode, Type, TypeLayout, VarLayout};

use crate::category::ParameterCategory;
use crate::kind::{kind, TypeKind};

/// Size reported for unbounded resource counts
pub const UNBOUNDED_SIZE: usize = usize::MAX;

/// Convert a layout size to the reported size
pub fn reflection_size(size: LayoutSize) -> usize {
    match size {
        LayoutSize::Finite(n) => usize::try_from(n).unwrap_or(UNBOUNDED_SIZE),
        LayoutSize::Infinite => UNBOUNDED_SIZE,
    }
}

/// Type the layout was computed for
pub fn layout_type(type_layout: Option<&TypeLayout>) -> Option<&Type> {
    type_layout?.ty()
}

/// Kind of the type the layout was computed for
pub fn layout_kind(type_layout: Option<&TypeLayout>) -> TypeKind {
    kind(layout_type(type_layout))
}

/// Units of `category` one value of the type consumes
///
/// Unbounded counts report [`UNBOUNDED_SIZE`]; a category the layout does
/// not consume reports 0.
pub fn size(type_layout: Option<&TypeLayout>, category: ParameterCategory) -> usize {
    type_layout
        .zip(category.resource_kind())
        .and_then(|(tl, kind)| tl.find_resource_info(kind))
        .map_or(0, |info| reflection_size(info.count))
}

/// Alignment for `category`
///
/// Only uniform data has a byte alignment; every other category reports 1.
pub fn alignment(type_layout: Option<&TypeLayout>, category: ParameterCategory) -> usize {
    let Some(type_layout) = type_layout else {
        return 0;
    };

    if category == ParameterCategory::Uniform {
        usize::try_from(type_layout.uniform_alignment).unwrap_or(UNBOUNDED_SIZE)
    } else {
        1
    }
}

/// The offset element layout of a parameter group, or the layout itself
pub(crate) fn unwrap_parameter_group(type_layout: &TypeLayout) -> &TypeLayout {
    match &type_layout.shape {
        LayoutShape::ParameterGroup { offset_element, .. } => offset_element.as_ref(),
        _ => type_layout,
    }
}

/// Number of field layouts of a struct layout
pub fn field_count(type_layout: Option<&TypeLayout>) -> u32 {
    match type_layout.map(|tl| &tl.shape) {
        Some(LayoutShape::Struct { fields }) => fields.len() as u32,
        _ => 0,
    }
}

/// Field layout at `index` of a struct layout
pub fn field_by_index(type_layout: Option<&TypeLayout>, index: u32) -> Option<&VarLayout> {
    match &type_layout?.shape {
        LayoutShape::Struct { fields } => fields.get(index as usize).map(|f| f.as_ref()),
        _ => None,
    }
}

/// Index of the field whose variable is named `name`
pub fn find_field_index_by_name(type_layout: Option<&TypeLayout>, name: &str) -> Option<usize> {
    match &type_layout?.shape {
        LayoutShape::Struct { fields } => fields.iter().position(|field| {
            field
                .var
                .as_ref()
                .is_some_and(|var| var.name == name)
        }),
        _ => None,
    }
}

/// Distance between consecutive array elements, in units of `category`
///
/// Uniform data uses the stored byte stride. Descriptor-table slots have
/// no stride: an array of opaque resources occupies one binding whatever
/// its length. Any other category uses what one element consumes.
pub fn element_stride(type_layout: Option<&TypeLayout>, category: ParameterCategory) -> usize {
    let Some(LayoutShape::Array {
        element,
        uniform_stride,
    }) = type_layout.map(|tl| &tl.shape)
    else {
        return 0;
    };

    match category {
        ParameterCategory::Uniform => {
            usize::try_from(*uniform_stride).unwrap_or(UNBOUNDED_SIZE)
        }
        ParameterCategory::DescriptorTableSlot => 0,
        other => size(Some(element.as_ref()), other),
    }
}

/// Element layout of an array, parameter group, structured buffer, or
/// existential-specialized layout
///
/// For a parameter group this is the element layout with the container's
/// own resources already offset away.
pub fn element_type_layout(type_layout: Option<&TypeLayout>) -> Option<&TypeLayout> {
    match &type_layout?.shape {
        LayoutShape::Array { element, .. } => Some(element),
        LayoutShape::ParameterGroup { offset_element, .. } => Some(offset_element),
        LayoutShape::StructuredBuffer { element } => Some(element),
        LayoutShape::ExistentialSpecialized { base, .. } => Some(base),
        _ => None,
    }
    .map(|layout| layout.as_ref())
}

/// Element variable layout of a parameter group
pub fn element_var_layout(type_layout: Option<&TypeLayout>) -> Option<&VarLayout> {
    match &type_layout?.shape {
        LayoutShape::ParameterGroup { element_var, .. } => Some(element_var.as_ref()),
        _ => None,
    }
}

/// Container variable layout of a parameter group
pub fn container_var_layout(type_layout: Option<&TypeLayout>) -> Option<&VarLayout> {
    match &type_layout?.shape {
        LayoutShape::ParameterGroup { container, .. } => Some(container.as_ref()),
        _ => None,
    }
}

/// Storage mode of a matrix layout
pub fn matrix_layout_mode(type_layout: Option<&TypeLayout>) -> Option<MatrixLayoutMode> {
    match type_layout?.shape {
        LayoutShape::Matrix { mode, .. } => Some(mode),
        _ => None,
    }
}

/// Specialization parameter index of a generic-parameter layout
pub fn generic_param_index(type_layout: Option<&TypeLayout>) -> Option<u32> {
    match type_layout?.shape {
        LayoutShape::GenericParam { param_index } => Some(param_index),
        _ => None,
    }
}

/// Layout of the data whose placement was deferred until specialization
pub fn pending_data_type_layout(type_layout: Option<&TypeLayout>) -> Option<&TypeLayout> {
    type_layout?.pending_data_type_layout.as_deref()
}

/// Placement of the pending data of an existential-specialized layout
pub fn specialized_type_pending_data_var_layout(
    type_layout: Option<&TypeLayout>,
) -> Option<&VarLayout> {
    match &type_layout?.shape {
        LayoutShape::ExistentialSpecialized {
            pending_data_var, ..
        } => pending_data_var.as_deref(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_types::{BaseType, LayoutResourceKind, VarDecl};
    use std::sync::Arc;

    fn texture_array(length: Option<u64>) -> TypeLayout {
        let element_ty = Arc::new(Type::SamplerState { comparison: false });
        let element = Arc::new(
            TypeLayout::new(element_ty.clone())
                .with_resource(LayoutResourceKind::SamplerState, 1)
                .with_resource(LayoutResourceKind::DescriptorTableSlot, 1),
        );
        let count = match length {
            Some(n) => LayoutSize::Finite(n),
            None => LayoutSize::Infinite,
        };
        TypeLayout::new(Type::array(element_ty, length))
            .with_resource_size(LayoutResourceKind::SamplerState, count)
            .with_resource(LayoutResourceKind::DescriptorTableSlot, 1)
            .with_shape(LayoutShape::Array {
                element,
                uniform_stride: 0,
            })
    }

    #[test]
    fn test_size_and_unbounded() {
        let bounded = texture_array(Some(8));
        assert_eq!(size(Some(&bounded), ParameterCategory::SamplerState), 8);
        assert_eq!(size(Some(&bounded), ParameterCategory::Uniform), 0);
        assert_eq!(size(Some(&bounded), ParameterCategory::Mixed), 0);

        let unbounded = texture_array(None);
        assert_eq!(
            size(Some(&unbounded), ParameterCategory::SamplerState),
            UNBOUNDED_SIZE
        );
        assert_eq!(size(None, ParameterCategory::SamplerState), 0);
    }

    #[test]
    fn test_alignment() {
        let layout = TypeLayout::new(Type::vector(BaseType::Float, 4)).with_uniform(16, 16);
        assert_eq!(alignment(Some(&layout), ParameterCategory::Uniform), 16);
        assert_eq!(alignment(Some(&layout), ParameterCategory::ShaderResource), 1);
        assert_eq!(alignment(None, ParameterCategory::Uniform), 0);
    }

    #[test]
    fn test_element_stride_policy() {
        for length in [Some(1), Some(4), Some(64), None] {
            let layout = texture_array(length);
            assert_eq!(
                element_stride(Some(&layout), ParameterCategory::DescriptorTableSlot),
                0
            );
            assert_eq!(
                element_stride(Some(&layout), ParameterCategory::SamplerState),
                1
            );
            assert_eq!(
                element_stride(Some(&layout), ParameterCategory::ShaderResource),
                0
            );
        }

        let float = Type::scalar(BaseType::Float);
        let element = Arc::new(TypeLayout::new(float.clone()).with_uniform(4, 4));
        let uniform_array = TypeLayout::new(Type::array(float, Some(4)))
            .with_uniform(52, 16)
            .with_shape(LayoutShape::Array {
                element,
                uniform_stride: 16,
            });
        assert_eq!(
            element_stride(Some(&uniform_array), ParameterCategory::Uniform),
            16
        );
        assert_eq!(element_stride(None, ParameterCategory::Uniform), 0);
    }

    #[test]
    fn test_stride_of_non_array_is_zero() {
        let layout = TypeLayout::new(Type::scalar(BaseType::Float)).with_uniform(4, 4);
        assert_eq!(element_stride(Some(&layout), ParameterCategory::Uniform), 0);
    }

    #[test]
    fn test_struct_fields_and_lookup() {
        let float = Type::scalar(BaseType::Float);
        let field_tl = Arc::new(TypeLayout::new(float.clone()).with_uniform(4, 4));
        let field = |name: &str, offset: u64| {
            Arc::new(
                VarLayout::new(
                    Some(Arc::new(VarDecl::new(name, float.clone()))),
                    field_tl.clone(),
                )
                .with_binding(LayoutResourceKind::Uniform, offset, 0),
            )
        };
        let layout = TypeLayout::new(float.clone())
            .with_uniform(8, 4)
            .with_shape(LayoutShape::Struct {
                fields: vec![field("x", 0), field("y", 4)],
            });

        assert_eq!(field_count(Some(&layout)), 2);
        assert!(field_by_index(Some(&layout), 1).is_some());
        assert!(field_by_index(Some(&layout), 2).is_none());
        assert_eq!(find_field_index_by_name(Some(&layout), "y"), Some(1));
        assert_eq!(find_field_index_by_name(Some(&layout), "z"), None);
        assert_eq!(field_count(Some(&*field_tl)), 0);
        assert!(field_by_index(None, 0).is_none());
    }

    #[test]
    fn test_wrong_shape_sentinels() {
        let layout = TypeLayout::new(Type::scalar(BaseType::Float));
        assert!(element_type_layout(Some(&layout)).is_none());
        assert!(element_var_layout(Some(&layout)).is_none());
        assert!(container_var_layout(Some(&layout)).is_none());
        assert!(matrix_layout_mode(Some(&layout)).is_none());
        assert!(generic_param_index(Some(&layout)).is_none());
        assert!(pending_data_type_layout(Some(&layout)).is_none());
        assert!(specialized_type_pending_data_var_layout(Some(&layout)).is_none());
        assert_eq!(layout_kind(None), TypeKind::None);
        assert_eq!(layout_kind(Some(&layout)), TypeKind::Scalar);
    }

    #[test]
    fn test_matrix_and_generic_shapes() {
        let matrix = TypeLayout::new(Type::matrix(BaseType::Float, 4, 4))
            .with_uniform(64, 16)
            .with_shape(LayoutShape::Matrix {
                rows: 4,
                columns: 4,
                mode: MatrixLayoutMode::ColumnMajor,
            });
        assert_eq!(
            matrix_layout_mode(Some(&matrix)),
            Some(MatrixLayoutMode::ColumnMajor)
        );

        let generic = TypeLayout::new(Type::scalar(BaseType::Void))
            .with_shape(LayoutShape::GenericParam { param_index: 2 });
        assert_eq!(generic_param_index(Some(&generic)), Some(2));
    }

    #[test]
    fn test_existential_specialized_traversal() {
        let base = Arc::new(TypeLayout::new(Type::scalar(BaseType::Float)).with_uniform(4, 4));
        let pending_tl = Arc::new(TypeLayout::new(Type::scalar(BaseType::UInt)).with_uniform(4, 4));
        let pending_var = Arc::new(
            VarLayout::new(None, pending_tl.clone()).with_binding(LayoutResourceKind::Uniform, 16, 0),
        );
        let layout = TypeLayout::new(Type::scalar(BaseType::Float))
            .with_pending_data(pending_tl)
            .with_shape(LayoutShape::ExistentialSpecialized {
                base,
                pending_data_var: Some(pending_var),
            });

        assert_eq!(layout_kind(element_type_layout(Some(&layout))), TypeKind::Scalar);
        assert!(pending_data_type_layout(Some(&layout)).is_some());
        let pending = specialized_type_pending_data_var_layout(Some(&layout));
        assert_eq!(
            pending.and_then(|v| v.find_resource_info(LayoutResourceKind::Uniform)).map(|i| i.index),
            Some(16)
        );
    }
}
