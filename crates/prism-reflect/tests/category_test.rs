//! Category bookkeeping across layouts: cardinality, descriptor-table
//! remapping, and array strides

use std::sync::Arc;

use prism_reflect::var_layout::{binding_index, offset};
use prism_reflect::{
    category, category_by_index, category_count, element_stride, remap_category, size,
    ParameterCategory as C,
};
use prism_types::{
    BaseType, BufferKind, BufferType, LayoutResourceKind as K, LayoutShape, Type,
    TypeLayout, VarDecl, VarLayout,
};

fn sampler() -> Arc<Type> {
    Arc::new(Type::SamplerState { comparison: false })
}

fn rw_buffer() -> Arc<Type> {
    Arc::new(Type::Buffer(BufferType {
        kind: BufferKind::RWStructured,
        element: Some(Type::scalar(BaseType::UInt)),
    }))
}

fn sample_layouts() -> Vec<TypeLayout> {
    vec![
        TypeLayout::new(Type::scalar(BaseType::Float)),
        TypeLayout::new(Type::scalar(BaseType::Float)).with_uniform(4, 4),
        TypeLayout::new(sampler()).with_resource(K::SamplerState, 1),
        TypeLayout::new(sampler()).with_resource(K::DescriptorTableSlot, 1),
        TypeLayout::new(rw_buffer()).with_resource(K::UnorderedAccess, 1),
        TypeLayout::new(rw_buffer())
            .with_resource(K::UnorderedAccess, 1)
            .with_resource(K::Uniform, 16),
    ]
}

#[test]
fn test_category_agrees_with_entry_count() {
    for layout in sample_layouts() {
        let count = category_count(Some(&layout));
        match count {
            0 => assert_eq!(category(Some(&layout)), C::None),
            1 => assert_eq!(category(Some(&layout)), category_by_index(Some(&layout), 0)),
            _ => assert_eq!(category(Some(&layout)), C::Mixed),
        }
        assert_eq!(category_by_index(Some(&layout), count), C::None);
    }
}

#[test]
fn test_remap_is_idempotent() {
    for layout in sample_layouts() {
        for requested in C::ALL {
            let once = remap_category(Some(&layout), requested);
            assert_eq!(remap_category(Some(&layout), once), once, "{requested:?}");
        }
    }
}

#[test]
fn test_remap_only_aliases_natural_category() {
    let layout = TypeLayout::new(sampler()).with_resource(K::DescriptorTableSlot, 1);
    assert_eq!(remap_category(Some(&layout), C::SamplerState), C::DescriptorTableSlot);
    assert_eq!(remap_category(Some(&layout), C::ShaderResource), C::ShaderResource);
    assert_eq!(remap_category(Some(&layout), C::Uniform), C::Uniform);

    let direct = TypeLayout::new(sampler())
        .with_resource(K::SamplerState, 1)
        .with_resource(K::DescriptorTableSlot, 1);
    assert_eq!(remap_category(Some(&direct), C::SamplerState), C::SamplerState);
}

#[test]
fn test_offset_falls_back_through_remap() {
    let ty = sampler();
    let var = VarLayout::new(
        Some(Arc::new(VarDecl::new("shadowSampler", ty.clone()))),
        Arc::new(TypeLayout::new(ty).with_resource(K::DescriptorTableSlot, 1)),
    )
    .with_binding(K::DescriptorTableSlot, 7, 2);

    assert_eq!(offset(Some(&var), C::SamplerState), 7);
    assert_eq!(offset(Some(&var), C::UnorderedAccess), 0);
    assert_eq!(binding_index(Some(&var)), 7);
}

#[test]
fn test_array_stride_per_category() {
    let element = Arc::new(
        TypeLayout::new(rw_buffer())
            .with_resource(K::UnorderedAccess, 1)
            .with_uniform(12, 4),
    );
    let array = TypeLayout::new(Type::array(rw_buffer(), Some(4)))
        .with_resource(K::UnorderedAccess, 4)
        .with_uniform(64, 4)
        .with_shape(LayoutShape::Array {
            element,
            uniform_stride: 16,
        });

    assert_eq!(element_stride(Some(&array), C::Uniform), 16);
    assert_eq!(element_stride(Some(&array), C::UnorderedAccess), 1);
    assert_eq!(element_stride(Some(&array), C::DescriptorTableSlot), 0);
    assert_eq!(element_stride(Some(&array), C::SamplerState), 0);
    assert_eq!(size(Some(&array), C::UnorderedAccess), 4);

    let scalar = TypeLayout::new(Type::scalar(BaseType::Float)).with_uniform(4, 4);
    assert_eq!(element_stride(Some(&scalar), C::Uniform), 0);
}
