//! Integration tests for assembling layout graphs

use prism_types::{
    BaseType, HashedStringPool, LayoutError, LayoutResourceKind as K, LayoutSize, ResourceInfoSet,
    Type, TypeLayout, VarResourceInfo,
};

#[test]
fn test_consumption_accumulates_per_kind() {
    let layout = TypeLayout::new(Type::scalar(BaseType::Float))
        .with_resource(K::ShaderResource, 2)
        .with_resource(K::SamplerState, 1)
        .with_resource(K::ShaderResource, 3);

    assert_eq!(layout.resource_infos.len(), 2);
    assert_eq!(
        layout.find_resource_info(K::ShaderResource).map(|info| info.count),
        Some(LayoutSize::Finite(5))
    );
    assert_eq!(layout.resource_infos.get(1).map(|info| info.kind), Some(K::SamplerState));
}

#[test]
fn test_unbounded_consumption_absorbs() {
    let layout = TypeLayout::new(Type::array(Type::scalar(BaseType::Float), None))
        .with_resource(K::DescriptorTableSlot, 4)
        .with_resource_size(K::DescriptorTableSlot, LayoutSize::Infinite)
        .with_resource(K::DescriptorTableSlot, 1);

    assert_eq!(
        layout.find_resource_info(K::DescriptorTableSlot).map(|info| info.count),
        Some(LayoutSize::Infinite)
    );
    assert_eq!(LayoutSize::Finite(u64::MAX) + LayoutSize::Finite(1), LayoutSize::Infinite);
}

#[test]
fn test_duplicate_placement_is_rejected() {
    let mut set = ResourceInfoSet::new();
    let slot = VarResourceInfo {
        kind: K::ConstantBuffer,
        index: 1,
        space: 0,
    };
    assert!(set.try_insert(slot).is_ok());

    let err = set.try_insert(VarResourceInfo { index: 2, ..slot }).unwrap_err();
    assert_eq!(
        err,
        LayoutError::DuplicateResourceKind {
            kind: K::ConstantBuffer
        }
    );
    assert_eq!(set.len(), 1);
    assert_eq!(set.find(K::ConstantBuffer).map(|info| info.index), Some(1));
}

#[test]
fn test_hashed_strings_are_deduplicated() {
    let mut pool = HashedStringPool::new();
    assert_eq!(pool.add("Albedo"), 0);
    assert_eq!(pool.add("Normal"), 1);
    assert_eq!(pool.add("Albedo"), 0);
    assert_eq!(pool.len(), 2);
    assert_eq!(pool.get(1), Some("Normal"));
    assert_eq!(pool.get(2), None);
}

#[test]
fn test_unwrap_arrays_reaches_element() {
    let texture_array = Type::array(
        Type::array(Type::vector(BaseType::Float, 4), Some(3)),
        Some(2),
    );
    assert!(texture_array.is_array());
    assert_eq!(*texture_array.unwrap_arrays(), *Type::vector(BaseType::Float, 4));
    assert_eq!(texture_array.to_string(), "vector<float, 4>[3][2]");
}
