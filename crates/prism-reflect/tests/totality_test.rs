//! Every query answers an absent handle with its sentinel

use prism_reflect::attribute;
use prism_reflect::entry_point;
use prism_reflect::layout_reflect;
use prism_reflect::type_param;
use prism_reflect::type_reflect;
use prism_reflect::var_layout;
use prism_reflect::variable;
use prism_reflect::{
    category, category_by_index, category_count, kind, remap_category, resource_access,
    resource_result_type, resource_shape, scalar_type, ParameterCategory, ResourceAccess,
    ResourceShape, ScalarType, TypeKind,
};
use prism_types::{Modifier, Stage};

#[test]
fn test_type_queries_on_absent_type() {
    assert_eq!(kind(None), TypeKind::None);
    assert_eq!(scalar_type(None), ScalarType::None);
    assert_eq!(resource_shape(None), ResourceShape::NONE);
    assert_eq!(resource_access(None), ResourceAccess::None);
    assert!(resource_result_type(None).is_none());

    assert_eq!(type_reflect::type_name(None), None);
    assert_eq!(type_reflect::field_count(None), 0);
    assert!(type_reflect::field_by_index(None, 0).is_none());
    assert_eq!(type_reflect::element_count(None), 0);
    assert!(type_reflect::element_type(None).is_none());
    assert_eq!(type_reflect::row_count(None), 0);
    assert_eq!(type_reflect::column_count(None), 0);

    assert_eq!(attribute::type_attribute_count(None), 0);
    assert!(attribute::type_attribute_by_index(None, 0).is_none());
    assert!(attribute::find_type_attribute_by_name(None, "Tag").is_none());
}

#[test]
fn test_layout_queries_on_absent_layout() {
    assert_eq!(category(None), ParameterCategory::None);
    assert_eq!(category_count(None), 0);
    assert_eq!(category_by_index(None, 0), ParameterCategory::None);
    assert_eq!(
        remap_category(None, ParameterCategory::ShaderResource),
        ParameterCategory::ShaderResource
    );

    for category in ParameterCategory::ALL {
        assert_eq!(layout_reflect::size(None, category), 0);
        assert_eq!(layout_reflect::alignment(None, category), 0);
        assert_eq!(layout_reflect::element_stride(None, category), 0);
        assert_eq!(var_layout::offset(None, category), 0);
        assert_eq!(var_layout::space(None, category), 0);
    }

    assert!(layout_reflect::layout_type(None).is_none());
    assert_eq!(layout_reflect::layout_kind(None), TypeKind::None);
    assert_eq!(layout_reflect::field_count(None), 0);
    assert!(layout_reflect::field_by_index(None, 0).is_none());
    assert!(layout_reflect::find_field_index_by_name(None, "x").is_none());
    assert!(layout_reflect::element_type_layout(None).is_none());
    assert!(layout_reflect::element_var_layout(None).is_none());
    assert!(layout_reflect::container_var_layout(None).is_none());
    assert!(layout_reflect::matrix_layout_mode(None).is_none());
    assert!(layout_reflect::generic_param_index(None).is_none());
    assert!(layout_reflect::pending_data_type_layout(None).is_none());
    assert!(layout_reflect::specialized_type_pending_data_var_layout(None).is_none());
}

#[test]
fn test_variable_queries_on_absent_variable() {
    assert!(var_layout::variable(None).is_none());
    assert!(var_layout::type_layout(None).is_none());
    assert_eq!(var_layout::var_category(None), ParameterCategory::None);
    assert_eq!(var_layout::binding_index(None), 0);
    assert_eq!(var_layout::binding_space(None), 0);
    assert_eq!(var_layout::semantic_name(None), None);
    assert_eq!(var_layout::semantic_index(None), 0);
    assert_eq!(var_layout::stage(None), Stage::None);
    assert!(var_layout::pending_data_layout(None).is_none());

    assert_eq!(variable::name(None), None);
    assert!(variable::var_type(None).is_none());
    assert!(variable::find_modifier(None, Modifier::Shared).is_none());

    assert_eq!(attribute::variable_attribute_count(None), 0);
    assert!(attribute::variable_attribute_by_index(None, 0).is_none());
    assert!(attribute::find_variable_attribute_by_name(None, "Tag").is_none());
    assert_eq!(attribute::attribute_name(None), None);
    assert_eq!(attribute::argument_count(None), 0);
    assert!(attribute::argument_type(None, 0).is_none());
}

#[test]
fn test_entry_point_and_parameter_queries_on_absent_handles() {
    assert_eq!(entry_point::name(None), None);
    assert_eq!(entry_point::stage(None), Stage::None);
    assert_eq!(entry_point::parameter_count(None), 0);
    assert!(entry_point::parameter_by_index(None, 0).is_none());
    assert!(entry_point::var_layout(None).is_none());
    assert!(entry_point::result_var_layout(None).is_none());
    assert!(!entry_point::has_default_constant_buffer(None));
    assert!(!entry_point::uses_any_sample_rate_input(None));

    let mut sizes = [7u64; 3];
    entry_point::compute_thread_group_size(None, &mut sizes);
    assert_eq!(sizes, [7, 7, 7]);

    assert_eq!(type_param::name(None), None);
    assert_eq!(type_param::index(None), 0);
    assert_eq!(type_param::constraint_count(None), 0);
    assert!(type_param::constraint_by_index(None, 0).is_none());
}
