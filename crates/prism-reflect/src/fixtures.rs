//! Sample compiled programs for tests
//!
//! Each function builds the layout a front-end and layout engine would
//! produce for a small shader, written out by hand.

use std::sync::Arc;

use prism_types::{
    Access, BaseType, DeclRef, EntryPointFlags, EntryPointLayout, FuncDecl, GenericParamDecl,
    InterfaceDecl, LayoutResourceKind as K, LayoutShape, LayoutSize, MatrixLayoutMode,
    ParameterGroupKind, ParameterGroupType, ProgramLayout, SpecializationParamKind, Stage,
    StructDecl, TextureBaseShape, TextureShape, TextureType, Type, TypeLayout, VarDecl, VarLayout,
};

/// `Texture2D<float4>`
pub fn texture_2d() -> Arc<Type> {
    Arc::new(Type::Texture(TextureType {
        shape: TextureShape::new(TextureBaseShape::Texture2D),
        access: Access::Read,
        element: Type::vector(BaseType::Float, 4),
        combined_sampler: false,
    }))
}

fn struct_layout(ty: Arc<Type>, fields: Vec<Arc<VarLayout>>) -> TypeLayout {
    TypeLayout::new(ty).with_shape(LayoutShape::Struct { fields })
}

fn global_scope(fields: Vec<Arc<VarLayout>>, consumption: &[(K, u64)]) -> Arc<VarLayout> {
    let globals = Arc::new(Type::Struct(DeclRef::new(StructDecl::new("$Globals").implicit())));
    let mut layout = struct_layout(globals, fields);
    for &(kind, count) in consumption {
        layout = layout.with_resource(kind, count);
    }
    Arc::new(VarLayout::new(None, Arc::new(layout)))
}

/// One constant buffer holding a matrix and a texture, D3D register rules
///
/// ```hlsl
/// cbuffer PerFrame : register(b0) {
///     float4x4  viewProj;
///     Texture2D albedo;   // t0
/// }
/// ```
pub fn per_frame_program() -> ProgramLayout {
    let matrix_ty = Type::matrix(BaseType::Float, 4, 4);
    let texture_ty = texture_2d();

    let decl = DeclRef::new(
        StructDecl::new("PerFrame")
            .with_field(VarDecl::new("viewProj", matrix_ty.clone()))
            .with_field(VarDecl::new("albedo", texture_ty.clone())),
    );

    let matrix_tl = Arc::new(
        TypeLayout::new(matrix_ty)
            .with_uniform(64, 16)
            .with_shape(LayoutShape::Matrix {
                rows: 4,
                columns: 4,
                mode: MatrixLayoutMode::ColumnMajor,
            }),
    );
    let texture_tl = Arc::new(TypeLayout::new(texture_ty).with_resource(K::ShaderResource, 1));

    let view_proj = Arc::new(
        VarLayout::new(Some(decl.fields[0].clone()), matrix_tl).with_binding(K::Uniform, 0, 0),
    );
    let albedo = Arc::new(
        VarLayout::new(Some(decl.fields[1].clone()), texture_tl)
            .with_binding(K::ShaderResource, 0, 0),
    );

    let struct_ty = Arc::new(Type::Struct(decl));
    let element_tl = Arc::new(
        struct_layout(struct_ty.clone(), vec![view_proj, albedo])
            .with_uniform(64, 16)
            .with_resource(K::ShaderResource, 1),
    );

    let group_ty = Arc::new(Type::ParameterGroup(ParameterGroupType {
        kind: ParameterGroupKind::ConstantBuffer,
        element: struct_ty,
    }));
    let container = Arc::new(
        VarLayout::new(
            None,
            Arc::new(TypeLayout::new(group_ty.clone()).with_resource(K::ConstantBuffer, 1)),
        )
        .with_binding(K::ConstantBuffer, 0, 0),
    );
    let element_var = Arc::new(
        VarLayout::new(None, element_tl.clone())
            .with_binding(K::Uniform, 0, 0)
            .with_binding(K::ShaderResource, 0, 0),
    );
    let group_tl = Arc::new(
        TypeLayout::new(group_ty.clone())
            .with_resource(K::ConstantBuffer, 1)
            .with_resource(K::ShaderResource, 1)
            .with_shape(LayoutShape::ParameterGroup {
                container,
                element_var,
                offset_element: element_tl,
            }),
    );

    let per_frame = Arc::new(
        VarLayout::new(
            Some(Arc::new(VarDecl::new("PerFrame_0", group_ty).with_reflection_name("PerFrame"))),
            group_tl,
        )
        .with_binding(K::ConstantBuffer, 0, 0)
        .with_binding(K::ShaderResource, 0, 0),
    );

    ProgramLayout::new(global_scope(
        vec![per_frame],
        &[(K::ConstantBuffer, 1), (K::ShaderResource, 1)],
    ))
    .with_hashed_string("PerFrame")
}

/// Samplers and textures bound through descriptor-table slots, Vulkan rules
///
/// ```hlsl
/// [[vk::binding(3, 1)]] SamplerState linearSampler;
/// [[vk::binding(4, 1)]] Texture2D    textures[8];
/// [[vk::binding(5, 1)]] Texture2D    bindless[];
/// ```
pub fn descriptor_table_program() -> ProgramLayout {
    let sampler_ty = Arc::new(Type::SamplerState { comparison: false });
    let sampler_tl = Arc::new(TypeLayout::new(sampler_ty.clone()).with_resource(K::DescriptorTableSlot, 1));
    let sampler = Arc::new(
        VarLayout::new(Some(Arc::new(VarDecl::new("linearSampler", sampler_ty))), sampler_tl)
            .with_binding(K::DescriptorTableSlot, 3, 1),
    );

    let element_tl = Arc::new(TypeLayout::new(texture_2d()).with_resource(K::DescriptorTableSlot, 1));

    let array_ty = Type::array(texture_2d(), Some(8));
    let array_tl = Arc::new(
        TypeLayout::new(array_ty.clone())
            .with_resource(K::DescriptorTableSlot, 1)
            .with_shape(LayoutShape::Array {
                element: element_tl.clone(),
                uniform_stride: 0,
            }),
    );
    let textures = Arc::new(
        VarLayout::new(Some(Arc::new(VarDecl::new("textures", array_ty))), array_tl)
            .with_binding(K::DescriptorTableSlot, 4, 1),
    );

    let unsized_ty = Type::array(texture_2d(), None);
    let unsized_tl = Arc::new(
        TypeLayout::new(unsized_ty.clone())
            .with_resource_size(K::DescriptorTableSlot, LayoutSize::Infinite)
            .with_shape(LayoutShape::Array {
                element: element_tl,
                uniform_stride: 0,
            }),
    );
    let bindless = Arc::new(
        VarLayout::new(Some(Arc::new(VarDecl::new("bindless", unsized_ty))), unsized_tl)
            .with_binding(K::DescriptorTableSlot, 5, 1),
    );

    ProgramLayout::new(global_scope(
        vec![sampler, textures, bindless],
        &[(K::RegisterSpace, 1)],
    ))
}

/// A compute kernel whose uniform parameters were gathered into an
/// implicit constant buffer, plus a global generic parameter
///
/// ```hlsl
/// type_param TMaterial : IMaterial;
/// [numthreads(8, 8, 1)]
/// void computeMain(uniform uint count, uniform float scale) { ... }
/// ```
pub fn compute_program() -> ProgramLayout {
    let uint = Type::scalar(BaseType::UInt);
    let float = Type::scalar(BaseType::Float);

    let decl = DeclRef::new(
        StructDecl::new("EntryPointParams")
            .implicit()
            .with_field(VarDecl::new("count", uint.clone()))
            .with_field(VarDecl::new("scale", float.clone())),
    );
    let count = Arc::new(
        VarLayout::new(
            Some(decl.fields[0].clone()),
            Arc::new(TypeLayout::new(uint).with_uniform(4, 4)),
        )
        .with_binding(K::Uniform, 0, 0),
    );
    let scale = Arc::new(
        VarLayout::new(
            Some(decl.fields[1].clone()),
            Arc::new(TypeLayout::new(float).with_uniform(4, 4)),
        )
        .with_binding(K::Uniform, 4, 0),
    );

    let struct_ty = Arc::new(Type::Struct(decl));
    let element_tl = Arc::new(struct_layout(struct_ty.clone(), vec![count, scale]).with_uniform(8, 4));
    let group_ty = Arc::new(Type::ParameterGroup(ParameterGroupType {
        kind: ParameterGroupKind::ConstantBuffer,
        element: struct_ty,
    }));
    let container = Arc::new(
        VarLayout::new(
            None,
            Arc::new(TypeLayout::new(group_ty.clone()).with_resource(K::ConstantBuffer, 1)),
        )
        .with_binding(K::ConstantBuffer, 1, 0),
    );
    let element_var =
        Arc::new(VarLayout::new(None, element_tl.clone()).with_binding(K::Uniform, 0, 0));
    let params = Arc::new(
        VarLayout::new(
            None,
            Arc::new(
                TypeLayout::new(group_ty)
                    .with_resource(K::ConstantBuffer, 1)
                    .with_shape(LayoutShape::ParameterGroup {
                        container,
                        element_var,
                        offset_element: element_tl,
                    }),
            ),
        )
        .with_binding(K::ConstantBuffer, 1, 0),
    );

    let material = Arc::new(Type::Interface(DeclRef::new(InterfaceDecl::new("IMaterial"))));

    ProgramLayout::new(global_scope(Vec::new(), &[]))
        .with_entry_point(
            EntryPointLayout::new("computeMain", Stage::Compute, params)
                .with_func(FuncDecl::new("computeMain").with_num_threads(8, 8, 1)),
        )
        .with_specialization_param(SpecializationParamKind::Generic(DeclRef::new(
            GenericParamDecl::new("TMaterial").with_constraint(material.clone()),
        )))
        .with_specialization_param(SpecializationParamKind::Existential(material))
}

/// Globals without an explicit `cbuffer`, gathered into an implicit one
///
/// ```hlsl
/// float4 tint;      // b2, offset 0
/// float  exposure;  // b2, offset 16
/// ```
pub fn default_constant_buffer_program() -> ProgramLayout {
    let float4 = Type::vector(BaseType::Float, 4);
    let float = Type::scalar(BaseType::Float);

    let decl = DeclRef::new(
        StructDecl::new("$Globals")
            .implicit()
            .with_field(VarDecl::new("tint", float4.clone()))
            .with_field(VarDecl::new("exposure", float.clone())),
    );
    let tint = Arc::new(
        VarLayout::new(
            Some(decl.fields[0].clone()),
            Arc::new(TypeLayout::new(float4).with_uniform(16, 16)),
        )
        .with_binding(K::Uniform, 0, 0),
    );
    let exposure = Arc::new(
        VarLayout::new(
            Some(decl.fields[1].clone()),
            Arc::new(TypeLayout::new(float).with_uniform(4, 4)),
        )
        .with_binding(K::Uniform, 16, 0),
    );

    let struct_ty = Arc::new(Type::Struct(decl));
    let element_tl =
        Arc::new(struct_layout(struct_ty.clone(), vec![tint, exposure]).with_uniform(20, 16));
    let group_ty = Arc::new(Type::ParameterGroup(ParameterGroupType {
        kind: ParameterGroupKind::ConstantBuffer,
        element: struct_ty,
    }));
    let container = Arc::new(
        VarLayout::new(
            None,
            Arc::new(TypeLayout::new(group_ty.clone()).with_resource(K::ConstantBuffer, 1)),
        )
        .with_binding(K::ConstantBuffer, 2, 0),
    );
    let element_var =
        Arc::new(VarLayout::new(None, element_tl.clone()).with_binding(K::Uniform, 0, 0));
    let globals = Arc::new(
        VarLayout::new(
            None,
            Arc::new(
                TypeLayout::new(group_ty)
                    .with_resource(K::ConstantBuffer, 1)
                    .with_shape(LayoutShape::ParameterGroup {
                        container,
                        element_var,
                        offset_element: element_tl,
                    }),
            ),
        )
        .with_binding(K::ConstantBuffer, 2, 0),
    );

    let ps_params = global_scope(Vec::new(), &[]);
    let color_tl = Arc::new(
        TypeLayout::new(Type::vector(BaseType::Float, 4)).with_resource(K::VaryingOutput, 1),
    );
    let result = Arc::new(
        VarLayout::new(None, color_tl)
            .with_binding(K::VaryingOutput, 0, 0)
            .with_semantic("SV_TARGET", 0)
            .with_stage(Stage::Fragment),
    );

    ProgramLayout::new(globals).with_entry_point(
        EntryPointLayout::new("psMain", Stage::Fragment, ps_params)
            .with_func(FuncDecl::new("psMain"))
            .with_result(result)
            .with_flags(EntryPointFlags {
                uses_any_sample_rate_input: true,
            }),
    )
}
