//! Type classification
//!
//! Maps the rich type graph onto the small fixed vocabulary reflection
//! clients switch on. Every function here is total: an absent or
//! unrecognised type classifies as `None`.

use prism_types::{BaseType, ParameterGroupKind, Type};

/// Coarse kind of a type as seen by reflection clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum TypeKind {
    /// Absent, error, or unrecognised
    #[default]
    None = 0,
    /// User struct
    Struct = 1,
    /// Array
    Array = 2,
    /// Matrix
    Matrix = 3,
    /// Vector
    Vector = 4,
    /// Scalar
    Scalar = 5,
    /// `ConstantBuffer<T>`
    ConstantBuffer = 6,
    /// Any texture or opaque buffer
    Resource = 7,
    /// Sampler state
    SamplerState = 8,
    /// `TextureBuffer<T>`
    TextureBuffer = 9,
    /// Shader-storage buffer block
    ShaderStorageBuffer = 10,
    /// `ParameterBlock<T>`
    ParameterBlock = 11,
    /// Global generic type parameter
    GenericTypeParameter = 12,
    /// Interface
    Interface = 13,
    /// Geometry-shader output stream
    OutputStream = 14,
    /// Existential-specialized type
    Specialized = 15,
    /// Sampler-feedback texture
    Feedback = 16,
}

impl TypeKind {
    /// Raw value for the C ABI
    pub fn as_raw(self) -> u32 {
        self as u32
    }
}

/// Scalar element types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum ScalarType {
    /// Not a scalar-based type
    #[default]
    None = 0,
    /// `void`
    Void = 1,
    /// `bool`
    Bool = 2,
    /// 32-bit signed integer
    Int32 = 3,
    /// 32-bit unsigned integer
    UInt32 = 4,
    /// 64-bit signed integer
    Int64 = 5,
    /// 64-bit unsigned integer
    UInt64 = 6,
    /// 16-bit float
    Float16 = 7,
    /// 32-bit float
    Float32 = 8,
    /// 64-bit float
    Float64 = 9,
    /// 8-bit signed integer
    Int8 = 10,
    /// 8-bit unsigned integer
    UInt8 = 11,
    /// 16-bit signed integer
    Int16 = 12,
    /// 16-bit unsigned integer
    UInt16 = 13,
}

impl ScalarType {
    /// Raw value for the C ABI
    pub fn as_raw(self) -> u32 {
        self as u32
    }
}

/// Classify a type
pub fn kind(ty: Option<&Type>) -> TypeKind {
    let Some(ty) = ty else {
        return TypeKind::None;
    };

    match ty {
        Type::Scalar(_) => TypeKind::Scalar,
        Type::Vector { .. } => TypeKind::Vector,
        Type::Matrix { .. } => TypeKind::Matrix,
        Type::ParameterGroup(group) => match group.kind {
            ParameterGroupKind::ParameterBlock => TypeKind::ParameterBlock,
            ParameterGroupKind::ConstantBuffer => TypeKind::ConstantBuffer,
            ParameterGroupKind::TextureBuffer => TypeKind::TextureBuffer,
            ParameterGroupKind::ShaderStorageBuffer => TypeKind::ShaderStorageBuffer,
        },
        Type::OutputStream { .. } => TypeKind::OutputStream,
        Type::SamplerState { .. } => TypeKind::SamplerState,
        Type::Texture(_) | Type::Buffer(_) | Type::AccelerationStructure => TypeKind::Resource,
        Type::Feedback(_) => TypeKind::Feedback,
        Type::Array { .. } => TypeKind::Array,
        Type::Struct(_) => TypeKind::Struct,
        Type::GenericParam(_) => TypeKind::GenericTypeParameter,
        Type::Interface(_) => TypeKind::Interface,
        Type::ExistentialSpecialized { .. } => TypeKind::Specialized,
        // A type the front-end did not understand in user code
        Type::Error => TypeKind::None,
    }
}

/// Scalar type of a scalar, or the element scalar of a vector or matrix
pub fn scalar_type(ty: Option<&Type>) -> ScalarType {
    let Some(mut ty) = ty else {
        return ScalarType::None;
    };

    match ty {
        Type::Matrix { element, .. } | Type::Vector { element, .. } => ty = element,
        _ => {}
    }

    match ty {
        Type::Scalar(base) => match base {
            BaseType::Void => ScalarType::Void,
            BaseType::Bool => ScalarType::Bool,
            BaseType::Int8 => ScalarType::Int8,
            BaseType::Int16 => ScalarType::Int16,
            BaseType::Int => ScalarType::Int32,
            BaseType::Int64 => ScalarType::Int64,
            BaseType::UInt8 => ScalarType::UInt8,
            BaseType::UInt16 => ScalarType::UInt16,
            BaseType::UInt => ScalarType::UInt32,
            BaseType::UInt64 => ScalarType::UInt64,
            BaseType::Half => ScalarType::Float16,
            BaseType::Float => ScalarType::Float32,
            BaseType::Double => ScalarType::Float64,
            BaseType::IntPtr | BaseType::UIntPtr => {
                unexpected!("scalar base type {} has no reflected scalar type", base);
                ScalarType::None
            }
        },
        _ => ScalarType::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_types::{
        Access, BufferKind, BufferType, DeclRef, InterfaceDecl, ParameterGroupType, StructDecl,
        TextureBaseShape, TextureShape, TextureType,
    };
    use std::sync::Arc;

    fn group(kind: ParameterGroupKind) -> Type {
        Type::ParameterGroup(ParameterGroupType {
            kind,
            element: Type::scalar(BaseType::Float),
        })
    }

    #[test]
    fn test_kind_of_none_is_none() {
        assert_eq!(kind(None), TypeKind::None);
        assert_eq!(kind(Some(&Type::Error)), TypeKind::None);
    }

    #[test]
    fn test_kind_numeric() {
        assert_eq!(kind(Some(&Type::Scalar(BaseType::Float))), TypeKind::Scalar);
        assert_eq!(kind(Some(&*Type::vector(BaseType::Float, 3))), TypeKind::Vector);
        assert_eq!(kind(Some(&*Type::matrix(BaseType::Float, 3, 3))), TypeKind::Matrix);
        let arr = Type::array(Type::scalar(BaseType::Int), Some(4));
        assert_eq!(kind(Some(&*arr)), TypeKind::Array);
    }

    #[test]
    fn test_kind_parameter_groups() {
        assert_eq!(
            kind(Some(&group(ParameterGroupKind::ConstantBuffer))),
            TypeKind::ConstantBuffer
        );
        assert_eq!(
            kind(Some(&group(ParameterGroupKind::ParameterBlock))),
            TypeKind::ParameterBlock
        );
        assert_eq!(
            kind(Some(&group(ParameterGroupKind::TextureBuffer))),
            TypeKind::TextureBuffer
        );
        assert_eq!(
            kind(Some(&group(ParameterGroupKind::ShaderStorageBuffer))),
            TypeKind::ShaderStorageBuffer
        );
    }

    #[test]
    fn test_all_opaque_resources_classify_as_resource() {
        let tex = Type::Texture(TextureType {
            shape: TextureShape::new(TextureBaseShape::TextureCube),
            access: Access::Read,
            element: Type::vector(BaseType::Float, 4),
            combined_sampler: false,
        });
        assert_eq!(kind(Some(&tex)), TypeKind::Resource);
        assert_eq!(kind(Some(&Type::AccelerationStructure)), TypeKind::Resource);

        for buffer_kind in [
            BufferKind::Structured,
            BufferKind::RWStructured,
            BufferKind::RasterizerOrderedStructured,
            BufferKind::AppendStructured,
            BufferKind::ConsumeStructured,
            BufferKind::ByteAddress,
            BufferKind::RWByteAddress,
            BufferKind::RasterizerOrderedByteAddress,
            BufferKind::Untyped,
        ] {
            let buffer = Type::Buffer(BufferType {
                kind: buffer_kind,
                element: None,
            });
            assert_eq!(kind(Some(&buffer)), TypeKind::Resource, "{buffer_kind}");
        }
    }

    #[test]
    fn test_kind_nominal() {
        let s = Type::Struct(DeclRef::new(StructDecl::new("Light")));
        let i = Type::Interface(DeclRef::new(InterfaceDecl::new("IMaterial")));
        assert_eq!(kind(Some(&s)), TypeKind::Struct);
        assert_eq!(kind(Some(&i)), TypeKind::Interface);
        let specialized = Type::ExistentialSpecialized {
            base: Arc::new(s),
            args: vec![],
        };
        assert_eq!(kind(Some(&specialized)), TypeKind::Specialized);
    }

    #[test]
    fn test_scalar_type_through_vector_and_matrix() {
        assert_eq!(
            scalar_type(Some(&*Type::matrix(BaseType::Float, 4, 4))),
            ScalarType::Float32
        );
        assert_eq!(
            scalar_type(Some(&*Type::vector(BaseType::Half, 2))),
            ScalarType::Float16
        );
        assert_eq!(scalar_type(Some(&Type::Scalar(BaseType::UInt))), ScalarType::UInt32);
        assert_eq!(scalar_type(Some(&Type::Scalar(BaseType::IntPtr))), ScalarType::None);
        assert_eq!(scalar_type(Some(&Type::AccelerationStructure)), ScalarType::None);
        assert_eq!(scalar_type(None), ScalarType::None);
    }
}
