//! Resource shape and access extraction
//!
//! Both queries look through array dimensions first, so `Texture2D t[4]`
//! reports the shape of `Texture2D`. The opaque buffer catalogue is closed:
//! adding a [`BufferKind`] fails to compile until every match here handles
//! it.

use prism_types::{Access, BufferKind, ParameterGroupKind, TextureBaseShape, Type};

/// Base shape of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum ResourceBaseShape {
    /// Not a resource
    #[default]
    None = 0,
    /// 1D texture
    Texture1D = 1,
    /// 2D texture
    Texture2D = 2,
    /// 3D texture
    Texture3D = 3,
    /// Cube map
    TextureCube = 4,
    /// Typed buffer
    TextureBuffer = 5,
    /// Structured buffer
    StructuredBuffer = 6,
    /// Byte-address buffer
    ByteAddressBuffer = 7,
    /// Unknown resource shape
    Unknown = 8,
    /// Ray-tracing acceleration structure
    AccelerationStructure = 9,
}

/// Resource shape: base shape plus array and multisample flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ResourceShape {
    /// Base shape
    pub base: ResourceBaseShape,
    /// Array resource
    pub is_array: bool,
    /// Multisample resource
    pub is_multisample: bool,
}

impl ResourceShape {
    /// Mask selecting the base shape in the raw encoding
    pub const BASE_SHAPE_MASK: u32 = 0x0F;
    /// Array flag in the raw encoding
    pub const ARRAY_FLAG: u32 = 0x40;
    /// Multisample flag in the raw encoding
    pub const MULTISAMPLE_FLAG: u32 = 0x80;

    /// The "not a resource" shape
    pub const NONE: ResourceShape = ResourceShape {
        base: ResourceBaseShape::None,
        is_array: false,
        is_multisample: false,
    };

    fn plain(base: ResourceBaseShape) -> Self {
        ResourceShape {
            base,
            is_array: false,
            is_multisample: false,
        }
    }

    /// Raw value for the C ABI
    pub fn as_raw(self) -> u32 {
        let mut raw = self.base as u32;
        if self.is_array {
            raw |= Self::ARRAY_FLAG;
        }
        if self.is_multisample {
            raw |= Self::MULTISAMPLE_FLAG;
        }
        raw
    }
}

/// How a shader may access a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum ResourceAccess {
    /// Not a resource
    #[default]
    None = 0,
    /// Read-only
    Read = 1,
    /// Read-write
    ReadWrite = 2,
    /// Rasterizer-ordered read-write
    RasterOrdered = 3,
    /// Append-only
    Append = 4,
    /// Consume-only
    Consume = 5,
    /// Write-only
    Write = 6,
}

impl ResourceAccess {
    /// Raw value for the C ABI
    pub fn as_raw(self) -> u32 {
        self as u32
    }
}

impl From<Access> for ResourceAccess {
    fn from(access: Access) -> Self {
        match access {
            Access::Read => ResourceAccess::Read,
            Access::ReadWrite => ResourceAccess::ReadWrite,
            Access::RasterOrdered => ResourceAccess::RasterOrdered,
            Access::Append => ResourceAccess::Append,
            Access::Consume => ResourceAccess::Consume,
            Access::Write => ResourceAccess::Write,
        }
    }
}

fn buffer_shape_and_access(kind: BufferKind) -> (ResourceBaseShape, ResourceAccess) {
    use ResourceAccess::*;
    use ResourceBaseShape::*;

    match kind {
        BufferKind::Structured => (StructuredBuffer, Read),
        BufferKind::RWStructured => (StructuredBuffer, ReadWrite),
        BufferKind::RasterizerOrderedStructured => (StructuredBuffer, RasterOrdered),
        BufferKind::AppendStructured => (StructuredBuffer, Append),
        BufferKind::ConsumeStructured => (StructuredBuffer, Consume),
        BufferKind::ByteAddress => (ByteAddressBuffer, Read),
        BufferKind::RWByteAddress => (ByteAddressBuffer, ReadWrite),
        BufferKind::RasterizerOrderedByteAddress => (ByteAddressBuffer, RasterOrdered),
        BufferKind::Untyped => (ByteAddressBuffer, Read),
    }
}

/// Shape of a resource type, looking through arrays
pub fn resource_shape(ty: Option<&Type>) -> ResourceShape {
    let Some(ty) = ty else {
        return ResourceShape::NONE;
    };

    match ty.unwrap_arrays() {
        Type::Texture(texture) => {
            let base = match texture.shape.base {
                TextureBaseShape::Texture1D => ResourceBaseShape::Texture1D,
                TextureBaseShape::Texture2D => ResourceBaseShape::Texture2D,
                TextureBaseShape::Texture3D => ResourceBaseShape::Texture3D,
                TextureBaseShape::TextureCube => ResourceBaseShape::TextureCube,
                TextureBaseShape::TextureBuffer => ResourceBaseShape::TextureBuffer,
            };
            ResourceShape {
                base,
                is_array: texture.shape.is_array,
                is_multisample: texture.shape.is_multisample,
            }
        }
        Type::Buffer(buffer) => ResourceShape::plain(buffer_shape_and_access(buffer.kind).0),
        Type::AccelerationStructure => ResourceShape::plain(ResourceBaseShape::AccelerationStructure),
        _ => ResourceShape::NONE,
    }
}

/// Access mode of a resource type, looking through arrays
pub fn resource_access(ty: Option<&Type>) -> ResourceAccess {
    let Some(ty) = ty else {
        return ResourceAccess::None;
    };

    match ty.unwrap_arrays() {
        Type::Texture(texture) => texture.access.into(),
        Type::Buffer(buffer) => buffer_shape_and_access(buffer.kind).1,
        Type::AccelerationStructure => ResourceAccess::Read,
        // Storage buffer blocks are writable but have no resource shape
        Type::ParameterGroup(group) if group.kind == ParameterGroupKind::ShaderStorageBuffer => {
            ResourceAccess::ReadWrite
        }
        _ => ResourceAccess::None,
    }
}

/// Element type produced by reading a texture or structured buffer
pub fn resource_result_type(ty: Option<&Type>) -> Option<&Type> {
    match ty?.unwrap_arrays() {
        Type::Texture(texture) => Some(texture.element.as_ref()),
        Type::Buffer(buffer) if buffer.kind.is_structured() => buffer.element.as_deref(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_types::{BaseType, BufferType, ParameterGroupType, TextureShape, TextureType};
    use std::sync::Arc;

    fn buffer(kind: BufferKind) -> Type {
        let element = if kind.is_structured() {
            Some(Type::scalar(BaseType::UInt))
        } else {
            None
        };
        Type::Buffer(BufferType { kind, element })
    }

    fn texture(shape: TextureShape, access: Access) -> Arc<Type> {
        Arc::new(Type::Texture(TextureType {
            shape,
            access,
            element: Type::vector(BaseType::Float, 4),
            combined_sampler: false,
        }))
    }

    #[test]
    fn test_buffer_catalogue() {
        let cases = [
            (BufferKind::Structured, ResourceBaseShape::StructuredBuffer, ResourceAccess::Read),
            (BufferKind::RWStructured, ResourceBaseShape::StructuredBuffer, ResourceAccess::ReadWrite),
            (
                BufferKind::RasterizerOrderedStructured,
                ResourceBaseShape::StructuredBuffer,
                ResourceAccess::RasterOrdered,
            ),
            (BufferKind::AppendStructured, ResourceBaseShape::StructuredBuffer, ResourceAccess::Append),
            (BufferKind::ConsumeStructured, ResourceBaseShape::StructuredBuffer, ResourceAccess::Consume),
            (BufferKind::ByteAddress, ResourceBaseShape::ByteAddressBuffer, ResourceAccess::Read),
            (BufferKind::RWByteAddress, ResourceBaseShape::ByteAddressBuffer, ResourceAccess::ReadWrite),
            (
                BufferKind::RasterizerOrderedByteAddress,
                ResourceBaseShape::ByteAddressBuffer,
                ResourceAccess::RasterOrdered,
            ),
            (BufferKind::Untyped, ResourceBaseShape::ByteAddressBuffer, ResourceAccess::Read),
        ];

        for (kind, shape, access) in cases {
            let ty = buffer(kind);
            assert_eq!(resource_shape(Some(&ty)).base, shape, "{kind}");
            assert_eq!(resource_access(Some(&ty)), access, "{kind}");
        }
    }

    #[test]
    fn test_texture_shape_flags() {
        let ty = texture(
            TextureShape::new(TextureBaseShape::Texture2D).array().multisample(),
            Access::ReadWrite,
        );
        let shape = resource_shape(Some(&*ty));
        assert_eq!(shape.base, ResourceBaseShape::Texture2D);
        assert!(shape.is_array);
        assert!(shape.is_multisample);
        assert_eq!(shape.as_raw(), 2 | 0x40 | 0x80);
        assert_eq!(resource_access(Some(&*ty)), ResourceAccess::ReadWrite);
    }

    #[test]
    fn test_arrays_are_unwrapped() {
        let tex = texture(TextureShape::new(TextureBaseShape::TextureCube), Access::Read);
        let arr = Type::array(Type::array(tex, Some(2)), None);
        assert_eq!(resource_shape(Some(&*arr)).base, ResourceBaseShape::TextureCube);
        assert_eq!(resource_access(Some(&*arr)), ResourceAccess::Read);
        assert_eq!(
            resource_result_type(Some(&*arr)),
            Some(&*Type::vector(BaseType::Float, 4))
        );
    }

    #[test]
    fn test_acceleration_structure() {
        let ty = Type::AccelerationStructure;
        assert_eq!(
            resource_shape(Some(&ty)).as_raw(),
            ResourceBaseShape::AccelerationStructure as u32
        );
        assert_eq!(resource_access(Some(&ty)), ResourceAccess::Read);
        assert_eq!(resource_result_type(Some(&ty)), None);
    }

    #[test]
    fn test_storage_buffer_has_access_but_no_shape() {
        let ty = Type::ParameterGroup(ParameterGroupType {
            kind: ParameterGroupKind::ShaderStorageBuffer,
            element: Type::scalar(BaseType::Float),
        });
        assert_eq!(resource_shape(Some(&ty)), ResourceShape::NONE);
        assert_eq!(resource_access(Some(&ty)), ResourceAccess::ReadWrite);
    }

    #[test]
    fn test_non_resources_are_none() {
        let ty = Type::Scalar(BaseType::Float);
        assert_eq!(resource_shape(Some(&ty)), ResourceShape::NONE);
        assert_eq!(resource_access(Some(&ty)), ResourceAccess::None);
        assert_eq!(resource_shape(None).as_raw(), 0);
        assert_eq!(resource_access(None).as_raw(), 0);
        assert_eq!(resource_result_type(None), None);
    }

    #[test]
    fn test_result_type_only_for_structured_kinds() {
        let structured = buffer(BufferKind::AppendStructured);
        assert_eq!(
            resource_result_type(Some(&structured)),
            Some(&Type::Scalar(BaseType::UInt))
        );
        let raw = buffer(BufferKind::RWByteAddress);
        assert_eq!(resource_result_type(Some(&raw)), None);
    }
}
