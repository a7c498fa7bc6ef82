//! Core type definitions for the Prism type graph

use std::fmt;
use std::sync::Arc;

use crate::decl::{DeclRef, GenericParamDecl, InterfaceDecl, StructDecl};

/// Scalar base types understood by the front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    /// `void`
    Void,
    /// `bool`
    Bool,
    /// `int8_t`
    Int8,
    /// `int16_t`
    Int16,
    /// `int`
    Int,
    /// `int64_t`
    Int64,
    /// `uint8_t`
    UInt8,
    /// `uint16_t`
    UInt16,
    /// `uint`
    UInt,
    /// `uint64_t`
    UInt64,
    /// `half`
    Half,
    /// `float`
    Float,
    /// `double`
    Double,
    /// `intptr_t`
    IntPtr,
    /// `uintptr_t`
    UIntPtr,
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BaseType::Void => "void",
            BaseType::Bool => "bool",
            BaseType::Int8 => "int8_t",
            BaseType::Int16 => "int16_t",
            BaseType::Int => "int",
            BaseType::Int64 => "int64_t",
            BaseType::UInt8 => "uint8_t",
            BaseType::UInt16 => "uint16_t",
            BaseType::UInt => "uint",
            BaseType::UInt64 => "uint64_t",
            BaseType::Half => "half",
            BaseType::Float => "float",
            BaseType::Double => "double",
            BaseType::IntPtr => "intptr_t",
            BaseType::UIntPtr => "uintptr_t",
        };
        f.write_str(name)
    }
}

/// Base dimensionality of a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureBaseShape {
    /// 1D texture
    Texture1D,
    /// 2D texture
    Texture2D,
    /// 3D texture
    Texture3D,
    /// Cube map
    TextureCube,
    /// Typed buffer (`Buffer<T>`)
    TextureBuffer,
}

/// Full texture shape: base dimensionality plus array/multisample flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureShape {
    /// Base dimensionality
    pub base: TextureBaseShape,
    /// Whether this is an array texture
    pub is_array: bool,
    /// Whether this is a multisample texture
    pub is_multisample: bool,
}

impl TextureShape {
    /// A non-array, single-sample shape
    pub fn new(base: TextureBaseShape) -> Self {
        TextureShape {
            base,
            is_array: false,
            is_multisample: false,
        }
    }

    /// Mark the shape as an array
    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    /// Mark the shape as multisample
    pub fn multisample(mut self) -> Self {
        self.is_multisample = true;
        self
    }
}

/// How a shader may access a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Read-only
    Read,
    /// Read-write (UAV)
    ReadWrite,
    /// Rasterizer-ordered read-write
    RasterOrdered,
    /// Append-only
    Append,
    /// Consume-only
    Consume,
    /// Write-only
    Write,
}

/// A texture type such as `Texture2D<float4>` or `RWTexture3D<uint>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureType {
    /// Shape of the texture
    pub shape: TextureShape,
    /// Access mode
    pub access: Access,
    /// Element (result) type of a fetch
    pub element: Arc<Type>,
    /// Combined texture-sampler (GLSL `sampler2D` style)
    pub combined_sampler: bool,
}

/// The closed catalogue of opaque buffer kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    /// `StructuredBuffer<T>`
    Structured,
    /// `RWStructuredBuffer<T>`
    RWStructured,
    /// `RasterizerOrderedStructuredBuffer<T>`
    RasterizerOrderedStructured,
    /// `AppendStructuredBuffer<T>`
    AppendStructured,
    /// `ConsumeStructuredBuffer<T>`
    ConsumeStructured,
    /// `ByteAddressBuffer`
    ByteAddress,
    /// `RWByteAddressBuffer`
    RWByteAddress,
    /// `RasterizerOrderedByteAddressBuffer`
    RasterizerOrderedByteAddress,
    /// Untyped buffer resource
    Untyped,
}

impl BufferKind {
    /// Whether this buffer kind carries an element type
    pub fn is_structured(self) -> bool {
        matches!(
            self,
            BufferKind::Structured
                | BufferKind::RWStructured
                | BufferKind::RasterizerOrderedStructured
                | BufferKind::AppendStructured
                | BufferKind::ConsumeStructured
        )
    }
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BufferKind::Structured => "StructuredBuffer",
            BufferKind::RWStructured => "RWStructuredBuffer",
            BufferKind::RasterizerOrderedStructured => "RasterizerOrderedStructuredBuffer",
            BufferKind::AppendStructured => "AppendStructuredBuffer",
            BufferKind::ConsumeStructured => "ConsumeStructuredBuffer",
            BufferKind::ByteAddress => "ByteAddressBuffer",
            BufferKind::RWByteAddress => "RWByteAddressBuffer",
            BufferKind::RasterizerOrderedByteAddress => "RasterizerOrderedByteAddressBuffer",
            BufferKind::Untyped => "UntypedBuffer",
        };
        f.write_str(name)
    }
}

/// An opaque buffer such as `RWStructuredBuffer<Particle>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BufferType {
    /// Which buffer from the catalogue
    pub kind: BufferKind,
    /// Element type (structured kinds only)
    pub element: Option<Arc<Type>>,
}

/// Parameter group flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterGroupKind {
    /// `ConstantBuffer<T>` / `cbuffer`
    ConstantBuffer,
    /// `ParameterBlock<T>`
    ParameterBlock,
    /// `TextureBuffer<T>` / `tbuffer`
    TextureBuffer,
    /// GLSL shader-storage buffer block
    ShaderStorageBuffer,
}

/// A parameter group wrapping an element type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterGroupType {
    /// Group flavour
    pub kind: ParameterGroupKind,
    /// Wrapped element type
    pub element: Arc<Type>,
}

/// Sampler-feedback texture kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackKind {
    /// `SAMPLER_FEEDBACK_MIN_MIP`
    MinMip,
    /// `SAMPLER_FEEDBACK_MIP_REGION_USED`
    MipRegionUsed,
}

/// Geometry-shader output stream kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    /// `PointStream<T>`
    Point,
    /// `LineStream<T>`
    Line,
    /// `TriangleStream<T>`
    Triangle,
}

/// The core type representation of the Prism type graph
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Scalar: `float`, `uint`, ...
    Scalar(BaseType),

    /// Vector: `vector<T, N>`
    Vector {
        /// Element type (a scalar)
        element: Arc<Type>,
        /// Component count
        count: u32,
    },

    /// Matrix: `matrix<T, R, C>`
    Matrix {
        /// Element type (a scalar)
        element: Arc<Type>,
        /// Row count
        rows: u32,
        /// Column count
        columns: u32,
    },

    /// Array: `T[N]`, or `T[]` when `length` is `None`
    Array {
        /// Element type
        element: Arc<Type>,
        /// Declared length, `None` for unsized arrays
        length: Option<u64>,
    },

    /// User-declared struct (nominal)
    Struct(DeclRef<StructDecl>),

    /// Interface (nominal)
    Interface(DeclRef<InterfaceDecl>),

    /// Global generic type parameter (nominal)
    GenericParam(DeclRef<GenericParamDecl>),

    /// Parameter group: constant buffer, parameter block, ...
    ParameterGroup(ParameterGroupType),

    /// Texture resource
    Texture(TextureType),

    /// Sampler state
    SamplerState {
        /// Whether this is a comparison sampler
        comparison: bool,
    },

    /// Opaque buffer resource
    Buffer(BufferType),

    /// Ray-tracing acceleration structure
    AccelerationStructure,

    /// Sampler-feedback texture
    Feedback(FeedbackKind),

    /// Geometry-shader output stream
    OutputStream {
        /// Stream primitive kind
        kind: StreamKind,
        /// Streamed element type
        element: Arc<Type>,
    },

    /// A type with its existential slots filled in
    ExistentialSpecialized {
        /// Unspecialized type
        base: Arc<Type>,
        /// Concrete types plugged into each slot, in slot order
        args: Vec<Arc<Type>>,
    },

    /// A type the front-end could not make sense of
    Error,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Scalar(base) => write!(f, "{}", base),
            Type::Vector { element, count } => write!(f, "vector<{}, {}>", element, count),
            Type::Matrix {
                element,
                rows,
                columns,
            } => write!(f, "matrix<{}, {}, {}>", element, rows, columns),
            Type::Array { element, length } => match length {
                Some(n) => write!(f, "{}[{}]", element, n),
                None => write!(f, "{}[]", element),
            },
            Type::Struct(decl) => write!(f, "{}", decl.name),
            Type::Interface(decl) => write!(f, "{}", decl.name),
            Type::GenericParam(decl) => write!(f, "{}", decl.name),
            Type::ParameterGroup(group) => {
                let name = match group.kind {
                    ParameterGroupKind::ConstantBuffer => "ConstantBuffer",
                    ParameterGroupKind::ParameterBlock => "ParameterBlock",
                    ParameterGroupKind::TextureBuffer => "TextureBuffer",
                    ParameterGroupKind::ShaderStorageBuffer => "ShaderStorageBuffer",
                };
                write!(f, "{}<{}>", name, group.element)
            }
            Type::Texture(tex) => {
                let prefix = match tex.access {
                    Access::Read => "",
                    Access::ReadWrite => "RW",
                    Access::RasterOrdered => "RasterizerOrdered",
                    Access::Append => "Append",
                    Access::Consume => "Consume",
                    Access::Write => "W",
                };
                let base = match tex.shape.base {
                    TextureBaseShape::Texture1D => "Texture1D",
                    TextureBaseShape::Texture2D => "Texture2D",
                    TextureBaseShape::Texture3D => "Texture3D",
                    TextureBaseShape::TextureCube => "TextureCube",
                    TextureBaseShape::TextureBuffer => "Buffer",
                };
                write!(f, "{}{}", prefix, base)?;
                if tex.shape.is_multisample {
                    write!(f, "MS")?;
                }
                if tex.shape.is_array {
                    write!(f, "Array")?;
                }
                write!(f, "<{}>", tex.element)
            }
            Type::SamplerState { comparison } => {
                if *comparison {
                    write!(f, "SamplerComparisonState")
                } else {
                    write!(f, "SamplerState")
                }
            }
            Type::Buffer(buffer) => {
                write!(f, "{}", buffer.kind)?;
                if let Some(element) = &buffer.element {
                    write!(f, "<{}>", element)?;
                }
                Ok(())
            }
            Type::AccelerationStructure => write!(f, "RaytracingAccelerationStructure"),
            Type::Feedback(kind) => match kind {
                FeedbackKind::MinMip => write!(f, "SAMPLER_FEEDBACK_MIN_MIP"),
                FeedbackKind::MipRegionUsed => write!(f, "SAMPLER_FEEDBACK_MIP_REGION_USED"),
            },
            Type::OutputStream { kind, element } => {
                let name = match kind {
                    StreamKind::Point => "PointStream",
                    StreamKind::Line => "LineStream",
                    StreamKind::Triangle => "TriangleStream",
                };
                write!(f, "{}<{}>", name, element)
            }
            Type::ExistentialSpecialized { base, args } => {
                write!(f, "{}[", base)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, "]")
            }
            Type::Error => write!(f, "<error>"),
        }
    }
}

impl Type {
    /// Shorthand for an `Arc`-wrapped scalar
    pub fn scalar(base: BaseType) -> Arc<Type> {
        Arc::new(Type::Scalar(base))
    }

    /// Shorthand for an `Arc`-wrapped vector of `base`
    pub fn vector(base: BaseType, count: u32) -> Arc<Type> {
        Arc::new(Type::Vector {
            element: Type::scalar(base),
            count,
        })
    }

    /// Shorthand for an `Arc`-wrapped matrix of `base`
    pub fn matrix(base: BaseType, rows: u32, columns: u32) -> Arc<Type> {
        Arc::new(Type::Matrix {
            element: Type::scalar(base),
            rows,
            columns,
        })
    }

    /// Shorthand for an `Arc`-wrapped array
    pub fn array(element: Arc<Type>, length: Option<u64>) -> Arc<Type> {
        Arc::new(Type::Array { element, length })
    }

    /// Check if this type is an array
    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array { .. })
    }

    /// Check if this type is the error type
    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    /// Strip every enclosing array dimension
    pub fn unwrap_arrays(&self) -> &Type {
        let mut ty = self;
        while let Type::Array { element, .. } = ty {
            ty = element;
        }
        ty
    }

    /// Get the struct declaration if this is a struct
    pub fn as_struct(&self) -> Option<&StructDecl> {
        match self {
            Type::Struct(decl) => Some(decl),
            _ => None,
        }
    }

    /// Get the parameter group if this is one
    pub fn as_parameter_group(&self) -> Option<&ParameterGroupType> {
        match self {
            Type::ParameterGroup(group) => Some(group),
            _ => None,
        }
    }

    /// Get the texture if this is one
    pub fn as_texture(&self) -> Option<&TextureType> {
        match self {
            Type::Texture(tex) => Some(tex),
            _ => None,
        }
    }
}
