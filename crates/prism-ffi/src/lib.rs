//! C ABI for Prism reflection
//!
//! This module exposes the reflection queries of `prism-reflect` as a flat,
//! handle-based C API. The API follows these principles:
//! - ABI-stable (uses only C-compatible types)
//! - Every handle argument may be NULL; the call then answers with its
//!   sentinel (NULL, 0, or an enum value of 0)
//! - No panic crosses the boundary
//! - Strings are returned as a pointer plus a byte length; they are not
//!   NUL-terminated
//! - Handles point into the reflection object and stay valid until it is
//!   released with `prism_reflection_release()`

use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::panic::{self, AssertUnwindSafe};
use std::ptr;

use prism_reflect::{
    attribute, entry_point, layout_reflect, type_param, type_reflect, var_layout, variable,
    Blob, ParameterCategory, ReflectError, Reflection,
};
use prism_types::{
    EntryPointLayout, MatrixLayoutMode, Modifier, SpecializationParam, Stage, Type, TypeLayout,
    UserAttribute, VarDecl, VarLayout,
};

// ============================================================================
// Opaque Types
// ============================================================================

/// Opaque handle to a reflection object
#[repr(C)]
pub struct PrismReflection {
    _private: [u8; 0],
}

/// Opaque handle to a type
#[repr(C)]
pub struct PrismType {
    _private: [u8; 0],
}

/// Opaque handle to a type layout
#[repr(C)]
pub struct PrismTypeLayout {
    _private: [u8; 0],
}

/// Opaque handle to a variable declaration
#[repr(C)]
pub struct PrismVariable {
    _private: [u8; 0],
}

/// Opaque handle to a variable layout
#[repr(C)]
pub struct PrismVariableLayout {
    _private: [u8; 0],
}

/// Opaque handle to an entry point
#[repr(C)]
pub struct PrismEntryPoint {
    _private: [u8; 0],
}

/// Opaque handle to a specialization parameter
#[repr(C)]
pub struct PrismTypeParameter {
    _private: [u8; 0],
}

/// Opaque handle to a user attribute
#[repr(C)]
pub struct PrismUserAttribute {
    _private: [u8; 0],
}

/// Opaque handle to an owned byte buffer
#[repr(C)]
pub struct PrismBlob {
    _private: [u8; 0],
}

/// Result code
pub type PrismResult = c_int;

/// Success
pub const PRISM_OK: PrismResult = 0;
/// Unspecified failure, including a contained panic
pub const PRISM_FAIL: PrismResult = -1;
/// A handle was NULL, an index was out of range, or a value had the wrong kind
pub const PRISM_ERROR_INVALID_PARAMETER: PrismResult = -2;

/// Version of this C API
pub const PRISM_REFLECTION_API_VERSION: u32 = 1;

/// `shared` modifier
pub const PRISM_MODIFIER_SHARED: u32 = 1;
/// `[[vk::push_constant]]` modifier
pub const PRISM_MODIFIER_PUSH_CONSTANT: u32 = 2;

/// Matrix storage not recorded
pub const PRISM_MATRIX_LAYOUT_UNKNOWN: u32 = 0;
/// Row-major matrix storage
pub const PRISM_MATRIX_LAYOUT_ROW_MAJOR: u32 = 1;
/// Column-major matrix storage
pub const PRISM_MATRIX_LAYOUT_COLUMN_MAJOR: u32 = 2;

// ============================================================================
// Handle Conversion
// ============================================================================

mod handle {
    use super::*;

    /// Pairs an opaque C handle with the Rust value behind it
    pub(crate) trait Handle {
        type Target;
    }

    impl Handle for PrismReflection {
        type Target = Reflection;
    }
    impl Handle for PrismType {
        type Target = Type;
    }
    impl Handle for PrismTypeLayout {
        type Target = TypeLayout;
    }
    impl Handle for PrismVariable {
        type Target = VarDecl;
    }
    impl Handle for PrismVariableLayout {
        type Target = VarLayout;
    }
    impl Handle for PrismEntryPoint {
        type Target = EntryPointLayout;
    }
    impl Handle for PrismTypeParameter {
        type Target = SpecializationParam;
    }
    impl Handle for PrismUserAttribute {
        type Target = UserAttribute;
    }
    impl Handle for PrismBlob {
        type Target = Blob;
    }

    /// Borrow the value behind a handle
    ///
    /// # Safety
    /// `ptr` must be NULL or a handle of this type that is still alive.
    pub(crate) unsafe fn from_ptr<'a, H: Handle>(ptr: *const H) -> Option<&'a H::Target> {
        ptr.cast::<H::Target>().as_ref()
    }

    /// Mutably borrow the value behind a handle
    ///
    /// # Safety
    /// As [`from_ptr`], and no other reference to the value may be live.
    pub(crate) unsafe fn from_mut_ptr<'a, H: Handle>(ptr: *mut H) -> Option<&'a mut H::Target> {
        ptr.cast::<H::Target>().as_mut()
    }

    /// Hand out a borrowed value as a handle
    pub(crate) fn to_ptr<H: Handle>(value: Option<&H::Target>) -> *mut H {
        value.map_or(ptr::null_mut(), |value| {
            (value as *const H::Target).cast::<H>().cast_mut()
        })
    }

    /// Move a value to the heap and hand out ownership as a handle
    pub(crate) fn boxed<H: Handle>(value: H::Target) -> *mut H {
        Box::into_raw(Box::new(value)).cast::<H>()
    }

    /// Take back ownership of a handle created by [`boxed`]
    ///
    /// # Safety
    /// `ptr` must be NULL or come from [`boxed`] and not be released yet.
    pub(crate) unsafe fn unboxed<H: Handle>(ptr: *mut H) -> Option<Box<H::Target>> {
        if ptr.is_null() {
            None
        } else {
            Some(Box::from_raw(ptr.cast::<H::Target>()))
        }
    }
}

use handle::{from_mut_ptr, from_ptr, to_ptr};

// ============================================================================
// Helper Functions
// ============================================================================

/// Run a query, turning a panic into `fallback`
fn guard<R>(fallback: R, query: impl FnOnce() -> R) -> R {
    match panic::catch_unwind(AssertUnwindSafe(query)) {
        Ok(value) => value,
        Err(payload) => {
            let error = ReflectError::from_panic("answering a C query", &*payload);
            tracing::error!(%error, "panic contained at the C boundary");
            fallback
        }
    }
}

/// Hand out a borrowed string as pointer plus length
unsafe fn write_str(value: Option<&str>, len_out: *mut usize) -> *const c_char {
    let (ptr, len) = match value {
        Some(s) => (s.as_ptr().cast::<c_char>(), s.len()),
        None => (ptr::null(), 0),
    };
    if !len_out.is_null() {
        *len_out = len;
    }
    ptr
}

/// Read a NUL-terminated UTF-8 argument
unsafe fn read_str<'a>(value: *const c_char) -> Option<&'a str> {
    if value.is_null() {
        return None;
    }
    CStr::from_ptr(value).to_str().ok()
}

fn stage_to_raw(stage: Stage) -> u32 {
    match stage {
        Stage::None => 0,
        Stage::Vertex => 1,
        Stage::Hull => 2,
        Stage::Domain => 3,
        Stage::Geometry => 4,
        Stage::Fragment => 5,
        Stage::Compute => 6,
        Stage::RayGeneration => 7,
        Stage::Intersection => 8,
        Stage::AnyHit => 9,
        Stage::ClosestHit => 10,
        Stage::Miss => 11,
        Stage::Callable => 12,
        Stage::Mesh => 13,
        Stage::Amplification => 14,
    }
}

fn matrix_mode_to_raw(mode: Option<MatrixLayoutMode>) -> u32 {
    match mode {
        None => PRISM_MATRIX_LAYOUT_UNKNOWN,
        Some(MatrixLayoutMode::RowMajor) => PRISM_MATRIX_LAYOUT_ROW_MAJOR,
        Some(MatrixLayoutMode::ColumnMajor) => PRISM_MATRIX_LAYOUT_COLUMN_MAJOR,
    }
}

fn modifier_from_raw(raw: u32) -> Option<Modifier> {
    match raw {
        PRISM_MODIFIER_SHARED => Some(Modifier::Shared),
        PRISM_MODIFIER_PUSH_CONSTANT => Some(Modifier::PushConstant),
        _ => None,
    }
}

// ============================================================================
// Reflection Lifecycle
// ============================================================================

/// Hand a reflection object to C
///
/// Called from the Rust side of a host once a program has been compiled.
/// The C side releases it with `prism_reflection_release()`.
pub fn reflection_into_raw(reflection: Reflection) -> *mut PrismReflection {
    handle::boxed(reflection)
}

/// Release a reflection object and every handle obtained through it
///
/// # Safety
/// - `reflection` must be NULL or come from `reflection_into_raw()`
/// - No handle obtained from it may be used after this call
#[no_mangle]
pub unsafe extern "C" fn prism_reflection_release(reflection: *mut PrismReflection) {
    guard((), || drop(handle::unboxed(reflection)))
}

// ============================================================================
// Types
// ============================================================================

/// Kind of a type (`PRISM_TYPE_KIND_*`), 0 for NULL
///
/// # Safety
/// `ty` must be NULL or a live type handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_get_kind(ty: *const PrismType) -> u32 {
    guard(0, || prism_reflect::kind(from_ptr(ty)).as_raw())
}

/// Declared name of a struct, interface, or generic parameter type
///
/// # Arguments
/// * `ty` - Type handle (may be NULL)
/// * `len_out` - Receives the byte length of the name (may be NULL)
///
/// # Returns
/// * Pointer to the name bytes, not NUL-terminated
/// * NULL when the type has no name
///
/// # Safety
/// `ty` must be NULL or a live type handle.
///
/// # Example (C)
/// ```c
/// size_t len = 0;
/// const char* name = prism_type_get_name(ty, &len);
/// if (name) printf("%.*s\n", (int)len, name);
/// ```
#[no_mangle]
pub unsafe extern "C" fn prism_type_get_name(
    ty: *const PrismType,
    len_out: *mut usize,
) -> *const c_char {
    guard(ptr::null(), || write_str(type_reflect::type_name(from_ptr(ty)), len_out))
}

/// Number of fields of a struct type
///
/// # Safety
/// `ty` must be NULL or a live type handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_get_field_count(ty: *const PrismType) -> u32 {
    guard(0, || type_reflect::field_count(from_ptr(ty)))
}

/// Field of a struct type
///
/// # Safety
/// `ty` must be NULL or a live type handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_get_field_by_index(
    ty: *const PrismType,
    index: u32,
) -> *mut PrismVariable {
    guard(ptr::null_mut(), || to_ptr(type_reflect::field_by_index(from_ptr(ty), index)))
}

/// Element count of an array or vector; 0 for unsized arrays
///
/// # Safety
/// `ty` must be NULL or a live type handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_get_element_count(ty: *const PrismType) -> usize {
    guard(0, || type_reflect::element_count(from_ptr(ty)))
}

/// Element type of an array, vector, matrix, or parameter group
///
/// # Safety
/// `ty` must be NULL or a live type handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_get_element_type(ty: *const PrismType) -> *mut PrismType {
    guard(ptr::null_mut(), || to_ptr(type_reflect::element_type(from_ptr(ty))))
}

/// Row count of a matrix, 1 for vectors and scalars
///
/// # Safety
/// `ty` must be NULL or a live type handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_get_row_count(ty: *const PrismType) -> u32 {
    guard(0, || type_reflect::row_count(from_ptr(ty)))
}

/// Column count of a matrix, element count of a vector, 1 for scalars
///
/// # Safety
/// `ty` must be NULL or a live type handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_get_column_count(ty: *const PrismType) -> u32 {
    guard(0, || type_reflect::column_count(from_ptr(ty)))
}

/// Scalar element type (`PRISM_SCALAR_TYPE_*`)
///
/// # Safety
/// `ty` must be NULL or a live type handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_get_scalar_type(ty: *const PrismType) -> u32 {
    guard(0, || prism_reflect::scalar_type(from_ptr(ty)).as_raw())
}

/// Resource shape: base shape in the low bits plus array and multisample flags
///
/// # Safety
/// `ty` must be NULL or a live type handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_get_resource_shape(ty: *const PrismType) -> u32 {
    guard(0, || prism_reflect::resource_shape(from_ptr(ty)).as_raw())
}

/// Resource access (`PRISM_RESOURCE_ACCESS_*`)
///
/// # Safety
/// `ty` must be NULL or a live type handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_get_resource_access(ty: *const PrismType) -> u32 {
    guard(0, || prism_reflect::resource_access(from_ptr(ty)).as_raw())
}

/// Element type a resource returns when read
///
/// # Safety
/// `ty` must be NULL or a live type handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_get_resource_result_type(
    ty: *const PrismType,
) -> *mut PrismType {
    guard(ptr::null_mut(), || to_ptr(prism_reflect::resource_result_type(from_ptr(ty))))
}

/// Number of user attributes on the type's declaration
///
/// # Safety
/// `ty` must be NULL or a live type handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_get_user_attribute_count(ty: *const PrismType) -> u32 {
    guard(0, || attribute::type_attribute_count(from_ptr(ty)))
}

/// User attribute on the type's declaration
///
/// # Safety
/// `ty` must be NULL or a live type handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_get_user_attribute(
    ty: *const PrismType,
    index: u32,
) -> *mut PrismUserAttribute {
    guard(ptr::null_mut(), || {
        to_ptr(attribute::type_attribute_by_index(from_ptr(ty), index))
    })
}

/// First user attribute named `name` on the type's declaration
///
/// # Safety
/// - `ty` must be NULL or a live type handle
/// - `name` must be NULL or a NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn prism_type_find_user_attribute_by_name(
    ty: *const PrismType,
    name: *const c_char,
) -> *mut PrismUserAttribute {
    guard(ptr::null_mut(), || {
        let Some(name) = read_str(name) else {
            return ptr::null_mut();
        };
        to_ptr(attribute::find_type_attribute_by_name(from_ptr(ty), name))
    })
}

// ============================================================================
// Type Layouts
// ============================================================================

/// Type a layout was computed for
///
/// # Safety
/// `layout` must be NULL or a live type-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_layout_get_type(
    layout: *const PrismTypeLayout,
) -> *mut PrismType {
    guard(ptr::null_mut(), || to_ptr(layout_reflect::layout_type(from_ptr(layout))))
}

/// Kind of the laid-out type
///
/// # Safety
/// `layout` must be NULL or a live type-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_layout_get_kind(layout: *const PrismTypeLayout) -> u32 {
    guard(0, || layout_reflect::layout_kind(from_ptr(layout)).as_raw())
}

/// Size in units of `category` (`PRISM_PARAMETER_CATEGORY_*`)
///
/// # Returns
/// * The size, `SIZE_MAX` when unbounded, 0 when the category is not consumed
///
/// # Safety
/// `layout` must be NULL or a live type-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_layout_get_size(
    layout: *const PrismTypeLayout,
    category: u32,
) -> usize {
    guard(0, || {
        prism_reflect::size(from_ptr(layout), ParameterCategory::from_raw(category))
    })
}

/// Alignment in units of `category`
///
/// # Safety
/// `layout` must be NULL or a live type-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_layout_get_alignment(
    layout: *const PrismTypeLayout,
    category: u32,
) -> usize {
    guard(0, || {
        prism_reflect::alignment(from_ptr(layout), ParameterCategory::from_raw(category))
    })
}

/// Distance between consecutive array elements in units of `category`
///
/// # Safety
/// `layout` must be NULL or a live type-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_layout_get_element_stride(
    layout: *const PrismTypeLayout,
    category: u32,
) -> usize {
    guard(0, || {
        prism_reflect::element_stride(from_ptr(layout), ParameterCategory::from_raw(category))
    })
}

/// Number of field layouts of a struct layout
///
/// # Safety
/// `layout` must be NULL or a live type-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_layout_get_field_count(layout: *const PrismTypeLayout) -> u32 {
    guard(0, || layout_reflect::field_count(from_ptr(layout)))
}

/// Field layout of a struct layout
///
/// # Safety
/// `layout` must be NULL or a live type-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_layout_get_field_by_index(
    layout: *const PrismTypeLayout,
    index: u32,
) -> *mut PrismVariableLayout {
    guard(ptr::null_mut(), || {
        to_ptr(layout_reflect::field_by_index(from_ptr(layout), index))
    })
}

/// Index of the field named `name`, or -1
///
/// # Safety
/// - `layout` must be NULL or a live type-layout handle
/// - `name` must be NULL or a NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn prism_type_layout_find_field_index_by_name(
    layout: *const PrismTypeLayout,
    name: *const c_char,
) -> i64 {
    guard(-1, || {
        read_str(name)
            .and_then(|name| layout_reflect::find_field_index_by_name(from_ptr(layout), name))
            .and_then(|index| i64::try_from(index).ok())
            .unwrap_or(-1)
    })
}

/// Element layout of an array, parameter group, or structured buffer
///
/// # Safety
/// `layout` must be NULL or a live type-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_layout_get_element_type_layout(
    layout: *const PrismTypeLayout,
) -> *mut PrismTypeLayout {
    guard(ptr::null_mut(), || {
        to_ptr(layout_reflect::element_type_layout(from_ptr(layout)))
    })
}

/// Element variable layout of a parameter group
///
/// # Safety
/// `layout` must be NULL or a live type-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_layout_get_element_var_layout(
    layout: *const PrismTypeLayout,
) -> *mut PrismVariableLayout {
    guard(ptr::null_mut(), || {
        to_ptr(layout_reflect::element_var_layout(from_ptr(layout)))
    })
}

/// Container variable layout of a parameter group
///
/// # Safety
/// `layout` must be NULL or a live type-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_layout_get_container_var_layout(
    layout: *const PrismTypeLayout,
) -> *mut PrismVariableLayout {
    guard(ptr::null_mut(), || {
        to_ptr(layout_reflect::container_var_layout(from_ptr(layout)))
    })
}

/// Parameter category of the layout
///
/// # Safety
/// `layout` must be NULL or a live type-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_layout_get_parameter_category(
    layout: *const PrismTypeLayout,
) -> u32 {
    guard(0, || prism_reflect::category(from_ptr(layout)).as_raw())
}

/// Number of categories the layout consumes
///
/// # Safety
/// `layout` must be NULL or a live type-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_layout_get_category_count(
    layout: *const PrismTypeLayout,
) -> u32 {
    guard(0, || prism_reflect::category_count(from_ptr(layout)))
}

/// Category at `index`
///
/// # Safety
/// `layout` must be NULL or a live type-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_layout_get_category_by_index(
    layout: *const PrismTypeLayout,
    index: u32,
) -> u32 {
    guard(0, || prism_reflect::category_by_index(from_ptr(layout), index).as_raw())
}

/// Matrix storage (`PRISM_MATRIX_LAYOUT_*`)
///
/// # Safety
/// `layout` must be NULL or a live type-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_layout_get_matrix_layout_mode(
    layout: *const PrismTypeLayout,
) -> u32 {
    guard(PRISM_MATRIX_LAYOUT_UNKNOWN, || {
        matrix_mode_to_raw(layout_reflect::matrix_layout_mode(from_ptr(layout)))
    })
}

/// Specialization parameter index of a generic-parameter layout, or -1
///
/// # Safety
/// `layout` must be NULL or a live type-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_layout_get_generic_param_index(
    layout: *const PrismTypeLayout,
) -> i64 {
    guard(-1, || {
        layout_reflect::generic_param_index(from_ptr(layout)).map_or(-1, i64::from)
    })
}

/// Layout of data whose placement was deferred until specialization
///
/// # Safety
/// `layout` must be NULL or a live type-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_layout_get_pending_data_type_layout(
    layout: *const PrismTypeLayout,
) -> *mut PrismTypeLayout {
    guard(ptr::null_mut(), || {
        to_ptr(layout_reflect::pending_data_type_layout(from_ptr(layout)))
    })
}

/// Placement of the pending data of an existential-specialized layout
///
/// # Safety
/// `layout` must be NULL or a live type-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_layout_get_specialized_type_pending_data_var_layout(
    layout: *const PrismTypeLayout,
) -> *mut PrismVariableLayout {
    guard(ptr::null_mut(), || {
        to_ptr(layout_reflect::specialized_type_pending_data_var_layout(from_ptr(layout)))
    })
}

// ============================================================================
// Variables
// ============================================================================

/// Reflected name of a variable
///
/// # Safety
/// `var` must be NULL or a live variable handle.
#[no_mangle]
pub unsafe extern "C" fn prism_variable_get_name(
    var: *const PrismVariable,
    len_out: *mut usize,
) -> *const c_char {
    guard(ptr::null(), || write_str(variable::name(from_ptr(var)), len_out))
}

/// Declared type of a variable
///
/// # Safety
/// `var` must be NULL or a live variable handle.
#[no_mangle]
pub unsafe extern "C" fn prism_variable_get_type(var: *const PrismVariable) -> *mut PrismType {
    guard(ptr::null_mut(), || to_ptr(variable::var_type(from_ptr(var))))
}

/// Whether a variable carries `modifier` (`PRISM_MODIFIER_*`)
///
/// # Safety
/// `var` must be NULL or a live variable handle.
#[no_mangle]
pub unsafe extern "C" fn prism_variable_has_modifier(
    var: *const PrismVariable,
    modifier: u32,
) -> bool {
    guard(false, || {
        modifier_from_raw(modifier)
            .is_some_and(|modifier| variable::find_modifier(from_ptr(var), modifier).is_some())
    })
}

/// Number of user attributes on a variable
///
/// # Safety
/// `var` must be NULL or a live variable handle.
#[no_mangle]
pub unsafe extern "C" fn prism_variable_get_user_attribute_count(var: *const PrismVariable) -> u32 {
    guard(0, || attribute::variable_attribute_count(from_ptr(var)))
}

/// User attribute on a variable
///
/// # Safety
/// `var` must be NULL or a live variable handle.
#[no_mangle]
pub unsafe extern "C" fn prism_variable_get_user_attribute(
    var: *const PrismVariable,
    index: u32,
) -> *mut PrismUserAttribute {
    guard(ptr::null_mut(), || {
        to_ptr(attribute::variable_attribute_by_index(from_ptr(var), index))
    })
}

/// First user attribute named `name` on a variable
///
/// # Safety
/// - `var` must be NULL or a live variable handle
/// - `name` must be NULL or a NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn prism_variable_find_user_attribute_by_name(
    var: *const PrismVariable,
    name: *const c_char,
) -> *mut PrismUserAttribute {
    guard(ptr::null_mut(), || {
        let Some(name) = read_str(name) else {
            return ptr::null_mut();
        };
        to_ptr(attribute::find_variable_attribute_by_name(from_ptr(var), name))
    })
}

// ============================================================================
// Variable Layouts
// ============================================================================

/// Declared variable behind a layout
///
/// # Safety
/// `layout` must be NULL or a live variable-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_variable_layout_get_variable(
    layout: *const PrismVariableLayout,
) -> *mut PrismVariable {
    guard(ptr::null_mut(), || to_ptr(var_layout::variable(from_ptr(layout))))
}

/// Type layout of a variable
///
/// # Safety
/// `layout` must be NULL or a live variable-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_variable_layout_get_type_layout(
    layout: *const PrismVariableLayout,
) -> *mut PrismTypeLayout {
    guard(ptr::null_mut(), || to_ptr(var_layout::type_layout(from_ptr(layout))))
}

/// Category of a variable
///
/// # Safety
/// `layout` must be NULL or a live variable-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_variable_layout_get_category(
    layout: *const PrismVariableLayout,
) -> u32 {
    guard(0, || var_layout::var_category(from_ptr(layout)).as_raw())
}

/// Offset of a variable in units of `category`
///
/// A texture or sampler placed in a descriptor-table slot answers its slot
/// when asked for its shader-resource or sampler offset.
///
/// # Safety
/// `layout` must be NULL or a live variable-layout handle.
///
/// # Example (C)
/// ```c
/// size_t reg = prism_variable_layout_get_offset(param, PRISM_PARAMETER_CATEGORY_SHADER_RESOURCE);
/// size_t space = prism_variable_layout_get_space(param, PRISM_PARAMETER_CATEGORY_SHADER_RESOURCE);
/// ```
#[no_mangle]
pub unsafe extern "C" fn prism_variable_layout_get_offset(
    layout: *const PrismVariableLayout,
    category: u32,
) -> usize {
    guard(0, || {
        var_layout::offset(from_ptr(layout), ParameterCategory::from_raw(category))
    })
}

/// Register space or descriptor set of a variable for `category`
///
/// # Safety
/// `layout` must be NULL or a live variable-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_variable_layout_get_space(
    layout: *const PrismVariableLayout,
    category: u32,
) -> usize {
    guard(0, || {
        var_layout::space(from_ptr(layout), ParameterCategory::from_raw(category))
    })
}

/// Offset in the variable's own category
///
/// # Safety
/// `layout` must be NULL or a live variable-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_variable_layout_get_binding_index(
    layout: *const PrismVariableLayout,
) -> usize {
    guard(0, || var_layout::binding_index(from_ptr(layout)))
}

/// Space in the variable's own category
///
/// # Safety
/// `layout` must be NULL or a live variable-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_variable_layout_get_binding_space(
    layout: *const PrismVariableLayout,
) -> usize {
    guard(0, || var_layout::binding_space(from_ptr(layout)))
}

/// Semantic name of a varying parameter
///
/// # Safety
/// `layout` must be NULL or a live variable-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_variable_layout_get_semantic_name(
    layout: *const PrismVariableLayout,
    len_out: *mut usize,
) -> *const c_char {
    guard(ptr::null(), || write_str(var_layout::semantic_name(from_ptr(layout)), len_out))
}

/// Semantic index of a varying parameter
///
/// # Safety
/// `layout` must be NULL or a live variable-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_variable_layout_get_semantic_index(
    layout: *const PrismVariableLayout,
) -> usize {
    guard(0, || var_layout::semantic_index(from_ptr(layout)))
}

/// Stage of a varying parameter (`PRISM_STAGE_*`)
///
/// # Safety
/// `layout` must be NULL or a live variable-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_variable_layout_get_stage(
    layout: *const PrismVariableLayout,
) -> u32 {
    guard(0, || stage_to_raw(var_layout::stage(from_ptr(layout))))
}

/// Placement of a variable's pending existential data
///
/// # Safety
/// `layout` must be NULL or a live variable-layout handle.
#[no_mangle]
pub unsafe extern "C" fn prism_variable_layout_get_pending_data_layout(
    layout: *const PrismVariableLayout,
) -> *mut PrismVariableLayout {
    guard(ptr::null_mut(), || to_ptr(var_layout::pending_data_layout(from_ptr(layout))))
}

// ============================================================================
// Entry Points
// ============================================================================

/// Name of an entry point
///
/// # Safety
/// `ep` must be NULL or a live entry-point handle.
#[no_mangle]
pub unsafe extern "C" fn prism_entry_point_get_name(
    ep: *const PrismEntryPoint,
    len_out: *mut usize,
) -> *const c_char {
    guard(ptr::null(), || write_str(entry_point::name(from_ptr(ep)), len_out))
}

/// Stage of an entry point (`PRISM_STAGE_*`)
///
/// # Safety
/// `ep` must be NULL or a live entry-point handle.
#[no_mangle]
pub unsafe extern "C" fn prism_entry_point_get_stage(ep: *const PrismEntryPoint) -> u32 {
    guard(0, || stage_to_raw(entry_point::stage(from_ptr(ep))))
}

/// Number of entry-point parameters
///
/// # Safety
/// `ep` must be NULL or a live entry-point handle.
#[no_mangle]
pub unsafe extern "C" fn prism_entry_point_get_parameter_count(ep: *const PrismEntryPoint) -> u32 {
    guard(0, || entry_point::parameter_count(from_ptr(ep)))
}

/// Entry-point parameter
///
/// # Safety
/// `ep` must be NULL or a live entry-point handle.
#[no_mangle]
pub unsafe extern "C" fn prism_entry_point_get_parameter_by_index(
    ep: *const PrismEntryPoint,
    index: u32,
) -> *mut PrismVariableLayout {
    guard(ptr::null_mut(), || to_ptr(entry_point::parameter_by_index(from_ptr(ep), index)))
}

/// Layout of all entry-point parameters as one variable
///
/// # Safety
/// `ep` must be NULL or a live entry-point handle.
#[no_mangle]
pub unsafe extern "C" fn prism_entry_point_get_var_layout(
    ep: *const PrismEntryPoint,
) -> *mut PrismVariableLayout {
    guard(ptr::null_mut(), || to_ptr(entry_point::var_layout(from_ptr(ep))))
}

/// Layout of the entry point's return value
///
/// # Safety
/// `ep` must be NULL or a live entry-point handle.
#[no_mangle]
pub unsafe extern "C" fn prism_entry_point_get_result_var_layout(
    ep: *const PrismEntryPoint,
) -> *mut PrismVariableLayout {
    guard(ptr::null_mut(), || to_ptr(entry_point::result_var_layout(from_ptr(ep))))
}

/// Whether the uniform parameters were gathered into an implicit constant buffer
///
/// # Safety
/// `ep` must be NULL or a live entry-point handle.
#[no_mangle]
pub unsafe extern "C" fn prism_entry_point_has_default_constant_buffer(
    ep: *const PrismEntryPoint,
) -> bool {
    guard(false, || entry_point::has_default_constant_buffer(from_ptr(ep)))
}

/// Thread-group size of a compute entry point
///
/// # Arguments
/// * `ep` - Entry-point handle (may be NULL)
/// * `axis_count` - Number of elements in `sizes_out`
/// * `sizes_out` - Receives one size per axis; axes past the third are 1
///
/// # Safety
/// - `ep` must be NULL or a live entry-point handle
/// - `sizes_out` must be NULL or point to `axis_count` writable elements
///
/// # Example (C)
/// ```c
/// uint64_t size[3];
/// prism_entry_point_get_compute_thread_group_size(ep, 3, size);
/// ```
#[no_mangle]
pub unsafe extern "C" fn prism_entry_point_get_compute_thread_group_size(
    ep: *const PrismEntryPoint,
    axis_count: usize,
    sizes_out: *mut u64,
) {
    if sizes_out.is_null() || axis_count == 0 {
        return;
    }
    guard((), || {
        let sizes = std::slice::from_raw_parts_mut(sizes_out, axis_count);
        entry_point::compute_thread_group_size(from_ptr(ep), sizes);
    })
}

/// Whether a fragment entry point reads any sample-rate input
///
/// # Safety
/// `ep` must be NULL or a live entry-point handle.
#[no_mangle]
pub unsafe extern "C" fn prism_entry_point_uses_any_sample_rate_input(
    ep: *const PrismEntryPoint,
) -> bool {
    guard(false, || entry_point::uses_any_sample_rate_input(from_ptr(ep)))
}

// ============================================================================
// Type Parameters
// ============================================================================

/// Name of a generic type parameter; NULL for existential slots
///
/// # Safety
/// `param` must be NULL or a live type-parameter handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_parameter_get_name(
    param: *const PrismTypeParameter,
    len_out: *mut usize,
) -> *const c_char {
    guard(ptr::null(), || write_str(type_param::name(from_ptr(param)), len_out))
}

/// Position in the program's specialization parameter list
///
/// # Safety
/// `param` must be NULL or a live type-parameter handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_parameter_get_index(param: *const PrismTypeParameter) -> u32 {
    guard(0, || type_param::index(from_ptr(param)))
}

/// Number of interface constraints on a generic type parameter
///
/// # Safety
/// `param` must be NULL or a live type-parameter handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_parameter_get_constraint_count(
    param: *const PrismTypeParameter,
) -> u32 {
    guard(0, || type_param::constraint_count(from_ptr(param)))
}

/// Interface constraint at `index`
///
/// # Safety
/// `param` must be NULL or a live type-parameter handle.
#[no_mangle]
pub unsafe extern "C" fn prism_type_parameter_get_constraint_by_index(
    param: *const PrismTypeParameter,
    index: u32,
) -> *mut PrismType {
    guard(ptr::null_mut(), || {
        to_ptr(type_param::constraint_by_index(from_ptr(param), index))
    })
}

// ============================================================================
// User Attributes
// ============================================================================

/// Name of a user attribute
///
/// # Safety
/// `attr` must be NULL or a live attribute handle.
#[no_mangle]
pub unsafe extern "C" fn prism_user_attribute_get_name(
    attr: *const PrismUserAttribute,
    len_out: *mut usize,
) -> *const c_char {
    guard(ptr::null(), || write_str(attribute::attribute_name(from_ptr(attr)), len_out))
}

/// Number of arguments of a user attribute
///
/// # Safety
/// `attr` must be NULL or a live attribute handle.
#[no_mangle]
pub unsafe extern "C" fn prism_user_attribute_get_argument_count(
    attr: *const PrismUserAttribute,
) -> u32 {
    guard(0, || attribute::argument_count(from_ptr(attr)))
}

/// Type of the argument at `index`
///
/// # Safety
/// `attr` must be NULL or a live attribute handle.
#[no_mangle]
pub unsafe extern "C" fn prism_user_attribute_get_argument_type(
    attr: *const PrismUserAttribute,
    index: u32,
) -> *mut PrismType {
    guard(ptr::null_mut(), || to_ptr(attribute::argument_type(from_ptr(attr), index)))
}

/// Integer value of the argument at `index`
///
/// # Returns
/// * `PRISM_OK` with the value written to `value_out`
/// * `PRISM_ERROR_INVALID_PARAMETER` for a NULL argument, an index out of
///   range, or an argument that is not an integer literal
///
/// # Safety
/// - `attr` must be NULL or a live attribute handle
/// - `value_out` must be NULL or writable
#[no_mangle]
pub unsafe extern "C" fn prism_user_attribute_get_argument_value_int(
    attr: *const PrismUserAttribute,
    index: u32,
    value_out: *mut i32,
) -> PrismResult {
    guard(PRISM_FAIL, || {
        let Some(attr) = from_ptr(attr) else {
            return PRISM_ERROR_INVALID_PARAMETER;
        };
        if value_out.is_null() {
            return PRISM_ERROR_INVALID_PARAMETER;
        }
        match attribute::as_int(attr, index) {
            Ok(value) => {
                *value_out = value;
                PRISM_OK
            }
            Err(_) => PRISM_ERROR_INVALID_PARAMETER,
        }
    })
}

/// Floating-point value of the argument at `index`
///
/// Integer literals are rejected.
///
/// # Safety
/// - `attr` must be NULL or a live attribute handle
/// - `value_out` must be NULL or writable
#[no_mangle]
pub unsafe extern "C" fn prism_user_attribute_get_argument_value_float(
    attr: *const PrismUserAttribute,
    index: u32,
    value_out: *mut f32,
) -> PrismResult {
    guard(PRISM_FAIL, || {
        let Some(attr) = from_ptr(attr) else {
            return PRISM_ERROR_INVALID_PARAMETER;
        };
        if value_out.is_null() {
            return PRISM_ERROR_INVALID_PARAMETER;
        }
        match attribute::as_float(attr, index) {
            Ok(value) => {
                *value_out = value;
                PRISM_OK
            }
            Err(_) => PRISM_ERROR_INVALID_PARAMETER,
        }
    })
}

/// String value of the argument at `index`, NULL when it is not a string
///
/// # Safety
/// `attr` must be NULL or a live attribute handle.
#[no_mangle]
pub unsafe extern "C" fn prism_user_attribute_get_argument_value_string(
    attr: *const PrismUserAttribute,
    index: u32,
    len_out: *mut usize,
) -> *const c_char {
    guard(ptr::null(), || {
        let value = from_ptr(attr).and_then(|attr| attribute::as_str(attr, index).ok());
        write_str(value, len_out)
    })
}

// ============================================================================
// Program
// ============================================================================

/// Number of global shader parameters
///
/// # Safety
/// `reflection` must be NULL or a live reflection handle.
#[no_mangle]
pub unsafe extern "C" fn prism_reflection_get_parameter_count(
    reflection: *const PrismReflection,
) -> u32 {
    guard(0, || from_ptr(reflection).map_or(0, Reflection::parameter_count))
}

/// Global shader parameter
///
/// # Safety
/// `reflection` must be NULL or a live reflection handle.
#[no_mangle]
pub unsafe extern "C" fn prism_reflection_get_parameter_by_index(
    reflection: *const PrismReflection,
    index: u32,
) -> *mut PrismVariableLayout {
    guard(ptr::null_mut(), || {
        to_ptr(from_ptr(reflection).and_then(|r| r.parameter_by_index(index)))
    })
}

/// Layout of the global scope as a variable
///
/// # Safety
/// `reflection` must be NULL or a live reflection handle.
#[no_mangle]
pub unsafe extern "C" fn prism_reflection_get_global_params_var_layout(
    reflection: *const PrismReflection,
) -> *mut PrismVariableLayout {
    guard(ptr::null_mut(), || {
        to_ptr(from_ptr(reflection).map(Reflection::global_params_var_layout))
    })
}

/// Layout of the global scope as a struct
///
/// # Safety
/// `reflection` must be NULL or a live reflection handle.
#[no_mangle]
pub unsafe extern "C" fn prism_reflection_get_global_params_type_layout(
    reflection: *const PrismReflection,
) -> *mut PrismTypeLayout {
    guard(ptr::null_mut(), || {
        to_ptr(from_ptr(reflection).map(Reflection::global_struct_layout))
    })
}

/// Register of the implicit global constant buffer
///
/// # Safety
/// `reflection` must be NULL or a live reflection handle.
#[no_mangle]
pub unsafe extern "C" fn prism_reflection_get_global_constant_buffer_binding(
    reflection: *const PrismReflection,
) -> usize {
    guard(0, || {
        from_ptr(reflection).map_or(0, Reflection::global_constant_buffer_binding)
    })
}

/// Size in bytes of the implicit global constant buffer
///
/// # Safety
/// `reflection` must be NULL or a live reflection handle.
#[no_mangle]
pub unsafe extern "C" fn prism_reflection_get_global_constant_buffer_size(
    reflection: *const PrismReflection,
) -> usize {
    guard(0, || from_ptr(reflection).map_or(0, Reflection::global_constant_buffer_size))
}

/// Number of specialization parameters
///
/// # Safety
/// `reflection` must be NULL or a live reflection handle.
#[no_mangle]
pub unsafe extern "C" fn prism_reflection_get_type_parameter_count(
    reflection: *const PrismReflection,
) -> u32 {
    guard(0, || from_ptr(reflection).map_or(0, Reflection::type_parameter_count))
}

/// Specialization parameter
///
/// # Safety
/// `reflection` must be NULL or a live reflection handle.
#[no_mangle]
pub unsafe extern "C" fn prism_reflection_get_type_parameter_by_index(
    reflection: *const PrismReflection,
    index: u32,
) -> *mut PrismTypeParameter {
    guard(ptr::null_mut(), || {
        to_ptr(from_ptr(reflection).and_then(|r| r.type_parameter_by_index(index)))
    })
}

/// Generic type parameter named `name`
///
/// # Safety
/// - `reflection` must be NULL or a live reflection handle
/// - `name` must be NULL or a NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn prism_reflection_find_type_parameter(
    reflection: *const PrismReflection,
    name: *const c_char,
) -> *mut PrismTypeParameter {
    guard(ptr::null_mut(), || {
        let (Some(reflection), Some(name)) = (from_ptr(reflection), read_str(name)) else {
            return ptr::null_mut();
        };
        to_ptr(reflection.find_type_parameter(name))
    })
}

/// Number of entry points
///
/// # Safety
/// `reflection` must be NULL or a live reflection handle.
#[no_mangle]
pub unsafe extern "C" fn prism_reflection_get_entry_point_count(
    reflection: *const PrismReflection,
) -> usize {
    guard(0, || from_ptr(reflection).map_or(0, Reflection::entry_point_count))
}

/// Entry point
///
/// # Safety
/// `reflection` must be NULL or a live reflection handle.
#[no_mangle]
pub unsafe extern "C" fn prism_reflection_get_entry_point_by_index(
    reflection: *const PrismReflection,
    index: usize,
) -> *mut PrismEntryPoint {
    guard(ptr::null_mut(), || {
        to_ptr(from_ptr(reflection).and_then(|r| r.entry_point_by_index(index)))
    })
}

/// Entry point whose function is named `name`
///
/// # Safety
/// - `reflection` must be NULL or a live reflection handle
/// - `name` must be NULL or a NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn prism_reflection_find_entry_point_by_name(
    reflection: *const PrismReflection,
    name: *const c_char,
) -> *mut PrismEntryPoint {
    guard(ptr::null_mut(), || {
        let (Some(reflection), Some(name)) = (from_ptr(reflection), read_str(name)) else {
            return ptr::null_mut();
        };
        to_ptr(reflection.find_entry_point_by_name(name))
    })
}

/// Number of hashed string literals
///
/// # Safety
/// `reflection` must be NULL or a live reflection handle.
#[no_mangle]
pub unsafe extern "C" fn prism_reflection_get_hashed_string_count(
    reflection: *const PrismReflection,
) -> usize {
    guard(0, || from_ptr(reflection).map_or(0, Reflection::hashed_string_count))
}

/// Hashed string literal at `index`
///
/// # Safety
/// `reflection` must be NULL or a live reflection handle.
#[no_mangle]
pub unsafe extern "C" fn prism_reflection_get_hashed_string(
    reflection: *const PrismReflection,
    index: usize,
    len_out: *mut usize,
) -> *const c_char {
    guard(ptr::null(), || {
        write_str(from_ptr(reflection).and_then(|r| r.hashed_string(index)), len_out)
    })
}

/// Resolve a type by source-level name
///
/// # Safety
/// - `reflection` must be NULL or a live reflection handle, not in use by
///   any other thread
/// - `name` must be NULL or a NUL-terminated string
#[no_mangle]
pub unsafe extern "C" fn prism_reflection_find_type_by_name(
    reflection: *mut PrismReflection,
    name: *const c_char,
) -> *mut PrismType {
    guard(ptr::null_mut(), || {
        let (Some(reflection), Some(name)) = (from_mut_ptr(reflection), read_str(name)) else {
            return ptr::null_mut();
        };
        to_ptr(reflection.find_type_by_name(name).as_deref())
    })
}

/// Layout of `ty` under the program's target rules
///
/// # Safety
/// - `reflection` must be NULL or a live reflection handle, not in use by
///   any other thread
/// - `ty` must be NULL or a live type handle
#[no_mangle]
pub unsafe extern "C" fn prism_reflection_get_type_layout(
    reflection: *mut PrismReflection,
    ty: *const PrismType,
) -> *mut PrismTypeLayout {
    guard(ptr::null_mut(), || {
        let (Some(reflection), Some(ty)) = (from_mut_ptr(reflection), from_ptr(ty)) else {
            return ptr::null_mut();
        };
        to_ptr(reflection.type_layout(ty).as_deref())
    })
}

/// Specialize `base` with one concrete type per existential slot
///
/// # Arguments
/// * `reflection` - Reflection handle
/// * `base` - Unspecialized type
/// * `arg_count` - Number of entries in `args`
/// * `args` - Concrete types; none may be NULL
/// * `diagnostics_out` - Receives a blob when anything was reported (may
///   be NULL); release it with `prism_blob_release()`
///
/// # Returns
/// * The specialized type, owned by the reflection object
/// * NULL on failure
///
/// # Safety
/// - `reflection` must be NULL or a live reflection handle, not in use by
///   any other thread
/// - `args` must point to `arg_count` type handles
///
/// # Example (C)
/// ```c
/// PrismBlob* diagnostics = NULL;
/// const PrismType* args[] = { sun };
/// PrismType* ty = prism_reflection_specialize_type(reflection, scene, 1, args, &diagnostics);
/// if (diagnostics) {
///     fwrite(prism_blob_get_buffer_pointer(diagnostics), 1,
///            prism_blob_get_buffer_size(diagnostics), stderr);
///     prism_blob_release(diagnostics);
/// }
/// ```
#[no_mangle]
pub unsafe extern "C" fn prism_reflection_specialize_type(
    reflection: *mut PrismReflection,
    base: *const PrismType,
    arg_count: usize,
    args: *const *const PrismType,
    diagnostics_out: *mut *mut PrismBlob,
) -> *mut PrismType {
    if !diagnostics_out.is_null() {
        *diagnostics_out = ptr::null_mut();
    }
    guard(ptr::null_mut(), || {
        let Some(reflection) = from_mut_ptr(reflection) else {
            return ptr::null_mut();
        };
        if arg_count > 0 && args.is_null() {
            return ptr::null_mut();
        }

        let raw_args: &[*const PrismType] = if arg_count == 0 {
            &[]
        } else {
            std::slice::from_raw_parts(args, arg_count)
        };
        let Some(args) = raw_args
            .iter()
            .map(|&arg| from_ptr(arg))
            .collect::<Option<Vec<&Type>>>()
        else {
            return ptr::null_mut();
        };

        let result = prism_reflect::specialize_type(reflection, from_ptr(base), &args);
        if !diagnostics_out.is_null() {
            if let Some(blob) = result.diagnostics {
                *diagnostics_out = handle::boxed(blob);
            }
        }
        to_ptr(result.ty.as_deref())
    })
}

// ============================================================================
// Blobs
// ============================================================================

/// Contents of a blob
///
/// # Safety
/// `blob` must be NULL or a live blob handle.
#[no_mangle]
pub unsafe extern "C" fn prism_blob_get_buffer_pointer(blob: *const PrismBlob) -> *const u8 {
    guard(ptr::null(), || {
        from_ptr(blob).map_or(ptr::null(), |blob| blob.as_bytes().as_ptr())
    })
}

/// Size of a blob in bytes
///
/// # Safety
/// `blob` must be NULL or a live blob handle.
#[no_mangle]
pub unsafe extern "C" fn prism_blob_get_buffer_size(blob: *const PrismBlob) -> usize {
    guard(0, || from_ptr(blob).map_or(0, Blob::len))
}

/// Release a blob
///
/// # Safety
/// - `blob` must be NULL or a blob handed out by this library
/// - The blob must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn prism_blob_release(blob: *mut PrismBlob) {
    guard((), || drop(handle::unboxed(blob)))
}

// ============================================================================
// Utilities
// ============================================================================

/// Stable 32-bit hash of a byte string, as used for hashed string literals
///
/// # Safety
/// `bytes` must be NULL or point to `len` readable bytes.
#[no_mangle]
pub unsafe extern "C" fn prism_compute_string_hash(bytes: *const c_char, len: usize) -> i32 {
    if bytes.is_null() || len == 0 {
        return prism_reflect::compute_string_hash(&[]);
    }
    guard(0, || {
        let bytes = std::slice::from_raw_parts(bytes.cast::<u8>(), len);
        prism_reflect::compute_string_hash(bytes)
    })
}

/// Version of this C API
#[no_mangle]
pub extern "C" fn prism_reflection_api_version() -> u32 {
    PRISM_REFLECTION_API_VERSION
}

/// Get the library version string
///
/// # Returns
/// * Null-terminated version string (e.g., "0.2.0")
///
/// # Safety
/// - The returned string is a static string and must not be freed
#[no_mangle]
pub unsafe extern "C" fn prism_version() -> *const c_char {
    static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    VERSION.as_ptr() as *const c_char
}

// ============================================================================
// Tests
// ============================================================================
