//! Entry-point metadata

use prism_types::{EntryPointLayout, LayoutShape, Stage, VarLayout};

use crate::layout_reflect::{field_by_index, field_count, unwrap_parameter_group};

/// Thread-group size along an axis without a `numthreads` attribute
pub const DEFAULT_THREAD_GROUP_SIZE: u64 = 1;

/// Entry-point function name
pub fn name(entry_point: Option<&EntryPointLayout>) -> Option<&str> {
    entry_point.map(|ep| ep.name.as_str())
}

/// Pipeline stage
pub fn stage(entry_point: Option<&EntryPointLayout>) -> Stage {
    entry_point.map_or(Stage::None, |ep| ep.stage)
}

/// Number of entry-point parameters
///
/// When the parameters were wrapped in an implicit constant buffer, these
/// are the fields of the wrapped struct.
pub fn parameter_count(entry_point: Option<&EntryPointLayout>) -> u32 {
    entry_point.map_or(0, |ep| {
        field_count(Some(unwrap_parameter_group(&ep.parameters_layout.type_layout)))
    })
}

/// Entry-point parameter at `index`
pub fn parameter_by_index(entry_point: Option<&EntryPointLayout>, index: u32) -> Option<&VarLayout> {
    let ep = entry_point?;
    field_by_index(
        Some(unwrap_parameter_group(&ep.parameters_layout.type_layout)),
        index,
    )
}

/// Layout of all parameters together
pub fn var_layout(entry_point: Option<&EntryPointLayout>) -> Option<&VarLayout> {
    entry_point.map(|ep| ep.parameters_layout.as_ref())
}

/// Layout of the return value
pub fn result_var_layout(entry_point: Option<&EntryPointLayout>) -> Option<&VarLayout> {
    entry_point?.result_layout.as_deref()
}

/// Whether the uniform parameters were wrapped in an implicit constant buffer
pub fn has_default_constant_buffer(entry_point: Option<&EntryPointLayout>) -> bool {
    entry_point.is_some_and(|ep| {
        matches!(
            ep.parameters_layout.type_layout.shape,
            LayoutShape::ParameterGroup { .. }
        )
    })
}

/// Fill `out` with the thread-group size along each requested axis
///
/// Axes without a `numthreads` value, and every axis past the third, are
/// set to 1. Nothing is written when the entry point has no function
/// declaration.
pub fn compute_thread_group_size(entry_point: Option<&EntryPointLayout>, out: &mut [u64]) {
    let Some(func) = entry_point.and_then(|ep| ep.func.as_ref()) else {
        return;
    };

    let mut size = [DEFAULT_THREAD_GROUP_SIZE; 3];
    if let Some(threads) = func.num_threads {
        size = [threads.x.into(), threads.y.into(), threads.z.into()];
    }

    for (axis, slot) in out.iter_mut().enumerate() {
        *slot = size.get(axis).copied().unwrap_or(DEFAULT_THREAD_GROUP_SIZE);
    }
}

/// Whether a fragment entry point reads any sample-rate input
pub fn uses_any_sample_rate_input(entry_point: Option<&EntryPointLayout>) -> bool {
    entry_point.is_some_and(|ep| ep.stage == Stage::Fragment && ep.flags.uses_any_sample_rate_input)
}
