//! Type specialization
//!
//! Forwards to the reflection object's [`TypeSpecializer`] with a fresh
//! diagnostic sink, and turns anything the specializer reported into a
//! caller-owned blob.
//!
//! [`TypeSpecializer`]: crate::services::TypeSpecializer

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use prism_types::Type;

use crate::diagnostic::{Blob, DiagnosticSink};
use crate::error::ReflectError;
use crate::program::Reflection;

/// Outcome of a specialization request
#[derive(Debug, Clone, Default)]
pub struct Specialized {
    /// The specialized type, absent on failure
    pub ty: Option<Arc<Type>>,
    /// Rendered diagnostics, present only when something was reported
    pub diagnostics: Option<Blob>,
}

/// Specialize `base` with `args`, one concrete type per existential slot
///
/// Never fails outright. A missing base, a missing specializer, a rejected
/// argument list, an error reported next to a result, or a panic inside the
/// specializer all produce `ty: None`. Warnings alone keep the result.
/// The new type is kept alive by `reflection`.
pub fn specialize_type(
    reflection: &mut Reflection,
    base: Option<&Type>,
    args: &[&Type],
) -> Specialized {
    let Some(base) = base else {
        return Specialized::default();
    };
    let Some(specializer) = reflection.specializer() else {
        tracing::debug!(base = %base, "no specializer installed");
        return Specialized::default();
    };

    tracing::debug!(
        base = %base,
        args = args.len(),
        specializer = specializer.name(),
        "specializing type"
    );

    let format = reflection.config().diagnostics_format;
    let mut sink = DiagnosticSink::new();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        specializer.specialize(base, args, &mut sink)
    }));

    let ty = match outcome {
        Ok(ty) => ty,
        Err(payload) => {
            sink.report_error(&ReflectError::from_panic("specializing a type", &*payload));
            None
        }
    };
    // A type handed back alongside errors is not trusted
    let ty = ty.filter(|_| !sink.has_errors());

    Specialized {
        ty: ty.map(|ty| reflection.retain_type(ty)),
        diagnostics: sink.into_blob(format),
    }
}
