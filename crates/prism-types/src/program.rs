//! Program-level layout: global parameters, entry points, specialization params

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::decl::{DeclRef, FuncDecl, GenericParamDecl};
use crate::layout::VarLayout;
use crate::ty::Type;

/// Pipeline stage of an entry point or varying variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stage {
    /// Not stage-specific
    #[default]
    None,
    /// Vertex shader
    Vertex,
    /// Hull / tessellation control shader
    Hull,
    /// Domain / tessellation evaluation shader
    Domain,
    /// Geometry shader
    Geometry,
    /// Fragment / pixel shader
    Fragment,
    /// Compute shader
    Compute,
    /// Ray generation shader
    RayGeneration,
    /// Intersection shader
    Intersection,
    /// Any-hit shader
    AnyHit,
    /// Closest-hit shader
    ClosestHit,
    /// Miss shader
    Miss,
    /// Callable shader
    Callable,
    /// Mesh shader
    Mesh,
    /// Amplification / task shader
    Amplification,
}

/// Flags recorded on an entry-point layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryPointFlags {
    /// A fragment shader reads at least one input at sample rate
    pub uses_any_sample_rate_input: bool,
}

/// Layout of one entry point
#[derive(Debug, Clone)]
pub struct EntryPointLayout {
    /// Name the entry point is exported under
    pub name: String,
    /// Stage from the entry point's profile
    pub stage: Stage,
    /// The entry function's declaration
    pub func: Option<Arc<FuncDecl>>,
    /// Layout of the entry-point parameter scope
    pub parameters_layout: Arc<VarLayout>,
    /// Layout of the return value, if any
    pub result_layout: Option<Arc<VarLayout>>,
    /// Stage-specific flags
    pub flags: EntryPointFlags,
}

impl EntryPointLayout {
    /// Create an entry-point layout
    pub fn new(name: impl Into<String>, stage: Stage, parameters_layout: Arc<VarLayout>) -> Self {
        EntryPointLayout {
            name: name.into(),
            stage,
            func: None,
            parameters_layout,
            result_layout: None,
            flags: EntryPointFlags::default(),
        }
    }

    /// Attach the function declaration
    pub fn with_func(mut self, func: FuncDecl) -> Self {
        self.func = Some(Arc::new(func));
        self
    }

    /// Attach the result layout
    pub fn with_result(mut self, result: Arc<VarLayout>) -> Self {
        self.result_layout = Some(result);
        self
    }

    /// Set the flags
    pub fn with_flags(mut self, flags: EntryPointFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// What a specialization parameter stands for
#[derive(Debug, Clone)]
pub enum SpecializationParamKind {
    /// A global generic type parameter
    Generic(DeclRef<GenericParamDecl>),
    /// An interface-typed (existential) slot
    Existential(Arc<Type>),
}

/// A parameter the host must supply a type for before final code generation
#[derive(Debug, Clone)]
pub struct SpecializationParam {
    /// Position in the program's specialization parameter list
    pub index: u32,
    /// Parameter flavour
    pub kind: SpecializationParamKind,
}

/// Deduplicated pool of string literals passed through `getStringHash`
#[derive(Debug, Clone, Default)]
pub struct HashedStringPool {
    lookup: FxHashMap<String, usize>,
    strings: Vec<String>,
}

impl HashedStringPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string, returning its index; duplicates return the existing index
    pub fn add(&mut self, s: &str) -> usize {
        if let Some(&index) = self.lookup.get(s) {
            return index;
        }
        let index = self.strings.len();
        self.strings.push(s.to_owned());
        self.lookup.insert(s.to_owned(), index);
        index
    }

    /// String at `index`
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    /// Number of distinct strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the pool is empty
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Root of the layout graph for one compilation target
#[derive(Debug, Clone)]
pub struct ProgramLayout {
    /// Layout of the global parameter scope
    pub parameters_layout: Arc<VarLayout>,
    /// Entry points, in the order they were requested
    pub entry_points: Vec<Arc<EntryPointLayout>>,
    /// Specialization parameters, in index order
    pub specialization_params: Vec<Arc<SpecializationParam>>,
    /// Hashed string literals
    pub hashed_strings: HashedStringPool,
}

impl ProgramLayout {
    /// Create a program layout with no entry points or specialization params
    pub fn new(parameters_layout: Arc<VarLayout>) -> Self {
        ProgramLayout {
            parameters_layout,
            entry_points: Vec::new(),
            specialization_params: Vec::new(),
            hashed_strings: HashedStringPool::new(),
        }
    }

    /// Add an entry point
    pub fn with_entry_point(mut self, entry_point: EntryPointLayout) -> Self {
        self.entry_points.push(Arc::new(entry_point));
        self
    }

    /// Add a specialization parameter; its index is its position
    pub fn with_specialization_param(mut self, kind: SpecializationParamKind) -> Self {
        let index = self.specialization_params.len() as u32;
        self.specialization_params
            .push(Arc::new(SpecializationParam { index, kind }));
        self
    }

    /// Add a hashed string literal
    pub fn with_hashed_string(mut self, s: &str) -> Self {
        self.hashed_strings.add(s);
        self
    }
}
