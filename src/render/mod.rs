pub mod context;
pub mod file;
pub mod walker;

pub use context::build_context;
pub use file::DEFAULT_OPAQUE_EXTENSIONS;
pub use walker::{execute_plan, plan_render, render, GeneratedProject, GenerationPlan, PlannedFile};
