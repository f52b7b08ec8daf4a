//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a solution" or "report SDK status".

pub mod bootstrap;
pub mod generators;
pub mod scaffold_service;
pub mod sdk_service;

pub use bootstrap::SolutionBootstrapper;
pub use generators::{GenerationContext, GeneratorKind};
pub use scaffold_service::ScaffoldService;
pub use sdk_service::{SdkService, SdkStatus};
