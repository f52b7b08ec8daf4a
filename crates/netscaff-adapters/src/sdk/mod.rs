//! SDK command-line adapters.

mod dotnet;
mod scripted;

pub use dotnet::{DEFAULT_EXECUTABLE, DotnetCli};
pub use scripted::ScriptedSdk;
