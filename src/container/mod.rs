//! Container engine plumbing
//!
//! Builds the engine command lines for the two steps and runs them:
//! - [`BuildInvocation`]: `build -t <image> <context>`
//! - [`RunInvocation`]: `run -it --rm -e ... -v ... <image>`
//! - [`ContainerEngine`]: the seam the launcher drives; [`CliEngine`]
//!   spawns the real client.

mod engine;
mod invocation;

pub use engine::{status_code, CliEngine, ContainerEngine};
pub use invocation::{BuildInvocation, Invocation, InvocationView, RunInvocation};
