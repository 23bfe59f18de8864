//! Guibox - build a container image and run it on the host's display
//!
//! Guibox runs two engine commands in sequence: it builds an image from a
//! context directory, then runs that image interactively with the host's
//! X11/Wayland sockets mounted and display variables forwarded, so a
//! graphical application inside the container renders on the host.
//!
//! # Example
//!
//! ```no_run
//! use guibox::{CliEngine, HostEnv, LaunchConfig, Launcher};
//!
//! let config = LaunchConfig::default();
//! let host = HostEnv::capture(config.env_names());
//! let launcher = Launcher::new(config, host, CliEngine::new());
//! let outcome = launcher.launch().unwrap();
//! std::process::exit(outcome.exit_code());
//! ```

pub mod cli;
pub mod config;
pub mod container;
pub mod context;
pub mod error;
pub mod launcher;
pub mod logging;
pub mod output;

pub use config::{AccessMode, BindMount, BuildFailurePolicy, ImageRef, LaunchConfig, MountSource};
pub use container::{BuildInvocation, CliEngine, ContainerEngine, Invocation, RunInvocation};
pub use context::HostEnv;
pub use error::{LaunchError, Result};
pub use launcher::{Launcher, Outcome, Plan, Stage};
pub use output::{format_plan, OutputFormat};
