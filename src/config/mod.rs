//! Launch configuration
//!
//! [`LaunchConfig::default`] is the fixed setup the launcher always used:
//! build `cadquery-conda:latest` from the current directory, then run it
//! interactively with the host's display sockets and variables passed in.

mod image;
mod mount;

use std::path::PathBuf;

pub use image::{ImageRef, DEFAULT_TAG};
pub use mount::{AccessMode, BindMount, MountSource};

pub const DEFAULT_ENGINE: &str = "docker";
pub const DEFAULT_IMAGE_NAME: &str = "cadquery-conda";
pub const DEFAULT_CONTEXT: &str = ".";
pub const X11_SOCKET_DIR: &str = "/tmp/.X11-unix";
pub const XDG_RUNTIME_DIR: &str = "XDG_RUNTIME_DIR";

/// Host variables forwarded into the container by name
pub const DISPLAY_VARS: [&str; 3] = ["DISPLAY", "WAYLAND_DISPLAY", XDG_RUNTIME_DIR];

/// What to do when the build step exits nonzero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildFailurePolicy {
    /// Stop and exit with the build's code
    #[default]
    Abort,
    /// Run the image anyway, like an unguarded shell script would
    Continue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Container engine executable (`docker`, `podman`, or a path)
    pub engine: String,
    pub image: ImageRef,
    /// Build context directory
    pub context: PathBuf,
    /// Host variables forwarded by name
    pub forward_env: Vec<String>,
    pub mounts: Vec<BindMount>,
    /// Attach stdin and a pseudo-terminal (`-it`)
    pub interactive: bool,
    /// Delete the container when it exits (`--rm`)
    pub remove_on_exit: bool,
    pub skip_build: bool,
    pub on_build_failure: BuildFailurePolicy,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            engine: DEFAULT_ENGINE.to_string(),
            image: ImageRef {
                name: DEFAULT_IMAGE_NAME.to_string(),
                tag: DEFAULT_TAG.to_string(),
            },
            context: PathBuf::from(DEFAULT_CONTEXT),
            forward_env: DISPLAY_VARS.iter().map(|v| v.to_string()).collect(),
            mounts: vec![
                BindMount::from_env(XDG_RUNTIME_DIR, AccessMode::Default),
                BindMount::same_path(X11_SOCKET_DIR, AccessMode::ReadWrite),
            ],
            interactive: true,
            remove_on_exit: true,
            skip_build: false,
            on_build_failure: BuildFailurePolicy::Abort,
        }
    }
}

impl LaunchConfig {
    /// Host variables the launcher has to snapshot before running: the
    /// forwarded ones plus any that name a mount source.
    pub fn env_names(&self) -> Vec<String> {
        let mut names = self.forward_env.clone();
        for mount in &self.mounts {
            if let MountSource::Env(var) = &mount.source {
                if !names.contains(var) {
                    names.push(var.clone());
                }
            }
        }
        names
    }
}
