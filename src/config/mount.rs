//! Bind mount descriptions

use std::ffi::OsString;
use std::path::PathBuf;

use tracing::warn;

use crate::context::HostEnv;

/// Where the host side of a bind mount comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountSource {
    /// A fixed host path
    Path(PathBuf),
    /// The value of a host environment variable
    Env(String),
}

/// Access mode suffix on the volume spec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
    /// No suffix; whatever the runtime defaults to (read-write for docker)
    #[default]
    Default,
    ReadWrite,
    ReadOnly,
}

impl AccessMode {
    fn suffix(self) -> Option<&'static str> {
        match self {
            AccessMode::Default => None,
            AccessMode::ReadWrite => Some("rw"),
            AccessMode::ReadOnly => Some("ro"),
        }
    }
}

/// A host path exposed inside the container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindMount {
    pub source: MountSource,
    /// In-container path; `None` mounts at the same path as the host side.
    pub target: Option<PathBuf>,
    pub mode: AccessMode,
}

impl BindMount {
    /// Mount a fixed host path at the same path inside the container.
    pub fn same_path(path: impl Into<PathBuf>, mode: AccessMode) -> Self {
        Self {
            source: MountSource::Path(path.into()),
            target: None,
            mode,
        }
    }

    /// Mount the directory named by a host variable at the same path.
    pub fn from_env(var: impl Into<String>, mode: AccessMode) -> Self {
        Self {
            source: MountSource::Env(var.into()),
            target: None,
            mode,
        }
    }

    /// Resolve the host path against the environment snapshot. An unset
    /// variable yields an empty path, the same thing the shell would expand
    /// to; the container engine is left to reject it.
    pub fn host_path(&self, env: &HostEnv) -> OsString {
        match &self.source {
            MountSource::Path(path) => path.clone().into_os_string(),
            MountSource::Env(var) => match env.get(var) {
                Some(value) => value.to_os_string(),
                None => {
                    warn!(var = %var, "mount source variable is unset; passing an empty host path");
                    OsString::new()
                }
            },
        }
    }

    /// Render the `-v` argument: `SRC:DST[:mode]`.
    pub fn volume_spec(&self, env: &HostEnv) -> OsString {
        let host = self.host_path(env);
        let target = match &self.target {
            Some(target) => target.clone().into_os_string(),
            None => host.clone(),
        };

        let mut spec = host;
        spec.push(":");
        spec.push(target);
        if let Some(suffix) = self.mode.suffix() {
            spec.push(":");
            spec.push(suffix);
        }
        spec
    }
}
