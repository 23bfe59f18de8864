//! Engine command lines for the build and run steps

use std::ffi::OsString;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::{BindMount, ImageRef, LaunchConfig};
use crate::context::HostEnv;

/// A program and its arguments, ready to spawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
}

/// Lossy, string-only view of an [`Invocation`] for display and JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationView {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn view(&self) -> InvocationView {
        InvocationView {
            program: self.program.clone(),
            args: self
                .args
                .iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect(),
        }
    }

    /// Shell-quoted command line, for logs and `--dry-run`
    pub fn command_line(&self) -> String {
        let view = self.view();
        let mut words = Vec::with_capacity(view.args.len() + 1);
        words.push(view.program);
        words.extend(view.args);
        shell_words::join(words)
    }
}

/// `<engine> build -t <image> <context>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInvocation {
    pub program: String,
    pub context: PathBuf,
    pub image: ImageRef,
}

impl BuildInvocation {
    pub fn from_config(config: &LaunchConfig) -> Self {
        Self {
            program: config.engine.clone(),
            context: config.context.clone(),
            image: config.image.clone(),
        }
    }

    pub fn to_invocation(&self) -> Invocation {
        Invocation {
            program: self.program.clone(),
            args: vec![
                "build".into(),
                "-t".into(),
                self.image.to_string().into(),
                self.context.clone().into_os_string(),
            ],
        }
    }
}

/// `<engine> run [-it] [--rm] [-e NAME]... [-v SPEC]... <image>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInvocation {
    pub program: String,
    pub image: ImageRef,
    pub interactive: bool,
    pub remove: bool,
    /// Forwarded by name only; the engine reads the values from the
    /// environment it inherits.
    pub env: Vec<String>,
    /// Rendered `-v` specs
    pub volumes: Vec<OsString>,
}

impl RunInvocation {
    pub fn from_config(config: &LaunchConfig, host: &HostEnv) -> Self {
        Self {
            program: config.engine.clone(),
            image: config.image.clone(),
            interactive: config.interactive,
            remove: config.remove_on_exit,
            env: config.forward_env.clone(),
            volumes: config
                .mounts
                .iter()
                .map(|m: &BindMount| m.volume_spec(host))
                .collect(),
        }
    }

    pub fn to_invocation(&self) -> Invocation {
        let mut args: Vec<OsString> = vec!["run".into()];
        if self.interactive {
            args.push("-it".into());
        }
        if self.remove {
            args.push("--rm".into());
        }
        for name in &self.env {
            args.push("-e".into());
            args.push(name.into());
        }
        for volume in &self.volumes {
            args.push("-v".into());
            args.push(volume.clone());
        }
        args.push(self.image.to_string().into());

        Invocation {
            program: self.program.clone(),
            args,
        }
    }
}
