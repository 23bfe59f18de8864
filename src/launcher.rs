//! The build-then-run pipeline

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{BuildFailurePolicy, LaunchConfig};
use crate::container::{BuildInvocation, ContainerEngine, Invocation, InvocationView, RunInvocation};
use crate::context::HostEnv;
use crate::error::Result;

/// Which step produced the final exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Build,
    Run,
}

/// Result of a launch: the last step that ran and its exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub stage: Stage,
    pub code: i32,
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        self.code
    }
}

/// The invocations a launch would make, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub build: Option<Invocation>,
    pub run: Invocation,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanView {
    pub build: Option<InvocationView>,
    pub run: InvocationView,
}

impl Plan {
    pub fn view(&self) -> PlanView {
        PlanView {
            build: self.build.as_ref().map(Invocation::view),
            run: self.run.view(),
        }
    }
}

/// Drives one build and one run through a [`ContainerEngine`]
pub struct Launcher<E> {
    config: LaunchConfig,
    host: HostEnv,
    engine: E,
}

impl<E: ContainerEngine> Launcher<E> {
    pub fn new(config: LaunchConfig, host: HostEnv, engine: E) -> Self {
        Self {
            config,
            host,
            engine,
        }
    }

    fn build_step(&self) -> Option<BuildInvocation> {
        (!self.config.skip_build).then(|| BuildInvocation::from_config(&self.config))
    }

    fn run_step(&self) -> RunInvocation {
        RunInvocation::from_config(&self.config, &self.host)
    }

    /// Describe the invocations without executing anything.
    pub fn plan(&self) -> Plan {
        Plan {
            build: self.build_step().map(|b| b.to_invocation()),
            run: self.run_step().to_invocation(),
        }
    }

    /// Build the image, then run it. Each step blocks until the engine
    /// exits. A failed build ends the launch with the build's code unless
    /// the policy says to continue.
    pub fn launch(&self) -> Result<Outcome> {
        for name in self.host.unset() {
            debug!(var = %name, "host variable is unset; forwarding it unchanged");
        }

        if let Some(build) = self.build_step() {
            info!(image = %build.image, context = %build.context.display(), "building image");
            let code = self.engine.build(&build)?;
            if code != 0 {
                let keep_going = self.config.on_build_failure == BuildFailurePolicy::Continue
                    && !self.engine.interrupted();
                if !keep_going {
                    warn!(code, "build failed; not running the image");
                    return Ok(Outcome {
                        stage: Stage::Build,
                        code,
                    });
                }
                warn!(code, "build failed; running the existing image anyway");
            }
        } else {
            info!("skipping build");
        }

        let run = self.run_step();
        info!(image = %run.image, "running container");
        let code = self.engine.run(&run)?;
        Ok(Outcome {
            stage: Stage::Run,
            code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LaunchError;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io;

    /// Records every invocation and answers with scripted exit codes.
    #[derive(Default)]
    struct RecordingEngine {
        calls: RefCell<Vec<Vec<String>>>,
        codes: RefCell<VecDeque<i32>>,
        fail_spawn: bool,
        interrupted: bool,
    }

    impl RecordingEngine {
        fn with_codes(codes: &[i32]) -> Self {
            Self {
                codes: RefCell::new(codes.iter().copied().collect()),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.borrow().clone()
        }
    }

    impl ContainerEngine for RecordingEngine {
        fn execute(&self, invocation: &Invocation) -> Result<i32> {
            if self.fail_spawn {
                return Err(LaunchError::Spawn {
                    program: invocation.program.clone(),
                    source: io::Error::from(io::ErrorKind::NotFound),
                });
            }
            self.calls.borrow_mut().push(invocation.view().args);
            Ok(self.codes.borrow_mut().pop_front().unwrap_or(0))
        }

        fn interrupted(&self) -> bool {
            self.interrupted
        }
    }

    fn host() -> HostEnv {
        HostEnv::from_pairs([
            ("DISPLAY", Some(":1")),
            ("WAYLAND_DISPLAY", None),
            ("XDG_RUNTIME_DIR", Some("/run/user/1000")),
        ])
    }

    fn launcher(config: LaunchConfig, engine: RecordingEngine) -> Launcher<RecordingEngine> {
        Launcher::new(config, host(), engine)
    }

    #[test]
    fn test_build_then_run() {
        let l = launcher(LaunchConfig::default(), RecordingEngine::with_codes(&[0, 0]));
        let outcome = l.launch().unwrap();
        assert_eq!(outcome, Outcome { stage: Stage::Run, code: 0 });

        let calls = l.engine.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0][0], "build");
        assert_eq!(calls[1][0], "run");
    }

    #[test]
    fn test_build_failure_skips_run() {
        let l = launcher(LaunchConfig::default(), RecordingEngine::with_codes(&[1]));
        let outcome = l.launch().unwrap();
        assert_eq!(outcome, Outcome { stage: Stage::Build, code: 1 });
        assert_eq!(l.engine.calls().len(), 1);
    }

    #[test]
    fn test_run_exit_code_propagates() {
        let l = launcher(LaunchConfig::default(), RecordingEngine::with_codes(&[0, 3]));
        let outcome = l.launch().unwrap();
        assert_eq!(outcome.exit_code(), 3);
    }

    #[test]
    fn test_continue_policy_runs_after_failed_build() {
        let config = LaunchConfig {
            on_build_failure: BuildFailurePolicy::Continue,
            ..LaunchConfig::default()
        };
        let l = launcher(config, RecordingEngine::with_codes(&[2, 0]));
        let outcome = l.launch().unwrap();
        assert_eq!(outcome, Outcome { stage: Stage::Run, code: 0 });
        assert_eq!(l.engine.calls().len(), 2);
    }

    #[test]
    fn test_continue_policy_stops_when_interrupted() {
        let config = LaunchConfig {
            on_build_failure: BuildFailurePolicy::Continue,
            ..LaunchConfig::default()
        };
        let engine = RecordingEngine {
            interrupted: true,
            ..RecordingEngine::with_codes(&[130])
        };
        let l = launcher(config, engine);
        let outcome = l.launch().unwrap();
        assert_eq!(outcome, Outcome { stage: Stage::Build, code: 130 });
        assert_eq!(l.engine.calls().len(), 1);
    }

    #[test]
    fn test_skip_build_runs_only() {
        let config = LaunchConfig {
            skip_build: true,
            ..LaunchConfig::default()
        };
        let l = launcher(config, RecordingEngine::with_codes(&[0]));
        l.launch().unwrap();
        let calls = l.engine.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0][0], "run");
    }

    #[test]
    fn test_spawn_error_propagates() {
        let engine = RecordingEngine {
            fail_spawn: true,
            ..RecordingEngine::default()
        };
        let l = launcher(LaunchConfig::default(), engine);
        let err = l.launch().unwrap_err();
        assert_eq!(err.exit_code(), 127);
    }

    #[test]
    fn test_plan_matches_launch() {
        let l = launcher(LaunchConfig::default(), RecordingEngine::default());
        let plan = l.plan();
        l.launch().unwrap();

        let calls = l.engine.calls();
        assert_eq!(plan.build.unwrap().view().args, calls[0]);
        assert_eq!(plan.run.view().args, calls[1]);
    }

    #[test]
    fn test_plan_omits_skipped_build() {
        let config = LaunchConfig {
            skip_build: true,
            ..LaunchConfig::default()
        };
        let l = launcher(config, RecordingEngine::default());
        assert!(l.plan().build.is_none());
        assert!(l.engine.calls().is_empty());
    }
}
