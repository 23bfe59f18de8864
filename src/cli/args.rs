//! CLI argument parsing
//!
//! Every option has a default, so a bare `guibox` builds and runs the
//! default image. Each option can also come from a `GUIBOX_*` variable.

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::config::{BuildFailurePolicy, ImageRef, LaunchConfig, DEFAULT_CONTEXT, DEFAULT_ENGINE};
use crate::error::{LaunchError, Result};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "guibox")]
#[command(author, version, about = "Build a container image and run it on the host's display", long_about = None)]
pub struct Args {
    /// Container engine executable (docker, podman, or a path)
    #[arg(long, env = "GUIBOX_ENGINE", default_value = DEFAULT_ENGINE)]
    pub engine: String,

    /// Image to build and run, as NAME[:TAG]
    #[arg(long, env = "GUIBOX_IMAGE", default_value = "cadquery-conda:latest")]
    pub image: String,

    /// Build context directory
    #[arg(long, env = "GUIBOX_CONTEXT", default_value = DEFAULT_CONTEXT)]
    pub context: PathBuf,

    /// Run the existing image without building
    #[arg(long, env = "GUIBOX_SKIP_BUILD", value_parser = BoolishValueParser::new())]
    pub skip_build: bool,

    /// Run the image even if the build fails
    #[arg(long, env = "GUIBOX_KEEP_GOING", value_parser = BoolishValueParser::new())]
    pub keep_going: bool,

    /// Print the engine commands instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// With --dry-run, print the commands as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Turn parsed arguments into a launch configuration. Fields without a
    /// flag keep their [`LaunchConfig::default`] values.
    pub fn to_config(&self) -> Result<LaunchConfig> {
        let engine = self.engine.trim();
        if engine.is_empty() {
            return Err(LaunchError::Config("engine must not be empty".to_string()));
        }

        Ok(LaunchConfig {
            engine: engine.to_string(),
            image: ImageRef::parse(&self.image)?,
            context: self.context.clone(),
            skip_build: self.skip_build,
            on_build_failure: if self.keep_going {
                BuildFailurePolicy::Continue
            } else {
                BuildFailurePolicy::Abort
            },
            ..LaunchConfig::default()
        })
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_gives_default_config() {
        let args = Args::try_parse_from(["guibox"]).unwrap();
        let config = args.to_config().unwrap();
        assert_eq!(config, LaunchConfig::default());
    }

    #[test]
    fn test_positional_arguments_rejected() {
        assert!(Args::try_parse_from(["guibox", "extra"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "guibox",
            "--engine",
            "podman",
            "--image",
            "cad/app:dev",
            "--context",
            "docker",
            "--skip-build",
            "--keep-going",
        ])
        .unwrap();
        let config = args.to_config().unwrap();
        assert_eq!(config.engine, "podman");
        assert_eq!(config.image.to_string(), "cad/app:dev");
        assert_eq!(config.context, PathBuf::from("docker"));
        assert!(config.skip_build);
        assert_eq!(config.on_build_failure, BuildFailurePolicy::Continue);
        assert_eq!(config.mounts, LaunchConfig::default().mounts);
    }

    #[test]
    fn test_invalid_image_is_config_error() {
        let args = Args::try_parse_from(["guibox", "--image", "Bad Image"]).unwrap();
        assert!(matches!(
            args.to_config(),
            Err(LaunchError::InvalidImageRef { .. })
        ));
    }

    #[test]
    fn test_json_requires_dry_run() {
        assert!(Args::try_parse_from(["guibox", "--json"]).is_err());
        let args = Args::try_parse_from(["guibox", "--dry-run", "--json"]).unwrap();
        assert_eq!(args.output_format(), OutputFormat::Json);
    }

    #[test]
    fn test_verbose_counts() {
        let args = Args::try_parse_from(["guibox", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }
}
