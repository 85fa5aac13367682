#![deny(missing_docs)]

//! # Pipeline Command
//!
//! Runs the configured code-generation stages (type generation, patching,
//! registry construction, ...) in order, then optionally the coverage check.
//!
//! Stages are opaque: only their exit status is observed. The first failing
//! stage stops the pipeline.

use crate::check::{self, CheckArgs};
use crate::config::{FileConfig, PipelineStep};
use crate::error::{CliError, CliResult};
use opcov_core::{AppError, AppResult};
use std::io::Write;
use std::process::{Command, Output};

/// Arguments for the pipeline command.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct PipelineArgs {
    /// Run the coverage check after all stages succeed.
    #[clap(long)]
    pub check: bool,

    /// Check settings, used with `--check`.
    #[clap(flatten)]
    pub check_args: CheckArgs,
}

/// Interface for executing a generation stage.
///
/// Abstracted to allow mocking command execution in tests without requiring the
/// generators to be installed.
pub trait CommandExecutor {
    /// Executes the command and returns the output.
    fn execute(&self, program: &str, args: &[&str]) -> CliResult<Output>;
}

/// Standard executor using `std::process::Command`.
pub struct ShellExecutor;

impl CommandExecutor for ShellExecutor {
    fn execute(&self, program: &str, args: &[&str]) -> CliResult<Output> {
        let output = Command::new(program).args(args).output()?;
        Ok(output)
    }
}

/// Runs every stage in order, stopping at the first failure.
///
/// # Returns
///
/// * Number of stages that ran.
pub fn run_steps<E: CommandExecutor>(
    steps: &[PipelineStep],
    executor: &E,
    out: &mut impl Write,
) -> CliResult<usize> {
    for (idx, step) in steps.iter().enumerate() {
        writeln!(out, "[{}/{}] {}", idx + 1, steps.len(), step.name)?;

        let args: Vec<&str> = step.args.iter().map(String::as_str).collect();
        let output = executor.execute(&step.program, &args).map_err(|e| {
            CliError::General(format!("Step '{}' could not start: {}", step.name, e))
        })?;

        if !output.status.success() {
            return Err(CliError::StepFailed {
                step: step.name.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        tracing::debug!(step = %step.name, "stage succeeded");
    }

    Ok(steps.len())
}

/// Executes the pipeline command.
///
/// # Arguments
///
/// * `args` - Command arguments.
/// * `config` - Configuration holding the stage list.
/// * `executor` - The command runner (use `ShellExecutor` for real execution).
/// * `out` - Destination for progress lines and the optional report.
pub fn execute<E: CommandExecutor>(
    args: &PipelineArgs,
    config: &FileConfig,
    executor: &E,
    out: &mut impl Write,
) -> AppResult<()> {
    if config.pipeline.is_empty() {
        writeln!(out, "No pipeline stages configured.")?;
    } else {
        let ran = run_steps(&config.pipeline, executor, out)
            .map_err(|e| AppError::General(e.to_string()))?;
        writeln!(out, "Pipeline completed: {} stage(s).", ran)?;
    }

    if args.check {
        check::execute(&args.check_args, config, out)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::os::unix::process::ExitStatusExt;
    use std::process::ExitStatus;

    // Mock Executor recording every invocation
    struct MockExecutor {
        calls: RefCell<Vec<(String, Vec<String>)>>,
        fail_program: Option<&'static str>,
    }

    impl MockExecutor {
        fn new(fail_program: Option<&'static str>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_program,
            }
        }
    }

    impl CommandExecutor for MockExecutor {
        fn execute(&self, program: &str, args: &[&str]) -> CliResult<Output> {
            self.calls.borrow_mut().push((
                program.to_string(),
                args.iter().map(|s| s.to_string()).collect(),
            ));

            let fails = self.fail_program == Some(program);
            Ok(Output {
                status: if fails {
                    ExitStatus::from_raw(1 << 8)
                } else {
                    ExitStatus::from_raw(0)
                },
                stdout: Vec::new(),
                stderr: if fails {
                    b"Mock Error\n".to_vec()
                } else {
                    Vec::new()
                },
            })
        }
    }

    fn step(name: &str, program: &str, args: &[&str]) -> PipelineStep {
        PipelineStep {
            name: name.to_string(),
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_steps_run_in_order() {
        let executor = MockExecutor::new(None);
        let steps = vec![
            step("types", "npx", &["openapi-typescript", "openapi.yaml"]),
            step("registry", "node", &["scripts/build-registry.js"]),
        ];

        let mut out = Vec::new();
        let ran = run_steps(&steps, &executor, &mut out).unwrap();
        assert_eq!(ran, 2);

        let calls = executor.calls.take();
        assert_eq!(calls[0].0, "npx");
        assert_eq!(calls[0].1, vec!["openapi-typescript", "openapi.yaml"]);
        assert_eq!(calls[1].0, "node");

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "[1/2] types\n[2/2] registry\n");
    }

    #[test]
    fn test_first_failure_stops_pipeline() {
        let executor = MockExecutor::new(Some("patch"));
        let steps = vec![
            step("types", "npx", &[]),
            step("patch", "patch", &[]),
            step("registry", "node", &[]),
        ];

        let err = run_steps(&steps, &executor, &mut Vec::new()).unwrap_err();
        match err {
            CliError::StepFailed { step, stderr, .. } => {
                assert_eq!(step, "patch");
                assert_eq!(stderr, "Mock Error");
            }
            other => panic!("Wrong error type: {}", other),
        }
        assert_eq!(executor.calls.borrow().len(), 2);
    }

    #[test]
    fn test_empty_pipeline_is_noop() {
        let executor = MockExecutor::new(None);
        let mut out = Vec::new();
        execute(
            &PipelineArgs::default(),
            &FileConfig::default(),
            &executor,
            &mut out,
        )
        .unwrap();

        assert!(executor.calls.borrow().is_empty());
        assert_eq!(String::from_utf8(out).unwrap(), "No pipeline stages configured.\n");
    }

    #[test]
    fn test_failed_stage_skips_check() {
        let executor = MockExecutor::new(Some("npx"));
        let config = FileConfig {
            pipeline: vec![step("types", "npx", &[])],
            ..Default::default()
        };
        let args = PipelineArgs {
            check: true,
            check_args: CheckArgs::default(),
        };

        let err = execute(&args, &config, &executor, &mut Vec::new()).unwrap_err();
        assert!(format!("{}", err).contains("Step 'types' failed"));
    }

    #[test]
    fn test_shell_executor_structure() {
        // `true` exists on any unix; a spawn failure still proves the trait wiring
        match ShellExecutor.execute("true", &[]) {
            Ok(output) => assert!(output.status.success()),
            Err(e) => assert!(matches!(e, CliError::Io(_))),
        }
    }
}
