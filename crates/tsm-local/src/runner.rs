//! Running an installation's helper scripts.

use crate::error::{LocalError, LocalResult};
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

/// How a finished process exited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    /// Exit code, `None` if the process was killed by a signal
    pub code: Option<i32>,
}

impl ExitOutcome {
    /// Returns true if the process exited with code 0
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Launches external programs
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` to completion
    async fn run(&self, program: &str, args: &[String]) -> LocalResult<ExitOutcome>;
}

/// [`CommandRunner`] that spawns real processes, inheriting stdio
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[String]) -> LocalResult<ExitOutcome> {
        debug!(program, ?args, "spawning");

        let status = tokio::process::Command::new(program)
            .args(args)
            .status()
            .await
            .map_err(|source| LocalError::Spawn {
                program: program.to_string(),
                source,
            })?;

        Ok(ExitOutcome {
            code: status.code(),
        })
    }
}

/// Run `script` under `python`, failing unless it exits with code 0
pub async fn run_script(
    runner: &dyn CommandRunner,
    python: &str,
    script: &Path,
    args: &[String],
) -> LocalResult<()> {
    let mut argv = Vec::with_capacity(args.len() + 1);
    argv.push(script.display().to_string());
    argv.extend_from_slice(args);

    let outcome = runner.run(python, &argv).await?;
    if outcome.success() {
        Ok(())
    } else {
        Err(LocalError::Exit {
            program: script
                .file_name()
                .map_or_else(|| script.display().to_string(), |n| n.to_string_lossy().into_owned()),
            code: outcome.code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recording {
        code: Option<i32>,
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl Recording {
        fn exiting(code: Option<i32>) -> Self {
            Self {
                code,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CommandRunner for Recording {
        async fn run(&self, program: &str, args: &[String]) -> LocalResult<ExitOutcome> {
            self.calls
                .lock()
                .unwrap()
                .push((program.to_string(), args.to_vec()));
            Ok(ExitOutcome { code: self.code })
        }
    }

    #[tokio::test]
    async fn test_run_script_argv() {
        let runner = Recording::exiting(Some(0));
        let script = Path::new("/sdks/2.1.1/titanium.py");

        run_script(&runner, "python", script, &["create".into(), "--help".into()])
            .await
            .unwrap();

        let calls = runner.calls.into_inner().unwrap();
        assert_eq!(
            calls,
            [(
                "python".to_string(),
                vec![
                    "/sdks/2.1.1/titanium.py".to_string(),
                    "create".to_string(),
                    "--help".to_string()
                ]
            )]
        );
    }

    #[tokio::test]
    async fn test_run_script_nonzero_exit() {
        let runner = Recording::exiting(Some(3));
        let err = run_script(&runner, "python", Path::new("/sdks/2.1.1/iphone/builder.py"), &[])
            .await
            .unwrap_err();

        match err {
            LocalError::Exit { program, code } => {
                assert_eq!(program, "builder.py");
                assert_eq!(code, Some(3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_run_script_signal() {
        let runner = Recording::exiting(None);
        let err = run_script(&runner, "python", Path::new("titanium.py"), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, LocalError::Exit { code: None, .. }));
    }

    #[tokio::test]
    async fn test_system_runner_missing_program() {
        let err = SystemRunner
            .run("tsm-definitely-not-a-program", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, LocalError::Spawn { .. }));
    }
}
