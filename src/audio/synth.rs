//! Scene synthesis through an external program.
//!
//! Annotations describe a scene; the audio itself is rendered by a
//! synthesizer (scaper by default) invoked as a child process.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::SynthesisConfig;
use crate::constants::synthesis::{ANNOTATION_PLACEHOLDER, AUDIO_PLACEHOLDER, POLL_INTERVAL_MS};
use crate::error::{Error, Result};

/// Renders the audio of an annotated scene.
pub trait SceneSynthesizer: Sync {
    /// Render the scene described by `annotation` into `target`.
    fn synthesize(&self, annotation: &Path, target: &Path) -> Result<()>;
}

/// Synthesizer that runs an external command.
///
/// Every argument has `{annotation}` and `{audio}` replaced with the
/// annotation path and the target audio path.
#[derive(Debug, Clone)]
pub struct CommandSynthesizer {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandSynthesizer {
    /// Create a synthesizer running `program` with `args`.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: None,
        }
    }

    /// Kill the synthesizer if it runs longer than `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a synthesizer from configuration.
    pub fn from_config(config: &SynthesisConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
            .with_timeout(config.timeout_secs.map(Duration::from_secs))
    }

    fn expand_args(&self, annotation: &Path, target: &Path) -> Vec<String> {
        let annotation = annotation.to_string_lossy();
        let target = target.to_string_lossy();
        self.args
            .iter()
            .map(|arg| {
                arg.replace(ANNOTATION_PLACEHOLDER, &annotation)
                    .replace(AUDIO_PLACEHOLDER, &target)
            })
            .collect()
    }

    /// Wait for `child`, killing it once the deadline passes.
    fn wait_with_deadline(
        child: &mut Child,
        timeout: Duration,
        target: &Path,
    ) -> Result<ExitStatus> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                if let Err(e) = child.kill() {
                    warn!("Failed to kill synthesizer: {e}");
                }
                let _ = child.wait();
                return Err(Error::SynthesisTimeout {
                    path: target.to_path_buf(),
                    timeout_secs: timeout.as_secs(),
                });
            }
            thread::sleep(Duration::from_millis(POLL_INTERVAL_MS));
        }
    }
}

impl SceneSynthesizer for CommandSynthesizer {
    fn synthesize(&self, annotation: &Path, target: &Path) -> Result<()> {
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::OutputDirCreateFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let args = self.expand_args(annotation, target);
        debug!("Synthesizing {}: {} {:?}", target.display(), self.program, args);

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::SynthesisSpawn {
                program: self.program.clone(),
                source: e,
            })?;

        // Drain stderr concurrently so a chatty child cannot fill the pipe.
        let stderr_reader = child.stderr.take().map(|mut stderr| {
            thread::spawn(move || {
                let mut text = String::new();
                let _ = stderr.read_to_string(&mut text);
                text
            })
        });

        let status = match self.timeout {
            Some(timeout) => Self::wait_with_deadline(&mut child, timeout, target),
            None => child.wait().map_err(Error::from),
        };
        // A killed synthesizer may leave descendants holding the pipe open.
        let stderr = match (&status, stderr_reader) {
            (Ok(_), Some(handle)) => handle.join().unwrap_or_default(),
            _ => String::new(),
        };

        let outcome = match status {
            Ok(status) if status.success() => {
                if target.is_file() {
                    Ok(())
                } else {
                    Err(Error::SynthesisOutputMissing {
                        path: target.to_path_buf(),
                    })
                }
            }
            Ok(status) => Err(Error::SynthesisFailed {
                path: target.to_path_buf(),
                status: status.to_string(),
                stderr: stderr.trim().to_string(),
            }),
            Err(e) => Err(e),
        };

        // Partial output would be mistaken for a finished scene on the next run.
        if outcome.is_err() && target.exists() {
            let _ = std::fs::remove_file(target);
        }
        outcome
    }
}

#[cfg(all(test, unix))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sh(script: &str) -> CommandSynthesizer {
        CommandSynthesizer::new(
            "sh",
            vec![
                "-c".to_string(),
                script.to_string(),
                "synth".to_string(),
                "{annotation}".to_string(),
                "{audio}".to_string(),
            ],
        )
    }

    #[test]
    fn test_expand_args_replaces_placeholders() {
        let synth = CommandSynthesizer::new(
            "synth",
            vec!["--in={annotation}".to_string(), "{audio}".to_string()],
        );
        let args = synth.expand_args(Path::new("/d/a.jams"), Path::new("/d/a.wav"));
        assert_eq!(args, vec!["--in=/d/a.jams", "/d/a.wav"]);
    }

    #[test]
    fn test_successful_synthesis_creates_target() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("audio").join("scene.wav");
        let synth = sh(r#"cp "$1" "$2""#);
        let annotation = dir.path().join("scene.jams");
        std::fs::write(&annotation, "{}").unwrap();

        synth.synthesize(&annotation, &target).unwrap();
        assert!(target.is_file());
    }

    #[test]
    fn test_failing_synthesizer_reports_stderr() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("scene.wav");
        let synth = sh("echo 'bad annotation' >&2; exit 3");

        let err = synth
            .synthesize(Path::new("scene.jams"), &target)
            .unwrap_err();
        assert!(
            matches!(&err, Error::SynthesisFailed { stderr, .. } if stderr == "bad annotation"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_success_without_output_is_an_error() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("scene.wav");
        let synth = sh("exit 0");

        let err = synth
            .synthesize(Path::new("scene.jams"), &target)
            .unwrap_err();
        assert!(matches!(err, Error::SynthesisOutputMissing { .. }));
    }

    #[test]
    fn test_timeout_kills_synthesizer() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("scene.wav");
        let synth = sh("exec sleep 5").with_timeout(Some(Duration::from_millis(200)));

        let started = Instant::now();
        let err = synth
            .synthesize(Path::new("scene.jams"), &target)
            .unwrap_err();
        assert!(matches!(err, Error::SynthesisTimeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let synth = CommandSynthesizer::new("definitely-not-a-real-synth", Vec::new());
        let err = synth
            .synthesize(Path::new("a.jams"), Path::new("a.wav"))
            .unwrap_err();
        assert!(matches!(err, Error::SynthesisSpawn { .. }));
    }
}
