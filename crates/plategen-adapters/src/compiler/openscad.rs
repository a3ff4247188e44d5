//! OpenSCAD as a child process.
//!
//! Runs `openscad -o <output> <input>`. The export format follows the output
//! extension. stdout and stderr are drained on their own threads so a chatty
//! compiler cannot block on a full pipe while we wait for it.
//!
//! On unix the compiler leads its own process group. A timeout kills the
//! whole group, so launchers that fork the real binary (shell wrappers,
//! AppImage, snap) do not outlive the deadline. Output still held open by a
//! stray descendant is abandoned after [`DRAIN_GRACE`].

use std::ffi::OsStr;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStderr, ChildStdout, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, instrument, warn};

use plategen_core::{
    application::{
        ApplicationError,
        ports::{CompileOutcome, CompileStatus, GeometryCompiler},
    },
    error::PlateResult,
};

pub const DEFAULT_BINARY: &str = "openscad";

const POLL_INTERVAL: Duration = Duration::from_millis(25);
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);
/// How long to keep collecting output once the child is gone.
const DRAIN_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct OpenScadCompiler {
    binary: PathBuf,
    extra_args: Vec<String>,
}

impl OpenScadCompiler {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            extra_args: Vec::new(),
        }
    }

    /// Arguments inserted before `-o`, e.g. `--backend=manifold`.
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn spawn(&self, args: &[&OsStr]) -> PlateResult<Child> {
        let mut command = Command::new(&self.binary);
        command
            .args(&self.extra_args)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        command.spawn().map_err(|e| {
            ApplicationError::CompilerUnavailable {
                reason: format!("{}: {e}", self.binary.display()),
            }
            .into()
        })
    }
}

impl Default for OpenScadCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY)
    }
}

impl GeometryCompiler for OpenScadCompiler {
    #[instrument(skip_all, fields(input = %input.display()))]
    fn compile(
        &self,
        input: &Path,
        output: &Path,
        timeout: Duration,
    ) -> PlateResult<CompileOutcome> {
        let started = Instant::now();
        let child = self.spawn(&[OsStr::new("-o"), output.as_os_str(), input.as_os_str()])?;
        let finished = supervise(child, timeout)?;

        let status = match finished.exit {
            None => CompileStatus::TimedOut,
            Some(exit) if exit.success() => CompileStatus::Success,
            Some(exit) => CompileStatus::Failed { code: exit.code() },
        };
        debug!(?status, elapsed = ?started.elapsed(), "openscad finished");

        Ok(CompileOutcome {
            status,
            diagnostics: finished.diagnostics(),
        })
    }

    fn probe(&self) -> PlateResult<String> {
        let child = self.spawn(&[OsStr::new("--version")])?;
        let finished = supervise(child, PROBE_TIMEOUT)?;

        match finished.exit {
            Some(exit) if exit.success() => Ok(finished
                .first_line()
                .unwrap_or_else(|| self.binary.display().to_string())),
            Some(exit) => Err(ApplicationError::CompilerUnavailable {
                reason: format!("--version exited with {exit}"),
            }
            .into()),
            None => Err(ApplicationError::CompilerUnavailable {
                reason: "--version did not answer".into(),
            }
            .into()),
        }
    }
}

/// A child that has exited or been killed, with everything it printed.
struct Finished {
    /// `None` when the child was killed for exceeding its time.
    exit: Option<ExitStatus>,
    stdout: String,
    stderr: String,
}

impl Finished {
    fn diagnostics(&self) -> String {
        match (self.stdout.trim(), self.stderr.trim()) {
            ("", err) => err.to_string(),
            (out, "") => out.to_string(),
            (out, err) => format!("{err}\n{out}"),
        }
    }

    /// OpenSCAD prints its version on stderr; accept either stream.
    fn first_line(&self) -> Option<String> {
        self.stderr
            .lines()
            .chain(self.stdout.lines())
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(str::to_string)
    }
}

fn supervise(mut child: Child, timeout: Duration) -> PlateResult<Finished> {
    let stdout = drain(child.stdout.take(), "stdout");
    let stderr = drain(child.stderr.take(), "stderr");
    let deadline = Instant::now() + timeout;

    let exit = loop {
        match child.try_wait() {
            Ok(Some(status)) => break Some(status),
            Ok(None) if Instant::now() >= deadline => {
                kill(&mut child);
                break None;
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => {
                kill(&mut child);
                return Err(ApplicationError::CompilerUnavailable {
                    reason: format!("lost track of compiler process: {e}"),
                }
                .into());
            }
        }
    };

    // A descendant may still hold the pipes; never wait past the deadline
    // for its output.
    let cutoff = Instant::now().max(deadline) + DRAIN_GRACE;
    Ok(Finished {
        exit,
        stdout: collect(stdout, cutoff),
        stderr: collect(stderr, cutoff),
    })
}

fn kill(child: &mut Child) {
    let pid = child.id();

    #[cfg(unix)]
    {
        // The child leads its own group (see `spawn`), so its pid is the pgid.
        // SAFETY: killpg only sends a signal and touches no memory.
        let rc = unsafe { libc::killpg(pid as libc::pid_t, libc::SIGKILL) };
        if rc != 0 {
            let e = std::io::Error::last_os_error();
            warn!(error = %e, pid, "failed to kill compiler process group");
        }
    }
    #[cfg(not(unix))]
    if let Err(e) = child.kill() {
        warn!(error = %e, pid, "failed to kill compiler");
    }

    // Reap it so no zombie is left behind.
    if let Err(e) = child.wait() {
        debug!(error = %e, pid, "failed to reap compiler");
    }
}

trait Pipe: Read + Send + 'static {}
impl Pipe for ChildStdout {}
impl Pipe for ChildStderr {}

/// Read a pipe to the end on a detached thread.
fn drain(pipe: Option<impl Pipe>, stream: &'static str) -> Option<Receiver<String>> {
    pipe.map(|mut pipe| {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = Vec::new();
            if let Err(e) = pipe.read_to_end(&mut buf) {
                debug!(error = %e, stream, "compiler output truncated");
            }
            // The receiver is gone once the grace period has passed.
            let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
        });
        rx
    })
}

fn collect(output: Option<Receiver<String>>, cutoff: Instant) -> String {
    let Some(rx) = output else {
        return String::new();
    };
    match rx.recv_timeout(cutoff.saturating_duration_since(Instant::now())) {
        Ok(text) => text,
        Err(e) => {
            debug!(error = %e, "gave up on compiler output");
            String::new()
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    use plategen_core::error::PlateError;

    use super::*;

    /// Write an executable shell script standing in for openscad.
    fn fake_compiler(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-openscad");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn success_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        // $1 = -o, $2 = output, $3 = input
        let bin = fake_compiler(dir.path(), r#"cp "$3" "$2""#);
        let input = dir.path().join("plate.scad");
        let output = dir.path().join("A-1.stl");
        fs::write(&input, "cube(1);").unwrap();

        let outcome = OpenScadCompiler::new(bin)
            .compile(&input, &output, Duration::from_secs(5))
            .unwrap();

        assert_eq!(outcome.status, CompileStatus::Success);
        assert_eq!(fs::read_to_string(&output).unwrap(), "cube(1);");
    }

    #[test]
    fn non_zero_exit_keeps_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let bin = fake_compiler(dir.path(), "echo 'ERROR: Parser error' >&2\nexit 3");

        let outcome = OpenScadCompiler::new(bin)
            .compile(
                &dir.path().join("in.scad"),
                &dir.path().join("out.stl"),
                Duration::from_secs(5),
            )
            .unwrap();

        assert_eq!(outcome.status, CompileStatus::Failed { code: Some(3) });
        assert!(outcome.diagnostics.contains("Parser error"));
    }

    #[test]
    fn slow_compiler_is_killed() {
        let dir = tempfile::tempdir().unwrap();
        let bin = fake_compiler(dir.path(), "exec sleep 10");

        let started = Instant::now();
        let outcome = OpenScadCompiler::new(bin)
            .compile(
                &dir.path().join("in.scad"),
                &dir.path().join("out.stl"),
                Duration::from_millis(200),
            )
            .unwrap();

        assert_eq!(outcome.status, CompileStatus::TimedOut);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn timeout_also_stops_forked_children() {
        let dir = tempfile::tempdir().unwrap();
        // No `exec`: the shell forks `sleep`, which inherits both pipes.
        let bin = fake_compiler(dir.path(), "sleep 4");

        let started = Instant::now();
        let outcome = OpenScadCompiler::new(bin)
            .compile(
                &dir.path().join("in.scad"),
                &dir.path().join("out.stl"),
                Duration::from_millis(200),
            )
            .unwrap();

        assert_eq!(outcome.status, CompileStatus::TimedOut);
        assert!(
            started.elapsed() < Duration::from_secs(2),
            "took {:?}",
            started.elapsed()
        );
    }

    #[test]
    fn output_held_by_escaped_child_is_abandoned() {
        let dir = tempfile::tempdir().unwrap();
        // The background job keeps stdout open after the compiler exits 0.
        let bin = fake_compiler(dir.path(), "sleep 4 &\necho done");

        let started = Instant::now();
        let outcome = OpenScadCompiler::new(bin)
            .compile(
                &dir.path().join("in.scad"),
                &dir.path().join("out.stl"),
                Duration::from_millis(300),
            )
            .unwrap();

        assert_eq!(outcome.status, CompileStatus::Success);
        assert!(
            started.elapsed() < Duration::from_secs(2),
            "took {:?}",
            started.elapsed()
        );
    }

    #[test]
    fn missing_binary_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = OpenScadCompiler::new(dir.path().join("no-such-openscad"))
            .compile(
                &dir.path().join("in.scad"),
                &dir.path().join("out.stl"),
                Duration::from_secs(1),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            PlateError::Application(ApplicationError::CompilerUnavailable { .. })
        ));
    }

    #[test]
    fn probe_reads_version_from_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let bin = fake_compiler(dir.path(), "echo 'OpenSCAD version 2021.01' >&2");

        let version = OpenScadCompiler::new(bin).probe().unwrap();
        assert_eq!(version, "OpenSCAD version 2021.01");
    }

    #[test]
    fn extra_args_come_first() {
        let dir = tempfile::tempdir().unwrap();
        // With one extra arg the output path shifts to $3.
        let bin = fake_compiler(
            dir.path(),
            r#"[ "$1" = "--backend=manifold" ] || exit 9
echo solid > "$3""#,
        );
        let output = dir.path().join("out.stl");

        let outcome = OpenScadCompiler::new(bin)
            .with_args(["--backend=manifold"])
            .compile(&dir.path().join("in.scad"), &output, Duration::from_secs(5))
            .unwrap();

        assert_eq!(outcome.status, CompileStatus::Success);
        assert!(output.exists());
    }
}
