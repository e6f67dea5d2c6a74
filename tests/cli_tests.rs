//! Binary-level tests for the zenta command.
//!
//! Most commands here finish quickly without a terminal. The signal tests
//! run a short `now` session and interrupt it; frame rendering itself is
//! covered by the library tests.

use std::io::Write;
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;

fn zenta() -> Command {
    let mut cmd = Command::cargo_bin("zenta").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Help and Version
// ============================================================================

#[test]
fn test_help_lists_commands() {
    zenta()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("now"))
        .stdout(predicate::str::contains("anchor"))
        .stdout(predicate::str::contains("reflect"));
}

#[test]
fn test_no_command_prints_help() {
    zenta()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_now_help_lists_flags() {
    zenta()
        .args(["now", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--quick"))
        .stdout(predicate::str::contains("--extended"))
        .stdout(predicate::str::contains("--silent"))
        .stdout(predicate::str::contains("--simple"));
}

#[test]
fn test_version_flag() {
    zenta()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_command_shows_build_info() {
    zenta()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "zenta {}",
            env!("CARGO_PKG_VERSION")
        )))
        .stdout(predicate::str::contains(std::env::consts::OS));
}

#[test]
fn test_verbose_version_logs_build_info_json() {
    zenta()
        .args(["--verbose", "version"])
        .assert()
        .success()
        .stderr(predicate::str::contains("build info"))
        .stderr(predicate::str::contains("\"git_commit\""));
}

#[test]
fn test_completions_bash() {
    zenta()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zenta"));
}

// ============================================================================
// Argument Errors
// ============================================================================

#[test]
fn test_quick_and_extended_conflict() {
    zenta()
        .args(["now", "--quick", "--extended"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_simple_and_complex_conflict() {
    zenta()
        .args(["now", "--simple", "--complex"])
        .assert()
        .failure();
}

#[test]
fn test_unknown_command_fails() {
    zenta().arg("meditate").assert().failure();
}

// ============================================================================
// Anchor Without a Terminal
// ============================================================================

#[test]
fn test_anchor_with_piped_stdin_fails_fast() {
    zenta()
        .arg("anchor")
        .write_stdin("")
        .timeout(Duration::from_secs(10))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("zenta now"));
}

#[test]
fn test_anchor_with_file_stdin_fails_fast() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    input.write_all(b"  q").unwrap();

    zenta()
        .args(["anchor", "--silent"])
        .pipe_stdin(input.path())
        .unwrap()
        .timeout(Duration::from_secs(10))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Carry this calm").not())
        .stderr(predicate::str::contains("not a terminal"));
}

// ============================================================================
// Termination Signals
// ============================================================================

#[cfg(unix)]
mod signal_tests {
    use std::io::Read;
    use std::process::{Child, Command as StdCommand, ExitStatus, Stdio};
    use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
    use std::thread;
    use std::time::{Duration, Instant};

    /// A running `zenta now --quick --simple` with its stdout collected.
    struct RunningNow {
        child: Child,
        chunks: Receiver<Vec<u8>>,
        output: Vec<u8>,
    }

    impl RunningNow {
        fn spawn() -> Self {
            let mut child = StdCommand::new(assert_cmd::cargo::cargo_bin("zenta"))
                .args(["now", "--quick", "--simple"])
                .env_remove("RUST_LOG")
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::null())
                .spawn()
                .unwrap();

            let mut stdout = child.stdout.take().unwrap();
            let (tx, chunks) = mpsc::channel();
            thread::spawn(move || {
                let mut buf = [0u8; 512];
                while let Ok(n) = stdout.read(&mut buf) {
                    if n == 0 || tx.send(buf[..n].to_vec()).is_err() {
                        break;
                    }
                }
            });

            Self {
                child,
                chunks,
                output: Vec::new(),
            }
        }

        fn text(&self) -> String {
            String::from_utf8_lossy(&self.output).into_owned()
        }

        /// Collects stdout until `needle` shows up or `timeout` passes.
        fn wait_for(&mut self, needle: &str, timeout: Duration) -> bool {
            let deadline = Instant::now() + timeout;
            while !self.text().contains(needle) {
                let left = deadline.saturating_duration_since(Instant::now());
                match self.chunks.recv_timeout(left) {
                    Ok(chunk) => self.output.extend(chunk),
                    Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => {
                        return false;
                    }
                }
            }
            true
        }

        fn interrupt(&self) {
            let status = StdCommand::new("kill")
                .args(["-INT", &self.child.id().to_string()])
                .status()
                .unwrap();
            assert!(status.success());
        }

        /// Waits for exit, then drains the rest of stdout.
        fn finish(mut self, timeout: Duration) -> (ExitStatus, String) {
            let deadline = Instant::now() + timeout;
            let status = loop {
                if let Some(status) = self.child.try_wait().unwrap() {
                    break status;
                }
                if Instant::now() > deadline {
                    self.child.kill().unwrap();
                    panic!("zenta did not exit after SIGINT");
                }
                thread::sleep(Duration::from_millis(20));
            };
            while let Ok(chunk) = self.chunks.recv_timeout(Duration::from_secs(1)) {
                self.output.extend(chunk);
            }
            (status, self.text())
        }
    }

    #[test]
    fn test_sigint_during_playback_restores_cursor() {
        let mut run = RunningNow::spawn();
        assert!(run.wait_for("Let's breathe", Duration::from_secs(10)));
        thread::sleep(Duration::from_millis(1500));

        run.interrupt();
        let (status, stdout) = run.finish(Duration::from_secs(10));

        assert_eq!(status.code(), Some(130));
        assert!(stdout.contains("\x1b[?25l"));
        assert!(stdout.trim_end_matches('\n').ends_with("\x1b[?25h"));
        assert!(!stdout.contains("Complete"));
    }

    #[test]
    fn test_sigint_while_quote_types_exits() {
        let mut run = RunningNow::spawn();
        // The cursor is already restored once playback prints its last line
        assert!(run.wait_for("Complete", Duration::from_secs(60)));

        run.interrupt();
        let (status, stdout) = run.finish(Duration::from_secs(10));

        assert_eq!(status.code(), Some(130));
        assert_eq!(stdout.matches("\x1b[?25h").count(), 1);
    }
}
