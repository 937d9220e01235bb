//! Test driver for getopt end-to-end tests.
//!
//! Spawns `tgetopt` with:
//! - a clean environment for the variables the driver reads
//!   (`POSIXLY_CORRECT`, `TGETOPT_*`, `RUST_LOG`), plus the ones a test sets
//! - stdout and stderr piped, captured for assertions

use std::process::{Child, Command, Stdio};

/// Variables that change how `tgetopt` scans; removed unless a test sets them.
const SCRUBBED_ENV: &[&str] = &[
    "POSIXLY_CORRECT",
    "TGETOPT_MODE",
    "TGETOPT_PREFIX",
    "TGETOPT_SILENT",
    "RUST_LOG",
];

/// A running tgetopt process.
pub struct TestSession {
    child: Child,
}

impl TestSession {
    /// Spawn `binary` with the given arguments.
    ///
    /// `env` are additional environment variables to set.
    pub fn spawn(binary: &str, args: &[&str], env: &[(&str, &str)]) -> std::io::Result<TestSession> {
        let mut cmd = Command::new(binary);
        cmd.args(args);
        for key in SCRUBBED_ENV {
            cmd.env_remove(key);
        }
        for (k, v) in env {
            cmd.env(k, v);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let child = cmd.spawn()?;
        Ok(TestSession { child })
    }

    /// Wait for the child to exit and assert the exit code.
    pub fn wait_exit(self, expected_code: i32) -> SessionOutput {
        let output = self
            .child
            .wait_with_output()
            .expect("failed to wait for child");
        let code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        assert_eq!(
            code, expected_code,
            "expected exit code {expected_code}, got {code}\nstdout:\n{stdout}\nstderr:\n{stderr}"
        );

        SessionOutput { stdout, stderr }
    }
}

/// Output captured from a completed session.
pub struct SessionOutput {
    pub stdout: String,
    pub stderr: String,
}

impl SessionOutput {
    /// Stdout split into lines.
    pub fn lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }

    /// The step lines, without the trailing `index:` and `argv:` summary.
    pub fn steps(&self) -> Vec<&str> {
        self.stdout
            .lines()
            .filter(|l| !l.starts_with("index: ") && !l.starts_with("argv: "))
            .collect()
    }

    /// Value of the `index:` summary line.
    pub fn index(&self) -> usize {
        self.summary("index: ")
            .and_then(|s| s.parse().ok())
            .expect("no index line in output")
    }

    /// Value of the `argv:` summary line.
    pub fn argv(&self) -> &str {
        self.summary("argv: ").expect("no argv line in output")
    }

    fn summary(&self, prefix: &str) -> Option<&str> {
        self.stdout.lines().find_map(|l| l.strip_prefix(prefix))
    }
}
