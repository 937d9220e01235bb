//! Process facts the scanner consults once per session.

use std::path::Path;

/// Environment variable that forces POSIX behaviour (no permutation).
pub const POSIXLY_CORRECT: &str = "POSIXLY_CORRECT";

pub trait Environment {
    /// Name to prefix diagnostics with.
    fn program_name(&self) -> String;

    /// Whether strict POSIX ordering was requested.
    fn posixly_correct(&self) -> bool;
}

/// Reads `argv[0]` and the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn program_name(&self) -> String {
        std::env::args_os()
            .next()
            .and_then(|argv0| {
                Path::new(&argv0)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            })
            .unwrap_or_default()
    }

    fn posixly_correct(&self) -> bool {
        std::env::var_os(POSIXLY_CORRECT).is_some()
    }
}

/// Fixed answers, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct FixedEnv {
    pub name: String,
    pub posixly_correct: bool,
}

impl FixedEnv {
    pub fn new(name: &str) -> Self {
        FixedEnv {
            name: name.to_string(),
            posixly_correct: false,
        }
    }

    pub fn posix(mut self, on: bool) -> Self {
        self.posixly_correct = on;
        self
    }
}

impl Environment for FixedEnv {
    fn program_name(&self) -> String {
        self.name.clone()
    }

    fn posixly_correct(&self) -> bool {
        self.posixly_correct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_env_answers() {
        let env = FixedEnv::new("prog").posix(true);
        assert_eq!(env.program_name(), "prog");
        assert!(env.posixly_correct());
        assert!(!FixedEnv::new("prog").posixly_correct());
    }

    #[test]
    fn process_env_name_has_no_directory() {
        let name = ProcessEnv.program_name();
        assert!(!name.contains('/'));
    }
}
