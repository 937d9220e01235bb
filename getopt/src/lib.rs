//! Native Rust implementation of the `getopt_long` family.
//!
//! Incremental command-line scanning in the BSD/GNU tradition:
//! - one `step` per option, state kept in a caller-owned [`Session`]
//! - short option clusters, long options with unambiguous abbreviations
//! - in-place permutation of operands behind options
//! - `+`/`-`/`:` spec prefixes, `-W name`, and `POSIXLY_CORRECT`

pub mod env;
pub mod error;
pub mod long;
pub mod permute;
pub mod scanner;
pub mod spec;

pub use env::{Environment, FixedEnv, ProcessEnv};
pub use error::{diagnostic, Error, OptName};
pub use long::{find_long, LongMatch};
pub use permute::permute;
pub use scanner::{Session, Step};
pub use spec::{Flag, HasArg, LongOpt, Mode, Options, OptionsBuilder, ShortSpec};

// ============================================================================
// Getopt: owned argument vector plus session
// ============================================================================

/// Owns the argument vector, the option description and the scan state.
///
/// `args[0]` is the program name and is never scanned.
pub struct Getopt {
    args: Vec<String>,
    options: Options,
    session: Session,
}

impl Getopt {
    pub fn new(args: Vec<String>, options: Options) -> Self {
        Getopt {
            args,
            options,
            session: Session::new(),
        }
    }

    pub fn with_env(args: Vec<String>, options: Options, env: impl Environment + 'static) -> Self {
        Getopt {
            args,
            options,
            session: Session::with_env(env),
        }
    }

    /// Collect the process arguments.
    pub fn from_env(options: Options) -> Self {
        Self::new(std::env::args().collect(), options)
    }

    pub fn step(&mut self) -> Step {
        self.session.step(&mut self.args, &self.options)
    }

    pub fn index(&self) -> usize {
        self.session.index()
    }

    pub fn set_index(&mut self, index: usize) {
        self.session.set_index(index)
    }

    /// The argument vector in its current (possibly permuted) order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Arguments not consumed as options or option values.
    pub fn operands(&self) -> &[String] {
        let start = self.session.index().min(self.args.len());
        &self.args[start..]
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn reset(&mut self) {
        self.session.reset()
    }

    pub fn into_args(self) -> Vec<String> {
        self.args
    }
}

impl Iterator for Getopt {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        match self.step() {
            Step::End => None,
            step => Some(step),
        }
    }
}
