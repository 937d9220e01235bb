use std::fmt;

/// Name of the option an error refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptName {
    Short(char),
    Long(String),
}

impl fmt::Display for OptName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptName::Short(c) => write!(f, "{}", c),
            OptName::Long(s) => write!(f, "{}", s),
        }
    }
}

/// Recoverable scan errors. The session stays usable after any of them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unknown option -- {0}")]
    UnknownOption(OptName),

    #[error("option doesn't take an argument -- {0}")]
    UnwantedArgument(String),

    #[error("option requires an argument -- {0}")]
    MissingArgument(OptName),

    #[error("ambiguous option -- {0}")]
    AmbiguousOption(String),
}

impl Error {
    /// The character or name that failed to resolve.
    pub fn name(&self) -> OptName {
        match self {
            Error::UnknownOption(n) | Error::MissingArgument(n) => n.clone(),
            Error::UnwantedArgument(s) | Error::AmbiguousOption(s) => OptName::Long(s.clone()),
        }
    }
}

/// Render a diagnostic line the way it is written to stderr.
pub fn diagnostic(progname: &str, err: &Error) -> String {
    if progname.is_empty() {
        err.to_string()
    } else {
        format!("{}: {}", progname, err)
    }
}

pub(crate) fn warnx(progname: &str, err: &Error) {
    tracing::debug!(error = %err, "reporting scan error");
    eprintln!("{}", diagnostic(progname, err));
}
