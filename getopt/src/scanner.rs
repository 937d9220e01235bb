//! The scanning state machine.

use tracing::{debug, trace};

use crate::env::{Environment, ProcessEnv};
use crate::error::{warnx, Error, OptName};
use crate::permute::permute;
use crate::spec::{Mode, Options, Ordering, ShortKind, ShortSpec};

/// Outcome of one scan step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A short option, with its value when it takes one.
    Opt { opt: char, arg: Option<String> },
    /// A long option; `index` is its position in the table.
    Long {
        index: usize,
        val: i32,
        arg: Option<String>,
    },
    /// A long option whose value was written to its flag cell.
    Stored { index: usize, arg: Option<String> },
    /// A non-option handed back in order (`-` spec prefix).
    Operand(String),
    Error(Error),
    /// Nothing more to scan. Remaining operands start at `Session::index()`.
    End,
}

#[derive(Debug, Clone, Copy)]
struct ScanFlags {
    permute: bool,
    all_args: bool,
    long_only: bool,
}

/// Cross-call scan state. One session drives one pass over an argument
/// vector; `reset` starts a new pass.
pub struct Session {
    pub(crate) index: usize,
    /// Byte offset of the next unscanned character in `args[index]`.
    pub(crate) place: Option<usize>,
    nonopt_start: Option<usize>,
    nonopt_end: Option<usize>,
    reset: bool,
    posixly_correct: Option<bool>,
    progname: Option<String>,
    env: Box<dyn Environment>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_env(ProcessEnv)
    }

    pub fn with_env(env: impl Environment + 'static) -> Self {
        Session {
            index: 1,
            place: None,
            nonopt_start: None,
            nonopt_end: None,
            reset: false,
            posixly_correct: None,
            progname: None,
            env: Box::new(env),
        }
    }

    /// Index of the next argument to scan.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move the scan position. Setting it to 0 restarts the session.
    pub fn set_index(&mut self, index: usize) {
        self.index = index;
        self.place = None;
    }

    /// Restart at index 1 on the next step, forgetting deferred operands and
    /// re-reading the environment.
    pub fn reset(&mut self) {
        self.index = 1;
        self.place = None;
        self.reset = true;
    }

    fn scan_flags(&self, spec: &ShortSpec, mode: Mode) -> ScanFlags {
        let mut flags = ScanFlags {
            permute: mode.permutes(),
            all_args: false,
            long_only: mode == Mode::LongOnly,
        };
        match spec.ordering() {
            Ordering::ReturnInOrder => flags.all_args = true,
            Ordering::RequireOrder => flags.permute = false,
            Ordering::Permute => {
                if self.posixly_correct == Some(true) {
                    flags.permute = false;
                }
            }
        }
        flags
    }

    pub(crate) fn report(&mut self, opts: &Options, err: Error) -> Step {
        if opts.reports_errors() {
            if self.progname.is_none() {
                self.progname = Some(self.env.program_name());
            }
            warnx(self.progname.as_deref().unwrap_or(""), &err);
        }
        Step::Error(err)
    }

    /// Swap a closed deferred block behind the options that followed it.
    fn flush_deferred(&mut self, args: &mut [String]) {
        if let (Some(start), Some(end)) = (self.nonopt_start, self.nonopt_end) {
            debug!(start, end, opt_end = self.index, "permuting deferred operands");
            permute(args, start, end, self.index);
            self.index -= end - start;
        }
    }

    /// Scan the next option out of `args`.
    pub fn step(&mut self, args: &mut [String], opts: &Options) -> Step {
        let Some(spec) = opts.short_spec() else {
            return Step::End;
        };

        if self.index == 0 {
            self.index = 1;
            self.reset = true;
        }
        if self.posixly_correct.is_none() || self.reset {
            self.posixly_correct = Some(self.env.posixly_correct());
            self.progname = None;
        }
        let flags = self.scan_flags(spec, opts.mode());
        if self.reset {
            debug!("session reset");
            self.nonopt_start = None;
            self.nonopt_end = None;
        }

        let place = loop {
            if let (false, Some(place)) = (self.reset, self.place) {
                break place;
            }
            self.reset = false;

            if self.index >= args.len() {
                self.place = None;
                if self.nonopt_end.is_some() {
                    self.flush_deferred(args);
                } else if let Some(start) = self.nonopt_start {
                    self.index = start;
                }
                self.nonopt_start = None;
                self.nonopt_end = None;
                return Step::End;
            }

            let arg = args[self.index].as_str();
            trace!(index = self.index, arg, "scanning argument");
            if !arg.starts_with('-') || (arg == "-" && !spec.contains('-')) {
                self.place = None;
                if flags.all_args {
                    let operand = args[self.index].clone();
                    self.index += 1;
                    return Step::Operand(operand);
                }
                if !flags.permute {
                    return Step::End;
                }
                match (self.nonopt_start, self.nonopt_end) {
                    (None, _) => self.nonopt_start = Some(self.index),
                    (Some(start), Some(end)) => {
                        debug!(start, end, opt_end = self.index, "permuting deferred operands");
                        permute(args, start, end, self.index);
                        self.nonopt_start = Some(self.index - (end - start));
                        self.nonopt_end = None;
                    }
                    (Some(_), None) => {}
                }
                self.index += 1;
                continue;
            }

            if self.nonopt_start.is_some() && self.nonopt_end.is_none() {
                self.nonopt_end = Some(self.index);
            }

            if arg.len() == 1 {
                // "-" listed in the option string
                self.place = Some(0);
                break 0;
            }
            if arg == "--" {
                self.index += 1;
                self.place = None;
                self.flush_deferred(args);
                self.nonopt_start = None;
                self.nonopt_end = None;
                return Step::End;
            }
            self.place = Some(1);
            break 1;
        };

        if let Some(table) = opts.scan_table() {
            let first = args[self.index][place..].chars().next();
            if place != 0 && (first == Some('-') || flags.long_only) {
                let mut short_too = false;
                match first {
                    Some('-') => self.place = Some(place + 1),
                    Some(c) if c != ':' && spec.contains(c) => short_too = true,
                    _ => {}
                }
                if let Some(step) = self.match_long(args, opts, table, short_too, flags.long_only) {
                    self.place = None;
                    return step;
                }
            }
        }

        self.short_option(args, opts, spec, place)
    }

    fn short_option(
        &mut self,
        args: &[String],
        opts: &Options,
        spec: &ShortSpec,
        place: usize,
    ) -> Step {
        let token = &args[self.index];
        let Some(optchar) = token[place..].chars().next() else {
            self.place = None;
            return Step::End;
        };
        let next = place + optchar.len_utf8();
        let exhausted = next >= token.len();

        let kind = if optchar == ':' || (optchar == '-' && !exhausted) {
            None
        } else {
            spec.lookup(optchar)
        };
        let Some(kind) = kind else {
            if optchar == '-' && exhausted {
                self.place = None;
                return Step::End;
            }
            if exhausted {
                self.index += 1;
                self.place = None;
            } else {
                self.place = Some(next);
            }
            return self.report(opts, Error::UnknownOption(OptName::Short(optchar)));
        };

        if kind == ShortKind::LongBridge {
            if let Some(table) = opts.scan_table() {
                if exhausted {
                    self.index += 1;
                    if self.index >= args.len() {
                        self.place = None;
                        return self.report(opts, Error::MissingArgument(OptName::Short(optchar)));
                    }
                    self.place = Some(0);
                } else {
                    self.place = Some(next);
                }
                let long_only = opts.mode() == Mode::LongOnly;
                let step = self
                    .match_long(args, opts, table, false, long_only)
                    .unwrap_or(Step::End);
                self.place = None;
                return step;
            }
        }

        match kind {
            ShortKind::Flag | ShortKind::LongBridge => {
                if exhausted {
                    self.index += 1;
                    self.place = None;
                } else {
                    self.place = Some(next);
                }
                Step::Opt {
                    opt: optchar,
                    arg: None,
                }
            }
            ShortKind::Required | ShortKind::Optional => {
                let arg = if !exhausted {
                    Some(token[next..].to_string())
                } else if kind == ShortKind::Required {
                    self.index += 1;
                    if self.index >= args.len() {
                        self.place = None;
                        return self.report(opts, Error::MissingArgument(OptName::Short(optchar)));
                    }
                    Some(args[self.index].clone())
                } else {
                    None
                };
                self.place = None;
                self.index += 1;
                Step::Opt { opt: optchar, arg }
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
