//! Option descriptions: the short option string, the long option table and
//! the per-parse configuration built from them.

use std::sync::atomic::{AtomicI32, Ordering as AtomicOrdering};
use std::sync::Arc;

// ============================================================================
// ShortSpec
// ============================================================================

/// What to do with non-option arguments, selected by the first character of
/// the short option string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    /// No prefix: permute when the mode allows it.
    Permute,
    /// `+`: stop at the first non-option.
    RequireOrder,
    /// `-`: hand every non-option back as an operand, in order.
    ReturnInOrder,
}

/// How a short option character was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortKind {
    Flag,
    Required,
    Optional,
    /// `W;`: `-W name` is looked up in the long option table.
    LongBridge,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortSpec {
    chars: Vec<char>,
    ordering: Ordering,
    silent: bool,
}

impl ShortSpec {
    pub fn new(spec: &str) -> Self {
        let (ordering, rest) = if let Some(rest) = spec.strip_prefix('+') {
            (Ordering::RequireOrder, rest)
        } else if let Some(rest) = spec.strip_prefix('-') {
            (Ordering::ReturnInOrder, rest)
        } else {
            (Ordering::Permute, spec)
        };
        ShortSpec {
            chars: rest.chars().collect(),
            ordering,
            silent: rest.starts_with(':'),
        }
    }

    pub fn ordering(&self) -> Ordering {
        self.ordering
    }

    /// Leading `:` after the ordering prefix: no diagnostics are printed.
    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// Look up an option character. `:` is never an option.
    pub fn lookup(&self, c: char) -> Option<ShortKind> {
        if c == ':' {
            return None;
        }
        let pos = self.chars.iter().position(|&x| x == c)?;
        let next = self.chars.get(pos + 1).copied();
        let kind = match next {
            Some(':') if self.chars.get(pos + 2) == Some(&':') => ShortKind::Optional,
            Some(':') => ShortKind::Required,
            Some(';') if c == 'W' => ShortKind::LongBridge,
            _ => ShortKind::Flag,
        };
        Some(kind)
    }
}

// ============================================================================
// Long options
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HasArg {
    No,
    Required,
    Optional,
}

/// Shared integer cell a long option can store its value into.
#[derive(Debug, Clone, Default)]
pub struct Flag(Arc<AtomicI32>);

impl Flag {
    pub fn new(initial: i32) -> Self {
        Flag(Arc::new(AtomicI32::new(initial)))
    }

    pub fn get(&self) -> i32 {
        self.0.load(AtomicOrdering::Relaxed)
    }

    pub fn set(&self, v: i32) {
        self.0.store(v, AtomicOrdering::Relaxed)
    }

    /// True when both handles refer to the same cell.
    pub fn same_target(&self, other: &Flag) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug, Clone)]
pub struct LongOpt {
    pub(crate) name: String,
    pub(crate) has_arg: HasArg,
    pub(crate) flag: Option<Flag>,
    pub(crate) val: i32,
}

impl LongOpt {
    pub fn new(name: &str) -> Self {
        LongOpt {
            name: name.to_string(),
            has_arg: HasArg::No,
            flag: None,
            val: 0,
        }
    }

    pub fn has_arg(mut self, has_arg: HasArg) -> Self {
        self.has_arg = has_arg;
        self
    }

    pub fn required(self) -> Self {
        self.has_arg(HasArg::Required)
    }

    pub fn optional(self) -> Self {
        self.has_arg(HasArg::Optional)
    }

    /// Value reported (or stored) when this option matches.
    pub fn val(mut self, v: i32) -> Self {
        self.val = v;
        self
    }

    /// Store `val` into `flag` instead of reporting it.
    pub fn flag(mut self, flag: &Flag) -> Self {
        self.flag = Some(flag.clone());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arg_policy(&self) -> HasArg {
        self.has_arg
    }

    pub fn value(&self) -> i32 {
        self.val
    }

    /// Two entries resolve to the same thing when they take the same kind of
    /// argument and report the same value to the same place.
    pub(crate) fn same_effect(&self, other: &LongOpt) -> bool {
        let same_flag = match (&self.flag, &other.flag) {
            (None, None) => true,
            (Some(a), Some(b)) => a.same_target(b),
            _ => false,
        };
        self.has_arg == other.has_arg && same_flag && self.val == other.val
    }
}

// ============================================================================
// Options
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Plain `getopt`: never permutes, and any long table is ignored.
    Short,
    /// `getopt_long`: permutes unless told otherwise.
    #[default]
    Long,
    /// `getopt_long_only`: single-dash tokens are tried as long options first.
    LongOnly,
}

impl Mode {
    pub(crate) fn permutes(self) -> bool {
        !matches!(self, Mode::Short)
    }
}

/// Everything a scan needs to know about the accepted options.
#[derive(Debug, Clone)]
pub struct Options {
    pub(crate) short: Option<ShortSpec>,
    pub(crate) long: Option<Vec<LongOpt>>,
    pub(crate) mode: Mode,
    pub(crate) print_errors: bool,
}

impl Options {
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::new()
    }

    pub fn short_spec(&self) -> Option<&ShortSpec> {
        self.short.as_ref()
    }

    /// Long options up to the first unnamed entry.
    pub fn long_options(&self) -> Option<&[LongOpt]> {
        let table = self.long.as_deref()?;
        let end = table
            .iter()
            .position(|o| o.name.is_empty())
            .unwrap_or(table.len());
        Some(&table[..end])
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The long table a scan consults; none in [`Mode::Short`].
    pub(crate) fn scan_table(&self) -> Option<&[LongOpt]> {
        match self.mode {
            Mode::Short => None,
            _ => self.long_options(),
        }
    }

    /// Diagnostics are printed unless disabled here or by a silent spec.
    pub fn reports_errors(&self) -> bool {
        self.print_errors && !self.short.as_ref().is_some_and(|s| s.is_silent())
    }
}

pub struct OptionsBuilder {
    short: Option<ShortSpec>,
    long: Option<Vec<LongOpt>>,
    mode: Mode,
    print_errors: bool,
}

impl OptionsBuilder {
    pub fn new() -> Self {
        OptionsBuilder {
            short: None,
            long: None,
            mode: Mode::Long,
            print_errors: true,
        }
    }

    pub fn short(mut self, spec: &str) -> Self {
        self.short = Some(ShortSpec::new(spec));
        self
    }

    pub fn long_options(mut self, table: Vec<LongOpt>) -> Self {
        self.long = Some(table);
        self
    }

    pub fn long_option(mut self, opt: LongOpt) -> Self {
        self.long.get_or_insert_with(Vec::new).push(opt);
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn long_only(self) -> Self {
        self.mode(Mode::LongOnly)
    }

    pub fn print_errors(mut self, on: bool) -> Self {
        self.print_errors = on;
        self
    }

    pub fn build(self) -> Options {
        Options {
            short: self.short,
            long: self.long,
            mode: self.mode,
            print_errors: self.print_errors,
        }
    }
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
