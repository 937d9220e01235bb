//! Long option lookup.

use tracing::debug;

use crate::error::{Error, OptName};
use crate::scanner::{Session, Step};
use crate::spec::{HasArg, LongOpt, Options};

/// Result of looking a name up in a long option table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongMatch {
    Found(usize),
    Ambiguous,
    NoMatch,
}

/// Find `name` in `table`, accepting unambiguous abbreviations.
///
/// An exact match always wins. Several partial matches are ambiguous when
/// they differ in effect, or in any case under `long_only`. With `short_too`
/// a one-character name never matches partially.
pub fn find_long(table: &[LongOpt], name: &str, short_too: bool, long_only: bool) -> LongMatch {
    let mut found: Option<usize> = None;
    let mut second_partial = false;

    for (i, opt) in table.iter().enumerate() {
        if !opt.name.starts_with(name) {
            continue;
        }
        if opt.name.len() == name.len() {
            return LongMatch::Found(i);
        }
        if short_too && name.chars().count() == 1 {
            continue;
        }
        match found {
            None => found = Some(i),
            Some(first) => {
                if long_only || !opt.same_effect(&table[first]) {
                    second_partial = true;
                }
            }
        }
    }

    match found {
        _ if second_partial => LongMatch::Ambiguous,
        Some(i) => LongMatch::Found(i),
        None => LongMatch::NoMatch,
    }
}

impl Session {
    /// Resolve the text at the scan position as a long option, consuming the
    /// token and, when required, the value after it.
    ///
    /// Returns `None` when `short_too` is set and nothing matched, leaving the
    /// token to the short option scanner.
    pub(crate) fn match_long(
        &mut self,
        args: &[String],
        opts: &Options,
        table: &[LongOpt],
        short_too: bool,
        long_only: bool,
    ) -> Option<Step> {
        let current = args[self.index][self.place.unwrap_or(0)..].to_string();
        self.index += 1;

        let (name, inline) = match current.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (current.as_str(), None),
        };

        let i = match find_long(table, name, short_too, long_only) {
            LongMatch::Found(i) => i,
            LongMatch::Ambiguous => {
                return Some(self.report(opts, Error::AmbiguousOption(name.to_string())));
            }
            LongMatch::NoMatch => {
                if short_too {
                    self.index -= 1;
                    return None;
                }
                return Some(self.report(opts, Error::UnknownOption(OptName::Long(current.clone()))));
            }
        };

        let opt = &table[i];
        let arg = match (opt.has_arg, inline) {
            (HasArg::No, Some(_)) => {
                return Some(self.report(opts, Error::UnwantedArgument(name.to_string())));
            }
            (HasArg::No, None) | (HasArg::Optional, None) => None,
            (_, Some(value)) => Some(value.to_string()),
            (HasArg::Required, None) => match args.get(self.index) {
                Some(value) => {
                    self.index += 1;
                    Some(value.clone())
                }
                None => {
                    return Some(self.report(opts, Error::MissingArgument(OptName::Long(name.to_string()))));
                }
            },
        };

        debug!(name = opt.name.as_str(), index = i, "matched long option");
        let step = match &opt.flag {
            Some(flag) => {
                flag.set(opt.val);
                Step::Stored { index: i, arg }
            }
            None => Step::Long {
                index: i,
                val: opt.val,
                arg,
            },
        };
        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Flag;

    fn table() -> Vec<LongOpt> {
        vec![
            LongOpt::new("verbose").val('v' as i32),
            LongOpt::new("version").val('V' as i32),
            LongOpt::new("output").required().val('o' as i32),
        ]
    }

    // -- find_long --

    #[test]
    fn exact_match() {
        assert_eq!(find_long(&table(), "version", false, false), LongMatch::Found(1));
    }

    #[test]
    fn unambiguous_abbreviation() {
        assert_eq!(find_long(&table(), "verb", false, false), LongMatch::Found(0));
        assert_eq!(find_long(&table(), "o", false, false), LongMatch::Found(2));
    }

    #[test]
    fn ambiguous_abbreviation() {
        assert_eq!(find_long(&table(), "ver", false, false), LongMatch::Ambiguous);
    }

    #[test]
    fn no_match() {
        assert_eq!(find_long(&table(), "quiet", false, false), LongMatch::NoMatch);
        assert_eq!(find_long(&table(), "verbosely", false, false), LongMatch::NoMatch);
    }

    #[test]
    fn exact_match_beats_earlier_partials() {
        let t = vec![
            LongOpt::new("colors").val(1),
            LongOpt::new("colour").val(2),
            LongOpt::new("col").val(3),
        ];
        assert_eq!(find_long(&t, "col", false, false), LongMatch::Found(2));
    }

    #[test]
    fn identical_partials_are_not_ambiguous() {
        let t = vec![
            LongOpt::new("color").val('c' as i32),
            LongOpt::new("colour").val('c' as i32),
        ];
        assert_eq!(find_long(&t, "col", false, false), LongMatch::Found(0));
    }

    #[test]
    fn long_only_makes_any_second_partial_ambiguous() {
        let t = vec![
            LongOpt::new("color").val('c' as i32),
            LongOpt::new("colour").val('c' as i32),
        ];
        assert_eq!(find_long(&t, "col", false, true), LongMatch::Ambiguous);
    }

    #[test]
    fn partials_differing_in_flag_target_are_ambiguous() {
        let f1 = Flag::new(0);
        let f2 = Flag::new(0);
        let t = vec![
            LongOpt::new("alpha").val(1).flag(&f1),
            LongOpt::new("alps").val(1).flag(&f2),
        ];
        assert_eq!(find_long(&t, "al", false, false), LongMatch::Ambiguous);
        let t = vec![
            LongOpt::new("alpha").val(1).flag(&f1),
            LongOpt::new("alps").val(1).flag(&f1),
        ];
        assert_eq!(find_long(&t, "al", false, false), LongMatch::Found(0));
    }

    #[test]
    fn short_too_skips_single_char_partials() {
        assert_eq!(find_long(&table(), "o", true, false), LongMatch::NoMatch);
        assert_eq!(find_long(&table(), "ou", true, false), LongMatch::Found(2));
    }

    #[test]
    fn short_too_still_takes_exact_single_char() {
        let t = vec![LongOpt::new("x").val(1), LongOpt::new("xray").val(2)];
        assert_eq!(find_long(&t, "x", true, false), LongMatch::Found(0));
    }
}
