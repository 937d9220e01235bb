use test_driver::{SessionOutput, TestSession};

fn tgetopt() -> &'static str {
    env!("CARGO_BIN_EXE_tgetopt")
}

/// Run tgetopt and assert its exit code.
fn run(args: &[&str], env: &[(&str, &str)], code: i32) -> SessionOutput {
    TestSession::spawn(tgetopt(), args, env)
        .expect("failed to spawn tgetopt")
        .wait_exit(code)
}

// -- short options --

#[test]
fn cluster_value_and_permutation() {
    let out = run(&["-ab", "val", "file1", "--verbose", "file2"], &[], 0);
    assert_eq!(out.steps(), vec!["opt a", "opt b 'val'", "long verbose (118)"]);
    assert_eq!(out.index(), 4);
    assert_eq!(out.argv(), "-ab val --verbose file1 file2");
}

#[test]
fn optional_value_stays_in_token() {
    let out = run(&["-cfoo", "-c", "bar"], &[], 0);
    assert_eq!(out.steps(), vec!["opt c 'foo'", "opt c"]);
    assert_eq!(out.index(), 3);
    assert_eq!(out.argv(), "-cfoo -c bar");
}

#[test]
fn missing_value_is_reported() {
    let out = run(&["-b"], &[], 1);
    assert_eq!(out.steps(), vec!["error option requires an argument -- b"]);
    assert!(out.stderr.contains("tgetopt: option requires an argument -- b"));
}

#[test]
fn unknown_option_is_reported() {
    let out = run(&["-z", "-a"], &[], 1);
    assert_eq!(out.steps(), vec!["error unknown option -- z", "opt a"]);
    assert!(out.stderr.contains("tgetopt: unknown option -- z"));
}

#[test]
fn silent_spec_prints_nothing() {
    let out = run(&["-z"], &[("TGETOPT_PREFIX", ":")], 1);
    assert_eq!(out.steps(), vec!["error unknown option -- z"]);
    assert!(out.stderr.is_empty(), "stderr: {}", out.stderr);
}

#[test]
fn diagnostics_can_be_disabled() {
    let out = run(&["--bogus"], &[("TGETOPT_SILENT", "1")], 1);
    assert_eq!(out.steps(), vec!["error unknown option -- bogus"]);
    assert!(out.stderr.is_empty(), "stderr: {}", out.stderr);
}

// -- ordering --

#[test]
fn double_dash_stops_scanning() {
    let out = run(&["-a", "--", "-b", "file"], &[], 0);
    assert_eq!(out.steps(), vec!["opt a"]);
    assert_eq!(out.index(), 3);
    assert_eq!(out.argv(), "-a -- -b file");
}

#[test]
fn posixly_correct_stops_at_first_operand() {
    let out = run(&["-a", "file1", "-b", "x"], &[("POSIXLY_CORRECT", "1")], 0);
    assert_eq!(out.steps(), vec!["opt a"]);
    assert_eq!(out.index(), 2);
    assert_eq!(out.argv(), "-a file1 -b x");
}

#[test]
fn minus_prefix_beats_posixly_correct() {
    let out = run(
        &["file1", "-a"],
        &[("POSIXLY_CORRECT", "1"), ("TGETOPT_PREFIX", "-")],
        0,
    );
    assert_eq!(out.steps(), vec!["operand 'file1'", "opt a"]);
    assert_eq!(out.index(), 3);
}

#[test]
fn plus_prefix_stops_at_first_operand() {
    let out = run(&["file1", "-a"], &[("TGETOPT_PREFIX", "+")], 0);
    assert!(out.steps().is_empty());
    assert_eq!(out.index(), 1);
}

#[test]
fn short_mode_never_permutes() {
    let out = run(&["-a", "file", "-b", "x"], &[("TGETOPT_MODE", "short")], 0);
    assert_eq!(out.steps(), vec!["opt a"]);
    assert_eq!(out.index(), 2);
}

#[test]
fn short_mode_has_no_long_table() {
    let out = run(&["-W", "verbose"], &[("TGETOPT_MODE", "short")], 0);
    assert_eq!(out.steps(), vec!["opt W"]);
    assert_eq!(out.index(), 2);
}

// -- long options --

#[test]
fn long_value_inline_and_separate() {
    let out = run(&["--output=/tmp/x", "rest", "--output", "/tmp/y"], &[], 0);
    assert_eq!(
        out.steps(),
        vec!["long output (111) '/tmp/x'", "long output (111) '/tmp/y'"]
    );
    assert_eq!(out.argv(), "--output=/tmp/x --output /tmp/y rest");
    assert_eq!(out.index(), 4);
}

#[test]
fn ambiguous_abbreviation() {
    let out = run(&["--ver", "--verb"], &[], 1);
    assert_eq!(
        out.steps(),
        vec!["error ambiguous option -- ver", "long verbose (118)"]
    );
    assert!(out.stderr.contains("tgetopt: ambiguous option -- ver"));
}

#[test]
fn flag_storage() {
    let out = run(&["--quiet"], &[], 0);
    assert_eq!(out.steps(), vec!["stored quiet = 1"]);
}

#[test]
fn w_bridge() {
    let out = run(&["-W", "verbose", "-Wcol=red"], &[], 0);
    assert_eq!(
        out.steps(),
        vec!["long verbose (118)", "long color (67) 'red'"]
    );
}

#[test]
fn long_only_mode() {
    let out = run(&["-verbose", "-a"], &[("TGETOPT_MODE", "long-only")], 0);
    assert_eq!(out.steps(), vec!["long verbose (118)", "opt a"]);
}

// -- configuration --

#[test]
fn bad_mode_is_a_configuration_error() {
    let out = run(&["-a"], &[("TGETOPT_MODE", "bogus")], 2);
    assert!(out.stdout.is_empty());
    assert!(out.stderr.contains("unknown mode 'bogus'"));
}
