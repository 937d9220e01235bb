// Test driver: scans its own command line with a fixed option table and
// prints one line per step. Built only with `--features driver`.
//
// Environment:
//   TGETOPT_MODE    short | long | long-only (default: long)
//   TGETOPT_PREFIX  prepended to the short option string ("+", "-", ":", ...)
//   TGETOPT_SILENT  when set, built-in diagnostics are disabled
//   RUST_LOG        tracing filter (default: warn)

use getopt::*;
use tracing_subscriber::EnvFilter;

const SHORT_SPEC: &str = "ab:c::W;";

#[derive(Debug, thiserror::Error)]
enum ConfigError {
    #[error("TGETOPT_MODE: unknown mode '{0}' (expected short, long or long-only)")]
    Mode(String),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();
}

fn mode_from_env() -> Result<Mode, ConfigError> {
    match std::env::var("TGETOPT_MODE").ok().as_deref() {
        None | Some("long") => Ok(Mode::Long),
        Some("short") => Ok(Mode::Short),
        Some("long-only") => Ok(Mode::LongOnly),
        Some(other) => Err(ConfigError::Mode(other.to_string())),
    }
}

fn main() {
    init_tracing();
    let mode = match mode_from_env() {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("tgetopt: {}", e);
            std::process::exit(2);
        }
    };

    let quiet = Flag::new(0);
    let prefix = std::env::var("TGETOPT_PREFIX").unwrap_or_default();
    let options = Options::builder()
        .short(&format!("{}{}", prefix, SHORT_SPEC))
        .long_option(LongOpt::new("verbose").val('v' as i32))
        .long_option(LongOpt::new("version").val('V' as i32))
        .long_option(LongOpt::new("output").required().val('o' as i32))
        .long_option(LongOpt::new("color").optional().val('C' as i32))
        .long_option(LongOpt::new("quiet").val(1).flag(&quiet))
        .mode(mode)
        .print_errors(std::env::var_os("TGETOPT_SILENT").is_none())
        .build();

    let mut g = Getopt::from_env(options);
    let mut failed = false;
    loop {
        match g.step() {
            Step::Opt { opt, arg } => match arg {
                Some(arg) => println!("opt {} '{}'", opt, arg),
                None => println!("opt {}", opt),
            },
            Step::Long { index, val, arg } => {
                let name = g.options().long_options().map_or("", |t| t[index].name());
                match arg {
                    Some(arg) => println!("long {} ({}) '{}'", name, val, arg),
                    None => println!("long {} ({})", name, val),
                }
            }
            Step::Stored { index, .. } => {
                let name = g.options().long_options().map_or("", |t| t[index].name());
                println!("stored {} = {}", name, quiet.get());
            }
            Step::Operand(operand) => println!("operand '{}'", operand),
            Step::Error(e) => {
                println!("error {}", e);
                failed = true;
            }
            Step::End => break,
        }
    }

    println!("index: {}", g.index());
    println!("argv: {}", g.args().get(1..).unwrap_or_default().join(" "));
    if failed {
        std::process::exit(1);
    }
}
