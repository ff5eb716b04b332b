//! Terminal front-end for experience notes.
//!
//! # Responsibility
//! - Parse launch flags and start optional file logging.
//! - Hand stdin/stdout to the interactive shell.

use clap::Parser;

mod shell;

const LOG_DIR_ENV: &str = "EXPERIENCE_LOG_DIR";

#[derive(Debug, Parser)]
#[command(name = "experience", version, about = "Record experiences for one session")]
struct Cli {
    /// trace|debug|info|warn|error
    #[arg(long, default_value_t = experience_core::default_log_level().to_string())]
    log_level: String,

    /// Absolute directory for rolling log files. Falls back to EXPERIENCE_LOG_DIR;
    /// logging stays off when neither is set.
    #[arg(long)]
    log_dir: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_dir) = resolve_log_dir(cli.log_dir) {
        if let Err(err) = experience_core::init_logging(&cli.log_level, &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut shell = shell::Shell::new(stdin.lock(), stdout.lock());
    if let Err(err) = shell.run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn resolve_log_dir(flag: Option<String>) -> Option<String> {
    flag.or_else(|| std::env::var(LOG_DIR_ENV).ok())
        .map(|raw| raw.trim().to_string())
        .filter(|dir| !dir.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{resolve_log_dir, Cli};
    use clap::Parser;

    #[test]
    fn flag_wins_and_blank_is_ignored() {
        assert_eq!(
            resolve_log_dir(Some(" /tmp/exp ".to_string())),
            Some("/tmp/exp".to_string())
        );
        assert_eq!(resolve_log_dir(Some("   ".to_string())), None);
    }

    #[test]
    fn cli_parses_logging_flags() {
        let cli = Cli::try_parse_from(["experience", "--log-level", "warn", "--log-dir", "/tmp/x"])
            .unwrap();
        assert_eq!(cli.log_level, "warn");
        assert_eq!(cli.log_dir.as_deref(), Some("/tmp/x"));

        let defaults = Cli::try_parse_from(["experience"]).unwrap();
        assert_eq!(defaults.log_level, experience_core::default_log_level());
        assert!(defaults.log_dir.is_none());
    }
}
