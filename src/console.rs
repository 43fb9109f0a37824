use colored::Colorize;
use std::process::ExitCode;

use crate::config::DemoConfig;
use crate::error::PatternError;
use crate::logging;

/// `=== Title ===` heading in the style every demo binary starts with.
pub fn heading(title: &str) -> String {
    format!("=== {} ===", title).bold().cyan().to_string()
}

pub fn failure(message: &str) -> String {
    format!("✗ {}", message).red().to_string()
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Load the config named on the command line, install logging and print the
/// demo heading.
pub fn bootstrap(title: &str) -> Result<DemoConfig, PatternError> {
    let config = DemoConfig::from_args()?;
    logging::init(&config.logging.filter);
    println!("{}\n", heading(title));
    Ok(config)
}

/// Print the demo's lines, or its error, and pick the exit code.
pub fn finish(result: Result<Vec<String>, PatternError>) -> ExitCode {
    match result {
        Ok(lines) => {
            print_lines(&lines);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", failure(&err.to_string()));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_rendering() {
        colored::control::set_override(false);
        assert_eq!(heading("Observer Pattern"), "=== Observer Pattern ===");
        assert_eq!(failure("bad config"), "✗ bad config");
        colored::control::unset_override();
    }
}
