use design_patterns::{console, strategy};
use std::process::ExitCode;

fn main() -> ExitCode {
    console::finish(console::bootstrap("Strategy Pattern").map(|_| strategy::run()))
}
