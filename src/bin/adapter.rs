use design_patterns::{adapter, console};
use std::process::ExitCode;

fn main() -> ExitCode {
    console::finish(console::bootstrap("Adapter Pattern").map(|_| adapter::run()))
}
