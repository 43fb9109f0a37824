use design_patterns::{console, singleton};
use std::process::ExitCode;

fn main() -> ExitCode {
    console::finish(console::bootstrap("Singleton Pattern").map(|_| singleton::run()))
}
