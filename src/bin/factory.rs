use design_patterns::{console, factory};
use std::process::ExitCode;

fn main() -> ExitCode {
    let result = console::bootstrap("Factory Pattern")
        .map(|config| factory::run(config.factory.level, config.factory.obstacle_count));
    console::finish(result)
}
