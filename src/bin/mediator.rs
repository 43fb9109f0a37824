use design_patterns::{console, mediator};
use std::process::ExitCode;

fn main() -> ExitCode {
    let result = console::bootstrap("Mediator Pattern").map(|config| {
        let room = &config.mediator;
        mediator::run(&room.participants, &room.sender, &room.message)
    });
    console::finish(result)
}
