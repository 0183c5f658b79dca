use conch::flags::Flags;
use conch::process::signal::setup_signal_handlers;
use conch::shell::Shell;
use std::{env, process};

fn main() -> Result<(), conch::error::ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("conch {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    conch::logging::init(&flags);

    if let Err(e) = setup_signal_handlers() {
        log::warn!("couldn't install interrupt handler: {}", e);
    }

    let mut shell = Shell::new(flags)?;
    let code = shell.run()?;
    process::exit(code)
}
