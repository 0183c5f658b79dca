use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use crate::flags::Flags;

/// Level picked by the command-line flags: `--debug` wins over `--quiet`.
pub fn level_for(flags: &Flags) -> LevelFilter {
    if flags.is_set("debug") {
        LevelFilter::Debug
    } else if flags.is_set("quiet") {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    }
}

/// Send log records to stderr. Safe to call more than once; later calls are no-ops.
pub fn init(flags: &Flags) {
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .set_time_level(LevelFilter::Debug)
        .build();

    let _ = TermLogger::init(
        level_for(flags),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}
