use crate::process::ProcessError;

/// Keep the shell alive when Ctrl-C reaches the foreground process group.
///
/// Children get the default disposition back on exec, so only the running
/// program is interrupted. At the prompt the line editor reports Ctrl-C on
/// its own. May only be installed once per process.
pub fn setup_signal_handlers() -> Result<(), ProcessError> {
    ctrlc::set_handler(|| {
        log::debug!("interrupt received");
    })?;
    Ok(())
}
