/// Installs the process-wide logger.
///
/// Status lines meant for the user are printed on stdout; this logger only
/// carries diagnostics on stderr.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .format_target(false)
        .init();
}
