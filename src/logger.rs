/// Initializes the global logger.
///
/// `RUST_LOG` takes precedence over the level chosen by `verbose`.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .parse_default_env()
        .init();
}
