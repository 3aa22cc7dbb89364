#![allow(dead_code)]

use std::sync::Once;

static LOGGING: Once = Once::new();

/// Log to a file in the temp dir. Only the first call per
/// test binary installs the logger.
pub fn setup_logging() {
    LOGGING.call_once(|| {
        if let Err(e) = try_setup_logging() {
            eprintln!("no logging: {}", e);
        }
    });
}

fn try_setup_logging() -> Result<(), anyhow::Error> {
    let log = std::env::temp_dir().join("rat-mask-test.log");
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("{} {}", record.level(), message))
        })
        .level(log::LevelFilter::Trace)
        .chain(fern::log_file(&log)?)
        .apply()?;
    Ok(())
}
