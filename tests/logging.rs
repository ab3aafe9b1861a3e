use anyhow::Result;
use coin_tracker::config::GeckoConfig;
use coin_tracker::context::AppContext;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::Mutex;

struct CaptureLogger {
    warnings: Mutex<Vec<String>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if record.level() == Level::Warn {
            if let Ok(mut guard) = self.warnings.lock() {
                guard.push(record.args().to_string());
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    warnings: Mutex::new(Vec::new()),
};

#[test]
fn missing_api_key_is_reported_once_per_run() -> Result<()> {
    log::set_logger(&LOGGER).map_err(|err| anyhow::anyhow!("{err}"))?;
    log::set_max_level(LevelFilter::Warn);

    let app = AppContext::initialize(GeckoConfig::default())?;
    // One client for the ping, one for the command.
    app.coingecko()?;
    app.coingecko()?;

    let warnings = LOGGER
        .warnings
        .lock()
        .map(|guard| guard.clone())
        .unwrap_or_default();
    let key_warnings = warnings
        .iter()
        .filter(|message| message.contains("API_KEY"))
        .count();
    assert_eq!(key_warnings, 1, "warnings={warnings:?}");
    Ok(())
}
