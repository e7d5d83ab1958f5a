use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "gyre_engine=debug,wgpu=warn"). On wasm32 only the most verbose level named
/// in the filter is honored.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    #[cfg(not(target_arch = "wasm32"))]
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            #[cfg(not(target_arch = "wasm32"))]
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is early in `main` (or the wasm entry point).
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut builder = env_logger::Builder::new();

            if let Some(filter) = config.env_filter {
                builder.parse_filters(&filter);
            } else if let Ok(filter) = std::env::var("RUST_LOG") {
                builder.parse_filters(&filter);
            } else {
                // wgpu is chatty at info; keep it to warnings by default.
                builder
                    .filter_level(log::LevelFilter::Info)
                    .filter_module("wgpu_core", log::LevelFilter::Warn)
                    .filter_module("wgpu_hal", log::LevelFilter::Warn)
                    .filter_module("naga", log::LevelFilter::Warn);
            }

            builder.write_style(config.write_style);
            builder.init();
        }

        #[cfg(target_arch = "wasm32")]
        {
            console_error_panic_hook::set_once();

            let level = config
                .env_filter
                .as_deref()
                .map(max_level_in_filter)
                .unwrap_or(log::Level::Info);

            if console_log::init_with_level(level).is_err() {
                log::warn!("a logger was already installed; keeping it");
            }
        }

        log::debug!("logging initialized");
    });
}

/// Picks the most verbose level mentioned in an `env_logger`-style filter.
///
/// Unknown directives are ignored; an empty or unparseable filter yields `Info`.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn max_level_in_filter(filter: &str) -> log::Level {
    filter
        .split(',')
        .filter_map(|directive| {
            let level = directive.rsplit('=').next()?.trim();
            level.parse::<log::Level>().ok()
        })
        .max()
        .unwrap_or(log::Level::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_level_plain() {
        assert_eq!(max_level_in_filter("warn"), log::Level::Warn);
    }

    #[test]
    fn filter_level_picks_most_verbose_directive() {
        let level = max_level_in_filter("wgpu=warn,gyre_engine=debug");
        assert_eq!(level, log::Level::Debug);
    }

    #[test]
    fn filter_level_defaults_to_info() {
        assert_eq!(max_level_in_filter(""), log::Level::Info);
        assert_eq!(max_level_in_filter("gyre_engine"), log::Level::Info);
    }
}
