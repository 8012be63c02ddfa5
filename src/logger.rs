use log::LevelFilter;

/// Overrides the default verbosity, e.g. `FOLIO_LOG=trace`.
pub const LOG_LEVEL_ENV: &str = "FOLIO_LOG";

const NOISY_CRATES: [&str; 6] = ["wgpu_core", "wgpu_hal", "naga", "iced_wgpu", "cosmic_text", "winit"];

pub fn setup(is_debug: bool) -> Result<(), fern::InitError> {
    let level = level_from_env().unwrap_or(if is_debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ));
        })
        .level(level);

    for target in NOISY_CRATES {
        dispatch = dispatch.level_for(target, LevelFilter::Warn);
    }

    dispatch.chain(std::io::stdout()).apply()?;

    Ok(())
}

fn level_from_env() -> Option<LevelFilter> {
    let raw = std::env::var(LOG_LEVEL_ENV).ok()?;
    parse_level(&raw)
}

fn parse_level(raw: &str) -> Option<LevelFilter> {
    raw.trim().parse::<LevelFilter>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_names_case_insensitively() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("chatty"), None);
    }
}
