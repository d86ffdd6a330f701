/// Base URL of the backend API. Empty means same-origin, which is how the
/// portal host serves the app and proxies `/api/*`.
const API_BASE: &str = match option_env!("PORTAL_API_BASE") {
    Some(base) => base,
    None => "",
};

/// Builds the absolute (or same-origin) URL for an API path.
pub fn endpoint(path: &str) -> String {
    join(API_BASE, path)
}

/// Console log level, `PORTAL_LOG_LEVEL` at build time.
pub fn log_level() -> log::Level {
    parse_level(option_env!("PORTAL_LOG_LEVEL"))
}

fn join(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

fn parse_level(raw: Option<&str>) -> log::Level {
    raw.and_then(|level| level.trim().parse().ok())
        .unwrap_or(log::Level::Debug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_places_exactly_one_slash() {
        assert_eq!(join("", "/api/conversations/"), "/api/conversations/");
        assert_eq!(join("http://localhost:8000", "api/x/"), "http://localhost:8000/api/x/");
        assert_eq!(join("http://localhost:8000/", "/api/x/"), "http://localhost:8000/api/x/");
    }

    #[test]
    fn log_level_parsing() {
        assert_eq!(parse_level(None), log::Level::Debug);
        assert_eq!(parse_level(Some("warn")), log::Level::Warn);
        assert_eq!(parse_level(Some("INFO")), log::Level::Info);
        assert_eq!(parse_level(Some("chatty")), log::Level::Debug);
    }
}
