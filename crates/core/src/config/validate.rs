use super::{types::Config, ConfigError};

/// Largest page cap accepted; the catalog itself stops paging at 500.
const MAX_PAGES_LIMIT: u32 = 500;

/// Longest cache TTL accepted (one day).
const MAX_TTL_SECS: u64 = 86_400;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Cache TTL is positive and at most one day
/// - Calendar page cap is within 1..=500
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.cache.ttl_secs == 0 {
        return Err(ConfigError::ValidationError(
            "cache.ttl_secs must be greater than 0".to_string(),
        ));
    }

    if config.cache.ttl_secs > MAX_TTL_SECS {
        return Err(ConfigError::ValidationError(format!(
            "cache.ttl_secs must be at most {}",
            MAX_TTL_SECS
        )));
    }

    if !(1..=MAX_PAGES_LIMIT).contains(&config.calendar.max_pages) {
        return Err(ConfigError::ValidationError(format!(
            "calendar.max_pages must be between 1 and {}",
            MAX_PAGES_LIMIT
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = Config::default();
        config.server.port = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_zero_ttl_fails() {
        let mut config = Config::default();
        config.cache.ttl_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_ttl_ceiling() {
        let mut config = Config::default();

        config.cache.ttl_secs = u64::MAX;
        assert!(validate_config(&config).is_err());

        config.cache.ttl_secs = 86_401;
        assert!(validate_config(&config).is_err());

        config.cache.ttl_secs = 86_400;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_page_cap_bounds() {
        let mut config = Config::default();

        config.calendar.max_pages = 0;
        assert!(validate_config(&config).is_err());

        config.calendar.max_pages = 501;
        assert!(validate_config(&config).is_err());

        config.calendar.max_pages = 500;
        assert!(validate_config(&config).is_ok());
    }
}
