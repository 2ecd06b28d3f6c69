//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Minimum length for user agent.
const MIN_USER_AGENT_LENGTH: usize = 40;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_user_agent(&config.api.user_agent)?;

    if config.api.timeout_secs == 0 {
        return Err(invalid("timeout_secs", "Timeout must be at least 1 second"));
    }

    if config.rate.retries == 0 {
        return Err(invalid("retries", "At least one attempt per page is required"));
    }

    if config.rate.batch_size == 0 {
        return Err(invalid("batch_size", "Batch size must be at least 1"));
    }

    if let Some(cookie) = &config.account.cookie {
        validate_cookie(cookie)?;
    }

    Ok(())
}

/// Validate the user agent string.
pub fn validate_user_agent(user_agent: &str) -> Result<()> {
    if user_agent.len() < MIN_USER_AGENT_LENGTH {
        return Err(invalid(
            "user_agent",
            &format!(
                "User agent must be at least {} characters (got {})",
                MIN_USER_AGENT_LENGTH,
                user_agent.len()
            ),
        ));
    }

    Ok(())
}

/// Validate an inline cookie string.
pub fn validate_cookie(cookie: &str) -> Result<()> {
    let lower = cookie.to_lowercase();
    if lower.contains("replaceme") || lower.contains("your_cookie") {
        return Err(invalid(
            "cookie",
            "Cookie appears to be a placeholder. Paste the Cookie header from a logged-in browser.",
        ));
    }

    if !cookie.contains('=') {
        return Err(invalid("cookie", "Cookie must be in 'name=value; name2=value2' form"));
    }

    Ok(())
}

/// Validate the target identifier.
pub fn validate_target(target: &str) -> Result<()> {
    let trimmed = target.trim();

    if trimmed.is_empty() || trimmed == "@" {
        return Err(invalid("target", "Target must not be empty"));
    }

    Ok(())
}

fn invalid(field: &str, message: &str) -> Error {
    Error::ConfigValidation {
        field: field.to_string(),
        message: message.to_string(),
    }
}
