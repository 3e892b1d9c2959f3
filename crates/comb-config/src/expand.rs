//! `${VAR}` expansion for site settings.
//!
//! - `${VAR}` - value of VAR, error if unset
//! - `${VAR:-default}` - value of VAR, or `default` when unset
//!
//! Any other `$` is literal, so "$5" or "$HOME" in a title survives.

use crate::ConfigError;

/// Expand environment variable references in a config value.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let escaped = escape_bare_dollars(value);
    shellexpand::env_with_context(&escaped, |var| -> Result<Option<String>, MissingVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| MissingVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Double every `$` outside a `${...}` span, which shellexpand reads back as
/// a single literal `$`.
fn escape_bare_dollars(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(idx) = rest.find('$') {
        escaped.push_str(&rest[..idx]);
        rest = &rest[idx..];
        if rest.starts_with("${")
            && let Some(end) = rest.find('}')
        {
            escaped.push_str(&rest[..=end]);
            rest = &rest[end + 1..];
        } else {
            escaped.push_str("$$");
            rest = &rest[1..];
        }
    }
    escaped.push_str(rest);
    escaped
}

/// Name of a variable that is not set.
struct MissingVar(String);
