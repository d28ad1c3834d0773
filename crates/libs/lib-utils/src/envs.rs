//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get an environment variable by name.
///
/// Blank values count as missing so a `KEY=` line in `.env` cannot
/// satisfy a required setting.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    match env::var(name) {
        Ok(val) if !val.trim().is_empty() => Ok(val),
        _ => Err(Error::MissingEnv(name)),
    }
}

/// Get and parse an environment variable.
pub fn get_env_parse<T: FromStr>(name: &'static str) -> Result<T, Error> {
    let val = get_env(name)?;
    val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name))
}

/// Get an environment variable, falling back to `default` when unset.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    get_env(name).unwrap_or_else(|_| default.to_string())
}

/// Get and parse an optional environment variable.
///
/// Unset means `default`; set but unparsable is still an error.
pub fn get_env_parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, Error> {
    match get_env_parse(name) {
        Err(Error::MissingEnv(_)) => Ok(default),
        other => other,
    }
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MissingEnv(name) => write!(fmt, "{name} must be set in environment"),
            Error::WrongFormat(name) => write!(fmt, "{name} has an invalid format"),
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    // Each test owns its variable names; the process environment is shared.

    #[test]
    fn test_get_env_missing() {
        assert_eq!(
            get_env("LIB_UTILS_TEST_NEVER_SET"),
            Err(Error::MissingEnv("LIB_UTILS_TEST_NEVER_SET"))
        );
    }

    #[test]
    fn test_get_env_blank_is_missing() {
        env::set_var("LIB_UTILS_TEST_BLANK", "   ");
        assert!(matches!(get_env("LIB_UTILS_TEST_BLANK"), Err(Error::MissingEnv(_))));
    }

    #[test]
    fn test_get_env_parse_or() {
        assert_eq!(get_env_parse_or("LIB_UTILS_TEST_UNSET_NUM", 60u64), Ok(60));

        env::set_var("LIB_UTILS_TEST_NUM", "15");
        assert_eq!(get_env_parse_or("LIB_UTILS_TEST_NUM", 60u64), Ok(15));

        env::set_var("LIB_UTILS_TEST_BAD_NUM", "soon");
        assert_eq!(
            get_env_parse_or("LIB_UTILS_TEST_BAD_NUM", 60u64),
            Err(Error::WrongFormat("LIB_UTILS_TEST_BAD_NUM"))
        );
    }
}
