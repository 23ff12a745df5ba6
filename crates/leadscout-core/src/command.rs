//! Chat command parsing.
//!
//! Commands are free text starting with the `/` sigil; the remainder is a
//! comma-delimited list whose meaning depends on arity alone:
//!
//! - `/keyword,country`
//! - `/keyword,city,country`
//! - `/keyword,city,country,engine`
//!
//! The positional grammar keeps chat friction low at the cost of being
//! ambiguous for city names that themselves contain a comma; that limitation
//! is accepted.

use thiserror::Error;

use crate::request::{EngineId, RequestError, SearchRequest, SUPPORTED_ENGINES};

/// Leading character marking a chat message as a command.
pub const COMMAND_SIGIL: char = '/';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error(
        "bad format: expected {COMMAND_SIGIL}keyword,country or {COMMAND_SIGIL}keyword,city,country[,engine]"
    )]
    BadFormat,

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("unsupported engine \"{0}\" (expected one of: {SUPPORTED_ENGINES})")]
    UnsupportedEngine(String),
}

/// Parses a chat command into a validated [`SearchRequest`].
///
/// # Errors
///
/// - [`CommandError::BadFormat`] when the text does not start with the sigil
///   or the comma-separated arity is outside 2..=4.
/// - [`CommandError::Request`] when the keyword is empty or the country is
///   not in the country table.
/// - [`CommandError::UnsupportedEngine`] when a fourth segment names an
///   unknown engine. Unlike the HTTP path, the command form rejects bad
///   engines instead of silently defaulting.
pub fn parse_command(text: &str) -> Result<SearchRequest, CommandError> {
    let rest = text
        .trim()
        .strip_prefix(COMMAND_SIGIL)
        .ok_or(CommandError::BadFormat)?;

    let segments: Vec<&str> = rest.split(',').map(str::trim).collect();

    let (keyword, city, country, engine) = match segments.as_slice() {
        [keyword, country] => (*keyword, "", *country, EngineId::default()),
        [keyword, city, country] => (*keyword, *city, *country, EngineId::default()),
        [keyword, city, country, engine] => {
            let engine = EngineId::parse(engine)
                .ok_or_else(|| CommandError::UnsupportedEngine(engine.to_lowercase()))?;
            (*keyword, *city, *country, engine)
        }
        _ => return Err(CommandError::BadFormat),
    };

    Ok(SearchRequest::new(keyword, city, country, engine)?)
}
