use thiserror::Error;

/// Reasons the serialized form of a tree could not be parsed
///
/// Positions are zero-based indexes into the sequence of tokens produced by splitting the input on
/// the codec's delimiter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("input ended while a subtree was still expected at token {position}")]
    UnexpectedEnd { position: usize },

    #[error("invalid value {token:?} at token {position}")]
    InvalidValue { position: usize, token: String },

    #[error("expected an empty node terminator at token {position}, found {token:?}")]
    MissingTerminator { position: usize, token: String },

    #[error("unexpected input after the root subtree, starting at token {position}")]
    TrailingTokens { position: usize },

    #[error("input describes more than {limit} nodes")]
    TooManyNodes { limit: usize },
}

/// Invalid `Codec` parameters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("empty marker {marker:?} contains the delimiter {delimiter:?}")]
    MarkerContainsDelimiter { marker: String, delimiter: char },

    #[error("delimiter {0:?} can appear inside a value")]
    AmbiguousDelimiter(char),

    #[error("empty marker {0:?} can be parsed as a value")]
    AmbiguousMarker(String),
}
