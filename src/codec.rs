//! Text encoding of binary trees
//!
//! A tree is written as a pre-order sequence of tokens joined by a delimiter. A node contributes
//! its value, then the tokens of its left subtree, then the tokens of its right subtree, then an
//! empty terminator token. An absent subtree contributes a single empty marker token.
//!
//! With the canonical codec (`,` delimiter, empty string as the empty marker):
//!
//! | Tree                     | Encoding   |
//! |--------------------------|------------|
//! | empty                    | ``         |
//! | `2`                      | `2,,,`     |
//! | `1` with right child `2` | `1,,2,,,,` |
//! | `1` with left child `2`  | `1,2,,,,,` |

use std::borrow::Cow;
use std::convert::TryFrom;
use std::str::Split;

use tracing::{debug, instrument};

use crate::error::{ConfigError, ParseError};
use crate::tree::{BinaryTree, Event, IterEvents, PreorderBuilder};
use crate::value::Scalar;

/// Plain, unvalidated codec parameters, e.g. as loaded from a configuration file
///
/// Convert to a [`Codec`] with `Codec::try_from`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CodecSettings {
    pub delimiter: char,
    pub empty_marker: String,
    pub max_nodes: Option<usize>,
}

impl Default for CodecSettings {
    fn default() -> Self {
        Self {
            delimiter: ',',
            empty_marker: String::new(),
            max_nodes: None,
        }
    }
}

/// Parameters of the text encoding of a tree
///
/// `Codec::default()` is the canonical encoding used by
/// [`BinaryTree::serialize`] and [`BinaryTree::deserialize`].
///
/// # Examples
///
/// ```
/// use bintree::{BinaryTree, Codec, tree};
///
/// let codec = Codec::new(';', "#")?.with_max_nodes(16);
/// let tree = tree![1, _, [2]];
///
/// let text = codec.encode(&tree);
/// assert_eq!(text, "1;#;2;#;#;;");
/// assert_eq!(codec.decode::<i32>(&text).unwrap(), tree);
/// # Ok::<(), bintree::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CodecSettings", into = "CodecSettings"))]
pub struct Codec {
    delimiter: char,
    empty_marker: String,
    max_nodes: Option<usize>,
}

impl Default for Codec {
    fn default() -> Self {
        let CodecSettings {delimiter, empty_marker, max_nodes} = CodecSettings::default();
        Self {delimiter, empty_marker, max_nodes}
    }
}

impl TryFrom<CodecSettings> for Codec {
    type Error = ConfigError;

    fn try_from(settings: CodecSettings) -> Result<Self, Self::Error> {
        let CodecSettings {delimiter, empty_marker, max_nodes} = settings;

        // Integers are written with digits and a `-` sign, and may be parsed with a `+` sign
        if delimiter.is_ascii_digit() || delimiter == '-' || delimiter == '+' {
            return Err(ConfigError::AmbiguousDelimiter(delimiter));
        }

        if empty_marker.contains(delimiter) {
            return Err(ConfigError::MarkerContainsDelimiter {marker: empty_marker, delimiter});
        }

        // Every `Scalar` fits in one of these two types
        if empty_marker.parse::<i128>().is_ok() || empty_marker.parse::<u128>().is_ok() {
            return Err(ConfigError::AmbiguousMarker(empty_marker));
        }

        Ok(Self {delimiter, empty_marker, max_nodes})
    }
}

impl From<Codec> for CodecSettings {
    fn from(codec: Codec) -> Self {
        let Codec {delimiter, empty_marker, max_nodes} = codec;
        Self {delimiter, empty_marker, max_nodes}
    }
}

impl Codec {
    /// Creates a codec with the given delimiter and empty marker
    ///
    /// Fails if the encoding would be ambiguous: the delimiter could appear inside a value, the
    /// marker contains the delimiter, or the marker could be parsed as a value.
    pub fn new(delimiter: char, empty_marker: impl Into<String>) -> Result<Self, ConfigError> {
        Self::try_from(CodecSettings {
            delimiter,
            empty_marker: empty_marker.into(),
            max_nodes: None,
        })
    }

    /// Makes `decode` refuse input describing more than `limit` nodes
    pub fn with_max_nodes(self, limit: usize) -> Self {
        Self {
            max_nodes: Some(limit),
            ..self
        }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn empty_marker(&self) -> &str {
        &self.empty_marker
    }

    pub fn max_nodes(&self) -> Option<usize> {
        self.max_nodes
    }

    /// Encodes a tree as text
    #[instrument(level = "trace", skip_all)]
    pub fn encode<T: Scalar>(&self, tree: &BinaryTree<T>) -> String {
        let tokens: Vec<Cow<'_, str>> = IterEvents::new(tree.root()).map(|event| match event {
            Event::Enter(node) => Cow::Owned(node.value().to_string()),
            Event::Empty => Cow::Borrowed(self.empty_marker.as_str()),
            Event::Leave => Cow::Borrowed(""),
        }).collect();

        let mut delimiter = [0; 4];
        tokens.join(&*self.delimiter.encode_utf8(&mut delimiter))
    }

    /// Decodes a tree from text produced by `encode` with the same parameters
    #[instrument(level = "trace", skip_all, fields(len = text.len()))]
    pub fn decode<T: Scalar>(&self, text: &str) -> Result<BinaryTree<T>, ParseError> {
        let mut tokens = Tokens::new(text, self.delimiter);

        match self.decode_tokens(&mut tokens) {
            Ok(tree) => {
                debug!(tokens = tokens.position, "decoded tree");
                Ok(tree)
            },

            Err(err) => {
                debug!(error = %err, "failed to decode tree");
                Err(err)
            },
        }
    }

    fn decode_tokens<T: Scalar>(&self, tokens: &mut Tokens<'_>) -> Result<BinaryTree<T>, ParseError> {
        let mut builder = PreorderBuilder::new();

        while !builder.is_complete() {
            let (position, token) = tokens.next_token()?;

            let slot = if token == self.empty_marker {
                None
            } else {
                let value = token.parse::<T>().map_err(|_| ParseError::InvalidValue {
                    position,
                    token: token.to_string(),
                })?;

                if let Some(limit) = self.max_nodes {
                    if builder.node_count() >= limit {
                        return Err(ParseError::TooManyNodes {limit});
                    }
                }

                Some(value)
            };

            // Every node finished by this slot is followed by its terminator
            for _ in 0..builder.push(slot) {
                let (position, token) = tokens.next_token()?;
                if !token.is_empty() {
                    return Err(ParseError::MissingTerminator {
                        position,
                        token: token.to_string(),
                    });
                }
            }
        }

        if tokens.next().is_some() {
            return Err(ParseError::TrailingTokens {position: tokens.position - 1});
        }

        let root = builder.finish().flatten().map(|node| *node);
        Ok(BinaryTree::from(root))
    }
}

/// Cursor over the tokens of an encoded tree
struct Tokens<'a> {
    inner: Split<'a, char>,
    /// Number of tokens consumed so far
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str, delimiter: char) -> Self {
        Self {
            inner: text.split(delimiter),
            position: 0,
        }
    }

    /// Returns the next token and its position, failing if the input has ended
    fn next_token(&mut self) -> Result<(usize, &'a str), ParseError> {
        let position = self.position;
        self.next()
            .map(|token| (position, token))
            .ok_or(ParseError::UnexpectedEnd {position})
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.inner.next()?;
        self.position += 1;
        Some(token)
    }
}
