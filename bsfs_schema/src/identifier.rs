use crate::EntityKind;

/// Syntax of the path segment that identifies an entity.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IdFormat
{
    /// One or more ASCII digits.
    Numeric,

    /// `ds.` followed by 32 lowercase hexadecimal digits.
    DatasetHash,

    /// The entity cannot be named in a path.
    Unaddressable,
}

/// Prefix of dataset identifiers.
pub const DATASET_PREFIX: &str = "ds.";

/// Number of hexadecimal digits after [`DATASET_PREFIX`].
pub const DATASET_HASH_LEN: usize = 32;

impl IdFormat
{
    /// Whether the segment is well-formed.
    /// This says nothing about whether the entity exists.
    pub fn matches(self, segment: &str) -> bool
    {
        match self {
            Self::Numeric       => is_numeric(segment),
            Self::DatasetHash   => is_dataset_hash(segment),
            Self::Unaddressable => false,
        }
    }
}

impl EntityKind
{
    pub fn id_format(self) -> IdFormat
    {
        match self {
            Self::User    => IdFormat::Unaddressable,
            Self::Dataset => IdFormat::DatasetHash,
            Self::Project
            | Self::AppResult
            | Self::Sample
            | Self::File
            | Self::Biosample
            | Self::AppSession
            | Self::SequencedFile => IdFormat::Numeric,
        }
    }

    /// Whether the segment is a well-formed identifier
    /// for an entity of this kind.
    pub fn validate(self, segment: &str) -> bool
    {
        self.id_format().matches(segment)
    }
}

fn is_numeric(s: &str) -> bool
{
    !s.is_empty() && s.bytes().all(|c| c.is_ascii_digit())
}

fn is_dataset_hash(s: &str) -> bool
{
    let hash = match s.strip_prefix(DATASET_PREFIX) {
        Some(hash) => hash,
        None => return false,
    };

    // Uppercase digits are rejected;
    // the backend only ever hands out lowercase.
    hash.len() == DATASET_HASH_LEN
        && hash.bytes().all(|c| matches!(c, b'0' ..= b'9' | b'a' ..= b'f'))
}
