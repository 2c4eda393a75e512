use thiserror::Error;

/// Coarse classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The byte stream cannot be framed (truncated varint, odd code stream, ...)
    MalformedInput,
    /// The stream is framed correctly but references data that does not exist
    CorruptStream,
    /// A code-level LZW decode was handed zero codes
    EmptyStream,
    /// Codec parameters out of range
    InvalidConfig,
    /// I/O failure outside the codec core
    Io,
    /// A benchmark worker failed outside any codec call
    Internal,
}

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Framing errors
    #[error("Varint starting at offset {offset} has no terminating byte")]
    TruncatedVarint { offset: usize },

    #[error("Varint starting at offset {offset} exceeds 64 bits")]
    VarintOverflow { offset: usize },

    #[error("Record ends at offset {offset} before its literal byte")]
    MissingLiteral { offset: usize },

    #[error("Code stream length {0} is not a multiple of 2")]
    OddCodeStreamLength(usize),

    // LZ77 stream errors
    #[error("Back-reference distance {distance} exceeds decoded output {available}")]
    InvalidBackReference { distance: u64, available: usize },

    #[error("Match length {length} exceeds lookahead limit {max}")]
    MatchTooLong { length: u64, max: usize },

    #[error("Token at offset {offset} carries neither a match nor a literal")]
    EmptyToken { offset: usize },

    #[error("Token at offset {offset} has unusable distance {distance}")]
    InvalidDistance { distance: u64, offset: usize },

    // Dictionary errors
    #[error("Phrase index {index} not in dictionary of {dictionary_len} entries")]
    UnknownPhraseIndex { index: u64, dictionary_len: usize },

    #[error("Code {code} is neither a dictionary entry nor the next code {next_code}")]
    InvalidCode { code: u16, next_code: u32 },

    #[error("Code stream is empty")]
    EmptyStream,

    // Verification
    #[error("{codec} round trip mismatch: decoded {found} bytes, expected {expected}")]
    RoundTripMismatch { codec: &'static str, expected: usize, found: usize },

    // Configuration
    #[error("Invalid codec configuration: {0}")]
    InvalidConfig(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::Internal(_) => ErrorKind::Internal,
            Error::TruncatedVarint { .. }
            | Error::VarintOverflow { .. }
            | Error::MissingLiteral { .. }
            | Error::OddCodeStreamLength(_) => ErrorKind::MalformedInput,
            Error::InvalidBackReference { .. }
            | Error::MatchTooLong { .. }
            | Error::EmptyToken { .. }
            | Error::InvalidDistance { .. }
            | Error::UnknownPhraseIndex { .. }
            | Error::InvalidCode { .. }
            | Error::RoundTripMismatch { .. } => ErrorKind::CorruptStream,
            Error::EmptyStream => ErrorKind::EmptyStream,
            Error::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }

    /// Whether this error was caused by the compressed data itself
    pub fn is_data_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::MalformedInput | ErrorKind::CorruptStream | ErrorKind::EmptyStream
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
