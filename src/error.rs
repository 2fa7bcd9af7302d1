use thiserror::Error;

/// Errors that terminate a conversion.
///
/// Every error is scoped to the top-level call that raised it, nothing is retried and no partial
/// result is returned. Loose scalar data (a number field holding `"abc"`) is _not_ an error, it
/// coerces to `null`.
#[derive(Debug, Error)]
pub enum Error {
    /// An object was expected (a map conversion) but something else was found.
    #[error("expected input to be an object but received: {0}")]
    ExpectedObject(&'static str),
    /// An array was expected (an array conversion) but something else was found.
    #[error("expected input to be an array but received: {0}")]
    ExpectedArray(&'static str),
    /// Pattern text was not of the `/body/flags` shape.
    #[error("malformed pattern text '{0}', expected /body/flags")]
    MalformedPattern(String),
    /// Pattern body failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
    /// Raised by a user supplied conversion function.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// An error with a custom message, for use in user conversion functions.
    pub fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

/// Result alias with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
