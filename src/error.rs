use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("I/O error during {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("Unrecognized time unit: {value}")]
    UnknownTimeUnit { value: String },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}

pub type TrackerResult<T> = Result<T, TrackerError>;
