use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ViewerError {
    #[snafu(display("{} `{}` not found", kind, key))]
    Lookup { kind: String, key: String },
    #[snafu(display("Read result index `{}` error: {}", path, source))]
    IndexRead {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Fetch `{}` error: {}", path, source))]
    Fetch {
        source: reqwest::Error,
        path: String,
    },
    #[snafu(display("Fetch `{}` returned HTTP status {}", path, status))]
    FetchStatus {
        status: reqwest::StatusCode,
        path: String,
    },
    #[snafu(display("Read local result `{}` error: {}", path, source))]
    FetchLocal {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Fetched result `{}` is empty", path))]
    EmptyResult { path: String },
    #[snafu(display("Invalid JSON format in `{}`: {}", stage, source))]
    Parse {
        source: serde_json::Error,
        stage: String,
        raw: String,
    },
    #[snafu(display("Invalid input at stage `{}`: {}", stage, message))]
    InvalidInput { stage: String, message: String },
    #[snafu(display("Pdfium `{}` error {}", stage, source))]
    Pdfium {
        source: pdfium_render::prelude::PdfiumError,
        stage: String,
    },
    #[snafu(display("Image Write error: {}", source))]
    ImageWrite {
        source: image::ImageError,
        path: String,
    },
    #[snafu(display("Write `{}` error: {}", path, source))]
    IoWrite {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Serialize `{}` error: {}", path, source))]
    JsonWrite {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Read config `{}` error: {}", path, source))]
    ConfigRead {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Load config `{}` error: {}", path, source))]
    Config {
        source: serde_json::Error,
        path: String,
    },
}

impl ViewerError {
    /// Detailed diagnostic shown next to the short message, if any.
    ///
    /// Parse failures keep the raw content that failed to parse.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            ViewerError::Parse { raw, .. } => Some(raw.as_str()),
            _ => None,
        }
    }

    /// Coarse class used when reporting an error to the user.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ViewerError::Lookup { .. }
            | ViewerError::IndexRead { .. }
            | ViewerError::ConfigRead { .. } => ErrorKind::Lookup,
            ViewerError::Fetch { .. }
            | ViewerError::FetchStatus { .. }
            | ViewerError::FetchLocal { .. }
            | ViewerError::EmptyResult { .. } => ErrorKind::Fetch,
            ViewerError::Parse { .. } | ViewerError::Config { .. } => ErrorKind::Parse,
            ViewerError::InvalidInput { .. } | ViewerError::Pdfium { .. } => {
                ErrorKind::InvalidInput
            }
            ViewerError::ImageWrite { .. }
            | ViewerError::IoWrite { .. }
            | ViewerError::JsonWrite { .. } => ErrorKind::Output,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lookup,
    Fetch,
    Parse,
    InvalidInput,
    Output,
}
