use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotesError {
    #[error("The {display} is not provided.  Please ensure the \"{field}\" property exists in the request.")]
    MissingField { field: String, display: String },

    #[error("The {display} may not be null.")]
    NullField { field: String, display: String },

    #[error("The {display} is not an integer: \"{raw}\".  Please ensure the \"{field}\" property is a whole number.")]
    NotAnInteger {
        field: String,
        display: String,
        raw: String,
    },

    #[error("The {display} must be a string.  Please ensure the \"{field}\" property is quoted text.")]
    NotAString { field: String, display: String },

    #[error("The {display} cannot be negative.")]
    NegativeValue { field: String, display: String },

    #[error("The address is invalid length.  Please ensure the \"addr\" property has between 25 and 36 characters (exclusive).")]
    InvalidAddressLength { length: usize },

    #[error("The address contains invalid characters.  Please ensure the \"addr\" property contains only the numerals 1-9 (not 0), upper-case letters excluding O and I, and lower-case letters excluding l.")]
    InvalidAddressChars { invalid: char },

    #[error("There are no notes with the address {0}.")]
    NotFound(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Not in an addrnotes project. Run 'addrnotes init' first.")]
    NotInitialized,

    #[error("Already initialized. Remove .addrnotes/ to reinitialize.")]
    AlreadyInitialized,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl NotesError {
    /// Short, stable name of the error variant, used in response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            NotesError::MissingField { .. } => "MissingField",
            NotesError::NullField { .. } => "NullField",
            NotesError::NotAnInteger { .. } => "NotAnInteger",
            NotesError::NotAString { .. } => "NotAString",
            NotesError::NegativeValue { .. } => "NegativeValue",
            NotesError::InvalidAddressLength { .. } => "InvalidAddressLength",
            NotesError::InvalidAddressChars { .. } => "InvalidAddressChars",
            NotesError::NotFound(_) => "NotFound",
            NotesError::InvalidBody(_) => "InvalidBody",
            NotesError::NotInitialized
            | NotesError::AlreadyInitialized
            | NotesError::Storage(_)
            | NotesError::Io(_)
            | NotesError::Json(_)
            | NotesError::Sqlite(_) => "StorageError",
        }
    }

    /// True for failures caused by the caller's input rather than the datastore.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            NotesError::MissingField { .. }
                | NotesError::NullField { .. }
                | NotesError::NotAnInteger { .. }
                | NotesError::NotAString { .. }
                | NotesError::NegativeValue { .. }
                | NotesError::InvalidAddressLength { .. }
                | NotesError::InvalidAddressChars { .. }
                | NotesError::InvalidBody(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, NotesError>;
