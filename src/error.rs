use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot load the renewable electricity data: {0}")]
    DataUnavailable(String),

    // Queries arrive pre-validated against the enumerated menus, so a
    // miss here is a caller bug, not a user-facing path.
    #[error("no country named \"{0}\" in the dataset")]
    NotFound(String),

    #[error("no renewable energy types found in the data")]
    NoSourceTypesAvailable,

    #[error("Range Error: {0}")]
    InvalidRange(String),
}
