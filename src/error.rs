use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloseoutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Could not load ledger: {0}")]
    Load(String),

    #[error("Terminal session error: {0}")]
    Terminal(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CloseoutError>;
