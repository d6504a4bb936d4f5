use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaurioError {
    #[error("Configuration error: {0}")]
    Config(String),
}
