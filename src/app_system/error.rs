use thiserror::Error;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] super::AppConfigError),
    #[error("collection task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
