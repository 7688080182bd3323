use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShowcaseError {
    #[error("please sign in to view events")]
    Unauthenticated,

    #[error("invalid tier: {0}")]
    InvalidTier(String),

    #[error("invalid event: {0}")]
    InvalidEvent(String),

    #[error("auth provider error: {0}")]
    Auth(String),

    #[error("event store error: {0}")]
    Store(String),

    #[error("events are not loaded")]
    NotReady,

    #[error("config load failed: {0}")]
    ConfigLoad(String),

    #[error("setup required: {0}")]
    SetupRequired(String),
}
