use thiserror::Error;

pub type Result<T> = std::result::Result<T, ArteError>;

#[derive(Debug, Error)]
pub enum ArteError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("training task of ensemble member {member} failed: {message}")]
    MemberTrainingFailed { member: usize, message: String },

    #[error("could not build training thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("invalid JSON document")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ArteError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ArteError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
