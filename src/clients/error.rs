use std::fmt;

/// Transport or availability failure of a collaborator service.
///
/// Collaborator traits return this as a tagged value instead of panicking or
/// hiding the failure in a catch-all, so the orchestrator's step logic is
/// exhaustive matching.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientError {
    pub service: &'static str,
    pub message: String,
}

impl ClientError {
    pub fn new(service: &'static str, message: impl Into<String>) -> Self {
        ClientError {
            service,
            message: message.into(),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} service error: {}", self.service, self.message)
    }
}

impl std::error::Error for ClientError {}

pub type ClientResult<T> = Result<T, ClientError>;
