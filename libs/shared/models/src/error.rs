use thiserror::Error;

/// Transport-level error taxonomy shared by every remote gateway.
///
/// A 401 never reaches callers as a field error - the transport clears the
/// session before surfacing `Unauthorized`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport failure: {0}")]
    Transport(String),
}

impl ApiError {
    /// Map a non-2xx status and the server's message into the taxonomy.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => ApiError::Unauthorized(message),
            404 => ApiError::NotFound(message),
            409 => ApiError::Conflict(message),
            400 => ApiError::BadRequest(message),
            _ => ApiError::Api { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            ApiError::from_status(404, "missing".to_string()),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from_status(409, "duplicate email".to_string()),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from_status(500, "server blew up".to_string()),
            ApiError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn test_display_carries_server_message() {
        let err = ApiError::NotFound("Appointment not found".to_string());
        assert_eq!(err.to_string(), "Not found: Appointment not found");
    }
}
