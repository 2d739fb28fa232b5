use crate::client::ClientError;
use crate::heatmap::color::ColorError;
use axum::http::StatusCode;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let status = match &err {
            ClientError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            ClientError::Status { status, .. } if *status == StatusCode::NOT_FOUND => {
                StatusCode::NOT_FOUND
            }
            ClientError::Status { .. } | ClientError::Http(_) => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<ColorError> for AppError {
    fn from(err: ColorError) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_gateway_statuses() {
        assert_eq!(
            AppError::from(ClientError::NotAuthenticated).status,
            StatusCode::UNAUTHORIZED
        );
        let missing = ClientError::Status {
            status: StatusCode::NOT_FOUND,
            body: "no such habit".into(),
        };
        assert_eq!(AppError::from(missing).status, StatusCode::NOT_FOUND);
        let broken = ClientError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        };
        assert_eq!(AppError::from(broken).status, StatusCode::BAD_GATEWAY);
    }
}
