use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use fairway_core::course::CourseError;
use fairway_core::game_trait::GameError;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    /// The round store is full.
    AtCapacity(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(m) | Self::NotFound(m) | Self::AtCapacity(m) => write!(f, "{m}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            Self::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            Self::AtCapacity(m) => (StatusCode::SERVICE_UNAVAILABLE, m.clone()),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<GameError> for AppError {
    fn from(e: GameError) -> Self {
        match e {
            GameError::UnknownHole(_) | GameError::HoleNotRecorded(_) => {
                Self::NotFound(e.to_string())
            },
            _ => Self::BadRequest(e.to_string()),
        }
    }
}

impl From<CourseError> for AppError {
    fn from(e: CourseError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_errors_map_to_status() {
        let resp = AppError::from(GameError::UnknownHole(20)).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let resp = AppError::from(GameError::MissingScore { player_id: 2 }).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn course_errors_are_bad_requests() {
        let err = AppError::from(CourseError::NoHoles);
        assert_eq!(err.to_string(), "tee has no holes");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn capacity_is_unavailable() {
        let resp = AppError::AtCapacity("full".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
