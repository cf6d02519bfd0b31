use axum::{
    response::{IntoResponse, Response},
    Json,
    http::StatusCode,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("URL não informada")]
    MissingUrl,

    #[error("Plataforma não suportada")]
    UnsupportedPlatform,

    #[error("Falha no navegador: {0}")]
    Browser(String),

    #[error("Elemento obrigatório não encontrado: {0}")]
    ExtractionTimeout(String),

    #[error("Falha ao baixar imagem: {0}")]
    ImageFetch(String),

    #[error("Erro de configuração: {0}")]
    Config(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MissingUrl => StatusCode::BAD_REQUEST,
            AppError::UnsupportedPlatform => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Browser(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ExtractionTimeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ImageFetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ImageFetch(err.to_string())
    }
}

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
