//! Erros do cliente de IA.

use thiserror::Error;

/// Erros que podem ocorrer ao interagir com o provedor de IA.
#[derive(Debug, Error)]
pub enum IaError {
    /// O servidor retornou HTTP 429. `retry_after_ms` indica quanto
    /// esperar antes de retentar — quem retenta é o chamador externo.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Erro retornado pela API (ex.: 401 chave inválida, 500 interno).
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Falha de rede subjacente (DNS, conexão recusada, timeout).
    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// O modelo respondeu algo que não é a classificação JSON esperada.
    #[error("failed to parse model response: {0}")]
    ParseError(String),
}
