//! Tipos de erro do crate.
//!
//! O núcleo de decisão nunca levanta erro para ambiguidade de domínio —
//! entradas não classificáveis viram sentinelas (`INDEFINIDO`, `None`,
//! `NENHUMA`). [`SdrError`] cobre apenas falhas reais de infraestrutura:
//! configuração, rede e parse.

use thiserror::Error;

use crate::ia::IaError;

#[derive(Debug, Error)]
pub enum SdrError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("IA error: {0}")]
    Ia(#[from] IaError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
