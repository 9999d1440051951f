//! Configuração do motor carregada a partir de `sdr.toml`.
//!
//! A struct [`EngineConfig`] contém os parâmetros ajustáveis do motor.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `ANTHROPIC_API_KEY` tem precedência sobre o
//! arquivo para a chave de API.

use std::path::Path;

use serde::Deserialize;

use crate::error::SdrError;

/// Configuração de nível superior carregada de `sdr.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Chave da API Anthropic usada pelo interpretador de IA.
    #[serde(default)]
    pub api_key: String,

    /// Modelo usado para classificação via LLM.
    #[serde(default = "default_modelo_classificacao")]
    pub modelo_classificacao: String,

    /// Confiança mínima para que uma classificação conte como informação
    /// nova na política de temperatura.
    #[serde(default = "default_confianca_minima")]
    pub confianca_minima: f32,

    /// Margem de pontos que o arquétipo líder precisa abrir sobre o vice
    /// na inferência de perfil de investidor.
    #[serde(default = "default_margem_perfil")]
    pub margem_perfil_investidor: u32,

    /// Limite de chamadas/hora para funções não mapeadas na tabela.
    #[serde(default = "default_limite_padrao")]
    pub limite_padrao_hora: u32,
}

// Modelo padrão de classificação.
fn default_modelo_classificacao() -> String {
    "claude-sonnet-4-20250514".to_string()
}

// Limiar padrão de confiança: 0.5.
fn default_confianca_minima() -> f32 {
    0.5
}

// Margem padrão da inferência de perfil: 2 pontos.
fn default_margem_perfil() -> u32 {
    2
}

// Limite padrão para funções não mapeadas: 100/hora.
fn default_limite_padrao() -> u32 {
    100
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            modelo_classificacao: default_modelo_classificacao(),
            confianca_minima: default_confianca_minima(),
            margem_perfil_investidor: default_margem_perfil(),
            limite_padrao_hora: default_limite_padrao(),
        }
    }
}

impl EngineConfig {
    /// Carrega a configuração de `sdr.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self, SdrError> {
        Self::load_from(Path::new("sdr.toml"))
    }

    /// Carrega a configuração do caminho fornecido.
    pub fn load_from(path: &Path) -> Result<Self, SdrError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<EngineConfig>(&contents)?
        } else {
            Self::default()
        };

        // Variável de ambiente tem precedência sobre o arquivo para a chave.
        if let Ok(key) = std::env::var("ANTHROPIC_API_KEY")
            && !key.is_empty()
        {
            config.api_key = key;
        }

        Ok(config)
    }
}
