//! Tabelas de custo de tokens e de limite de chamadas por função.
//!
//! As tabelas são estruturas imutáveis injetadas na construção do motor —
//! não globais de processo — para que múltiplos tenants/configurações
//! coexistam. Nenhum throttling acontece aqui: a tabela só fornece o
//! limite para o throttler externo.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Preço por 1K tokens de um modelo, em dólares.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustoModelo {
    pub entrada_usd_1k: f64,
    pub saida_usd_1k: f64,
}

/// Tabela de custo por modelo de IA.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabelaCustos {
    modelos: BTreeMap<String, CustoModelo>,
}

impl Default for TabelaCustos {
    fn default() -> Self {
        let mut modelos = BTreeMap::new();
        modelos.insert(
            "claude-sonnet-4-20250514".to_string(),
            CustoModelo {
                entrada_usd_1k: 0.003,
                saida_usd_1k: 0.015,
            },
        );
        modelos.insert(
            "claude-3-5-haiku-20241022".to_string(),
            CustoModelo {
                entrada_usd_1k: 0.0008,
                saida_usd_1k: 0.004,
            },
        );
        modelos.insert(
            "gemini-2.0-flash".to_string(),
            CustoModelo {
                entrada_usd_1k: 0.0001,
                saida_usd_1k: 0.0004,
            },
        );
        modelos.insert(
            "gemini-1.5-pro".to_string(),
            CustoModelo {
                entrada_usd_1k: 0.00125,
                saida_usd_1k: 0.005,
            },
        );
        Self { modelos }
    }
}

impl TabelaCustos {
    /// Calcula o custo em USD de uma chamada de IA.
    ///
    /// Modelo desconhecido custa 0.0 — sentinela explícita de "sem preço",
    /// não um erro.
    pub fn calcular_custo_ia(&self, modelo: &str, tokens_entrada: u32, tokens_saida: u32) -> f64 {
        let Some(custo) = self.modelos.get(modelo) else {
            return 0.0;
        };
        f64::from(tokens_entrada) / 1000.0 * custo.entrada_usd_1k
            + f64::from(tokens_saida) / 1000.0 * custo.saida_usd_1k
    }
}

/// Tabela de limite de chamadas por hora, por nome de função.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabelaLimites {
    limites: BTreeMap<String, u32>,
    /// Limite aplicado a funções não mapeadas.
    padrao: u32,
}

impl Default for TabelaLimites {
    fn default() -> Self {
        Self::com_padrao(100)
    }
}

impl TabelaLimites {
    /// Tabela com os limites conhecidos e o fallback fornecido.
    pub fn com_padrao(padrao: u32) -> Self {
        let mut limites = BTreeMap::new();
        limites.insert("copilot-chat".to_string(), 60);
        limites.insert("sdr-intent-classifier".to_string(), 200);
        limites.insert("sdr-ia-interpret".to_string(), 120);
        limites.insert("sgt-webhook".to_string(), 600);
        limites.insert("cadence-runner".to_string(), 60);
        Self { limites, padrao }
    }

    /// Limite de chamadas/hora para a função. Nomes não mapeados recebem
    /// o padrão documentado (100/hora na tabela default).
    pub fn limite(&self, funcao: &str) -> u32 {
        self.limites.get(funcao).copied().unwrap_or(self.padrao)
    }
}

/// Registro de uso de IA derivado puramente da tabela de custos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistroUsoIa {
    pub modelo: String,
    pub tokens_entrada: u32,
    pub tokens_saida: u32,
    pub custo_usd: f64,
}

impl RegistroUsoIa {
    pub fn novo(tabela: &TabelaCustos, modelo: &str, tokens_entrada: u32, tokens_saida: u32) -> Self {
        Self {
            modelo: modelo.to_string(),
            tokens_entrada,
            tokens_saida,
            custo_usd: tabela.calcular_custo_ia(modelo, tokens_entrada, tokens_saida),
        }
    }
}
