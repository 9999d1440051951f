//! Registros de domínio trocados entre o motor e os colaboradores externos.
//!
//! Nenhum destes tipos é persistido pelo motor: a camada de persistência
//! (store externo, indexado por `(lead_id, empresa)`) lê e grava
//! [`EstadoConversa`] e [`ClassificacaoLead`]; o motor apenas computa
//! valores novos.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::modo::Modo;
use crate::temperatura::Temperatura;

/// Canal pelo qual a mensagem chegou.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Canal {
    Whatsapp,
    Email,
}

/// Etapa do funil de vendas em que o lead se encontra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoFunil {
    Novo,
    Qualificacao,
    Proposta,
    Negociacao,
    Ganho,
    Perdido,
}

/// Perfil comportamental DISC capturado para o lead, quando disponível.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PerfilDisc {
    Dominancia,
    Influencia,
    Estabilidade,
    Conformidade,
}

/// Quem produziu a classificação persistida do lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Origem {
    Automatica,
    Manual,
}

/// Mensagem recebida de um lead, imutável, fornecida a cada invocação.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MensagemRecebida {
    pub texto: String,
    pub canal: Canal,
    pub timestamp: DateTime<Utc>,
}

impl MensagemRecebida {
    pub fn nova(texto: impl Into<String>, canal: Canal) -> Self {
        Self {
            texto: texto.into(),
            canal,
            timestamp: Utc::now(),
        }
    }
}

/// Estado corrente de uma conversa com um lead.
///
/// Criado no primeiro contato, atualizado pelo store externo após cada
/// mensagem classificada. `framework_ativo` referencia o framework de
/// qualificação pelo nome — nomes desconhecidos são tratados como
/// "nenhum framework" (fail closed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstadoConversa {
    pub lead_id: Uuid,
    /// Identificador do tenant dono do lead.
    pub empresa: String,
    pub estado_funil: EstadoFunil,
    #[serde(default)]
    pub framework_ativo: Option<String>,
    /// Campos do framework já capturados (campo → valor).
    #[serde(default)]
    pub framework_data: BTreeMap<String, Value>,
    #[serde(default)]
    pub perfil_disc: Option<PerfilDisc>,
    pub modo: Modo,
}

impl EstadoConversa {
    /// Estado inicial criado no primeiro contato de um lead.
    pub fn nova(lead_id: Uuid, empresa: impl Into<String>) -> Self {
        Self {
            lead_id,
            empresa: empresa.into(),
            estado_funil: EstadoFunil::Novo,
            framework_ativo: None,
            framework_data: BTreeMap::new(),
            perfil_disc: None,
            modo: Modo::SdrIa,
        }
    }
}

/// Agregado de classificação do lead persistido por tenant.
///
/// Invariante central: `temperatura` e `prioridade` só se movem segundo a
/// regra monotônica da política (ver [`crate::temperatura`]) quando
/// `origem == AUTOMATICA`. Rebaixar um lead é ação exclusivamente humana,
/// registrada com `origem == MANUAL`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificacaoLead {
    #[serde(default)]
    pub icp: Option<String>,
    #[serde(default)]
    pub persona: Option<String>,
    pub temperatura: Temperatura,
    /// Prioridade de atendimento: 1 (máxima) a 3 (mínima).
    pub prioridade: u8,
    pub score_interno: i32,
    pub origem: Origem,
    #[serde(default)]
    pub justificativa: Option<String>,
}

impl Default for ClassificacaoLead {
    fn default() -> Self {
        Self {
            icp: None,
            persona: None,
            temperatura: Temperatura::Frio,
            prioridade: 3,
            score_interno: 0,
            origem: Origem::Automatica,
            justificativa: None,
        }
    }
}

/// Atualização parcial de [`ClassificacaoLead`] proposta pela política.
///
/// O motor nunca grava: ele devolve esta atualização para o store externo
/// aplicar. Campos `None` significam "sem mudança".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AtualizacaoLead {
    #[serde(default)]
    pub temperatura: Option<Temperatura>,
    #[serde(default)]
    pub prioridade: Option<u8>,
    #[serde(default)]
    pub score_interno: Option<i32>,
    #[serde(default)]
    pub justificativa: Option<String>,
}

impl AtualizacaoLead {
    /// `true` quando nenhum campo propõe mudança.
    pub fn esta_vazia(&self) -> bool {
        self.temperatura.is_none()
            && self.prioridade.is_none()
            && self.score_interno.is_none()
            && self.justificativa.is_none()
    }

    /// Aplica a atualização sobre um agregado existente.
    ///
    /// Toda aplicação automática marca `origem = AUTOMATICA`.
    pub fn aplicar(&self, lead: &mut ClassificacaoLead) {
        if let Some(t) = self.temperatura {
            lead.temperatura = t;
        }
        if let Some(p) = self.prioridade {
            lead.prioridade = p;
        }
        if let Some(s) = self.score_interno {
            lead.score_interno = s;
        }
        if let Some(j) = &self.justificativa {
            lead.justificativa = Some(j.clone());
        }
        lead.origem = Origem::Automatica;
    }
}
