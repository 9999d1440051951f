//! Máquina de estados do modo de atendimento de uma conversa.
//!
//! Cada conversa está em um de três modos: `SDR_IA` (automação conduz),
//! `MANUAL` (um humano assumiu) ou `HIBRIDO` (intervenção humana pontual,
//! válida para uma única mensagem).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Quem está conduzindo a conversa neste momento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modo {
    /// A automação SDR está conduzindo a conversa.
    SdrIa,
    /// Um humano assumiu a conversa; a automação fica em silêncio.
    Manual,
    /// Um humano respondeu pontualmente sem assumir a conversa.
    Hibrido,
}

impl fmt::Display for Modo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modo::SdrIa => write!(f, "SDR_IA"),
            Modo::Manual => write!(f, "MANUAL"),
            Modo::Hibrido => write!(f, "HIBRIDO"),
        }
    }
}

/// Eventos externos que movem a conversa entre modos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventoModo {
    /// Um humano assumiu a conversa (takeover).
    AssumirHumano,
    /// O humano devolveu a conversa para a automação.
    Devolver,
    /// O humano vai responder apenas esta mensagem.
    RespostaPontual,
    /// A mensagem corrente foi processada (encerra o override pontual).
    MensagemProcessada,
}

/// Computa o próximo modo a partir do modo atual e de um evento.
///
/// Transições não mapeadas mantêm o modo atual — uma conversa nunca
/// pode quebrar o chamador por causa de um evento fora de ordem.
pub fn transicao(atual: Modo, evento: EventoModo) -> Modo {
    match (atual, evento) {
        (Modo::SdrIa, EventoModo::AssumirHumano) => Modo::Manual,
        (Modo::SdrIa, EventoModo::RespostaPontual) => Modo::Hibrido,
        (Modo::Manual, EventoModo::Devolver) => Modo::SdrIa,
        (Modo::Hibrido, EventoModo::MensagemProcessada) => Modo::SdrIa,
        (Modo::Hibrido, EventoModo::AssumirHumano) => Modo::Manual,
        (modo, _) => modo,
    }
}
