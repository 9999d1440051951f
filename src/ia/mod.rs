//! Integração com o provedor de IA para classificação assistida por LLM.
//!
//! O motor de decisão em si é puro; este módulo é o colaborador que a
//! função de borda (`sdr-ia-interpret`) usa quando decide pagar por uma
//! chamada de modelo. Toda falha aqui cai de volta no classificador por
//! palavras-chave — a conversa nunca para por causa do provedor.

pub mod client;
pub mod error;
pub mod interprete;
pub mod types;

pub use client::ClienteAnthropic;
pub use error::IaError;
pub use interprete::{classificar_com_llm, classificar_hibrido};
pub use types::{ContentBlock, Message, MessagesRequest, MessagesResponse, Usage};

/// Abstração de envio de mensagens ao provedor, para permitir mocks em
/// teste e implementações alternativas.
pub trait EnvioMensagens {
    fn enviar(
        &self,
        req: &MessagesRequest,
    ) -> impl Future<Output = Result<MessagesResponse, IaError>> + Send;
}
