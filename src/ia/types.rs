//! Tipos de requisição e resposta da API Anthropic Messages.
//!
//! Espelham o formato do endpoint `v1/messages`; os nomes de campo seguem
//! o contrato JSON da API, não a convenção do domínio.

use serde::{Deserialize, Serialize};

/// Corpo da requisição para o endpoint `/v1/messages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesRequest {
    /// Identificador do modelo (ex.: "claude-sonnet-4-20250514").
    pub model: String,
    /// Máximo de tokens na resposta gerada.
    pub max_tokens: u32,
    /// Prompt de sistema, quando usado.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Conversa (mensagens de usuário e assistente).
    pub messages: Vec<Message>,
}

/// Uma mensagem na conversa com o modelo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// "user" ou "assistant".
    pub role: String,
    pub content: String,
}

/// Resposta do endpoint `/v1/messages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub id: String,
    pub content: Vec<ContentBlock>,
    pub model: String,
    /// "end_turn", "max_tokens", ... `None` se ainda em progresso.
    pub stop_reason: Option<String>,
    pub usage: Usage,
}

/// Bloco de conteúdo da resposta — atualmente apenas texto.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Tipo do bloco ("text"). Serializado como "type" no JSON.
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

/// Consumo de tokens de uma chamada — insumo direto da tabela de custos.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requisicao_omite_system_quando_ausente() {
        let req = MessagesRequest {
            model: "claude-sonnet-4-20250514".into(),
            max_tokens: 512,
            system: None,
            messages: vec![Message {
                role: "user".into(),
                content: "Olá".into(),
            }],
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("\"system\""));

        let com_system = MessagesRequest {
            system: Some("Você é um SDR.".into()),
            ..req
        };
        let json = serde_json::to_string(&com_system).unwrap();
        assert!(json.contains("\"system\":\"Você é um SDR.\""));
    }

    #[test]
    fn resposta_no_formato_da_api() {
        let api_json = r#"{
            "id": "msg_123",
            "content": [{"type": "text", "text": "{\"intencao\":\"DUVIDA_PRECO\"}"}],
            "model": "claude-sonnet-4-20250514",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 210, "output_tokens": 40}
        }"#;
        let resp: MessagesResponse = serde_json::from_str(api_json).unwrap();
        assert_eq!(resp.id, "msg_123");
        assert_eq!(resp.content[0].content_type, "text");
        assert_eq!(resp.usage.input_tokens, 210);
        assert_eq!(resp.usage.output_tokens, 40);
    }

    #[test]
    fn campo_type_renomeado_no_json() {
        let bloco = ContentBlock {
            content_type: "text".into(),
            text: "oi".into(),
        };
        let json = serde_json::to_string(&bloco).unwrap();
        assert!(json.contains(r#""type""#));
        assert!(!json.contains("content_type"));
    }

    #[test]
    fn stop_reason_nulo() {
        let json = r#"{
            "id": "msg_456",
            "content": [],
            "model": "test",
            "stop_reason": null,
            "usage": {"input_tokens": 0, "output_tokens": 0}
        }"#;
        let resp: MessagesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.stop_reason, None);
    }
}
