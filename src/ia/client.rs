//! Cliente HTTP para a API Anthropic Messages.

use std::time::Duration;

use reqwest::Client;

use super::error::IaError;
use super::types::{MessagesRequest, MessagesResponse};
use super::EnvioMensagens;

const API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Cliente da API Anthropic com timeouts configurados.
pub struct ClienteAnthropic {
    api_key: String,
    client: Client,
    base_url: String,
}

impl ClienteAnthropic {
    pub fn novo(api_key: String) -> Self {
        Self::com_base_url(api_key, API_URL.to_string())
    }

    /// Cria um cliente apontando para uma base URL customizada (testes).
    pub fn com_base_url(api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to build HTTP client");
        Self {
            api_key,
            client,
            base_url,
        }
    }
}

impl EnvioMensagens for ClienteAnthropic {
    async fn enviar(&self, req: &MessagesRequest) -> Result<MessagesResponse, IaError> {
        let response = self
            .client
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(req)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(|secs| secs * 1000)
                .unwrap_or(1000);
            return Err(IaError::RateLimited {
                retry_after_ms: retry_after,
            });
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(IaError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.json::<MessagesResponse>().await?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ia::types::Message;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn requisicao() -> MessagesRequest {
        MessagesRequest {
            model: "claude-sonnet-4-20250514".into(),
            max_tokens: 512,
            system: None,
            messages: vec![Message {
                role: "user".into(),
                content: "quanto custa?".into(),
            }],
        }
    }

    #[tokio::test]
    async fn envia_e_parseia_resposta() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("x-api-key", "chave-teste"))
            .and(header("anthropic-version", "2023-06-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_1",
                "content": [{"type": "text", "text": "{\"intencao\":\"DUVIDA_PRECO\",\"confianca\":0.9}"}],
                "model": "claude-sonnet-4-20250514",
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 120, "output_tokens": 25}
            })))
            .mount(&server)
            .await;

        let cliente = ClienteAnthropic::com_base_url("chave-teste".into(), server.uri());
        let resposta = cliente.enviar(&requisicao()).await.unwrap();

        assert_eq!(resposta.id, "msg_1");
        assert_eq!(resposta.usage.input_tokens, 120);
        assert!(resposta.content[0].text.contains("DUVIDA_PRECO"));
    }

    #[tokio::test]
    async fn http_429_vira_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
            .mount(&server)
            .await;

        let cliente = ClienteAnthropic::com_base_url("chave".into(), server.uri());
        let erro = cliente.enviar(&requisicao()).await.unwrap_err();

        assert!(matches!(
            erro,
            IaError::RateLimited {
                retry_after_ms: 7000
            }
        ));
    }

    #[tokio::test]
    async fn http_500_vira_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
            .mount(&server)
            .await;

        let cliente = ClienteAnthropic::com_base_url("chave".into(), server.uri());
        let erro = cliente.enviar(&requisicao()).await.unwrap_err();

        match erro {
            IaError::ApiError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "internal");
            }
            outro => panic!("erro inesperado: {outro:?}"),
        }
    }
}
