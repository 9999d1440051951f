//! Classificação assistida por LLM com fallback para o motor local.
//!
//! O modelo recebe a mensagem e o contexto da conversa e devolve um JSON
//! com a intenção e os campos extraídos. Qualquer falha — API fora do ar,
//! rate limit, JSON malformado, intenção desconhecida — degrada para o
//! classificador de palavras-chave: a conversa nunca para.

use serde_json::Value;

use super::{EnvioMensagens, IaError, Message, MessagesRequest, Usage};
use crate::custos::{RegistroUsoIa, TabelaCustos};
use crate::intencao::{Classificacao, ClassificadorIntencao, DetalhesIntencao, Intencao, Urgencia};
use crate::lead::{EstadoConversa, MensagemRecebida};

/// Item bruto da resposta do modelo, usado só para desserialização.
#[derive(Debug, serde::Deserialize)]
struct ClassificacaoLlm {
    intencao: String,
    confianca: f32,
    #[serde(default)]
    valor_mencionado: Option<f64>,
    #[serde(default)]
    decisor_identificado: bool,
    #[serde(default)]
    urgencia: Option<String>,
    #[serde(default)]
    prazo_mencionado: Option<String>,
}

const SYSTEM_PROMPT: &str = "Você é o classificador de intenções de um SDR. \
    Responda SOMENTE com JSON válido, sem nenhum outro texto.";

/// Classifica uma mensagem via LLM, devolvendo também o consumo de tokens
/// para ser precificado pela tabela de custos.
pub async fn classificar_com_llm(
    client: &impl EnvioMensagens,
    modelo: &str,
    mensagem: &MensagemRecebida,
    estado: &EstadoConversa,
) -> Result<(Classificacao, Usage), IaError> {
    let req = MessagesRequest {
        model: modelo.to_string(),
        max_tokens: 256,
        system: Some(SYSTEM_PROMPT.to_string()),
        messages: vec![Message {
            role: "user".into(),
            content: format!(
                "Classifique a mensagem de um lead.\n\
                 Formato: {{\"intencao\": \"<intencao>\", \"confianca\": <0..1>, \
                 \"valor_mencionado\": <numero|null>, \"decisor_identificado\": <bool>, \
                 \"urgencia\": \"ALTA|MEDIA|BAIXA\", \"prazo_mencionado\": \"<texto|null>\"}}\n\
                 \n\
                 intencao deve ser uma de: RECLAMACAO, PEDIDO_HUMANO, INTERESSE_COMPRA, \
                 AGENDAMENTO, DUVIDA_PRECO, OBJECAO, INTERESSE_INFORMACAO, SAUDACAO, \
                 RESPOSTA_QUALIFICACAO, INDEFINIDO\n\
                 \n\
                 Etapa do funil: {funil:?}\n\
                 Mensagem: {texto}",
                funil = estado.estado_funil,
                texto = mensagem.texto,
            ),
        }],
    };

    let resposta = client.enviar(&req).await?;
    let texto = resposta
        .content
        .first()
        .map(|b| b.text.trim().to_string())
        .unwrap_or_default();

    let bruto: ClassificacaoLlm = serde_json::from_str(&texto)
        .map_err(|e| IaError::ParseError(format!("classificação inválida: {e}")))?;

    Ok((montar_classificacao(bruto), resposta.usage))
}

/// Estratégia híbrida: tenta o LLM e cai para o classificador local em
/// qualquer falha. Quando o LLM responde, o uso é precificado pela tabela.
pub async fn classificar_hibrido(
    client: &impl EnvioMensagens,
    modelo: &str,
    mensagem: &MensagemRecebida,
    estado: &EstadoConversa,
    custos: &TabelaCustos,
) -> (Classificacao, Option<RegistroUsoIa>) {
    match classificar_com_llm(client, modelo, mensagem, estado).await {
        Ok((classificacao, usage)) => {
            let registro =
                RegistroUsoIa::novo(custos, modelo, usage.input_tokens, usage.output_tokens);
            (classificacao, Some(registro))
        }
        Err(_) => (
            ClassificadorIntencao::classificar(mensagem, estado),
            None,
        ),
    }
}

fn montar_classificacao(bruto: ClassificacaoLlm) -> Classificacao {
    // Intenção fora do vocabulário degrada para o sentinela, como faria
    // uma mensagem não classificável.
    let intencao = serde_json::from_value::<Intencao>(Value::String(bruto.intencao.clone()))
        .unwrap_or(Intencao::Indefinido);

    let detalhes = match intencao {
        Intencao::InteresseCompra => DetalhesIntencao::Compra {
            valor_mencionado: bruto.valor_mencionado,
            decisor_identificado: bruto.decisor_identificado,
            urgencia: parse_urgencia(bruto.urgencia.as_deref()),
        },
        Intencao::DuvidaPreco => DetalhesIntencao::Preco {
            valor_mencionado: bruto.valor_mencionado,
        },
        Intencao::Agendamento => DetalhesIntencao::Agendamento {
            prazo_mencionado: bruto.prazo_mencionado,
        },
        _ => DetalhesIntencao::Nenhum,
    };

    Classificacao {
        intencao,
        confianca: bruto.confianca.clamp(0.0, 1.0),
        detalhes,
    }
}

fn parse_urgencia(valor: Option<&str>) -> Urgencia {
    match valor {
        Some("ALTA") => Urgencia::Alta,
        Some("MEDIA") => Urgencia::Media,
        _ => Urgencia::Baixa,
    }
}
