//! Motor de classificação de intenção por assinatura de palavras-chave.
//!
//! O [`ClassificadorIntencao`] mapeia uma mensagem recebida + contexto da
//! conversa para um rótulo de [`Intencao`] e uma confiança determinística.
//! As assinaturas são avaliadas em ordem fixa de prioridade: intenções mais
//! específicas (compra, reclamação) antes das genéricas (informação,
//! saudação). Empates são resolvidos pela ordem da tabela, nunca por
//! aleatoriedade.
//!
//! A confiança é função do número de sinais corroborantes que casaram —
//! não é probabilidade de modelo. Chamadas reais a LLM vivem no módulo
//! [`crate::ia`], que usa este classificador como fallback.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::framework;
use crate::lead::{EstadoConversa, MensagemRecebida};

/// Intenção detectada na mensagem do lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intencao {
    Reclamacao,
    PedidoHumano,
    InteresseCompra,
    Agendamento,
    DuvidaPreco,
    Objecao,
    InteresseInformacao,
    Saudacao,
    /// Mensagem sem assinatura conhecida durante um framework ativo —
    /// presumida resposta à pergunta de qualificação pendente.
    RespostaQualificacao,
    /// Sentinela para entrada não classificável. Não é erro: o chamador
    /// deve tratar como "nenhuma ação".
    Indefinido,
}

impl fmt::Display for Intencao {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nome = match self {
            Intencao::Reclamacao => "RECLAMACAO",
            Intencao::PedidoHumano => "PEDIDO_HUMANO",
            Intencao::InteresseCompra => "INTERESSE_COMPRA",
            Intencao::Agendamento => "AGENDAMENTO",
            Intencao::DuvidaPreco => "DUVIDA_PRECO",
            Intencao::Objecao => "OBJECAO",
            Intencao::InteresseInformacao => "INTERESSE_INFORMACAO",
            Intencao::Saudacao => "SAUDACAO",
            Intencao::RespostaQualificacao => "RESPOSTA_QUALIFICACAO",
            Intencao::Indefinido => "INDEFINIDO",
        };
        write!(f, "{nome}")
    }
}

/// Urgência expressa na mensagem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Urgencia {
    Alta,
    Media,
    Baixa,
}

/// Campos extraídos da mensagem, como variante etiquetada por família de
/// intenção — em vez de um mapa aberto, para checagem exaustiva.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetalhesIntencao {
    Compra {
        valor_mencionado: Option<f64>,
        decisor_identificado: bool,
        urgencia: Urgencia,
    },
    Preco {
        valor_mencionado: Option<f64>,
    },
    Agendamento {
        prazo_mencionado: Option<String>,
    },
    /// Nenhum campo estruturado extraído (ou ainda não interpretado).
    Nenhum,
}

/// Saída efêmera do motor de classificação — nunca persistida pelo core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classificacao {
    pub intencao: Intencao,
    /// Confiança determinística em `[0, 1]`.
    pub confianca: f32,
    pub detalhes: DetalhesIntencao,
}

impl Classificacao {
    /// Sentinela de entrada não classificável.
    pub fn indefinida() -> Self {
        Self {
            intencao: Intencao::Indefinido,
            confianca: 0.0,
            detalhes: DetalhesIntencao::Nenhum,
        }
    }
}

// Assinaturas de intenção em ordem de prioridade. A primeira entrada com
// pelo menos um padrão presente na mensagem vence.
const ASSINATURAS: &[(Intencao, &[&str])] = &[
    (
        Intencao::Reclamacao,
        &[
            "reclama",
            "absurdo",
            "péssimo",
            "pessimo",
            "horrível",
            "horrivel",
            "decepcionado",
            "decepção",
            "decepcao",
            "quero cancelar",
            "procon",
            "vergonha",
            "nunca mais",
        ],
    ),
    (
        Intencao::PedidoHumano,
        &[
            "falar com atendente",
            "falar com alguém",
            "falar com alguem",
            "falar com uma pessoa",
            "atendente humano",
            "quero falar com humano",
            "não quero falar com robô",
            "nao quero falar com robo",
        ],
    ),
    (
        Intencao::InteresseCompra,
        &[
            "quero comprar",
            "quero contratar",
            "quero investir",
            "quero fechar",
            "fechar negócio",
            "fechar negocio",
            "vamos fechar",
            "bora fechar",
            "pode enviar o contrato",
            "quero o plano",
        ],
    ),
    (
        Intencao::Agendamento,
        &[
            "agendar",
            "marcar uma reunião",
            "marcar uma reuniao",
            "marcar uma call",
            "qual horário",
            "qual horario",
            "disponibilidade",
            "podemos conversar amanhã",
            "podemos conversar amanha",
        ],
    ),
    (
        Intencao::DuvidaPreco,
        &[
            "quanto custa",
            "qual o preço",
            "qual o preco",
            "qual o valor",
            "quanto fica",
            "quanto sai",
            "tabela de preço",
            "tabela de preco",
            "tem desconto",
        ],
    ),
    (
        Intencao::Objecao,
        &[
            "muito caro",
            "tá caro",
            "ta caro",
            "preciso pensar",
            "vou avaliar",
            "não tenho certeza",
            "nao tenho certeza",
            "já tenho fornecedor",
            "ja tenho fornecedor",
            "agora não",
            "agora nao",
        ],
    ),
    (
        Intencao::InteresseInformacao,
        &[
            "como funciona",
            "me explica",
            "mais informações",
            "mais informacoes",
            "quero saber mais",
            "quero entender",
            "manda mais detalhes",
            "o que é isso",
            "o que e isso",
        ],
    ),
    (
        Intencao::Saudacao,
        &["bom dia", "boa tarde", "boa noite", "olá", "ola,", "oi,", "tudo bem"],
    ),
];

// Sinais de que quem escreve é o decisor da compra.
const SINAIS_DECISOR: &[&str] = &[
    "sou o dono",
    "sou dono",
    "sou a dona",
    "sou sócio",
    "sou socio",
    "sou o diretor",
    "sou diretora",
    "sou o ceo",
    "sou ceo",
    "eu que decido",
    "eu decido",
    "sou o responsável",
    "sou o responsavel",
    "sou a responsável",
    "sou a responsavel",
    "a decisão é minha",
    "a decisao e minha",
];

const SINAIS_URGENCIA_ALTA: &[&str] = &[
    "urgente",
    "urgência",
    "urgencia",
    "hoje",
    "agora",
    "o quanto antes",
    "imediato",
];

const SINAIS_URGENCIA_MEDIA: &[&str] = &[
    "essa semana",
    "esta semana",
    "este mês",
    "esse mês",
    "este mes",
    "esse mes",
    "em breve",
];

const SINAIS_PRAZO: &[&str] = &[
    "hoje",
    "amanhã",
    "amanha",
    "semana que vem",
    "próxima semana",
    "proxima semana",
    "mês que vem",
    "mes que vem",
    "segunda",
    "terça",
    "terca",
    "quarta",
    "quinta",
    "sexta",
    "sábado",
    "sabado",
    "domingo",
];

/// Classificador de intenção puro, sem estado e sem efeitos colaterais.
pub struct ClassificadorIntencao;

impl ClassificadorIntencao {
    /// Classifica uma mensagem no contexto da conversa.
    ///
    /// Nunca falha: texto vazio ou sem assinatura conhecida produz o
    /// sentinela [`Intencao::Indefinido`] com confiança 0.
    pub fn classificar(mensagem: &MensagemRecebida, estado: &EstadoConversa) -> Classificacao {
        let texto = mensagem.texto.trim().to_lowercase();
        if texto.is_empty() {
            return Classificacao::indefinida();
        }

        for (intencao, padroes) in ASSINATURAS {
            let casados = padroes.iter().filter(|p| texto.contains(*p)).count();
            if casados > 0 {
                return Classificacao {
                    intencao: *intencao,
                    confianca: confianca_por_sinais(casados),
                    detalhes: extrair_detalhes(*intencao, &texto),
                };
            }
        }

        // Sem assinatura conhecida: durante um framework ativo com pergunta
        // pendente, a mensagem é presumida resposta de qualificação.
        if framework::decidir_proxima_pergunta(estado).is_some() {
            return Classificacao {
                intencao: Intencao::RespostaQualificacao,
                confianca: 0.5,
                detalhes: DetalhesIntencao::Nenhum,
            };
        }

        Classificacao::indefinida()
    }
}

// Confiança determinística: 1 sinal → 0.6, 2 → 0.8, 3+ → 0.95.
fn confianca_por_sinais(casados: usize) -> f32 {
    (0.4 + 0.2 * casados as f32).min(0.95)
}

fn extrair_detalhes(intencao: Intencao, texto: &str) -> DetalhesIntencao {
    match intencao {
        Intencao::InteresseCompra => DetalhesIntencao::Compra {
            valor_mencionado: extrair_valor(texto),
            decisor_identificado: contem_algum(texto, SINAIS_DECISOR),
            urgencia: detectar_urgencia(texto),
        },
        Intencao::DuvidaPreco => DetalhesIntencao::Preco {
            valor_mencionado: extrair_valor(texto),
        },
        Intencao::Agendamento => DetalhesIntencao::Agendamento {
            prazo_mencionado: extrair_prazo(texto),
        },
        _ => DetalhesIntencao::Nenhum,
    }
}

fn contem_algum(texto: &str, sinais: &[&str]) -> bool {
    sinais.iter().any(|s| texto.contains(s))
}

fn detectar_urgencia(texto: &str) -> Urgencia {
    if contem_algum(texto, SINAIS_URGENCIA_ALTA) {
        Urgencia::Alta
    } else if contem_algum(texto, SINAIS_URGENCIA_MEDIA) {
        Urgencia::Media
    } else {
        Urgencia::Baixa
    }
}

fn extrair_prazo(texto: &str) -> Option<String> {
    SINAIS_PRAZO
        .iter()
        .find(|p| texto.contains(*p))
        .map(|p| (*p).to_string())
}

/// Extrai um valor monetário mencionado no texto (formato brasileiro).
///
/// Reconhece "R$ 50.000", "1.500,00", "50k" e "200 mil". Retorna o
/// primeiro valor encontrado.
fn extrair_valor(texto: &str) -> Option<f64> {
    let tokens: Vec<&str> = texto.split_whitespace().collect();
    for (i, bruto) in tokens.iter().enumerate() {
        let token = bruto.trim_start_matches("r$");
        let token =
            token.trim_matches(|c: char| !c.is_ascii_digit() && c != ',' && c != '.' && c != 'k');
        if !token.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            continue;
        }

        let (nucleo, mult_k) = match token.strip_suffix('k') {
            Some(n) => (n, 1000.0),
            None => (token, 1.0),
        };

        // Separador de milhar brasileiro: ponto; decimal: vírgula.
        let normalizado = nucleo.replace('.', "").replace(',', ".");
        if let Ok(v) = normalizado.parse::<f64>() {
            let mult_mil = if tokens.get(i + 1).is_some_and(|t| *t == "mil") {
                1000.0
            } else {
                1.0
            };
            return Some(v * mult_k * mult_mil);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::Canal;
    use uuid::Uuid;

    fn msg(texto: &str) -> MensagemRecebida {
        MensagemRecebida::nova(texto, Canal::Whatsapp)
    }

    fn estado() -> EstadoConversa {
        EstadoConversa::nova(Uuid::new_v4(), "acme")
    }

    #[test]
    fn texto_vazio_retorna_indefinido_sem_falhar() {
        let c = ClassificadorIntencao::classificar(&msg("   "), &estado());
        assert_eq!(c.intencao, Intencao::Indefinido);
        assert_eq!(c.confianca, 0.0);
        assert_eq!(c.detalhes, DetalhesIntencao::Nenhum);
    }

    #[test]
    fn classifica_interesse_compra() {
        let c = ClassificadorIntencao::classificar(&msg("Quero comprar o plano anual"), &estado());
        assert_eq!(c.intencao, Intencao::InteresseCompra);
        assert!(c.confianca >= 0.6);
    }

    #[test]
    fn classifica_duvida_preco() {
        let c = ClassificadorIntencao::classificar(&msg("Quanto custa o serviço?"), &estado());
        assert_eq!(c.intencao, Intencao::DuvidaPreco);
    }

    #[test]
    fn classifica_reclamacao() {
        let c = ClassificadorIntencao::classificar(
            &msg("Atendimento péssimo, quero cancelar tudo"),
            &estado(),
        );
        assert_eq!(c.intencao, Intencao::Reclamacao);
        // Dois sinais corroborantes elevam a confiança.
        assert!(c.confianca >= 0.8);
    }

    #[test]
    fn reclamacao_tem_prioridade_sobre_compra() {
        // Sinais mistos: a intenção mais específica/crítica vence pela
        // ordem da tabela.
        let c = ClassificadorIntencao::classificar(
            &msg("Quero comprar, mas o suporte de vocês é um absurdo"),
            &estado(),
        );
        assert_eq!(c.intencao, Intencao::Reclamacao);
    }

    #[test]
    fn compra_antes_de_informacao_generica() {
        let c = ClassificadorIntencao::classificar(
            &msg("quero comprar, me explica como funciona"),
            &estado(),
        );
        assert_eq!(c.intencao, Intencao::InteresseCompra);
    }

    #[test]
    fn confianca_cresce_com_sinais_e_satura() {
        assert_eq!(confianca_por_sinais(1), 0.6);
        assert_eq!(confianca_por_sinais(2), 0.8);
        assert_eq!(confianca_por_sinais(3), 0.95);
        assert_eq!(confianca_por_sinais(10), 0.95);
    }

    #[test]
    fn extrai_decisor_e_urgencia_na_compra() {
        let c = ClassificadorIntencao::classificar(
            &msg("Sou o dono da empresa e quero comprar hoje"),
            &estado(),
        );
        assert_eq!(c.intencao, Intencao::InteresseCompra);
        match c.detalhes {
            DetalhesIntencao::Compra {
                decisor_identificado,
                urgencia,
                ..
            } => {
                assert!(decisor_identificado);
                assert_eq!(urgencia, Urgencia::Alta);
            }
            outro => panic!("detalhes inesperados: {outro:?}"),
        }
    }

    #[test]
    fn extrai_valor_mencionado() {
        assert_eq!(extrair_valor("tenho r$ 50.000 para investir"), Some(50_000.0));
        assert_eq!(extrair_valor("algo em torno de 200 mil"), Some(200_000.0));
        assert_eq!(extrair_valor("uns 50k por ano"), Some(50_000.0));
        assert_eq!(extrair_valor("1.500,00 por mês"), Some(1500.0));
        assert_eq!(extrair_valor("sem número nenhum aqui"), None);
    }

    #[test]
    fn extrai_prazo_no_agendamento() {
        let c = ClassificadorIntencao::classificar(
            &msg("podemos agendar para terça?"),
            &estado(),
        );
        assert_eq!(c.intencao, Intencao::Agendamento);
        assert_eq!(
            c.detalhes,
            DetalhesIntencao::Agendamento {
                prazo_mencionado: Some("terça".into())
            }
        );
    }

    #[test]
    fn mensagem_sem_assinatura_vira_resposta_durante_framework() {
        let mut estado = estado();
        estado.framework_ativo = Some("BANT".into());

        let c = ClassificadorIntencao::classificar(&msg("uns 50 colaboradores"), &estado);
        assert_eq!(c.intencao, Intencao::RespostaQualificacao);
        assert_eq!(c.confianca, 0.5);
    }

    #[test]
    fn mensagem_sem_assinatura_sem_framework_e_indefinida() {
        let c = ClassificadorIntencao::classificar(&msg("xpto qwerty"), &estado());
        assert_eq!(c.intencao, Intencao::Indefinido);
        assert_eq!(c.confianca, 0.0);
    }

    #[test]
    fn framework_desconhecido_nao_gera_resposta_qualificacao() {
        let mut estado = estado();
        estado.framework_ativo = Some("INEXISTENTE".into());

        let c = ClassificadorIntencao::classificar(&msg("xpto qwerty"), &estado);
        assert_eq!(c.intencao, Intencao::Indefinido);
    }

    #[test]
    fn intencao_serializa_como_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&Intencao::InteresseCompra).unwrap(),
            "\"INTERESSE_COMPRA\""
        );
        assert_eq!(
            serde_json::to_string(&Intencao::Indefinido).unwrap(),
            "\"INDEFINIDO\""
        );
    }

    #[test]
    fn detalhes_serializam_com_tag_de_tipo() {
        let d = DetalhesIntencao::Compra {
            valor_mencionado: Some(1000.0),
            decisor_identificado: true,
            urgencia: Urgencia::Alta,
        };
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains("\"tipo\":\"COMPRA\""));
        assert!(json.contains("\"urgencia\":\"ALTA\""));
    }
}
