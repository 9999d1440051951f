//! Recomendação da próxima ação sobre a conversa.
//!
//! A tabela de decisão é uma lista ordenada de regras (predicado → ação)
//! avaliada de cima para baixo. A precedência é fixa e faz parte do
//! contrato: silêncio em modo manual > escalonamento humano > tarefa para
//! closer > continuar automação > nenhuma. Sinais mistos (lead quente que
//! também reclama) escalam — nunca viram tarefa de closer.

use serde::{Deserialize, Serialize};

use crate::framework;
use crate::intencao::{Classificacao, DetalhesIntencao, Intencao};
use crate::lead::EstadoConversa;
use crate::modo::Modo;
use crate::temperatura::Temperatura;

/// Tipo da ação recomendada, consumida por um executor externo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoAcao {
    CriarTarefaCloser,
    EscalarHumano,
    ContinuarAutomacao,
    Nenhuma,
}

/// Ação recomendada com o motivo legível que a justificou.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecomendacaoAcao {
    pub tipo: TipoAcao,
    pub motivo: String,
}

type Predicado = fn(&Classificacao, Temperatura, &EstadoConversa) -> bool;

struct Regra {
    aplica: Predicado,
    tipo: TipoAcao,
    motivo: &'static str,
}

// Ordem de precedência do contrato — não reordenar.
const REGRAS: &[Regra] = &[
    Regra {
        aplica: modo_manual,
        tipo: TipoAcao::Nenhuma,
        motivo: "conversa sob controle humano (modo MANUAL)",
    },
    Regra {
        aplica: precisa_de_humano,
        tipo: TipoAcao::EscalarHumano,
        motivo: "reclamação ou pedido explícito de atendimento humano",
    },
    Regra {
        aplica: pronto_para_closer,
        tipo: TipoAcao::CriarTarefaCloser,
        motivo: "lead quente com sinal de compra",
    },
    Regra {
        aplica: qualificacao_pendente,
        tipo: TipoAcao::ContinuarAutomacao,
        motivo: "framework de qualificação com perguntas pendentes",
    },
];

fn modo_manual(_: &Classificacao, _: Temperatura, estado: &EstadoConversa) -> bool {
    estado.modo == Modo::Manual
}

fn precisa_de_humano(c: &Classificacao, _: Temperatura, _: &EstadoConversa) -> bool {
    matches!(c.intencao, Intencao::Reclamacao | Intencao::PedidoHumano)
}

fn pronto_para_closer(c: &Classificacao, temperatura: Temperatura, _: &EstadoConversa) -> bool {
    if temperatura != Temperatura::Quente {
        return false;
    }
    match c.intencao {
        Intencao::InteresseCompra | Intencao::Agendamento => true,
        _ => matches!(
            c.detalhes,
            DetalhesIntencao::Compra {
                decisor_identificado: true,
                ..
            }
        ),
    }
}

fn qualificacao_pendente(_: &Classificacao, _: Temperatura, estado: &EstadoConversa) -> bool {
    // Em HIBRIDO um humano responde esta mensagem; a automação não deve
    // disputar o turno com ele.
    estado.modo == Modo::SdrIa && framework::decidir_proxima_pergunta(estado).is_some()
}

/// Recomenda a próxima ação para a conversa.
///
/// Avalia as regras em ordem de precedência e retorna a primeira que se
/// aplica. Nunca falha: sem regra aplicável, a resposta é NENHUMA.
pub fn recomendar_acao(
    classificacao: &Classificacao,
    temperatura: Temperatura,
    estado: &EstadoConversa,
) -> RecomendacaoAcao {
    for regra in REGRAS {
        if (regra.aplica)(classificacao, temperatura, estado) {
            return RecomendacaoAcao {
                tipo: regra.tipo,
                motivo: regra.motivo.to_string(),
            };
        }
    }
    RecomendacaoAcao {
        tipo: TipoAcao::Nenhuma,
        motivo: "nenhuma regra aplicável".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intencao::Urgencia;
    use serde_json::Value;
    use uuid::Uuid;

    fn classificacao(intencao: Intencao) -> Classificacao {
        Classificacao {
            intencao,
            confianca: 0.8,
            detalhes: DetalhesIntencao::Nenhum,
        }
    }

    fn estado() -> EstadoConversa {
        EstadoConversa::nova(Uuid::new_v4(), "acme")
    }

    fn estado_com_framework() -> EstadoConversa {
        let mut e = estado();
        e.framework_ativo = Some("BANT".into());
        e
    }

    #[test]
    fn lead_quente_com_compra_vira_tarefa_closer() {
        let acao = recomendar_acao(
            &classificacao(Intencao::InteresseCompra),
            Temperatura::Quente,
            &estado(),
        );
        assert_eq!(acao.tipo, TipoAcao::CriarTarefaCloser);
    }

    #[test]
    fn reclamacao_escala_em_qualquer_temperatura() {
        for temperatura in [Temperatura::Frio, Temperatura::Morno, Temperatura::Quente] {
            let acao = recomendar_acao(
                &classificacao(Intencao::Reclamacao),
                temperatura,
                &estado(),
            );
            assert_eq!(acao.tipo, TipoAcao::EscalarHumano);
        }
    }

    #[test]
    fn sinais_mistos_escalam_e_nunca_criam_tarefa() {
        // Lead quente, com decisor identificado, mas reclamando:
        // escalonamento tem precedência sobre tarefa de closer.
        let c = Classificacao {
            intencao: Intencao::Reclamacao,
            confianca: 0.9,
            detalhes: DetalhesIntencao::Compra {
                valor_mencionado: Some(100_000.0),
                decisor_identificado: true,
                urgencia: Urgencia::Alta,
            },
        };
        let acao = recomendar_acao(&c, Temperatura::Quente, &estado_com_framework());
        assert_eq!(acao.tipo, TipoAcao::EscalarHumano);
    }

    #[test]
    fn modo_manual_silencia_qualquer_classificacao() {
        let mut estado = estado_com_framework();
        estado.modo = Modo::Manual;

        for intencao in [
            Intencao::InteresseCompra,
            Intencao::Reclamacao,
            Intencao::PedidoHumano,
            Intencao::DuvidaPreco,
        ] {
            let acao = recomendar_acao(&classificacao(intencao), Temperatura::Quente, &estado);
            assert_eq!(acao.tipo, TipoAcao::Nenhuma, "intenção {intencao} vazou");
        }
    }

    #[test]
    fn pedido_de_humano_escala() {
        let acao = recomendar_acao(
            &classificacao(Intencao::PedidoHumano),
            Temperatura::Frio,
            &estado(),
        );
        assert_eq!(acao.tipo, TipoAcao::EscalarHumano);
    }

    #[test]
    fn framework_pendente_continua_automacao() {
        let acao = recomendar_acao(
            &classificacao(Intencao::RespostaQualificacao),
            Temperatura::Morno,
            &estado_com_framework(),
        );
        assert_eq!(acao.tipo, TipoAcao::ContinuarAutomacao);
    }

    #[test]
    fn qualificacao_completa_nao_recomenda_nada() {
        let mut estado = estado_com_framework();
        for pergunta in crate::framework::BANT.campos {
            estado
                .framework_data
                .insert(pergunta.campo.into(), Value::String("ok".into()));
        }
        let acao = recomendar_acao(
            &classificacao(Intencao::InteresseInformacao),
            Temperatura::Morno,
            &estado,
        );
        assert_eq!(acao.tipo, TipoAcao::Nenhuma);
    }

    #[test]
    fn hibrido_nao_continua_automacao_mas_ainda_escala() {
        let mut estado = estado_com_framework();
        estado.modo = Modo::Hibrido;

        let acao = recomendar_acao(
            &classificacao(Intencao::InteresseInformacao),
            Temperatura::Morno,
            &estado,
        );
        assert_eq!(acao.tipo, TipoAcao::Nenhuma);

        let acao = recomendar_acao(&classificacao(Intencao::Reclamacao), Temperatura::Frio, &estado);
        assert_eq!(acao.tipo, TipoAcao::EscalarHumano);
    }

    #[test]
    fn lead_frio_com_compra_continua_qualificando() {
        // Compra sem temperatura quente não vira tarefa; com framework
        // pendente, a automação segue qualificando.
        let acao = recomendar_acao(
            &classificacao(Intencao::InteresseCompra),
            Temperatura::Frio,
            &estado_com_framework(),
        );
        assert_eq!(acao.tipo, TipoAcao::ContinuarAutomacao);
    }

    #[test]
    fn indefinido_sem_contexto_nao_faz_nada() {
        let acao = recomendar_acao(
            &Classificacao::indefinida(),
            Temperatura::Frio,
            &estado(),
        );
        assert_eq!(acao.tipo, TipoAcao::Nenhuma);
        assert_eq!(acao.motivo, "nenhuma regra aplicável");
    }
}
