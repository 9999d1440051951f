//! Política de temperatura e prioridade do lead.
//!
//! A temperatura segue a rede estrita FRIO → MORNO → QUENTE. Uma
//! classificação automática só move o lead para cima nessa rede ou o
//! mantém no mesmo nível — rebaixamento é ação exclusivamente humana
//! (`origem = MANUAL`). Este é o invariante central do motor.

use serde::{Deserialize, Serialize};

use crate::intencao::{Classificacao, DetalhesIntencao, Intencao, Urgencia};
use crate::lead::{AtualizacaoLead, ClassificacaoLead};

/// Temperatura comercial do lead, ordenada do mais frio ao mais quente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Temperatura {
    Frio,
    Morno,
    Quente,
}

impl Temperatura {
    /// Próximo nível da rede (QUENTE é o teto).
    pub fn subir(self) -> Self {
        match self {
            Temperatura::Frio => Temperatura::Morno,
            Temperatura::Morno | Temperatura::Quente => Temperatura::Quente,
        }
    }

    /// Prioridade de atendimento sugerida para este nível: 1 a 3.
    pub fn prioridade_sugerida(self) -> u8 {
        match self {
            Temperatura::Quente => 1,
            Temperatura::Morno => 2,
            Temperatura::Frio => 3,
        }
    }
}

/// Regra de curto-circuito: certos sinais forçam QUENTE/prioridade 1 em um
/// único passo, sem caminhar a rede incrementalmente.
///
/// Hoje: intenção explícita de compra com decisor identificado, ou compra
/// com urgência alta e valor mencionado.
pub fn detectar_lead_quente_imediato(classificacao: &Classificacao) -> bool {
    if classificacao.intencao != Intencao::InteresseCompra {
        return false;
    }
    match &classificacao.detalhes {
        DetalhesIntencao::Compra {
            decisor_identificado,
            urgencia,
            valor_mencionado,
        } => *decisor_identificado || (*urgencia == Urgencia::Alta && valor_mencionado.is_some()),
        _ => false,
    }
}

/// Política de atualização de temperatura/prioridade, com os limiares
/// ajustáveis injetados na construção.
#[derive(Debug, Clone)]
pub struct PoliticaTemperatura {
    /// Confiança mínima para que uma classificação conte como informação
    /// nova. Abaixo disso, nenhuma mudança é proposta.
    pub confianca_minima: f32,
}

impl Default for PoliticaTemperatura {
    fn default() -> Self {
        Self {
            confianca_minima: 0.5,
        }
    }
}

impl PoliticaTemperatura {
    /// Computa a nova temperatura a partir da atual e da classificação.
    ///
    /// Garantia monotônica: o retorno nunca é menor que `atual`.
    pub fn nova_temperatura(
        &self,
        atual: Temperatura,
        classificacao: &Classificacao,
    ) -> Temperatura {
        if classificacao.confianca < self.confianca_minima {
            return atual;
        }
        if detectar_lead_quente_imediato(classificacao) {
            return Temperatura::Quente;
        }

        let proposta = match classificacao.intencao {
            Intencao::InteresseCompra | Intencao::Agendamento => atual.subir(),
            Intencao::DuvidaPreco => Temperatura::Morno,
            _ => atual,
        };

        // max garante que a automação nunca rebaixa.
        atual.max(proposta)
    }

    /// Computa a atualização parcial do agregado persistido.
    ///
    /// Retorna `None` quando a classificação não traz informação nova
    /// (confiança abaixo do mínimo ou nada mudaria).
    pub fn upgrade(
        &self,
        lead: &ClassificacaoLead,
        classificacao: &Classificacao,
    ) -> Option<AtualizacaoLead> {
        if classificacao.confianca < self.confianca_minima {
            return None;
        }

        let nova = self.nova_temperatura(lead.temperatura, classificacao);
        let nova_prioridade = lead.prioridade.min(nova.prioridade_sugerida());
        let delta_score = match classificacao.intencao {
            Intencao::InteresseCompra => 30,
            Intencao::Agendamento => 20,
            Intencao::DuvidaPreco => 10,
            Intencao::RespostaQualificacao => 5,
            _ => 0,
        };

        let mut atualizacao = AtualizacaoLead::default();
        if nova != lead.temperatura {
            atualizacao.temperatura = Some(nova);
        }
        if nova_prioridade != lead.prioridade {
            atualizacao.prioridade = Some(nova_prioridade);
        }
        if delta_score > 0 {
            atualizacao.score_interno = Some(lead.score_interno + delta_score);
        }

        if atualizacao.esta_vazia() {
            return None;
        }
        atualizacao.justificativa = Some(format!(
            "intenção {} com confiança {:.2}",
            classificacao.intencao, classificacao.confianca
        ));
        Some(atualizacao)
    }
}
