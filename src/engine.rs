//! Fachada do motor: executa o pipeline de decisão de uma mensagem.
//!
//! O [`MotorSdr`] é livre de estado mutável: cada chamada recebe entradas
//! imutáveis e devolve uma [`Decisao`]. Pode ser invocado de quantas
//! execuções concorrentes o chamador quiser, sem coordenação — não há
//! nada compartilhado entre chamadas além das tabelas imutáveis.

use crate::acao::{recomendar_acao, RecomendacaoAcao};
use crate::config::EngineConfig;
use crate::custos::{RegistroUsoIa, TabelaCustos, TabelaLimites};
use crate::framework::{decidir_proxima_pergunta, Pergunta};
use crate::intencao::{Classificacao, ClassificadorIntencao};
use crate::lead::{AtualizacaoLead, ClassificacaoLead, EstadoConversa, MensagemRecebida};
use crate::perfil::{inferir_perfil_investidor, PerfilInvestidor};
use crate::temperatura::PoliticaTemperatura;

/// Resultado completo do processamento de uma mensagem.
///
/// O motor só computa: quem persiste a atualização, envia a pergunta ou
/// executa a ação é o executor externo.
#[derive(Debug, Clone)]
pub struct Decisao {
    pub classificacao: Classificacao,
    /// Atualização proposta do agregado do lead; `None` = sem informação nova.
    pub atualizacao: Option<AtualizacaoLead>,
    pub perfil_investidor: Option<PerfilInvestidor>,
    pub proxima_pergunta: Option<&'static Pergunta>,
    pub acao: RecomendacaoAcao,
}

/// Motor de decisão com configuração e tabelas injetadas na construção.
#[derive(Debug, Clone)]
pub struct MotorSdr {
    config: EngineConfig,
    politica: PoliticaTemperatura,
    custos: TabelaCustos,
    limites: TabelaLimites,
}

impl MotorSdr {
    /// Constrói o motor com as tabelas padrão e os limiares da configuração.
    pub fn novo(config: EngineConfig) -> Self {
        let custos = TabelaCustos::default();
        let limites = TabelaLimites::com_padrao(config.limite_padrao_hora);
        Self::com_tabelas(config, custos, limites)
    }

    /// Constrói o motor com tabelas customizadas (multi-tenant).
    pub fn com_tabelas(
        config: EngineConfig,
        custos: TabelaCustos,
        limites: TabelaLimites,
    ) -> Self {
        let politica = PoliticaTemperatura {
            confianca_minima: config.confianca_minima,
        };
        Self {
            config,
            politica,
            custos,
            limites,
        }
    }

    /// Processa uma mensagem recebida: classifica, propõe o upgrade de
    /// temperatura/prioridade, infere o perfil, escolhe a próxima pergunta
    /// e recomenda a ação.
    pub fn processar(
        &self,
        mensagem: &MensagemRecebida,
        estado: &EstadoConversa,
        lead: &ClassificacaoLead,
        historico: &[String],
    ) -> Decisao {
        let classificacao = ClassificadorIntencao::classificar(mensagem, estado);
        self.decidir(classificacao, estado, lead, historico)
    }

    /// Fecha a decisão a partir de uma classificação já obtida — usada
    /// quando a classificação veio do caminho LLM
    /// ([`crate::ia::classificar_hibrido`]).
    pub fn decidir(
        &self,
        classificacao: Classificacao,
        estado: &EstadoConversa,
        lead: &ClassificacaoLead,
        historico: &[String],
    ) -> Decisao {
        let atualizacao = self.politica.upgrade(lead, &classificacao);
        // A ação enxerga a temperatura já atualizada, não a antiga.
        let temperatura = atualizacao
            .as_ref()
            .and_then(|a| a.temperatura)
            .unwrap_or(lead.temperatura);

        let perfil_investidor =
            inferir_perfil_investidor(historico, self.config.margem_perfil_investidor);
        let proxima_pergunta = decidir_proxima_pergunta(estado);
        let acao = recomendar_acao(&classificacao, temperatura, estado);

        Decisao {
            classificacao,
            atualizacao,
            perfil_investidor,
            proxima_pergunta,
            acao,
        }
    }

    /// Precifica uma chamada de IA pela tabela injetada.
    pub fn registrar_uso_ia(
        &self,
        modelo: &str,
        tokens_entrada: u32,
        tokens_saida: u32,
    ) -> RegistroUsoIa {
        RegistroUsoIa::novo(&self.custos, modelo, tokens_entrada, tokens_saida)
    }

    /// Limite de chamadas/hora para a função de borda — consumido pelo
    /// throttler externo antes de invocar um modelo.
    pub fn limite_funcao(&self, funcao: &str) -> u32 {
        self.limites.limite(funcao)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
