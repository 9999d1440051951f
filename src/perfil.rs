//! Inferência heurística do perfil de investidor do lead.
//!
//! Pontua a frequência de vocabulário característico de cada arquétipo no
//! histórico acumulado de mensagens. Só palpita quando o arquétipo líder
//! abre uma margem mínima sobre o vice — ambiguidade retorna `None`,
//! nunca um chute.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Arquétipos de investidor reconhecidos pelo motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PerfilInvestidor {
    Conservador,
    Moderado,
    Arrojado,
}

impl fmt::Display for PerfilInvestidor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerfilInvestidor::Conservador => write!(f, "CONSERVADOR"),
            PerfilInvestidor::Moderado => write!(f, "MODERADO"),
            PerfilInvestidor::Arrojado => write!(f, "ARROJADO"),
        }
    }
}

// Vocabulário característico por arquétipo. Cada ocorrência conta um ponto.
const VOCABULARIO: &[(PerfilInvestidor, &[&str])] = &[
    (
        PerfilInvestidor::Conservador,
        &[
            "segurança",
            "seguranca",
            "seguro",
            "sem risco",
            "renda fixa",
            "poupança",
            "poupanca",
            "garantido",
            "garantia",
            "medo de perder",
            "preservar",
        ],
    ),
    (
        PerfilInvestidor::Moderado,
        &[
            "equilibr",
            "diversific",
            "longo prazo",
            "parte em renda fixa",
            "um pouco de risco",
            "moderado",
            "carteira balanceada",
        ],
    ),
    (
        PerfilInvestidor::Arrojado,
        &[
            "risco alto",
            "alto risco",
            "cripto",
            "day trade",
            "alavancagem",
            "retorno alto",
            "agressivo",
            "ações",
            "acoes",
            "renda variável",
            "renda variavel",
        ],
    ),
];

/// Infere o perfil de investidor a partir do histórico de mensagens.
///
/// `margem` é o número mínimo de pontos que o líder precisa abrir sobre o
/// segundo colocado para que o palpite seja emitido (constante ajustável,
/// ver [`crate::config::EngineConfig::margem_perfil_investidor`]).
pub fn inferir_perfil_investidor(historico: &[String], margem: u32) -> Option<PerfilInvestidor> {
    let mut pontuacoes = [
        (PerfilInvestidor::Conservador, 0u32),
        (PerfilInvestidor::Moderado, 0u32),
        (PerfilInvestidor::Arrojado, 0u32),
    ];

    for mensagem in historico {
        let texto = mensagem.to_lowercase();
        for (perfil, termos) in VOCABULARIO {
            let pontos: u32 = termos
                .iter()
                .map(|t| texto.matches(t).count() as u32)
                .sum();
            if let Some(entrada) = pontuacoes.iter_mut().find(|(p, _)| p == perfil) {
                entrada.1 += pontos;
            }
        }
    }

    pontuacoes.sort_by(|a, b| b.1.cmp(&a.1));
    let (lider, pontos_lider) = pontuacoes[0];
    let (_, pontos_vice) = pontuacoes[1];

    if pontos_lider == 0 || pontos_lider < pontos_vice + margem {
        return None;
    }
    Some(lider)
}
