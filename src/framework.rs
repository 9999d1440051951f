//! Frameworks de qualificação e seleção da próxima pergunta.
//!
//! Cada framework declara uma lista ordenada de campos; a cadência pergunta
//! estritamente nessa ordem, sem aleatoriedade, para que conversas sejam
//! repetíveis e testáveis. A seleção é idempotente: enquanto
//! `framework_data` não muda, a mesma pergunta é retornada.

use serde::Serialize;
use serde_json::Value;

use crate::lead::EstadoConversa;

/// Uma pergunta de qualificação: o campo que ela captura e o texto enviado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pergunta {
    /// Identificador do campo em `framework_data`.
    pub campo: &'static str,
    pub texto: &'static str,
}

/// Um framework de qualificação com seus campos em ordem declarada.
#[derive(Debug, Clone, Copy)]
pub struct Framework {
    pub nome: &'static str,
    pub campos: &'static [Pergunta],
}

pub const BANT: Framework = Framework {
    nome: "BANT",
    campos: &[
        Pergunta {
            campo: "orcamento",
            texto: "Qual orçamento você tem disponível para esse projeto?",
        },
        Pergunta {
            campo: "autoridade",
            texto: "Quem participa da decisão de compra junto com você?",
        },
        Pergunta {
            campo: "necessidade",
            texto: "Qual problema você precisa resolver primeiro?",
        },
        Pergunta {
            campo: "prazo",
            texto: "Em quanto tempo você pretende ter isso funcionando?",
        },
    ],
};

pub const SPIN: Framework = Framework {
    nome: "SPIN",
    campos: &[
        Pergunta {
            campo: "situacao",
            texto: "Como funciona esse processo na sua empresa hoje?",
        },
        Pergunta {
            campo: "problema",
            texto: "Qual é a maior dificuldade nesse processo?",
        },
        Pergunta {
            campo: "implicacao",
            texto: "Quanto essa dificuldade custa para a empresa por mês?",
        },
        Pergunta {
            campo: "necessidade_solucao",
            texto: "Se isso estivesse resolvido, o que mudaria no seu resultado?",
        },
    ],
};

pub const GPCT: Framework = Framework {
    nome: "GPCT",
    campos: &[
        Pergunta {
            campo: "objetivos",
            texto: "Quais são as metas do seu time para este ano?",
        },
        Pergunta {
            campo: "planos",
            texto: "O que vocês já planejaram para chegar lá?",
        },
        Pergunta {
            campo: "desafios",
            texto: "O que pode impedir esse plano de funcionar?",
        },
        Pergunta {
            campo: "prazo",
            texto: "Até quando essas metas precisam ser atingidas?",
        },
    ],
};

/// Frameworks conhecidos, na ordem em que aparecem nas cadências.
pub const FRAMEWORKS: &[Framework] = &[BANT, SPIN, GPCT];

/// Busca um framework pelo nome (case-insensitive).
pub fn por_nome(nome: &str) -> Option<&'static Framework> {
    FRAMEWORKS.iter().find(|f| f.nome.eq_ignore_ascii_case(nome))
}

/// Decide a próxima pergunta de qualificação para o estado da conversa.
///
/// Retorna o primeiro campo do framework ativo ainda não capturado em
/// `framework_data`, ou `None` quando a qualificação está completa, não há
/// framework ativo, ou o nome referencia um framework desconhecido
/// (fail closed — uma conversa nunca derruba o chamador).
pub fn decidir_proxima_pergunta(estado: &EstadoConversa) -> Option<&'static Pergunta> {
    let nome = estado.framework_ativo.as_deref()?;
    let framework = por_nome(nome)?;

    framework
        .campos
        .iter()
        .find(|p| !campo_capturado(estado.framework_data.get(p.campo)))
}

// Um campo conta como capturado quando presente, não-nulo e não-vazio.
fn campo_capturado(valor: Option<&Value>) -> bool {
    match valor {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}
