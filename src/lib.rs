//! Motor de decisão SDR para qualificação automática de leads.
//!
//! Biblioteca pura e sem estado entre chamadas: classifica a intenção de
//! mensagens recebidas, aplica a política monotônica de temperatura
//! (FRIO → MORNO → QUENTE, nunca rebaixa automaticamente), escolhe a
//! próxima pergunta do framework de qualificação ativo e recomenda a
//! próxima ação (tarefa para closer, escalonamento humano, continuar a
//! automação ou nada). Persistência, transporte e execução das ações são
//! colaboradores externos.
//!
//! ```
//! use sdr_engine::config::EngineConfig;
//! use sdr_engine::engine::MotorSdr;
//! use sdr_engine::lead::{Canal, ClassificacaoLead, EstadoConversa, MensagemRecebida};
//! use uuid::Uuid;
//!
//! let motor = MotorSdr::novo(EngineConfig::default());
//! let estado = EstadoConversa::nova(Uuid::new_v4(), "acme");
//! let mensagem = MensagemRecebida::nova("Quanto custa o plano?", Canal::Whatsapp);
//!
//! let decisao = motor.processar(&mensagem, &estado, &ClassificacaoLead::default(), &[]);
//! println!("{} -> {:?}", decisao.classificacao.intencao, decisao.acao.tipo);
//! ```

pub mod acao;
pub mod config;
pub mod custos;
pub mod engine;
pub mod error;
pub mod framework;
pub mod ia;
pub mod intencao;
pub mod lead;
pub mod modo;
pub mod perfil;
pub mod temperatura;

pub use acao::{RecomendacaoAcao, TipoAcao};
pub use config::EngineConfig;
pub use custos::{RegistroUsoIa, TabelaCustos, TabelaLimites};
pub use engine::{Decisao, MotorSdr};
pub use error::SdrError;
pub use intencao::{Classificacao, ClassificadorIntencao, DetalhesIntencao, Intencao};
pub use lead::{AtualizacaoLead, Canal, ClassificacaoLead, EstadoConversa, MensagemRecebida, Origem};
pub use modo::{transicao, EventoModo, Modo};
pub use perfil::{inferir_perfil_investidor, PerfilInvestidor};
pub use temperatura::{detectar_lead_quente_imediato, PoliticaTemperatura, Temperatura};
