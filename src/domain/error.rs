// Structural errors raised while building a dashboard document
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("dashboard title must not be empty")]
    EmptyTitle,

    #[error("panel id {0} is declared more than once")]
    DuplicatePanelId(u32),

    #[error("panel '{panel}' has span {span}, expected 1..=12")]
    InvalidSpan { panel: String, span: u8 },

    #[error("unknown panel kind '{0}'")]
    UnknownPanelKind(String),

    #[error("duplicate dashboard slug '{0}'")]
    DuplicateSlug(String),

    #[error("failed to encode dashboard document: {0}")]
    Serialize(#[from] serde_json::Error),
}
