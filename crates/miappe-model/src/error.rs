use thiserror::Error;

use crate::category::Category;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown MIAPPE category: {name}")]
    UnknownCategory { name: String },
    #[error("duplicate field '{name}' in {category} schema")]
    DuplicateField { category: Category, name: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
