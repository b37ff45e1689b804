//! CLI library components for the MIAPPE validator.

pub mod export;
pub mod logging;
pub mod validate;
