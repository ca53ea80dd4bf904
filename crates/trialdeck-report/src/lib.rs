//! trialdeck-report — artifact writers for generated trial sets.

pub mod embed;
pub mod html;
