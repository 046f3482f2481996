//! Registration engine for the real-estate networking platform.
//!
//! The crate bundles the Brazilian identifier primitives (CPF, CNPJ, CRECI and
//! phone numbers), the profile-driven rule tables, and the form validation and
//! state controller consumed by the registration front-end.

pub mod config;
pub mod error;
pub mod identifiers;
pub mod registration;
pub mod telemetry;
