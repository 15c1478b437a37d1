pub mod allele;
pub mod config;
pub mod error;
pub mod filter;
mod io;
pub mod projection;
pub mod reference;
pub mod sink;
pub mod variant;
