pub mod client;
pub mod convert;
pub mod model;
pub mod requests;
pub mod structure;
pub mod tables;
pub mod validation;

#[cfg(test)]
pub mod fixtures;
