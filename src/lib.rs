#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate serde_derive;

pub mod auth;
pub mod config;
pub mod errors;
pub mod form;
pub mod gateway;
pub mod helpers;
pub mod models;
pub mod routes;
pub mod server;
pub mod validation;

#[cfg(test)]
mod test_support;
