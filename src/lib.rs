pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod paths;
pub mod practice;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod validation;

#[cfg(test)]
pub mod testing;
