//! # Shop server
//! This crate hosts the HTTP server for the storefront backend. It is responsible for:
//! Registering users and logging them in.
//! Guarding the `/api` routes so that only requests carrying a valid session token get through.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/register`: Create a new account from a JSON `{username, password}` body.
//! * `/login`: Exchange a username and password for a session token.
//! * `/api/protected`, `/api/me`: Examples of routes that require `Authorization: Bearer <token>`.

pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod middleware;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
