//! automaton-mcp-gateway: JSON-RPC dispatch server for the Automaton
//! desktop-automation service, over stdio and HTTP transports.

pub mod api;
pub mod cli;
pub mod clients;
pub mod core;
pub mod domain;
pub mod infra;
pub mod tools;
