//! Gazetteer backend library.
//!
//! A REST backend for country/state reference data with token-based
//! authentication. The crate follows a hexagonal layout: `domain` holds the
//! aggregates, ports, and use-case services; `inbound` adapts HTTP requests
//! onto the driving ports; `outbound` implements the driven ports over
//! PostgreSQL; `server` wires the layers together.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;
