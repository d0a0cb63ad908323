//! InvenTree REST API adapter.

mod client;
mod dto;

pub use client::InvenTreeClient;
