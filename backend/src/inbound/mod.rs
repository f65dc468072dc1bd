//! Inbound adapters translating browser requests into driving-port calls.
//!
//! Only the HTTP transport exists; framework details stay under [`http`].

pub mod http;
