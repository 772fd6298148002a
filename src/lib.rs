//! Alpine Wires: server-rendered pages wired to Alpine.js.
//!
//! A page handler renders its template with default fields on a normal
//! request and answers `POST <path>?_wired_` calls from the rendered page
//! with JSON. See [`wires`] for the handler-facing API.

pub mod config;
pub mod demos;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod template;
pub mod wires;
