//! Card lifecycle: persistence port, payload validation and the service
//! callers go through.

pub mod ports;
pub mod service;
pub mod validation;

pub use service::CardService;
