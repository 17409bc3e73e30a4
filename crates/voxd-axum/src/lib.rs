#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use bootstrap::{bootstrap, serve};
pub use error::HttpError;
pub use routes::create_router;
pub use state::{AppState, AxumContext};
