//! Grinex exchange REST API.

pub mod client;
pub mod dto;

pub use client::{
    Client,
    ClientError,
};
pub use dto::DepthResponse;
