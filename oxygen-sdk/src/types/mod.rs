//! Contains data structures for requests and responses to the OxygenAI API.
//!
//! This module defines the chat-completion and image-generation schemas as
//! well as the plain HTTP request/response types exchanged with a
//! [`Transport`](crate::transport::Transport).

pub mod chat;
pub mod image;
mod http;
mod shared;

pub use http::*;
pub use shared::*;
