//! Data models module
//!
//! Defines the request and response structures for the chat, image and GraphQL surfaces

pub mod chat;
pub mod graphql;
pub mod image;
