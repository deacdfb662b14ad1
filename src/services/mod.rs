//! Service layer module
//!
//! Contains the upstream HTTP client, the forwarder and the GraphQL dispatcher

pub mod client;
pub mod dispatcher;
pub mod forwarder;
pub mod operation;

pub use client::OpenAIClient;
pub use dispatcher::GraphQLDispatcher;
pub use forwarder::Forwarder;
pub use operation::{KeywordClassifier, Operation, OperationClassifier};
