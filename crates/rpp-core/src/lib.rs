//! RPP Core Types and Queries
//!
//! This crate provides the document model shared by the RPP parser and its
//! consumers. It includes:
//!
//! - **Values**: Typed node parameters ([`value::Value`])
//! - **Document**: Arena-backed node tree with a flat index ([`document`] module)
//! - **Query**: Tag-chain selectors and the containment filter ([`query`] module)

pub mod document;
pub mod query;
pub mod value;

pub use document::{Body, Document, DocumentBuilder, NodeId, NodeRef};
pub use value::Value;
