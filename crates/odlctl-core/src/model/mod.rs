//! Inventory domain model.
//!
//! Plain records built from RESTCONF documents by free `from_document`
//! parsers. Required keys fail with [`CoreError::MissingRequiredField`];
//! everything else degrades to `None`.
//!
//! [`CoreError::MissingRequiredField`]: crate::error::CoreError::MissingRequiredField

pub mod connector;
pub(crate) mod document;
pub mod flow;
pub mod node;
pub mod table;

pub use connector::Connector;
pub use flow::{DEFAULT_PRIORITY, Flow};
pub use node::Node;
pub use table::Table;
