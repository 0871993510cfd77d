//! Shared helpers for command handlers.

use odlctl_core::{Controller, CoreError, Node};

use crate::error::CliError;

/// Fetch one node, turning a controller 404 into a node not-found error.
pub async fn fetch_node(controller: &Controller, node_id: &str) -> Result<Node, CliError> {
    match controller.nodes().get(node_id, &()).await {
        Ok(node) => Ok(node),
        Err(CoreError::Api {
            status: Some(404), ..
        }) => Err(node_not_found(node_id)),
        Err(e) => Err(e.into()),
    }
}

pub fn node_not_found(node_id: &str) -> CliError {
    CliError::not_found("node", node_id, "node list")
}
