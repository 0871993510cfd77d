//! Node command handlers.

use tabled::Tabled;

use odlctl_core::{Controller, Node};

use crate::cli::{GlobalOpts, NodeArgs, NodeCommand};
use crate::error::CliError;
use crate::output::{self, json_or_dash, or_dash};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Connectors")]
    connectors: usize,
    #[tabled(rename = "Tables")]
    tables: usize,
    #[tabled(rename = "Hardware")]
    hardware: String,
    #[tabled(rename = "Software")]
    software: String,
}

impl From<&Node> for NodeRow {
    fn from(n: &Node) -> Self {
        Self {
            id: n.id.clone(),
            ip: or_dash(n.ip_address.as_deref()),
            connectors: n.connectors.len(),
            tables: n.active_tables().count(),
            hardware: or_dash(n.hardware.as_deref()),
            software: or_dash(n.software.as_deref()),
        }
    }
}

fn detail(n: &Node) -> String {
    [
        format!("ID:              {}", n.id),
        format!("IP:              {}", or_dash(n.ip_address.as_deref())),
        format!("Connectors:      {}", n.connectors.len()),
        format!("Tables:          {}", n.active_tables().count()),
        format!("Hardware:        {}", or_dash(n.hardware.as_deref())),
        format!("Software:        {}", or_dash(n.software.as_deref())),
        format!("Manufacturer:    {}", or_dash(n.manufacturer.as_deref())),
        format!("Serial:          {}", or_dash(n.serial_number.as_deref())),
        format!("Description:     {}", or_dash(n.description.as_deref())),
        format!("Switch features: {}", json_or_dash(n.switch_features.as_ref())),
        format!("Meter features:  {}", json_or_dash(n.meter_features.as_ref())),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: NodeArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        NodeCommand::List => {
            let nodes = controller.nodes().list_all(&()).await?;
            let out = output::render_list(
                &global.output,
                &nodes,
                |n| NodeRow::from(n),
                |n| n.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NodeCommand::Show { node } => {
            let node = util::fetch_node(controller, &node).await?;
            let out = output::render_single(&global.output, &node, detail, |n| n.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
