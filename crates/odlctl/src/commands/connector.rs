//! Connector (switch port) command handlers.

use tabled::Tabled;

use odlctl_core::{Connector, Controller};

use crate::cli::{ConnectorArgs, ConnectorCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, json_or_dash, or_dash};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ConnectorRow {
    #[tabled(rename = "Port")]
    port: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "State")]
    state: String,
}

impl From<&Connector> for ConnectorRow {
    fn from(c: &Connector) -> Self {
        Self {
            port: or_dash(c.port_number.as_deref()),
            name: or_dash(c.name.as_deref()),
            id: c.id.clone(),
            state: json_or_dash(c.state.as_ref()),
        }
    }
}

fn speed(value: Option<u64>) -> String {
    value.map_or_else(|| "-".into(), |kbps| format!("{kbps} kbps"))
}

fn detail(c: &Connector) -> String {
    [
        format!("ID:                  {}", c.id),
        format!("Port:                {}", or_dash(c.port_number.as_deref())),
        format!("Name:                {}", or_dash(c.name.as_deref())),
        format!("MAC:                 {}", or_dash(c.hardware_address.as_deref())),
        format!("Current speed:       {}", speed(c.current_speed)),
        format!("Maximum speed:       {}", speed(c.maximum_speed)),
        format!("State:               {}", json_or_dash(c.state.as_ref())),
        format!("Configuration:       {}", json_or_dash(c.configuration.as_ref())),
        format!("Advertised features: {}", json_or_dash(c.advertised_features.as_ref())),
        format!("Supported:           {}", json_or_dash(c.supported.as_ref())),
        format!("Current feature:     {}", json_or_dash(c.current_feature.as_ref())),
        format!("Peer features:       {}", json_or_dash(c.peer_features.as_ref())),
        format!("Statistics:          {}", json_or_dash(c.statistics.as_ref())),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: ConnectorArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ConnectorCommand::List { node } => {
            let node = util::fetch_node(controller, &node).await?;
            let out = output::render_list(
                &global.output,
                &node.connectors,
                |c| ConnectorRow::from(c),
                |c| c.port_number.clone().unwrap_or_else(|| c.id.clone()),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConnectorCommand::Show { node, port_number } => {
            let node = util::fetch_node(controller, &node).await?;
            let Some(connector) = node.connector(&port_number) else {
                return Err(CliError::not_found(
                    "connector",
                    port_number,
                    format!("connector list {}", node.id),
                ));
            };
            let out = output::render_single(&global.output, connector, detail, |c| c.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
