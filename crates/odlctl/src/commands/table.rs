//! Flow table command handlers.

use tabled::Tabled;

use odlctl_core::{Controller, Table};

use crate::cli::{GlobalOpts, TableArgs, TableCommand};
use crate::error::CliError;
use crate::output::{self, json_or_dash};

use super::util;

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Flows")]
    flows: usize,
}

impl From<&Table> for TableRow {
    fn from(t: &Table) -> Self {
        Self {
            id: t.id,
            flows: t.flow_count(),
        }
    }
}

fn detail(t: &Table) -> String {
    [
        format!("ID:              {}", t.id),
        format!("Flows:           {}", t.flow_count()),
        format!("Flow hash map:   {}", json_or_dash(t.flow_hash_id_map.as_ref())),
        format!(
            "Aggregate stats: {}",
            json_or_dash(t.aggregate_flow_statistics.as_ref())
        ),
        format!(
            "Table stats:     {}",
            json_or_dash(t.flow_table_statistics.as_ref())
        ),
    ]
    .join("\n")
}

/// Tables holding flows, ascending by id.
fn active_sorted(tables: impl Iterator<Item = Table>) -> Vec<Table> {
    let mut active: Vec<Table> = tables.filter(Table::has_flows).collect();
    active.sort_by_key(|t| t.id);
    active
}

pub async fn handle(
    controller: &Controller,
    args: TableArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TableCommand::List { node } => {
            let node = util::fetch_node(controller, &node).await?;
            let tables = active_sorted(node.tables.into_iter());
            let out = output::render_list(
                &global.output,
                &tables,
                |t| TableRow::from(t),
                |t| t.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TableCommand::Show { node, table } => {
            let node = util::fetch_node(controller, &node).await?;
            let Some(found) = node.table(table) else {
                return Err(CliError::not_found(
                    "table",
                    table.to_string(),
                    format!("table list {}", node.id),
                ));
            };
            let out = output::render_single(&global.output, found, detail, |t| t.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
