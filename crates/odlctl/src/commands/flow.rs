//! Flow command handlers.

use tabled::Tabled;

use odlctl_core::codec::match_codec;
use odlctl_core::{Controller, CoreError, Flow, FlowBody, FlowScope, InstructionCodec, MatchOptions};

use crate::cli::{FlowArgs, FlowCommand, FlowCreateArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, json_or_dash, or_dash};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct FlowRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Table")]
    table: String,
    #[tabled(rename = "Priority")]
    priority: u32,
    #[tabled(rename = "Match")]
    match_: String,
    #[tabled(rename = "Instructions")]
    instructions: String,
}

impl From<&Flow> for FlowRow {
    fn from(f: &Flow) -> Self {
        Self {
            id: f.id.clone(),
            table: table_label(f),
            priority: f.priority,
            match_: f.match_summary(),
            instructions: f.instruction_summary(),
        }
    }
}

fn table_label(f: &Flow) -> String {
    f.table_id.map_or_else(|| "-".into(), |t| t.to_string())
}

fn optional_number(value: Option<impl ToString>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}

fn detail(f: &Flow) -> String {
    let match_summary = f.match_summary();
    [
        format!("ID:           {}", f.id),
        format!("Table:        {}", table_label(f)),
        format!("Priority:     {}", f.priority),
        format!("Name:         {}", or_dash(f.flow_name.as_deref())),
        format!("Hard timeout: {}", optional_number(f.hard_timeout)),
        format!("Idle timeout: {}", optional_number(f.idle_timeout)),
        format!("Cookie:       {}", optional_number(f.cookie)),
        format!(
            "Match:        {}",
            if match_summary.is_empty() {
                "(all packets)"
            } else {
                match_summary.as_str()
            }
        ),
        format!("Instructions: {}", f.instruction_summary()),
        format!("Statistics:   {}", json_or_dash(f.statistics.as_ref())),
    ]
    .join("\n")
}

/// Table id ascending, then priority descending. Stable among equals.
fn sort_flows(flows: &mut [Flow]) {
    flows.sort_by(|a, b| {
        a.table_id
            .cmp(&b.table_id)
            .then_with(|| b.priority.cmp(&a.priority))
    });
}

/// `--out-port N` becomes a leading `output:N` in front of `--actions`.
fn action_expression(out_port: Option<&str>, actions: Option<&str>) -> Option<String> {
    let parts: Vec<String> = out_port
        .map(|port| format!("output:{}", port.trim()))
        .into_iter()
        .chain(
            actions
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_owned),
        )
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(","))
    }
}

fn build_body(args: &FlowCreateArgs) -> Result<FlowBody, CoreError> {
    let options = MatchOptions {
        in_port: args.in_port.clone(),
        dl_src: args.dl_src.clone(),
        dl_dst: args.dl_dst.clone(),
        tunnel_id: args.tunnel_id,
    };
    let expression = action_expression(args.out_port.as_deref(), args.actions.as_deref());

    Ok(FlowBody {
        priority: args.priority,
        flow_name: args.name.clone(),
        hard_timeout: args.hard_timeout,
        idle_timeout: args.idle_timeout,
        match_: match_codec::encode(&options)?,
        instructions: InstructionCodec::default().encode(expression.as_deref())?,
    })
}

fn map_missing_table(err: CoreError, node: &str, table: u32) -> CliError {
    match err {
        CoreError::Api {
            status: Some(404), ..
        } => CliError::not_found("table", table.to_string(), format!("table list {node}")),
        other => other.into(),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: FlowArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        FlowCommand::List { node, table } => {
            let mut flows = match table {
                Some(table) => controller
                    .flows()
                    .list_all(&FlowScope::new(node.as_str(), table))
                    .await
                    .map_err(|e| map_missing_table(e, &node, table))?,
                None => util::fetch_node(controller, &node)
                    .await?
                    .flows()
                    .cloned()
                    .collect(),
            };
            sort_flows(&mut flows);

            let out = output::render_list(
                &global.output,
                &flows,
                |f| FlowRow::from(f),
                |f| f.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FlowCommand::Show { node, table, flow } => {
            let scope = FlowScope::new(node.as_str(), table);
            let found = match controller.flows().get(&flow, &scope).await {
                Ok(found) => found,
                Err(CoreError::Api {
                    status: Some(404), ..
                }) => {
                    return Err(CliError::not_found(
                        "flow",
                        flow,
                        format!("flow list {node} --table {table}"),
                    ));
                }
                Err(e) => return Err(e.into()),
            };
            let out = output::render_single(&global.output, &found, detail, |f| f.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FlowCommand::Create(create) => {
            let body = build_body(&create)?;
            let scope = FlowScope::new(create.node.as_str(), create.table);

            let accepted = controller.flows().create(&create.flow, &body, &scope).await?;
            if !accepted {
                return Err(CliError::FlowRejected { flow: create.flow });
            }
            if !global.quiet {
                let color = output::should_color(&global.color);
                println!(
                    "{} flow {} in table {} of {}",
                    output::success("Accepted", color),
                    create.flow,
                    create.table,
                    create.node
                );
            }
            Ok(())
        }
    }
}
