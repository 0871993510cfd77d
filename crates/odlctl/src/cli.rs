//! Clap derive structures for the `odlctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Depends only on clap and clap_complete so `build.rs` can include it.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// odlctl -- inspect and program OpenDaylight flow tables
#[derive(Debug, Parser)]
#[command(
    name = "odlctl",
    version,
    about = "Inspect and program OpenDaylight flow tables from the command line",
    long_about = "Lists switches, ports, flow tables and flow rules from an \
        OpenDaylight controller's RESTCONF inventory, and creates flow rules \
        from compact match and action expressions.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// RESTCONF root URL (overrides --host and --port)
    #[arg(long, env = "ODL_URL", global = true)]
    pub url: Option<String>,

    /// Controller host
    #[arg(long, env = "ODL_HOST", global = true)]
    pub host: Option<String>,

    /// Controller RESTCONF port
    #[arg(long, env = "ODL_PORT", global = true)]
    pub port: Option<u16>,

    /// Controller user
    #[arg(long, short = 'u', env = "ODL_USER", global = true)]
    pub user: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ODL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Log each HTTP request as a curl command, plus the response headers
    #[arg(long, global = true)]
    pub debug: bool,

    /// Like --debug, and also log response bodies
    #[arg(long, global = true)]
    pub debug_body: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "ODL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "ODL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect switches
    #[command(alias = "nodes")]
    Node(NodeArgs),

    /// Inspect switch ports
    #[command(alias = "port")]
    Connector(ConnectorArgs),

    /// Inspect flow tables
    Table(TableArgs),

    /// Inspect and create flow rules
    Flow(FlowArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  NODES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct NodeArgs {
    #[command(subcommand)]
    pub command: NodeCommand,
}

#[derive(Debug, Subcommand)]
pub enum NodeCommand {
    /// List switches known to the controller
    #[command(alias = "ls")]
    List,

    /// Show switch details
    Show {
        /// Node ID (e.g. openflow:1)
        node: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONNECTORS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConnectorArgs {
    #[command(subcommand)]
    pub command: ConnectorCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConnectorCommand {
    /// List the ports of a switch
    #[command(alias = "ls")]
    List {
        /// Node ID
        node: String,
    },

    /// Show port details
    Show {
        /// Node ID
        node: String,

        /// Port number (e.g. 1, LOCAL)
        port_number: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TABLES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TableArgs {
    #[command(subcommand)]
    pub command: TableCommand,
}

#[derive(Debug, Subcommand)]
pub enum TableCommand {
    /// List the tables of a switch that hold flows
    #[command(alias = "ls")]
    List {
        /// Node ID
        node: String,
    },

    /// Show table details and statistics
    Show {
        /// Node ID
        node: String,

        /// Table ID
        table: u32,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  FLOWS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct FlowArgs {
    #[command(subcommand)]
    pub command: FlowCommand,
}

#[derive(Debug, Subcommand)]
pub enum FlowCommand {
    /// List flows of a switch, by table then descending priority
    #[command(alias = "ls")]
    List {
        /// Node ID
        node: String,

        /// Only list flows of this table
        #[arg(long, short = 't')]
        table: Option<u32>,
    },

    /// Show one flow
    Show {
        /// Node ID
        node: String,

        /// Table ID
        table: u32,

        /// Flow ID
        flow: String,
    },

    /// Create a flow
    Create(FlowCreateArgs),
}

#[derive(Debug, Args)]
pub struct FlowCreateArgs {
    /// Node ID
    pub node: String,

    /// Table ID
    pub table: u32,

    /// Flow ID
    pub flow: String,

    /// Flow priority (default 32768)
    #[arg(long)]
    pub priority: Option<u32>,

    /// Flow name
    #[arg(long)]
    pub name: Option<String>,

    /// Seconds before the flow is removed regardless of traffic
    #[arg(long)]
    pub hard_timeout: Option<u32>,

    /// Seconds of inactivity before the flow is removed
    #[arg(long)]
    pub idle_timeout: Option<u32>,

    /// Match: input port number
    #[arg(long)]
    pub in_port: Option<String>,

    /// Match: Ethernet source, xx:xx:xx:xx:xx:xx[/mask]
    #[arg(long, value_name = "MAC[/MASK]")]
    pub dl_src: Option<String>,

    /// Match: Ethernet destination, xx:xx:xx:xx:xx:xx[/mask]
    #[arg(long, value_name = "MAC[/MASK]")]
    pub dl_dst: Option<String>,

    /// Match: tunnel ID
    #[arg(long)]
    pub tunnel_id: Option<u64>,

    /// Action: output to this port (same as --actions output:PORT)
    #[arg(long, value_name = "PORT")]
    pub out_port: Option<String>,

    /// Actions, e.g. "output:1,group:7,set-queue:2,pop-vlan:"
    #[arg(long, value_name = "KIND:VALUE,...")]
    pub actions: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// Store the controller password in the system keyring
    SetPassword,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
