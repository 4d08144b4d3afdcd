//! Command line surface.
//!
//! Global flags are a derived [`GlobalArgs`]; the per-command subcommands are
//! generated from the catalog at startup, one flag per parameter.

use clap::{Arg, ArgAction, ArgMatches, Args, Command, FromArgMatches, ValueEnum};
use opshell_catalog::{all_operations, find_command};
use opshell_core::{ArgValue, ConfirmImpact, Invocation, OperationSpec, ParamKind};
use std::path::PathBuf;

pub const LIST_COMMANDS: &str = "list-commands";

const SELECT: &str = "Select";
const PASS_THRU: &str = "PassThru";
const FORCE: &str = "Force";
const NO_AUTO_ITERATION: &str = "NoAutoIteration";
const POSITIONAL: &str = "positional-value";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// AWS region, e.g. us-east-1
    #[arg(long, global = true, value_name = "REGION")]
    pub region: Option<String>,

    /// Named profile from the shared credentials/config files
    #[arg(long, global = true, value_name = "PROFILE")]
    pub profile: Option<String>,

    /// Send every request to this endpoint instead of the regional one
    #[arg(long = "endpoint-url", global = true, value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Lowest impact that asks for confirmation: low, medium or high
    #[arg(long = "confirm-threshold", global = true, value_name = "LEVEL")]
    pub confirm_threshold: Option<ConfirmImpact>,

    /// Print one JSON document per line
    #[arg(long, global = true)]
    pub compact: bool,

    /// Log level: trace, debug, info, warn, error
    #[arg(long = "log-level", global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[arg(long = "log-format", global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Read newline-delimited JSON records from stdin, one invocation each
    #[arg(long, global = true)]
    pub pipeline: bool,
}

/// Global flags that take a separate value.
const GLOBAL_VALUE_FLAGS: &[&str] = &[
    "region",
    "profile",
    "endpoint-url",
    "config",
    "confirm-threshold",
    "log-level",
    "log-format",
];

const GLOBAL_SWITCHES: &[&str] = &["compact", "pipeline", "help"];

#[derive(Debug, Clone)]
pub enum CliRequest {
    ListCommands { service: Option<String> },
    Invoke {
        operation: &'static OperationSpec,
        invocation: Invocation,
    },
}

#[derive(Debug, Clone)]
pub struct ParsedCli {
    pub globals: GlobalArgs,
    pub request: CliRequest,
}

/// The full command tree.
pub fn build_command() -> Command {
    let root = Command::new("opshell")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run AWS service operations as Verb-Noun commands")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(LIST_COMMANDS)
                .about("List the available commands")
                .arg(
                    Arg::new("service")
                        .long("service")
                        .value_name("NAME")
                        .help("Only commands of this service, e.g. EC2"),
                ),
        )
        .subcommands(all_operations().iter().copied().map(operation_command));
    GlobalArgs::augment_args(root)
}

fn operation_command(op: &'static OperationSpec) -> Command {
    let mut cmd = Command::new(op.command_name())
        .about(op.synopsis)
        .long_about(format!(
            "{}\n\nCalls the {} {} API.",
            op.synopsis, op.service.display_name, op.operation
        ));

    if let Some(p) = op.positional_param() {
        cmd = cmd.arg(
            Arg::new(POSITIONAL)
                .index(1)
                .value_name(p.name)
                .action(ArgAction::Append)
                .help(format!("Value for --{}", p.name)),
        );
    }

    for p in op.params {
        let mut help = format!("<{}>", p.kind.label());
        if p.required {
            help.push_str(" [required]");
        }
        if !p.help.is_empty() {
            help = format!("{} {}", p.help, help);
        }
        if let ParamKind::Enum(values) = p.kind {
            help.push_str(&format!(" [known values: {}]", values.join(", ")));
        }

        let mut arg = Arg::new(p.name)
            .long(p.name)
            .value_name("VALUE")
            .action(ArgAction::Append)
            .help(help);
        if !p.aliases.is_empty() {
            arg = arg.visible_aliases(p.aliases.iter().copied());
        }
        // `--Flag` alone is true; an explicit value needs `--Flag=false`.
        arg = if p.kind.is_switch_like() {
            arg.num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
        } else {
            arg.allow_hyphen_values(true)
        };
        cmd = cmd.arg(arg);
    }

    cmd = cmd.arg(
        Arg::new(SELECT)
            .long(SELECT)
            .value_name("EXPR")
            .allow_hyphen_values(true)
            .help(format!(
                "'*' for the whole response, a response field, or '^Parameter' (default: {})",
                op.default_select
            )),
    );
    if let Some(pass_thru) = op.pass_thru {
        cmd = cmd.arg(
            Arg::new(PASS_THRU)
                .long(PASS_THRU)
                .action(ArgAction::SetTrue)
                .help(format!("Deprecated, use --Select '^{}'", pass_thru)),
        );
    }
    if op.is_mutating() {
        cmd = cmd.arg(
            Arg::new(FORCE)
                .long(FORCE)
                .action(ArgAction::SetTrue)
                .help("Skip the confirmation prompt"),
        );
    }
    if op.paging.is_some() {
        cmd = cmd.arg(
            Arg::new(NO_AUTO_ITERATION)
                .long(NO_AUTO_ITERATION)
                .action(ArgAction::SetTrue)
                .help("Fetch a single page instead of following NextToken"),
        );
    }
    cmd
}

/// Rewrite command and flag spellings to their canonical form.
///
/// Commands and their flags match case-insensitively, a single leading
/// dash (`-ProfileId`) is accepted as well as two, and `-Name:value` is read
/// as `--Name=value`. Only tokens in flag position are rewritten: the value
/// after a value-taking flag, and everything after `--`, pass through as-is.
pub fn normalize_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out = Vec::new();
    let mut current: Option<&'static OperationSpec> = None;
    let mut value_next = false;
    let mut verbatim = false;

    for (i, arg) in args.into_iter().enumerate() {
        if i == 0 || verbatim || value_next {
            value_next = false;
            out.push(arg);
            continue;
        }
        if arg == "--" {
            verbatim = true;
            out.push(arg);
            continue;
        }
        if let Some(name) = arg.strip_prefix("--") {
            if GLOBAL_VALUE_FLAGS.contains(&name) {
                value_next = true;
                out.push(arg);
                continue;
            }
        }
        match current {
            None => match find_command(&arg) {
                Some(op) => {
                    current = Some(op);
                    out.push(op.command_name());
                }
                None => out.push(arg),
            },
            Some(op) => match canonical_flag(op, &arg) {
                Some(flag) => {
                    value_next = flag.takes_next;
                    out.push(flag.text);
                }
                None => out.push(arg),
            },
        }
    }
    out
}

struct CanonicalFlag {
    text: String,
    /// The following token is this flag's value.
    takes_next: bool,
}

fn canonical_flag(op: &OperationSpec, arg: &str) -> Option<CanonicalFlag> {
    let body = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-'))?;
    let (name, value) = match body.split_once(['=', ':']) {
        Some((n, v)) => (n, Some(v)),
        None => (body, None),
    };
    if name.is_empty()
        || !name.starts_with(|c: char| c.is_ascii_alphabetic())
        || GLOBAL_VALUE_FLAGS.iter().chain(GLOBAL_SWITCHES).any(|g| g.eq_ignore_ascii_case(name))
    {
        return None;
    }

    let (canonical, takes_value) = match op.find_param(name) {
        Some(p) => (p.name, !p.kind.is_switch_like()),
        None => [SELECT, PASS_THRU, FORCE, NO_AUTO_ITERATION]
            .into_iter()
            .find(|s| s.eq_ignore_ascii_case(name))
            .map(|s| (s, s == SELECT))?,
    };
    Some(match value {
        Some(v) => CanonicalFlag {
            text: format!("--{}={}", canonical, v),
            takes_next: false,
        },
        None => CanonicalFlag {
            text: format!("--{}", canonical),
            takes_next: takes_value,
        },
    })
}

pub fn parse_from<I, T>(args: I) -> Result<ParsedCli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let args = normalize_args(args.into_iter().map(Into::into));
    let matches = build_command().try_get_matches_from(args)?;
    let globals = GlobalArgs::from_arg_matches(&matches)?;

    let request = match matches.subcommand() {
        Some((LIST_COMMANDS, sub)) => CliRequest::ListCommands {
            service: sub.get_one::<String>("service").cloned(),
        },
        Some((name, sub)) => {
            let operation = find_command(name).ok_or_else(|| {
                clap::Error::raw(
                    clap::error::ErrorKind::InvalidSubcommand,
                    format!("unknown command '{}'\n", name),
                )
            })?;
            CliRequest::Invoke {
                operation,
                invocation: invocation_from_matches(operation, sub),
            }
        }
        None => {
            return Err(clap::Error::raw(
                clap::error::ErrorKind::MissingSubcommand,
                "a command is required\n",
            ))
        }
    };
    Ok(ParsedCli { globals, request })
}

/// Collect the parsed flags of one command into an [`Invocation`].
pub fn invocation_from_matches(op: &OperationSpec, matches: &ArgMatches) -> Invocation {
    let mut invocation = Invocation::new();

    if let (Some(p), Some(values)) = (
        op.positional_param(),
        matches.get_many::<String>(POSITIONAL),
    ) {
        invocation = invocation.arg(p.name, ArgValue::Text(values.cloned().collect()));
    }
    for p in op.params {
        if let Some(values) = matches.get_many::<String>(p.name) {
            invocation = invocation.arg(p.name, ArgValue::Text(values.cloned().collect()));
        }
    }

    if let Some(expr) = matches.get_one::<String>(SELECT) {
        invocation = invocation.select(expr);
    }
    if flag(matches, PASS_THRU) {
        invocation = invocation.pass_thru();
    }
    if flag(matches, FORCE) {
        invocation = invocation.force();
    }
    if flag(matches, NO_AUTO_ITERATION) {
        invocation = invocation.no_auto_iteration();
    }
    invocation
}

fn flag(matches: &ArgMatches, id: &str) -> bool {
    matches
        .try_get_one::<bool>(id)
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false)
}
