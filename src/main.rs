//! Lumo Registry - run registered commands from the command line.

use std::env;
use std::process::ExitCode;

use serde_json::Value;
use tracing::{debug, error};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lumo_registry::commands::system::register_builtins;
use lumo_registry::config::Settings;
use lumo_registry::error::{CommandErrorKind, RegistryError};
use lumo_registry::executor::with_timeout;
use lumo_registry::{CommandArgs, CommandRegistry};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");

/// Exit code when the command succeeded.
const EXIT_SUCCESS: u8 = 0;
/// Exit code when the command failed while running.
const EXIT_EXECUTION_FAILED: u8 = 1;
/// Exit code when the command is not registered.
const EXIT_NOT_FOUND: u8 = 2;
/// Exit code when the command exceeded the configured deadline.
const EXIT_TIMEOUT: u8 = 3;
/// Exit code for usage and configuration errors.
const EXIT_USAGE: u8 = 64;

/// What the invocation asked for.
enum Action {
    Help,
    Version,
    List,
    Describe(String),
    Execute { command: String, args: Vec<String> },
}

struct Invocation {
    config_path: Option<String>,
    action: Action,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let invocation = match parse_args(&args) {
        Ok(invocation) => invocation,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Run '{} --help' for usage.", NAME);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match invocation.action {
        Action::Help => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Action::Version => {
            println!("{} {}", NAME, VERSION);
            return ExitCode::SUCCESS;
        }
        _ => {}
    }

    // Load configuration
    let settings = match &invocation.config_path {
        Some(path) => match Settings::load(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading configuration: {}", e);
                return ExitCode::from(EXIT_USAGE);
            }
        },
        None => Settings::default(),
    };

    // Initialize logging based on configuration
    if let Err(e) = init_logging(&settings) {
        eprintln!("Error initializing logging: {}", e);
        return ExitCode::from(EXIT_USAGE);
    }

    let registry = CommandRegistry::new();
    if settings.builtins.enabled {
        register_builtins(&registry, settings.environment());
    }
    debug!(count = registry.len(), "Command registry initialized");

    match invocation.action {
        Action::List => {
            println!("{}", registry.help(None));
            ExitCode::SUCCESS
        }
        Action::Describe(name) => {
            println!("{}", registry.help(Some(&name)));
            ExitCode::SUCCESS
        }
        Action::Execute { command, args } => {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(e) => {
                    eprintln!("Failed to create Tokio runtime: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            ExitCode::from(runtime.block_on(run_command(&registry, &settings, &command, &args)))
        }
        Action::Help | Action::Version => ExitCode::SUCCESS,
    }
}

/// Execute one command and report the outcome.
async fn run_command(
    registry: &CommandRegistry,
    settings: &Settings,
    command: &str,
    raw_args: &[String],
) -> u8 {
    let args: CommandArgs = raw_args.iter().map(|raw| parse_argument(raw)).collect();

    let result = match settings.limits.execute_timeout() {
        Some(timeout) => with_timeout(command, timeout, registry.execute(command, args)).await,
        None => registry.execute(command, args).await,
    };

    match result {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(output) => {
                println!("{}", output);
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to render result: {}", e);
                EXIT_EXECUTION_FAILED
            }
        },
        Err(e) => report_error(&e),
    }
}

/// Print an execution error and map it to an exit code.
fn report_error(err: &RegistryError) -> u8 {
    match err {
        RegistryError::Command {
            kind: CommandErrorKind::NotFound { name, available },
        } => {
            eprintln!("Unknown command: {}", name);
            if available.is_empty() {
                eprintln!("No commands registered.");
            } else {
                eprintln!("Available commands:");
                for command in available {
                    eprintln!("  {}", command);
                }
            }
        }
        RegistryError::Command {
            kind: CommandErrorKind::Timeout { .. },
        } => {
            error!(error = %err, "Command timed out");
            eprintln!("{}", err);
        }
        _ => eprintln!("Command crashed: {}", err),
    }
    exit_code(err)
}

/// Exit code for a failed execution.
///
/// Not-found, timeout and handler failures each get their own code.
fn exit_code(err: &RegistryError) -> u8 {
    match err {
        RegistryError::Command {
            kind: CommandErrorKind::NotFound { .. },
        } => EXIT_NOT_FOUND,
        RegistryError::Command {
            kind: CommandErrorKind::Timeout { .. },
        } => EXIT_TIMEOUT,
        _ => EXIT_EXECUTION_FAILED,
    }
}

/// Parse a command-line argument as JSON, falling back to a plain string.
fn parse_argument(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Parse command line arguments (simple std::env approach).
fn parse_args(args: &[String]) -> Result<Invocation, String> {
    let mut config_path = None;
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "-h" | "--help" => {
                return Ok(Invocation {
                    config_path,
                    action: Action::Help,
                })
            }
            "-V" | "--version" => {
                return Ok(Invocation {
                    config_path,
                    action: Action::Version,
                })
            }
            "-c" | "--config" => {
                let path = args
                    .get(i + 1)
                    .ok_or_else(|| format!("'{}' requires a path", arg))?;
                config_path = Some(path.clone());
                i += 2;
            }
            "-l" | "--list" => {
                return Ok(Invocation {
                    config_path: remaining_config(config_path, &args[i + 1..]),
                    action: Action::List,
                })
            }
            "-d" | "--describe" => {
                let name = args
                    .get(i + 1)
                    .ok_or_else(|| format!("'{}' requires a command name", arg))?;
                return Ok(Invocation {
                    config_path: remaining_config(config_path, &args[i + 2..]),
                    action: Action::Describe(name.clone()),
                });
            }
            _ => {
                if let Some(path) = arg.strip_prefix("--config=") {
                    config_path = Some(path.to_string());
                    i += 1;
                    continue;
                }
                if arg.starts_with('-') && arg.len() > 1 && arg.parse::<f64>().is_err() {
                    return Err(format!("Unknown option '{}'", arg));
                }
                return Ok(Invocation {
                    config_path,
                    action: Action::Execute {
                        command: arg.clone(),
                        args: args[i + 1..].to_vec(),
                    },
                });
            }
        }
    }

    Ok(Invocation {
        config_path,
        action: Action::List,
    })
}

/// Pick up a `--config` given after `--list` or `--describe`.
fn remaining_config(current: Option<String>, rest: &[String]) -> Option<String> {
    for (i, arg) in rest.iter().enumerate() {
        if (arg == "--config" || arg == "-c") && i + 1 < rest.len() {
            return Some(rest[i + 1].clone());
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Some(path.to_string());
        }
    }
    current
}

/// Print help message.
fn print_help() {
    println!(
        r#"{} {}
Run commands from the Lumo command registry.

USAGE:
    {} [OPTIONS] [COMMAND [ARGS...]]

Each ARG is parsed as JSON when possible, otherwise passed as a string.
Without a COMMAND the registered commands are listed.

OPTIONS:
    -c, --config <PATH>      Path to configuration file
    -l, --list               List registered commands
    -d, --describe <NAME>    Show help for one command
    -h, --help               Print help information
    -V, --version            Print version information

EXIT CODES:
    0    Success
    1    Command failed while running
    2    Command not found
    3    Command timed out
    64   Usage or configuration error
"#,
        NAME, VERSION, NAME
    );
}

/// Initialize logging based on settings.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_logging(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    match settings.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init()?;
        }
        _ => {
            // Default to pretty format
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_execute() {
        let invocation = parse_args(&strings(&["-c", "cfg.toml", "math:add", "5", "3"])).unwrap();
        assert_eq!(invocation.config_path.as_deref(), Some("cfg.toml"));
        match invocation.action {
            Action::Execute { command, args } => {
                assert_eq!(command, "math:add");
                assert_eq!(args, strings(&["5", "3"]));
            }
            _ => panic!("expected execute"),
        }
    }

    #[test]
    fn test_parse_list_and_describe() {
        assert!(matches!(parse_args(&[]).unwrap().action, Action::List));
        assert!(matches!(
            parse_args(&strings(&["--list"])).unwrap().action,
            Action::List
        ));

        let invocation =
            parse_args(&strings(&["--describe", "system:ping", "--config=x.toml"])).unwrap();
        assert_eq!(invocation.config_path.as_deref(), Some("x.toml"));
        assert!(matches!(invocation.action, Action::Describe(name) if name == "system:ping"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&strings(&["--config"])).is_err());
        assert!(parse_args(&strings(&["--bogus"])).is_err());
    }

    #[test]
    fn test_exit_codes_distinguish_failures() {
        let not_found = RegistryError::Command {
            kind: CommandErrorKind::NotFound {
                name: "ghost".to_string(),
                available: vec!["system:ping".to_string()],
            },
        };
        let crashed = RegistryError::Command {
            kind: CommandErrorKind::ExecutionFailed {
                name: "math:divide".to_string(),
                message: "division by zero".to_string(),
            },
        };
        let timed_out = RegistryError::Command {
            kind: CommandErrorKind::Timeout {
                name: "sleepy".to_string(),
                timeout: std::time::Duration::from_secs(1),
            },
        };

        assert_eq!(exit_code(&not_found), EXIT_NOT_FOUND);
        assert_eq!(exit_code(&crashed), EXIT_EXECUTION_FAILED);
        assert_eq!(exit_code(&timed_out), EXIT_TIMEOUT);
        assert_eq!(report_error(&not_found), EXIT_NOT_FOUND);
        assert_eq!(report_error(&crashed), EXIT_EXECUTION_FAILED);
    }

    #[tokio::test]
    async fn test_run_command_exit_codes() {
        let registry = CommandRegistry::new();
        register_builtins(&registry, lumo_registry::runtime::Environment::Test);
        registry.register_sync("fail", |_args| Err("boom".into()), None);
        let settings = Settings::default();

        let ok = run_command(&registry, &settings, "system:ping", &[]).await;
        assert_eq!(ok, EXIT_SUCCESS);

        let missing = run_command(&registry, &settings, "ghost", &[]).await;
        assert_eq!(missing, EXIT_NOT_FOUND);

        let crashed = run_command(&registry, &settings, "fail", &[]).await;
        assert_eq!(crashed, EXIT_EXECUTION_FAILED);
    }

    #[test]
    fn test_parse_argument() {
        assert_eq!(parse_argument("5"), serde_json::json!(5));
        assert_eq!(parse_argument("[1,2]"), serde_json::json!([1, 2]));
        assert_eq!(parse_argument("hello"), serde_json::json!("hello"));
    }
}
