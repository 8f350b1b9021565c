use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::services::actions::help_text;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if !config_file_path.parent().unwrap().exists() {
        fs::create_dir_all(config_file_path.parent().unwrap()).await?;
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    let config_path_display = config_file_path.as_os_str().to_str().unwrap();
    println!("Created default config file at {config_path_display}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Supercakes")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Supercakes with environment variable RUST_LOG=supercakes")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn arg_model() -> Arg {
    return Arg::new(ConfigKey::Model.as_ref())
        .short('m')
        .long(ConfigKey::Model.as_ref())
        .env("SUPERCAKES_MODEL")
        .num_args(1)
        .help(format!(
            "The chat model that talks customers through their order. [default: {}]",
            Config::default(ConfigKey::Model)
        ));
}

fn arg_backend_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::BackendHealthCheckTimeout.as_ref())
        .long(ConfigKey::BackendHealthCheckTimeout.as_ref())
        .env("SUPERCAKES_BACKEND_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(
            format!("Time to wait in milliseconds before timing out when doing a healthcheck for the chat backend. [default: {}]", Config::default(ConfigKey::BackendHealthCheckTimeout)),
        );
}

fn subcommand_chat() -> Command {
    return Command::new("chat")
        .about("Start taking a cake order in the terminal.")
        .arg(arg_model())
        .arg(arg_backend_health_check_timeout());
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMANDOS:") || line.starts_with("ATAJOS:") {
                return Paint::new(format!("CHAT {line}")).underline().bold().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("supercakes")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .arg(arg_model())
        .arg(arg_backend_health_check_timeout())
        .arg(
            Arg::new(ConfigKey::ConfigFile.as_ref())
                .short('c')
                .long(ConfigKey::ConfigFile.as_ref())
                .env("SUPERCAKES_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::Username.as_ref())
                .short('u')
                .long(ConfigKey::Username.as_ref())
                .env("SUPERCAKES_USERNAME")
                .num_args(1)
                .help("Your name as displayed in your chat bubbles.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Currency.as_ref())
                .long(ConfigKey::Currency.as_ref())
                .env("SUPERCAKES_CURRENCY")
                .num_args(1)
                .help(format!("Currency used for quoting prices. [default: {}]", Config::default(ConfigKey::Currency)))
                .value_parser(PossibleValuesParser::new(["usd", "mxn"]))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::StrictReplies.as_ref())
                .long(ConfigKey::StrictReplies.as_ref())
                .env("SUPERCAKES_STRICT_REPLIES")
                .num_args(1)
                .help(format!("Ask the model to keep replies to a single short paragraph without markdown. [default: {}]", Config::default(ConfigKey::StrictReplies)))
                .value_parser(PossibleValuesParser::new(["true", "false"]))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ImageGeneration.as_ref())
                .long(ConfigKey::ImageGeneration.as_ref())
                .env("SUPERCAKES_IMAGE_GENERATION")
                .num_args(1)
                .help(format!("Generate an AI preview image of the cake design when the customer asks to see it. [default: {}]", Config::default(ConfigKey::ImageGeneration)))
                .value_parser(PossibleValuesParser::new(["true", "false"]))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ImageModel.as_ref())
                .long(ConfigKey::ImageModel.as_ref())
                .env("SUPERCAKES_IMAGE_MODEL")
                .num_args(1)
                .help(format!("The model used to generate cake design preview images. [default: {}]", Config::default(ConfigKey::ImageModel)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::OpenAiURL.as_ref())
                .long(ConfigKey::OpenAiURL.as_ref())
                .env("SUPERCAKES_OPENAI_URL")
                .num_args(1)
                .help(format!("OpenAI API URL. Can be swapped to a compatible proxy. [default: {}]", Config::default(ConfigKey::OpenAiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::OpenAiToken.as_ref())
                .long(ConfigKey::OpenAiToken.as_ref())
                .env("SUPERCAKES_OPENAI_TOKEN")
                .num_args(1)
                .help("OpenAI API token.")
                .global(true),
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = dirs::cache_dir().unwrap().join("supercakes/debug.log");
                    println!("{}", log_path.to_str().unwrap());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
