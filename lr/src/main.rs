use clap::{CommandFactory, Parser, Subcommand};
use liblr::action::Action;
use liblr::client::ClientConfig;
use std::path::PathBuf;
use std::process;

mod commands;
mod context;
mod format;

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// lr - Container Registry Client
///
/// List images and tags of a container registry and remove tags by digest.
#[derive(Parser, Debug)]
#[command(name = "lr")]
#[command(version, about, long_about = None)]
#[command(disable_help_subcommand = true, arg_required_else_help = true)]
struct Cli {
    /// Verbose output on stderr (can be repeated: -v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Control colored output: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    color: String,

    /// Output format: pretty, json, yaml
    #[arg(short, long, global = true, default_value = "pretty")]
    format: String,

    /// Credentials file (default: ~/.lr.json)
    #[arg(long, global = true, env = "LR_CONFIG")]
    config: Option<PathBuf>,

    /// Timeout in seconds for catalog and tag list requests
    #[arg(long, global = true, env = "LR_LIST_TIMEOUT", default_value_t = 15)]
    list_timeout: u64,

    /// Timeout in seconds for digest lookup and delete requests
    #[arg(long, global = true, env = "LR_DELETE_TIMEOUT", default_value_t = 5)]
    delete_timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registry images
    #[command(name = "ls-images", visible_alias = "li")]
    LsImages,
    /// List tags of an image
    #[command(name = "ls-tags", visible_alias = "lt")]
    LsTags {
        /// Image name (repository)
        image: String,
    },
    /// Remove all tags of an image
    #[command(name = "rm-image", visible_alias = "ri")]
    RmImage {
        /// Image name (repository)
        image: String,
    },
    /// Remove some tags of an image
    #[command(name = "rm-tags", visible_alias = "rt")]
    RmTags {
        /// Image and comma-separated tags, e.g. myimage:tag1,tag2
        selection: String,
    },
    /// Print help
    Help,
    /// Display version information
    Version,
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Commands {
    /// Returns the registry action and its argument, if this command is one.
    fn action(&self) -> Option<(Action, &str)> {
        match self {
            Commands::LsImages => Some((Action::ListImages, "")),
            Commands::LsTags { image } => Some((Action::ListTags, image.as_str())),
            Commands::RmImage { image } => Some((Action::DeleteImage, image.as_str())),
            Commands::RmTags { selection } => Some((Action::DeleteTags, selection.as_str())),
            Commands::Help => Some((Action::Help, "")),
            Commands::Version | Commands::Completion { .. } => None,
        }
    }
}

fn main() {
    // Usage errors exit 1; --help and --version exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    let ctx = context::AppContext::build(
        format::ColorChoice::from(cli.color.as_str()),
        context::VerbosityLevel::from_count(cli.verbose),
        format::OutputFormat::from(cli.format.as_str()),
        cli.config.clone(),
        ClientConfig::new()
            .with_list_timeout(cli.list_timeout)
            .with_modify_timeout(cli.delete_timeout),
    );

    match &cli.command {
        Commands::Version => commands::version::print_version(),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, bin_name, &mut std::io::stdout());
        }
        command => {
            if let Some((action, argument)) = command.action() {
                run(&ctx, action, argument);
            }
        }
    }
}

/// Runs an action, exiting 1 on any failure.
fn run(ctx: &context::AppContext, action: Action, argument: &str) {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let connect = || ctx.connect_or_explain();

    if let Err(e) = commands::dispatch(ctx, action, argument, connect, &mut out) {
        format::error(ctx, &e);
        process::exit(1);
    }
}
