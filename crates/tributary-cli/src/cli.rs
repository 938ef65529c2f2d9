use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    help_template = "{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}",
    arg_required_else_help = true
)]
pub struct Args {
    /// Set output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as json
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Provide custom config file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set proxy
    #[arg(required = false, long, short = 'P', global = true)]
    pub proxy: Option<String>,

    /// Set user agent
    #[arg(required = false, long, short = 'A', global = true)]
    pub user_agent: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List configured package sources
    #[clap(name = "sources", visible_alias = "feeds")]
    Sources,

    /// List packages available from a source
    #[clap(name = "list", visible_alias = "ls")]
    List {
        /// Source to browse, by name. `All` browses every enabled source
        #[arg(required = false, short, long)]
        source: Option<String>,
    },

    /// Show the candidates for every dependency of a package
    #[command(arg_required_else_help = true)]
    #[clap(name = "deps", visible_alias = "dependencies")]
    Deps {
        /// Package id
        #[arg(required = true)]
        id: String,

        /// Source to browse, by name. `All` browses every enabled source
        #[arg(required = false, short, long)]
        source: Option<String>,

        /// Only look for dependencies in the browsed source
        #[arg(required = false, long)]
        no_fallback: bool,
    },

    /// Print the configuration file to stdout
    Config {
        /// Open the configuration file in editor
        /// Optional value can be passed to set as editor (default is $EDITOR)
        #[arg(required = false, short, long)]
        edit: Option<Option<String>>,
    },

    /// Generate default config
    #[clap(name = "defconfig")]
    DefConfig,

    /// View env
    #[clap(name = "env")]
    Env,
}
