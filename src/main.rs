// hdrswitch: query and toggle HDR on Windows displays
//
// Subcommands:
//   list     — all active displays with ids, names and HDR status
//   status   — HDR / SDR of the selected displays
//   enable   — turn HDR on
//   disable  — turn HDR off
//   toggle   — flip HDR

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};

use hdrswitch::Selector;

#[derive(Parser)]
#[command(
    name = "hdrswitch",
    version,
    about = "Query and toggle HDR on Windows displays",
    after_help = "You can specify a monitor by using `--all`, `--index`, `--id`, or `--name` \
                  argument after a command.\nFor more information, use `hdrswitch <command> --help`."
)]
struct Cli {
    /// Enables debug output
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// List available displays
    List,
    /// Print current display's mode
    Status(SelectArgs),
    /// Enable HDR
    Enable(SelectArgs),
    /// Disable HDR
    Disable(SelectArgs),
    /// Toggle HDR settings
    Toggle(SelectArgs),
}

#[derive(Args, Debug)]
#[group(multiple = false)]
struct SelectArgs {
    /// Apply to all displays
    #[arg(long)]
    all: bool,
    /// Choose display by its index received from `list` command. The first index is 0
    #[arg(long)]
    index: Option<usize>,
    /// Choose display by its id received from `list` command
    #[arg(long)]
    id: Option<u32>,
    /// Choose display by its name received from `list` command
    #[arg(long)]
    name: Option<String>,
}

impl From<SelectArgs> for Selector {
    fn from(args: SelectArgs) -> Self {
        if args.all {
            Selector::All
        } else if let Some(index) = args.index {
            Selector::ByIndex(index)
        } else if let Some(id) = args.id {
            Selector::ById(id)
        } else if let Some(name) = args.name {
            Selector::ByName(name)
        } else {
            Selector::default()
        }
    }
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

#[cfg(windows)]
fn run(command: Cmd) -> Result<()> {
    use hdrswitch::commands::{change_hdr, list_displays, print_status, Operation};
    use hdrswitch::DisplayRegistry;

    let registry = DisplayRegistry::win32();
    let mut out = std::io::stdout().lock();

    match command {
        Cmd::List => list_displays(&mut out, &registry),
        Cmd::Status(args) => print_status(&mut out, &registry, &args.into()),
        Cmd::Enable(args) => change_hdr(&mut out, &registry, &args.into(), Operation::Enable),
        Cmd::Disable(args) => change_hdr(&mut out, &registry, &args.into(), Operation::Disable),
        Cmd::Toggle(args) => change_hdr(&mut out, &registry, &args.into(), Operation::Toggle),
    }
}

#[cfg(not(windows))]
fn run(_command: Cmd) -> Result<()> {
    anyhow::bail!("Display configuration is only available on Windows")
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        println!();
        return;
    };

    if let Err(e) = run(command) {
        eprintln!("{:#}", e);
        std::process::exit(-1);
    }
}
