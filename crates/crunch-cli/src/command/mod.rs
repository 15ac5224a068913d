use clap::{Parser, Subcommand};

use self::{auto_play::AutoPlayArg, show::ShowArg};

mod auto_play;
mod level_arg;
mod show;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play sessions headlessly, picking a random legal swap each turn
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Print a freshly shuffled board and its legal swaps
    Show(#[clap(flatten)] ShowArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::AutoPlay(arg) => auto_play::run(&arg)?,
        Mode::Show(arg) => show::run(&arg)?,
    }
    Ok(())
}
