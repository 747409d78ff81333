use crate::prelude::*;
use clap::Parser;

mod error;
mod fanout;
mod pokeapi;
mod pokemon;
mod policy;
mod prelude;
#[cfg(test)]
mod testing;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Aggregated views over the public PokeAPI"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// PokeAPI base URL (overrides POKEAPI_BASE_URL)
    #[clap(long, global = true)]
    base_url: Option<String>,

    /// Whether to display additional information.
    #[clap(long, env = "POKEAGG_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Full record of one pokemon: abilities, moves, stats and evolution line
    Detail(crate::pokemon::detail::DetailOptions),

    /// Top pokemon by a base stat
    Rank(crate::pokemon::ranking::RankOptions),

    /// Best pokemon per stat among the encounters of a location
    Location(crate::pokemon::location::LocationOptions),

    /// Pokemon that learn a move, grouped by type
    Learners(crate::pokemon::learners::LearnersOptions),

    /// Every branch of a pokemon's evolution family
    Evolution(crate::pokemon::evolution::EvolutionOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Detail(options) => crate::pokemon::detail::run(options, app.global).await,
        SubCommands::Rank(options) => crate::pokemon::ranking::run(options, app.global).await,
        SubCommands::Location(options) => {
            crate::pokemon::location::run(options, app.global).await
        }
        SubCommands::Learners(options) => {
            crate::pokemon::learners::run(options, app.global).await
        }
        SubCommands::Evolution(options) => {
            crate::pokemon::evolution::run(options, app.global).await
        }
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
