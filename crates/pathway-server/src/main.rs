use clap::Parser;
use pathway_server::cli::{self, Cli};

#[tokio::main]
async fn main() {
    let exit_code = cli::run(Cli::parse()).await;
    std::process::exit(exit_code);
}
