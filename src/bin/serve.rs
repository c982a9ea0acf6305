use clap::Parser;
use qwirkle_tools::cli::ServeCli;
use qwirkle_tools::commands::handle_serve;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    qwirkle_tools::logging::init("info");
    let cli = ServeCli::parse();
    handle_serve(&cli).await
}
