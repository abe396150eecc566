use anyhow::Result;
use mergeflow::cli::App;

#[tokio::main]
async fn main() -> Result<()> {
    let mut app = App::from_args().await?;
    let args = mergeflow::cli::Args::parse_args();

    app.run(args).await?;

    Ok(())
}
