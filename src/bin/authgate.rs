use anyhow::Result;
use authgate::cli::start;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse arguments and set up logging
    let action = start()?;

    // Handle the action
    action.execute().await?;

    Ok(())
}
