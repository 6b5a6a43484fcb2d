use anyhow::Result;

pub(crate) async fn run() -> Result<()> {
    // Connecting runs the idempotent migrations.
    crate::config::connect_storage().await?;
    println!("Schema is up to date");
    Ok(())
}
