use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    myip::run().await
}
