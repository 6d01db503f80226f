#[tokio::main]
async fn main() -> anyhow::Result<()> {
    forum_client_lib::run().await
}
