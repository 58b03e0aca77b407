#[tokio::main]
async fn main() -> anyhow::Result<()> {
    uniswap_dashboard_lib::run().await
}
