use newsroom_server::config::{Parser as _, ServerConfig};
use newsroom_server::run::run;

#[tokio::main]
async fn main() -> newsroom_server::Result<()> {
    tracing_subscriber::fmt::init();

    let args = ServerConfig::parse();
    run(args).await
}
