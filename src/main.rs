use anyhow::Result;
use solprobe::app::handler;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    handler::init().await
}
