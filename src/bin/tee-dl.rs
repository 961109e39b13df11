//! tee-dl - download files over HTTP(S) with a live progress line.
//!
//! Usage: `tee-dl [url]...`. With no URLs the configured default is fetched.

use std::env;

use tee_dl::AppConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> tee_dl::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let urls: Vec<String> = env::args().skip(1).collect();
    let config = AppConfig::load()?;

    tee_dl::cli::run(config, urls).await
}
