//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    if let Err(err) = saferoute_cli::run().await {
        eprintln!("saferoute: {err}");
        std::process::exit(1);
    }
}
