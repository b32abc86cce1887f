mod application;
mod domain;
mod infrastructure;
mod presentation;

use clap::Parser;
use crate::domain::errors::AppError;
use crate::infrastructure::http_client::HyperHttpClient;
use crate::infrastructure::{logging, version};
use crate::presentation::cli::{Cli, USAGE};

/// ashttp: call predefined HTTP endpoints by alias
///
/// `ashttp httpbin get users 456 --include posts` resolves `httpbin` from
/// `~/.config/ashttp/config.json`, sends
/// `GET <base-url>/users/456?include=posts` with the alias's default headers,
/// and pretty-prints the JSON response.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", version::info());
        std::process::exit(0);
    }

    logging::init(cli.verbose);
    let request_service = HyperHttpClient::new().create_request_service();

    if let Err(err) = cli.run(&request_service).await {
        if err
            .downcast_ref::<AppError>()
            .is_some_and(AppError::is_invalid_format)
        {
            println!("usage: {}", USAGE);
            std::process::exit(0);
        }
        println!("[error] {}", err);
        std::process::exit(1);
    }
}
