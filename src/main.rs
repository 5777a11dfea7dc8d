use clap::{value_parser, Arg, ArgMatches, Command};
use std::net::{IpAddr, SocketAddr};
use std::process;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod convert;
mod server;
#[cfg(test)]
mod test_support;
mod utils;

use convert::{ServiceConfig, DEFAULT_MAX_PDF_BYTES};
use server::ServerConfig;

fn cli() -> Command {
    Command::new("pdf-to-text")
        .version(env!("CARGO_PKG_VERSION"))
        .about("An HTTP service that returns the plain text of a remote PDF")
        .long_about(
            "Serves the following endpoints:\n\
            - GET /: landing page with usage instructions\n\
            - GET /convert?url=<pdf url>, POST /convert (pdfUrl=<pdf url>): redirect to the direct form\n\
            - GET /<percent-encoded pdf url>: fetch the PDF and return its text as text/plain",
        )
        .arg(
            Arg::new("host")
                .long("host")
                .env("HOST")
                .value_name("ADDR")
                .help("Address to listen on")
                .default_value("0.0.0.0")
                .value_parser(value_parser!(IpAddr)),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .short('p')
                .env("PORT")
                .value_name("PORT")
                .help("Port to listen on")
                .default_value("8787")
                .value_parser(value_parser!(u16)),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .env("PUBLIC_BASE_URL")
                .value_name("URL")
                .help("Public base URL shown on the landing page (defaults to the request Host)")
                .value_parser(value_parser!(url::Url)),
        )
        .arg(
            Arg::new("fetch-timeout")
                .long("fetch-timeout")
                .env("FETCH_TIMEOUT_SECS")
                .value_name("SECONDS")
                .help("Timeout for fetching a PDF; 0 disables it")
                .default_value("30")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("max-pdf-bytes")
                .long("max-pdf-bytes")
                .env("MAX_PDF_BYTES")
                .value_name("BYTES")
                .help("Largest PDF body that will be downloaded")
                .default_value("524288000")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only log errors (ignored when RUST_LOG is set)")
                .action(clap::ArgAction::SetTrue),
        )
}

fn config_from_matches(matches: &ArgMatches) -> ServerConfig {
    let host = matches
        .get_one::<IpAddr>("host")
        .copied()
        .unwrap_or(IpAddr::from([0, 0, 0, 0]));
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8787);

    let fetch_timeout = match matches.get_one::<u64>("fetch-timeout").copied() {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => Some(convert::DEFAULT_FETCH_TIMEOUT),
    };

    let service = ServiceConfig {
        fetch_timeout,
        max_pdf_bytes: matches
            .get_one::<u64>("max-pdf-bytes")
            .copied()
            .unwrap_or(DEFAULT_MAX_PDF_BYTES),
        ..ServiceConfig::default()
    };

    ServerConfig {
        addr: SocketAddr::new(host, port),
        base_url: matches
            .get_one::<url::Url>("base-url")
            .map(|url| url.to_string()),
        service,
    }
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();

    // Logs go to stderr; RUST_LOG wins over --quiet.
    let default_level = if matches.get_flag("quiet") {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = config_from_matches(&matches);
    info!(
        addr = %config.addr,
        fetch_timeout = ?config.service.fetch_timeout,
        max_pdf_bytes = config.service.max_pdf_bytes,
        "Starting PDF to text service"
    );

    if let Err(e) = server::serve(config).await {
        error!("Server failed: {:#}", e);
        process::exit(1);
    }
}
