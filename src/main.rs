// Main CLI entry point for req2postman
// Uses clap for argument parsing and tracing for log output

use clap::{Arg, ArgAction, ArgGroup, Command};
use req2postman::config::{Config, DEFAULT_OUTPUT};
use req2postman::engine::convert;
use req2postman::export::write_collection;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() {
    let matches = Command::new("req2postman")
        .version(clap::crate_version!())
        .about("Generate a Postman collection from cURL commands or Burp Suite XML exports")
        .after_help("EXAMPLES:\n  req2postman -c list-of-curl-commands.txt -o postman-out-collection.json\n  req2postman --curl-in list-of-curl-commands.txt --postman-out postman-out-collection.json\n  req2postman -b BURP_XML_FILES/ --postman-out postman-out-collection.json\n\nOnly a list of commands OR a directory of Burp XML files can be imported, not both.")
        .arg(Arg::new("curl_in")
            .short('c')
            .long("curl-in")
            .num_args(1)
            .help("Text file with cURL commands, one per line"))
        .arg(Arg::new("burp_dir")
            .short('b')
            .long("burp-dir")
            .num_args(1)
            .help("Directory of Burp Repeater \"saved item\" XML files, searched recursively"))
        .arg(Arg::new("postman_out")
            .short('o')
            .long("postman-out")
            .num_args(1)
            .default_value(DEFAULT_OUTPUT)
            .help("Output file for the generated Postman collection"))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(ArgAction::SetTrue)
            .help("Enable debug logging"))
        .group(ArgGroup::new("input")
            .args(["curl_in", "burp_dir"])
            .required(true)
            .multiple(false))
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    let config = Config::from_args(
        matches.get_one::<String>("curl_in").map(String::as_str),
        matches.get_one::<String>("burp_dir").map(String::as_str),
        matches.get_one::<String>("postman_out").map(String::as_str),
    )
    .unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(2);
    });

    info!("-=[+] ... Postman Generator ... [+]=-");

    let report = convert(&config).unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    if report.collection.items.is_empty() {
        info!("No items were found to convert");
        return;
    }

    if let Err(e) = write_collection(&report.collection, &config.output) {
        error!("{}", e);
        std::process::exit(1);
    }

    info!(
        "Successfully converted {} requests to Postman collection: {}",
        report.collection.items.len(),
        config.output.display()
    );
}
