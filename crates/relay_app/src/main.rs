mod effects;
mod logging;
mod persistence;
mod service;

use std::io;
use std::process::ExitCode;

use relay_core::{Msg, Request, Response};

use crate::service::RelayService;

const USAGE: &str = "\
Usage: pagerelay <command>

Commands:
  add <url>        Add a site to the auto-scrape allow-list
  remove <url>     Remove a site from the allow-list
  enable <url>     Enable a listed site
  disable <url>    Disable a listed site without removing it
  list             Print the allow-list
  auto <on|off>    Switch automatic scraping on navigation
  status           Show the auto-scrape flag
  scrape <url>     Scrape one page and send it to the endpoint
  watch            Read URLs from stdin as navigation events

Environment:
  RELAY_ENDPOINT     Collection endpoint URL
  RELAY_USER_AGENT   User agent for page fetches
  RELAY_LOG          Log destination: file (default), stderr, or both
";

fn main() -> ExitCode {
    logging::initialize(logging::LogDestination::from_env());

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    let state_dir = std::env::current_dir().map_err(|err| err.to_string())?;
    let mut service = RelayService::new(state_dir)
        .map_err(|err| format!("failed to start scrape engine: {err}"))?;

    let mut args = args.into_iter();
    let command = args.next().ok_or_else(|| USAGE.to_string())?;

    match command.as_str() {
        "add" => {
            let url = required_arg(args.next(), "add <url>")?;
            service.apply(Msg::SiteAdded(url));
            print_sites(&service);
        }
        "remove" => {
            let url = required_arg(args.next(), "remove <url>")?;
            service.apply(Msg::SiteRemoved(url));
            print_sites(&service);
        }
        "enable" | "disable" => {
            let enabled = command == "enable";
            let url = required_arg(args.next(), "enable|disable <url>")?;
            service.apply(Msg::SiteEnabledSet { url, enabled });
            print_sites(&service);
        }
        "list" => print_sites(&service),
        "auto" => {
            let flag = required_arg(args.next(), "auto <on|off>")?;
            let enabled = match flag.as_str() {
                "on" => true,
                "off" => false,
                other => return Err(format!("expected on or off, got {other:?}")),
            };
            let response = service.handle(Request::ToggleAutoScrape { enabled });
            print_status(response);
        }
        "status" => {
            let response = service.handle(Request::GetStatus);
            print_status(response);
        }
        "scrape" => {
            let url = args.next();
            let response = service.handle(Request::ScrapeCurrentPage { url });
            match response {
                Response::Scrape {
                    success: true,
                    ..
                } => println!("sent"),
                Response::Scrape { error, .. } => {
                    return Err(error.unwrap_or_else(|| "scrape failed".to_string()));
                }
                other => return Err(format!("unexpected response {other:?}")),
            }
        }
        "watch" => {
            let stdin = io::stdin();
            service.watch(stdin.lock());
        }
        _ => return Err(USAGE.to_string()),
    }

    Ok(())
}

fn required_arg(arg: Option<String>, usage: &str) -> Result<String, String> {
    arg.ok_or_else(|| format!("missing argument: {usage}"))
}

fn print_sites(service: &RelayService) {
    let view = service.status();
    if view.sites.is_empty() {
        println!("(no sites)");
        return;
    }
    for site in view.sites {
        let marker = if site.enabled { "on " } else { "off" };
        println!("{marker}  {}", site.pattern);
    }
}

fn print_status(response: Response) {
    match response {
        Response::Status { is_auto_scraping } => {
            println!(
                "auto-scrape: {}",
                if is_auto_scraping { "on" } else { "off" }
            );
        }
        other => println!("unexpected response {other:?}"),
    }
}
