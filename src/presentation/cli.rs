use crate::application::action::{Action, MethodArgument};
use crate::application::builders::request_builder::parse_raw_headers;
use crate::application::services::HttpRequestService;
use crate::domain::entities::Response;
use crate::infrastructure::config::ConfigStore;
use crate::infrastructure::output::write_response_body;
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;

pub const USAGE: &str = "<URL-alias> <http-method> [path-components...] [--option value]";

/// CLI configuration for ashttp
#[derive(Parser, Debug)]
#[command(name = "ashttp", disable_version_flag = true)]
#[command(
    about = "Call configured HTTP endpoints by alias",
    override_usage = "ashttp [OPTIONS] <URL-alias> <http-method> [path-components...] [--option value]"
)]
pub struct Cli {
    /// Print version information and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// No method argument: every token after the alias is a path component or flag, method is GET
    #[arg(short = 'G', long = "get")]
    pub implicit_get: bool,

    /// Extra request header, "Key: Value"; overrides the alias defaults
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Alias configuration file (default: ~/.config/ashttp/config.json)
    #[arg(short, long, env = "ASHTTP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the response status and debug logs
    #[arg(long)]
    pub verbose: bool,

    /// Alias, method, path components and `--option value` pairs
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    pub fn method_argument(&self) -> MethodArgument {
        if self.implicit_get {
            MethodArgument::Absent
        } else {
            MethodArgument::Required
        }
    }

    pub fn config_store(&self) -> ConfigStore {
        ConfigStore::new(self.config.clone().unwrap_or_else(ConfigStore::default_path))
    }

    /// Parses the trailing tokens, resolves the alias and performs the call.
    pub async fn execute(&self, request_service: &HttpRequestService) -> Result<Response> {
        let action = Action::parse(&self.args, self.method_argument())?;
        let headers = parse_raw_headers(&self.headers)?;
        request_service
            .execute_action(&action, &self.config_store(), &headers)
            .await
    }

    pub async fn run(&self, request_service: &HttpRequestService) -> Result<()> {
        let response = self.execute(request_service).await?;
        self.write_response(&mut io::stdout().lock(), &response)
    }

    /// Writes the status line (with `--verbose`) and the formatted body.
    pub fn write_response<W: Write>(&self, out: &mut W, response: &Response) -> Result<()> {
        if self.verbose {
            writeln!(out, "{}", format!("Status: {}", response.status).cyan())?;
        }
        write_response_body(out, &response.body)?;
        Ok(())
    }
}
