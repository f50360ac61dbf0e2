use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use link_preview_card::{
    log_error_card, log_preview_card, render_with_options, setup_logging, EscapeMode, Fetcher,
    FetcherConfig, LinkPreviewGenerator, LogConfig, PreviewError, PreviewGenerator, RenderOptions,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

struct Shell {
    generator: LinkPreviewGenerator,
    render_options: RenderOptions,
    json: bool,
    output: Option<PathBuf>,
}

impl Shell {
    /// One user action: fetch, render, emit. Errors are reported and returned.
    async fn run_once(&self, url: &str) -> Result<(), Box<dyn Error>> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        spinner.set_message(format!("Fetching {url}"));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = self.generator.generate_preview(url).await;
        spinner.finish_and_clear();

        let data = match result {
            Ok(data) => data,
            Err(e) => {
                report_error(url, &e);
                return Err(e.into());
            }
        };
        log_preview_card(&data, url);

        let text = if self.json {
            serde_json::to_string_pretty(&data)?
        } else {
            render_with_options(&data, &self.render_options)
        };

        match &self.output {
            Some(path) => {
                tokio::fs::write(path, &text).await?;
                eprintln!("{} {}", "Card written to".green(), path.display());
            }
            None => println!("{text}"),
        }
        Ok(())
    }

    async fn interactive(&self) -> Result<(), Box<dyn Error>> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            eprint!("{} ", "Enter the URL:".bold());
            let Some(line) = lines.next_line().await? else {
                eprintln!();
                return Ok(());
            };

            let url = line.trim();
            match url {
                "" => eprintln!("{}", "Please enter a URL.".yellow()),
                "quit" | "exit" => return Ok(()),
                // Keep prompting after a failed request.
                _ => {
                    if let Err(e) = self.run_once(url).await {
                        report_other(e.as_ref());
                    }
                }
            }
        }
    }
}

fn report_error(url: &str, e: &PreviewError) {
    log_error_card(url, e);
    let heading = if e.is_network() {
        "Error fetching the URL:"
    } else {
        "An error occurred:"
    };
    eprintln!("{}\n{}", heading.bold().red(), e.to_string().red());
}

/// Preview failures are reported where they happen; anything else lands here.
fn report_other(e: &(dyn Error + 'static)) {
    if !e.is::<PreviewError>() {
        eprintln!("{} {}", "An error occurred:".bold().red(), e.to_string().red());
    }
}

fn command() -> Command {
    Command::new("link-preview-card")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate an embeddable HTML link preview card from a page's Open Graph tags")
        .arg(
            Arg::new("url")
                .help("URL to preview; prompts interactively when omitted")
                .value_name("URL"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .help("Request timeout in seconds (default: 10)")
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("user-agent")
                .long("user-agent")
                .help("Override the User-Agent header")
                .value_name("UA"),
        )
        .arg(
            Arg::new("escape")
                .long("escape")
                .help("HTML-escape values taken from the page")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the extracted metadata as JSON instead of HTML")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Write the result to a file instead of stdout")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Enable console logging at this level (trace, debug, info, warn, error)")
                .value_name("LEVEL"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Also write logs to a daily rolling file under ./logs")
                .action(ArgAction::SetTrue),
        )
}

fn build_shell(matches: &ArgMatches) -> Result<Shell, PreviewError> {
    let mut config = FetcherConfig::default();
    if let Some(secs) = matches.get_one::<u64>("timeout") {
        config.timeout = Duration::from_secs(*secs);
    }
    if let Some(user_agent) = matches.get_one::<String>("user-agent") {
        config.user_agent = user_agent.clone();
    }

    let escape = if matches.get_flag("escape") {
        EscapeMode::Html
    } else {
        EscapeMode::Raw
    };

    Ok(Shell {
        generator: LinkPreviewGenerator::new_with_fetcher(Fetcher::new_with_config(config)?),
        render_options: RenderOptions { escape },
        json: matches.get_flag("json"),
        output: matches.get_one::<PathBuf>("output").cloned(),
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let matches = command().get_matches();

    let log_level = matches.get_one::<String>("log-level");
    let log_config = LogConfig {
        log_level: log_level.cloned().unwrap_or_else(|| "info".into()),
        console_output: log_level.is_some() || std::env::var_os("RUST_LOG").is_some(),
        file_output: matches.get_flag("log-file"),
        ..LogConfig::default()
    };
    if let Err(e) = setup_logging(log_config) {
        eprintln!("{} {e}", "Logging disabled:".yellow());
    }

    let shell = match build_shell(&matches) {
        Ok(shell) => shell,
        Err(e) => {
            report_error("-", &e);
            return ExitCode::FAILURE;
        }
    };

    let result = match matches.get_one::<String>("url") {
        Some(url) => shell.run_once(url).await,
        None => shell.interactive().await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_other(e.as_ref());
            ExitCode::FAILURE
        }
    }
}
