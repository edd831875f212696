//! Mock API Server CLI
//!
//! Command-line interface for inspecting the canned discovery document and
//! exercising the fake server that serves it.

mod logging;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use mock_api_server_common::{parse_method, FakeRequest, FakeResponse};
use mock_api_server_discovery::test_api_document;
use mock_api_server_fixture::{create_mock_api_server, Transport, TEST_DOCUMENT_PATH};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "mock-api-server")]
#[command(version, about = "Serve a canned discovery document from an in-memory fake server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print or save the test discovery document
    #[command(after_help = "EXAMPLES:\n  \
        # Print the document as pretty JSON\n  \
        mock-api-server document\n\n  \
        # Write compact JSON, exactly as served\n  \
        mock-api-server document --compact --output test-v1.json\n\n  \
        # Print as YAML\n  \
        mock-api-server document --format yaml")]
    Document {
        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// Emit JSON without indentation
        #[arg(long)]
        compact: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Send one request to the fake server and show the response
    #[command(after_help = "EXAMPLES:\n  \
        # Fetch the discovery document\n  \
        mock-api-server request test-v1.json\n\n  \
        # Requests the fixture does not serve get a 404\n  \
        mock-api-server request --method POST test-v1.json --body '{}'")]
    Request {
        /// Request URL
        #[arg(default_value = TEST_DOCUMENT_PATH)]
        url: String,

        /// HTTP method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request header as NAME:VALUE (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// Request body
        #[arg(short, long)]
        body: Option<String>,
    },

    /// List the rules the fixture registers
    Routes,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Yaml => write!(f, "YAML"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(logging::Verbosity::from_flags(cli.verbose, cli.quiet));

    match cli.command {
        Commands::Document {
            format,
            compact,
            output,
        } => document_command(format, compact, output.as_deref())?,
        Commands::Request {
            url,
            method,
            headers,
            body,
        } => request_command(&url, &method, &headers, body)?,
        Commands::Routes => routes_command(),
    }

    Ok(())
}

fn render_document(format: OutputFormat, compact: bool) -> Result<String> {
    let doc = test_api_document();
    let rendered = match format {
        OutputFormat::Json if compact => doc.to_json().context("Failed to serialize document")?,
        OutputFormat::Json => doc
            .to_json_pretty()
            .context("Failed to serialize document")?,
        OutputFormat::Yaml => {
            serde_yaml::to_string(&doc).context("Failed to serialize document as YAML")?
        }
    };
    Ok(rendered)
}

fn document_command(format: OutputFormat, compact: bool, output: Option<&Path>) -> Result<()> {
    let rendered = render_document(format, compact)?;

    match output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), format = %format, "Wrote discovery document");
            println!(
                "{} Wrote {} document to {}",
                "✓".green(),
                format.to_string().yellow(),
                path.display()
            );
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn parse_header(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value.trim())),
        _ => bail!("Invalid header '{}', expected NAME:VALUE", raw),
    }
}

fn build_request(
    url: &str,
    method: &str,
    headers: &[String],
    body: Option<String>,
) -> Result<FakeRequest> {
    let method = parse_method(method).context("Failed to parse --method")?;
    let mut request = FakeRequest::new(method, url);
    for raw in headers {
        let (name, value) = parse_header(raw)?;
        request = request
            .with_header(name, value)
            .with_context(|| format!("Failed to add header {}", name))?;
    }
    if let Some(body) = body {
        request = request.with_body(body);
    }
    Ok(request)
}

fn request_command(
    url: &str,
    method: &str,
    headers: &[String],
    body: Option<String>,
) -> Result<()> {
    let request = build_request(url, method, headers, body)?;
    println!(
        "{} {} {}",
        "→".cyan(),
        request.method.to_string().bold(),
        request.url
    );

    let server = create_mock_api_server();
    let exchange = server.send(request).context("Request was not intercepted")?;
    let response = exchange
        .response()
        .context("Fake server did not answer the request")?;
    server.restore();

    print_response(&response);
    Ok(())
}

fn print_response(response: &FakeResponse) {
    let status = response.status.to_string();
    let status = if response.status.is_success() {
        status.green().bold()
    } else {
        status.red().bold()
    };
    println!("{} {}", "←".cyan(), status);

    for (name, value) in &response.headers {
        println!("  {}: {}", name.as_str().dimmed(), value.to_str().unwrap_or("<binary>"));
    }
    if !response.body.is_empty() {
        println!("\n{}", response.body);
    }
}

fn routes_command() {
    let server = create_mock_api_server();
    println!("{}", "Registered routes:".bold());
    for route in server.routes() {
        println!("  • {}", route.to_string().cyan());
    }
    println!(
        "\n  Auto-respond: {}",
        if server.auto_respond() {
            "on".green()
        } else {
            "off".yellow()
        }
    );
    server.restore();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("Content-Type: application/json").unwrap(),
            ("Content-Type", "application/json")
        );
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn test_build_request() {
        let request = build_request(
            "test-v1.json",
            "post",
            &["X-Test: 1".to_string()],
            Some("{}".to_string()),
        )
        .unwrap();
        assert_eq!(request.method.as_str(), "POST");
        assert_eq!(request.headers["x-test"], "1");
        assert_eq!(request.body.as_deref(), Some("{}"));
    }

    #[test]
    fn test_render_formats() {
        let compact = render_document(OutputFormat::Json, true).unwrap();
        assert!(!compact.contains('\n'));
        assert!(compact.contains(r#""id":"test:v1""#));

        let yaml = render_document(OutputFormat::Yaml, false).unwrap();
        assert!(yaml.contains("test:v1"));
        assert!(yaml.contains("discoveryVersion: v1"));
    }

    #[test]
    fn test_cli_parses_request() {
        let cli =
            Cli::try_parse_from(["mock-api-server", "-vv", "request", "--method", "get"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Request { url, method, .. } => {
                assert_eq!(url, TEST_DOCUMENT_PATH);
                assert_eq!(method, "get");
            }
            _ => panic!("expected request command"),
        }
    }
}
