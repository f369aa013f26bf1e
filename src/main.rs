use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};
use std::process;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod docs;
mod error;
mod mcp;
mod tools;

use config::ConnectionArgs;
use docs::client::HttpDocsClient;
use tools::ToolContext;

#[derive(Parser)]
#[command(name = "mcp-gdocs")]
#[command(
    version,
    about = "Google Docs editing tools over MCP, plus one-shot inspection commands"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct DocumentArgs {
    #[command(flatten)]
    connection: ConnectionArgs,
    /// ID of the Google Doc
    #[arg(long)]
    document_id: String,
    /// Output JSON structuredContent
    #[arg(long)]
    json: bool,
}

#[derive(Args, Clone)]
struct InspectStructureArgs {
    #[command(flatten)]
    document: DocumentArgs,
    /// Include every element, paragraph and header/footer id
    #[arg(long)]
    detailed: bool,
}

#[derive(Args, Clone)]
struct DebugTableArgs {
    #[command(flatten)]
    document: DocumentArgs,
    /// Zero-based index of the table in the body
    #[arg(long)]
    table_index: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP stdio server
    Serve {
        /// Serve MCP over stdio (NDJSON)
        #[arg(long)]
        stdio: bool,
        #[command(flatten)]
        connection: ConnectionArgs,
    },
    /// Print the plain text of a document
    GetContent(DocumentArgs),
    /// Print the body structure of a document
    InspectStructure(InspectStructureArgs),
    /// Print the cells of one table
    DebugTable(DebugTableArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries protocol frames, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("info".parse().context("failed to parse log directive")?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { stdio, connection } => {
            if stdio {
                let config = connection.into_config()?;
                let ctx = ToolContext::new(HttpDocsClient::new(&config), config.read_only);
                run_stdio_server(&ctx).await
            } else {
                anyhow::bail!("only --stdio transport is supported")
            }
        }
        Commands::GetContent(args) => {
            let call = json!({ "document_id": args.document_id });
            run_one_shot(args, mcp::contracts::TOOL_GET_DOC_CONTENT, call).await
        }
        Commands::InspectStructure(args) => {
            let call = json!({
                "document_id": args.document.document_id,
                "detailed": args.detailed
            });
            run_one_shot(args.document, mcp::contracts::TOOL_INSPECT_DOC_STRUCTURE, call).await
        }
        Commands::DebugTable(args) => {
            let call = json!({
                "document_id": args.document.document_id,
                "table_index": args.table_index
            });
            run_one_shot(args.document, mcp::contracts::TOOL_DEBUG_TABLE_STRUCTURE, call).await
        }
    }
}

async fn run_one_shot(args: DocumentArgs, tool: &str, call: Value) -> Result<()> {
    let config = args.connection.into_config()?;
    let ctx = ToolContext::new(HttpDocsClient::new(&config), true);
    let result = tools::call_tool(&ctx, tool, &call).await;
    print_tool_result(result, args.json)
}

fn print_tool_result(result: Value, json_output: bool) -> Result<()> {
    if result["isError"].as_bool().unwrap_or(false) {
        let error = &result["structuredContent"]["error"];
        let message = error["message"].as_str().unwrap_or("tool error");
        match error["kind"].as_str() {
            Some(kind) => eprintln!("{kind}: {message}"),
            None => eprintln!("{message}"),
        }
        process::exit(1);
    }

    if json_output {
        let structured = result.get("structuredContent").unwrap_or(&Value::Null);
        println!("{}", serde_json::to_string_pretty(structured)?);
    } else {
        let text = result["content"][0]["text"].as_str().unwrap_or_default();
        println!("{text}");
    }
    Ok(())
}

async fn run_stdio_server(ctx: &ToolContext<HttpDocsClient>) -> Result<()> {
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut writer = io::BufWriter::new(io::stdout());
    info!(read_only = ctx.read_only, "serving MCP over stdio");

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }

        let request: Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "skipping unparsable line");
                continue;
            }
        };

        let Some(response) = mcp::handle_message(ctx, &request).await else {
            debug!(method = ?request.get("method"), "no response required");
            continue;
        };

        let serialized =
            serde_json::to_string(&response).context("failed to serialize response")?;
        writer
            .write_all(serialized.as_bytes())
            .await
            .context("failed to write response")?;
        writer
            .write_all(b"\n")
            .await
            .context("failed to write response")?;
        writer.flush().await.context("failed to flush response")?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}
