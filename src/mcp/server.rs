//! MCP server implementation.

use super::protocol::*;
use super::tools::{
    get_tools, GET_FULL_TRANSCRIPT, GET_TRANSCRIPT_SECTION, GET_VIDEO_INFORMATION,
    SEARCH_TRANSCRIPT,
};
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "tubetext";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP Server for Tubetext.
pub struct McpServer {
    settings: Settings,
    orchestrator: Option<Orchestrator>,
}

impl McpServer {
    /// Create a new MCP server. Sources are created on `initialize`.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            orchestrator: None,
        }
    }

    /// Create a server around an existing orchestrator.
    pub fn with_orchestrator(orchestrator: Orchestrator) -> Self {
        Self {
            settings: orchestrator.settings().clone(),
            orchestrator: Some(orchestrator),
        }
    }

    /// Run the MCP server (reads from stdin, writes to stdout).
    pub async fn run(&mut self) -> anyhow::Result<()> {
        info!("Tubetext MCP server starting");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve line-delimited JSON-RPC until the reader is exhausted.
    pub async fn serve<R, W>(&mut self, reader: R, mut writer: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<JsonRpcRequest>(line) {
                Ok(request) => self.handle_request(request).await,
                Err(e) => {
                    warn!("Failed to parse request: {}", e);
                    Some(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error"))
                }
            };

            if let Some(response) = response {
                let mut payload = serde_json::to_string(&response)?;
                payload.push('\n');
                writer.write_all(payload.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        info!("Input closed, MCP server stopping");
        Ok(())
    }

    /// Handle a single JSON-RPC request. Notifications get no response.
    async fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!("Received {}", request.method);

        if request.is_notification() {
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {}", request.method),
            ),
        };
        Some(response)
    }

    /// Handle initialize request.
    fn handle_initialize(&mut self, id: Option<Value>) -> JsonRpcResponse {
        if self.orchestrator.is_none() {
            match Orchestrator::new(self.settings.clone()) {
                Ok(orch) => {
                    self.orchestrator = Some(orch);
                    info!("Orchestrator initialized");
                }
                Err(e) => {
                    error!("Failed to initialize orchestrator: {}", e);
                    return JsonRpcResponse::error(id, SERVER_ERROR, &format!("Init failed: {}", e));
                }
            }
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        };

        success(id, result)
    }

    /// Handle tools/list request.
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = ToolsListResult {
            tools: get_tools(self.settings.search.context_window_seconds),
        };
        success(id, result)
    }

    /// Handle tools/call request.
    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        INVALID_PARAMS,
                        &format!("Invalid params: {}", e),
                    )
                }
            },
            None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
        };

        let result = match &self.orchestrator {
            Some(orchestrator) => call_tool(orchestrator, &params.name, params.arguments).await,
            None => ToolCallResult::error("Server not initialized".to_string()),
        };

        success(id, result)
    }
}

fn success<T: Serialize>(id: Option<Value>, result: T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, &format!("Internal error: {}", e)),
    }
}

/// Dispatch a tool call to the orchestrator.
async fn call_tool(orchestrator: &Orchestrator, name: &str, args: Option<Value>) -> ToolCallResult {
    let args = args.unwrap_or_else(|| json!({}));

    let video_url = match args.get("video_url").and_then(|v| v.as_str()) {
        Some(url) => url,
        None if is_known_tool(name) => {
            return ToolCallResult::error("Missing 'video_url' argument".to_string())
        }
        None => return ToolCallResult::error(format!("Unknown tool: {}", name)),
    };

    let text = match name {
        GET_FULL_TRANSCRIPT => orchestrator.get_full_transcript(video_url).await,
        GET_VIDEO_INFORMATION => orchestrator.get_video_information(video_url).await,
        SEARCH_TRANSCRIPT => {
            let query = match args.get("query").and_then(|v| v.as_str()) {
                Some(q) => q,
                None => return ToolCallResult::error("Missing 'query' argument".to_string()),
            };
            let context_window = args
                .get("context_window")
                .and_then(|v| v.as_f64())
                .map(|w| w.max(0.0) as u32);
            orchestrator
                .search_transcript(video_url, query, context_window)
                .await
        }
        GET_TRANSCRIPT_SECTION => {
            let start_time = match args.get("start_time").and_then(|v| v.as_f64()) {
                Some(s) => s.max(0.0),
                None => return ToolCallResult::error("Missing 'start_time' argument".to_string()),
            };
            let end_time = args
                .get("end_time")
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0)
                .max(0.0);
            orchestrator
                .get_transcript_section(video_url, start_time, end_time)
                .await
        }
        _ => return ToolCallResult::error(format!("Unknown tool: {}", name)),
    };

    ToolCallResult::text(text)
}

fn is_known_tool(name: &str) -> bool {
    matches!(
        name,
        GET_FULL_TRANSCRIPT | GET_VIDEO_INFORMATION | SEARCH_TRANSCRIPT | GET_TRANSCRIPT_SECTION
    )
}
