//! Line-delimited JSON-RPC 2.0 tool server on stdin/stdout.
//!
//! Supports `initialize`, `ping`, `tools/list` and `tools/call`. Requests
//! without an `id` are notifications and get no reply.

use revenue_analysis::{tool_definitions, CustomerSource, RevenueAggregator, SalesSource};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

/// Protocol revision announced in `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Name announced in `initialize`.
pub const SERVER_NAME: &str = "Sales & Customer Analysis Server";

const PARSE_ERROR: i64 = -32700;
const INVALID_REQUEST: i64 = -32600;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug, Serialize)]
struct Response {
    jsonrpc: &'static str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
}

#[derive(Debug, Serialize)]
struct RpcError {
    code: i64,
    message: String,
}

impl RpcError {
    fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Response {
    fn result(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// Serves the revenue tools to one client over a pair of byte streams.
pub struct ToolServer<C, S> {
    aggregator: RevenueAggregator<C, S>,
}

impl<C, S> ToolServer<C, S>
where
    C: CustomerSource,
    S: SalesSource,
{
    pub fn new(aggregator: RevenueAggregator<C, S>) -> Self {
        Self { aggregator }
    }

    /// Read requests until EOF, writing one reply line per request.
    pub async fn run<R, W>(&self, mut reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(server = SERVER_NAME, "tool server ready on stdio");
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            let reply = match std::str::from_utf8(&buf) {
                Ok(line) => self.handle_line(line).await,
                Err(e) => {
                    warn!(error = %e, "request is not valid UTF-8");
                    encode(&Response::error(Value::Null, RpcError::new(PARSE_ERROR, e.to_string())))
                }
            };
            if let Some(reply) = reply {
                writer.write_all(reply.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        info!("input closed, tool server stopping");
        Ok(())
    }

    /// Handle one input line; `None` when no reply is due.
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let response = match serde_json::from_str::<Value>(line) {
            Err(e) => {
                warn!(error = %e, "unparseable request");
                Some(Response::error(Value::Null, RpcError::new(PARSE_ERROR, e.to_string())))
            }
            Ok(value) => self.handle_value(value).await,
        }?;

        encode(&response)
    }

    async fn handle_value(&self, value: Value) -> Option<Response> {
        let request: Request = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return Some(Response::error(
                    Value::Null,
                    RpcError::new(INVALID_REQUEST, e.to_string()),
                ))
            }
        };

        debug!(method = %request.method, "request");
        let id = request.id?;
        let outcome = self.dispatch(&request.method, request.params).await;

        Some(match outcome {
            Ok(result) => Response::result(id, result),
            Err(error) => Response::error(id, error),
        })
    }

    async fn dispatch(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        match method {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") }
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tool_definitions() })),
            "tools/call" => {
                let call: CallParams = serde_json::from_value(params)
                    .map_err(|e| RpcError::new(INVALID_PARAMS, e.to_string()))?;
                Ok(self.call_tool(call).await)
            }
            other => Err(RpcError::new(METHOD_NOT_FOUND, format!("method not found: {other}"))),
        }
    }

    async fn call_tool(&self, call: CallParams) -> Value {
        match self.aggregator.call_tool(&call.name, call.arguments).await {
            Ok(text) => json!({
                "content": [{ "type": "text", "text": text }],
                "isError": false
            }),
            Err(e) => {
                warn!(tool = %call.name, error = %e, "tool call failed");
                json!({
                    "content": [{ "type": "text", "text": e.to_string() }],
                    "isError": true
                })
            }
        }
    }
}

fn encode(response: &Response) -> Option<String> {
    match serde_json::to_string(response) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(error = %e, "failed to encode response");
            None
        }
    }
}
