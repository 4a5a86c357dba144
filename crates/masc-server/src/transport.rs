//! The stdio read loop: line-delimited or `Content-Length:`-framed JSON-RPC
//! in, the matching framing out, one [`Dispatcher::handle_request`] call
//! per message, run inside its own task so a handler panic can't take the
//! whole connection down.

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tracing::{error, warn};

use masc_mcp::jsonrpc::{INTERNAL_ERROR, JsonRpcRequest, make_error};
use masc_mcp::{DispatchContext, Dispatcher, McpError, TransportMode};

/// Serves `dispatcher` over real process stdio, for as long as the peer
/// keeps the pipe open.
///
/// `forced_mode` overrides the contractual "detect from the first line"
/// behavior — set from `masc.transport.mode` when it names `framed` or
/// `line` rather than the default `stdio` (auto-detect).
///
/// # Errors
///
/// Propagates stdin/stdout I/O failures. A malformed individual message or
/// a panicking tool handler is logged and answered with a JSON-RPC error
/// instead of terminating the loop.
pub async fn serve_stdio(
    ctx: DispatchContext,
    dispatcher: Arc<Dispatcher>,
    forced_mode: Option<TransportMode>,
) -> std::io::Result<()> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();
    serve(ctx, dispatcher, stdin, stdout, forced_mode).await
}

/// Generic over the transport's reader/writer so tests can drive the loop
/// against an in-memory pipe instead of real stdio.
pub async fn serve<R, W>(
    ctx: DispatchContext,
    dispatcher: Arc<Dispatcher>,
    reader: R,
    writer: W,
    forced_mode: Option<TransportMode>,
) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let mut reader = BufReader::new(reader);
    let writer = Arc::new(Mutex::new(writer));

    let mut first_line = String::new();
    if reader.read_line(&mut first_line).await? == 0 {
        return Ok(());
    }
    let trimmed = first_line.trim_end_matches(['\r', '\n']).to_string();
    let mode = forced_mode.unwrap_or_else(|| masc_mcp::framing::detect_mode(&trimmed));

    match mode {
        TransportMode::LineDelimited => {
            dispatch_line(&ctx, &dispatcher, &writer, &trimmed).await;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).await? == 0 {
                    break;
                }
                let line = line.trim_end_matches(['\r', '\n']);
                if line.is_empty() {
                    continue;
                }
                dispatch_line(&ctx, &dispatcher, &writer, line).await;
            }
        }
        TransportMode::Framed => {
            let mut headers = vec![trimmed];
            loop {
                let body = match read_framed_body(&mut reader, &mut headers).await? {
                    Some(body) => body,
                    None => break,
                };
                dispatch_framed(&ctx, &dispatcher, &writer, &body).await;
                headers = read_header_block(&mut reader).await?;
                if headers.is_empty() {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Reads header lines until a blank line, starting from `headers` (the
/// first header line, already read by the caller). Returns the decoded
/// body for the frame they describe, or `None` at clean EOF.
async fn read_framed_body<R: AsyncRead + Unpin>(
    reader: &mut BufReader<R>,
    headers: &mut Vec<String>,
) -> std::io::Result<Option<String>> {
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        let line = line.trim_end_matches(['\r', '\n']).to_string();
        if line.is_empty() {
            break;
        }
        headers.push(line);
    }
    let content_length = headers
        .iter()
        .find_map(|h| h.to_ascii_lowercase().strip_prefix("content-length:").map(|v| v.trim().to_string()))
        .and_then(|v| v.parse::<usize>().ok());
    let Some(len) = content_length else {
        warn!(headers = ?headers, "framed message missing a parseable Content-Length header");
        return Ok(Some(String::new()));
    };
    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).await?;
    Ok(Some(String::from_utf8_lossy(&body).into_owned()))
}

/// Reads one full header block (up to and including the blank line)
/// starting fresh, for the frame after the one just handled.
async fn read_header_block<R: AsyncRead + Unpin>(reader: &mut BufReader<R>) -> std::io::Result<Vec<String>> {
    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(Vec::new());
        }
        let line = line.trim_end_matches(['\r', '\n']).to_string();
        if line.is_empty() {
            if headers.is_empty() {
                continue;
            }
            return Ok(headers);
        }
        headers.push(line);
    }
}

async fn dispatch_line<W>(ctx: &DispatchContext, dispatcher: &Arc<Dispatcher>, writer: &Arc<Mutex<W>>, line: &str)
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    if let Some(response) = dispatch_one(ctx, dispatcher, line).await {
        let mut out = writer.lock().await;
        let mut payload = response.to_string();
        payload.push('\n');
        let _ = out.write_all(payload.as_bytes()).await;
        let _ = out.flush().await;
    }
}

async fn dispatch_framed<W>(ctx: &DispatchContext, dispatcher: &Arc<Dispatcher>, writer: &Arc<Mutex<W>>, body: &str)
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    if let Some(response) = dispatch_one(ctx, dispatcher, body).await {
        let payload = response.to_string();
        let framed = format!("Content-Length: {}\r\n\r\n{}", payload.len(), payload);
        let mut out = writer.lock().await;
        let _ = out.write_all(framed.as_bytes()).await;
        let _ = out.flush().await;
    }
}

/// Parses one message, dispatches it inside its own task so a tool
/// handler panic is caught rather than propagated, and returns the
/// JSON-RPC response (`None` for a notification with no `id`).
async fn dispatch_one(ctx: &DispatchContext, dispatcher: &Arc<Dispatcher>, raw: &str) -> Option<Value> {
    let request: JsonRpcRequest = match serde_json::from_str(raw) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "failed to parse inbound message as JSON-RPC");
            return Some(make_error(Value::Null, McpError::ParseError.code(), McpError::ParseError.to_string(), None));
        }
    };
    let id = request.id.clone();

    let ctx = ctx.clone();
    let dispatcher = dispatcher.clone();
    match tokio::spawn(async move { dispatcher.handle_request(&ctx, request).await }).await {
        Ok(response) => response,
        Err(join_error) => {
            error!(error = %join_error, "tool handler task failed");
            id.map(|id| make_error(id, INTERNAL_ERROR, "internal error", None))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::build_dispatch_context;

    fn test_context() -> DispatchContext {
        build_dispatch_context(&masc_config::Config::default())
    }

    #[tokio::test]
    async fn line_delimited_round_trip() {
        let ctx = test_context();
        let dispatcher = Arc::new(Dispatcher::new());
        let input = b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"tools/list\"}\n".to_vec();
        let mut output = Vec::new();
        serve(ctx, dispatcher, input.as_slice(), &mut output, None).await.unwrap();
        let text = String::from_utf8(output).unwrap();
        let response: Value = serde_json::from_str(text.trim()).unwrap();
        assert!(response["result"]["tools"].is_array());
    }

    #[tokio::test]
    async fn framed_round_trip() {
        let ctx = test_context();
        let dispatcher = Arc::new(Dispatcher::new());
        let body = "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"tools/list\"}";
        let input = format!("Content-Length: {}\r\n\r\n{}", body.len(), body).into_bytes();
        let mut output = Vec::new();
        serve(ctx, dispatcher, input.as_slice(), &mut output, None).await.unwrap();
        let text = String::from_utf8(output).unwrap();
        let header_end = text.find("\r\n\r\n").unwrap();
        let response: Value = serde_json::from_str(&text[header_end + 4..]).unwrap();
        assert!(response["result"]["tools"].is_array());
    }

    #[tokio::test]
    async fn malformed_json_gets_a_parse_error_response() {
        let ctx = test_context();
        let dispatcher = Arc::new(Dispatcher::new());
        let input = b"not json\n".to_vec();
        let mut output = Vec::new();
        serve(ctx, dispatcher, input.as_slice(), &mut output, None).await.unwrap();
        let text = String::from_utf8(output).unwrap();
        let response: Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(response["error"]["code"], masc_mcp::jsonrpc::PARSE_ERROR);
    }
}
