//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes reading-time estimation over the MCP protocol so AI assistants
//! can call it via stdio transport.
//!
//! The server is a presentation layer: every `#[tool]` method delegates to
//! `reading_time_core` and serializes the result as JSON text content.
//! Tool parameters override the defaults loaded from configuration.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use reading_time_core::estimate::{self, EstimateConfig, Rounding};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `estimate_reading_time` tool.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct EstimateParams {
    /// The document text (HTML or plain text).
    pub text: String,
    /// Reading rate in words per minute.
    pub wpm: Option<u32>,
    /// Label for a one-minute reading time.
    pub postfix: Option<String>,
    /// Label for any other reading time.
    pub plural: Option<String>,
    /// Add image viewing time to the reading time.
    pub image_time: Option<bool>,
    /// Seconds added to the reading time.
    pub extra_seconds: Option<u32>,
    /// Rounding to whole minutes.
    pub rounding: Option<Rounding>,
}

/// Parameters for the `count_words` and `count_images` tools.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CountParams {
    /// The document text (HTML or plain text).
    pub text: String,
}

/// MCP server exposing reading-time estimation to AI assistants.
#[derive(Clone)]
pub struct ReadingTimeServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    defaults: EstimateConfig,
    max_input_bytes: Option<usize>,
}

impl Default for ReadingTimeServer {
    fn default() -> Self {
        Self::new(EstimateConfig::default(), None)
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_router]
impl ReadingTimeServer {
    /// Create a server whose tools fall back to `defaults`.
    pub fn new(defaults: EstimateConfig, max_input_bytes: Option<usize>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            defaults,
            max_input_bytes,
        }
    }

    fn check_input(&self, text: &str) -> Result<(), McpError> {
        if let Some(max) = self.max_input_bytes
            && text.len() > max
        {
            return Err(McpError::invalid_params(
                format!("input too large: {} bytes (limit: {max} bytes)", text.len()),
                None,
            ));
        }
        Ok(())
    }

    fn config_for(&self, params: &EstimateParams) -> EstimateConfig {
        let defaults = &self.defaults;
        EstimateConfig {
            wpm: params.wpm.unwrap_or(defaults.wpm),
            postfix: params.postfix.clone().unwrap_or_else(|| defaults.postfix.clone()),
            plural: params.plural.clone().unwrap_or_else(|| defaults.plural.clone()),
            image_time: params.image_time.unwrap_or(defaults.image_time),
            extra_seconds: params.extra_seconds.unwrap_or(defaults.extra_seconds),
            rounding: params.rounding.unwrap_or(defaults.rounding),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let text = if params.format == "json" {
            to_json(&serde_json::json!({
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "description": env!("CARGO_PKG_DESCRIPTION"),
                "wpm": self.defaults.wpm,
            }))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Estimate reading time.
    #[tool(
        description = "Estimate the reading time of HTML or plain text. Returns word count, image count, minutes and a formatted label."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", text_len = params.text.len()))]
    fn estimate_reading_time(
        &self,
        Parameters(params): Parameters<EstimateParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "estimate_reading_time", wpm = ?params.wpm, "executing MCP tool");
        self.check_input(&params.text)?;

        let config = self.config_for(&params);
        let report = estimate::estimate(&params.text, &config)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        tracing::info!(
            tool = "estimate_reading_time",
            minutes = report.minutes,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(&report)?)]))
    }

    /// Count words, ignoring markup.
    #[tool(description = "Count the words in HTML or plain text, ignoring tags, comments and scripts.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn count_words(
        &self,
        Parameters(params): Parameters<CountParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_input(&params.text)?;
        let words = estimate::word_count(&params.text);
        let json = to_json(&serde_json::json!({ "words": words }))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Count `<img>` elements.
    #[tool(description = "Count the <img> elements in HTML text.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn count_images(
        &self,
        Parameters(params): Parameters<CountParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_input(&params.text)?;
        let images = estimate::img_count(&params.text);
        let json = to_json(&serde_json::json!({ "images": images }))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for ReadingTimeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use estimate_reading_time to estimate how long a document takes to read.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    fn extract_json(result: &CallToolResult) -> serde_json::Value {
        let text = result
            .content
            .first()
            .and_then(|c| match &c.raw {
                RawContent::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .expect("should have text content");
        serde_json::from_str(text).expect("valid JSON")
    }

    #[test]
    fn server_info_has_correct_name() {
        let server = ReadingTimeServer::default();
        let info = ServerHandler::get_info(&server);

        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn get_info_tool_returns_json_when_requested() {
        let server = ReadingTimeServer::default();
        let result = server
            .get_info(Parameters(GetInfoParams {
                format: "json".to_string(),
            }))
            .expect("get_info should succeed");

        let json = extract_json(&result);
        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["wpm"], 200);
    }

    #[test]
    fn estimate_tool_uses_defaults() {
        let server = ReadingTimeServer::default();
        let params = EstimateParams {
            text: format!("<p>{}</p><img src=\"a.png\">", "word ".repeat(450)),
            ..EstimateParams::default()
        };

        let result = server
            .estimate_reading_time(Parameters(params))
            .expect("estimate should succeed");

        let json = extract_json(&result);
        assert_eq!(json["words"], 450);
        assert_eq!(json["images"], 1);
        assert_eq!(json["minutes"], 3);
        assert_eq!(json["formatted"], "3 minutes to read");
    }

    #[test]
    fn estimate_tool_params_override_defaults() {
        let server = ReadingTimeServer::new(
            EstimateConfig {
                wpm: 100,
                ..EstimateConfig::default()
            },
            None,
        );
        let params = EstimateParams {
            text: "word ".repeat(300),
            wpm: Some(300),
            rounding: Some(Rounding::Down),
            postfix: Some("min read".to_string()),
            ..EstimateParams::default()
        };

        let result = server
            .estimate_reading_time(Parameters(params))
            .expect("estimate should succeed");

        let json = extract_json(&result);
        assert_eq!(json["wpm"], 300);
        assert_eq!(json["formatted"], "1 min read");
    }

    #[test]
    fn estimate_tool_rejects_zero_wpm() {
        let server = ReadingTimeServer::default();
        let params = EstimateParams {
            text: "text".to_string(),
            wpm: Some(0),
            ..EstimateParams::default()
        };
        assert!(server.estimate_reading_time(Parameters(params)).is_err());
    }

    #[test]
    fn estimate_params_parse_kebab_case_rounding() {
        let params: EstimateParams = serde_json::from_value(serde_json::json!({
            "text": "text",
            "rounding": "half-even",
        }))
        .expect("valid params");
        assert_eq!(params.rounding, Some(Rounding::HalfEven));

        let unknown = serde_json::from_value::<EstimateParams>(serde_json::json!({
            "text": "text",
            "rounding": "sideways",
        }));
        assert!(unknown.is_err());
    }

    #[test]
    fn estimate_params_schema_lists_rounding_modes() {
        let schema = serde_json::to_string(&schemars::schema_for!(EstimateParams)).unwrap();
        for mode in ["up", "down", "half-up", "half-even"] {
            assert!(schema.contains(&format!("\"{mode}\"")), "missing {mode}");
        }
    }

    #[test]
    fn oversized_input_is_rejected() {
        let server = ReadingTimeServer::new(EstimateConfig::default(), Some(8));
        let params = CountParams {
            text: "far more than eight bytes".to_string(),
        };
        assert!(server.count_words(Parameters(params)).is_err());
    }

    #[test]
    fn count_tools_work() {
        let server = ReadingTimeServer::default();
        let html = "<p>one two</p> three <IMG src=a><img src=b/>";

        let words = server
            .count_words(Parameters(CountParams {
                text: html.to_string(),
            }))
            .unwrap();
        assert_eq!(extract_json(&words)["words"], 3);

        let images = server
            .count_images(Parameters(CountParams {
                text: html.to_string(),
            }))
            .unwrap();
        assert_eq!(extract_json(&images)["images"], 2);
    }
}
