//! MCP server exposing a three-file website project.
//!
//! Provides tools to create the project, read it, overwrite a file, and
//! apply atomic line-level edit batches, so an agent can build a page
//! one precise change at a time.
//!
//! ## Module Structure
//!
//! - `models`: Request types for MCP tools
//! - `helpers`: Response formatting and resource URIs

mod helpers;
mod models;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        AnnotateAble, ListResourcesResult, PaginatedRequestParams, RawResource,
        ReadResourceRequestParams, ReadResourceResult, ResourceContents, ServerCapabilities,
        ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router,
};

use sitebuilder_patch::{line_count, numbered, split_lines};
use sitebuilder_store::{
    ProjectState, Scaffold, SharedProjectStore, SiteFile, StoreError, shared_project_store,
};

pub use helpers::{RESOURCE_ROOT, error_response, resource_uri};
pub use models::*;

// ============================================================================
// SiteBuilderMcp Server
// ============================================================================

/// MCP server over one website project.
#[derive(Clone)]
pub struct SiteBuilderMcp {
    store: SharedProjectStore,
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for SiteBuilderMcp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteBuilderMcp")
            .field("store", &self.store.describe())
            .finish_non_exhaustive()
    }
}

impl Default for SiteBuilderMcp {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteBuilderMcp {
    /// Create a new MCP server over the given store.
    pub fn with_store(store: SharedProjectStore) -> Self {
        Self {
            store,
            tool_router: Self::tool_router(),
        }
    }

    /// Create a new MCP server with an in-memory store.
    pub fn new() -> Self {
        Self::with_store(shared_project_store(Scaffold::Empty))
    }

    /// Body of a `website://files...` resource.
    pub fn resource_text(&self, uri: &str) -> Result<String, McpError> {
        let to_mcp = |e: StoreError| McpError::invalid_params(e.to_string(), None);

        if uri == RESOURCE_ROOT {
            let website = self.store.get_all().map_err(to_mcp)?;
            let files: Vec<serde_json::Value> = website
                .iter()
                .map(|(file, text)| {
                    serde_json::json!({
                        "file": file.as_str(),
                        "uri": resource_uri(file.as_str()),
                        "bytes": text.len(),
                        "line_count": line_count(text),
                    })
                })
                .collect();
            return Ok(serde_json::to_string_pretty(&files).unwrap_or_else(|_| "[]".to_string()));
        }

        match uri.strip_prefix(RESOURCE_ROOT).and_then(|rest| rest.strip_prefix('/')) {
            Some(name) => self.store.read(name).map_err(to_mcp),
            None => Err(McpError::invalid_params(
                format!("Unknown resource URI: {}", uri),
                None,
            )),
        }
    }
}

#[tool_router]
impl SiteBuilderMcp {
    // ========================================================================
    // Project Tools
    // ========================================================================

    #[tool(description = "Ensure the website project exists: creates the project directory and any missing index.html, styles.css, script.js. Safe to call repeatedly.")]
    #[tracing::instrument(skip(self), name = "mcp.ensure_website")]
    pub fn ensure_website(&self) -> String {
        match self.store.ensure() {
            Ok(created) => serde_json::json!({
                "success": true,
                "created": created.iter().map(SiteFile::as_str).collect::<Vec<_>>(),
                "state": ProjectState::Ready.as_str(),
            })
            .to_string(),
            Err(e) => error_response(&e),
        }
    }

    #[tool(description = "Return the full contents of index.html, styles.css and script.js. Call this before making edits.")]
    #[tracing::instrument(skip(self), name = "mcp.get_website")]
    pub fn get_website(&self) -> String {
        match self.store.get_all() {
            Ok(website) => {
                let files: serde_json::Map<String, serde_json::Value> = website
                    .into_iter()
                    .map(|(file, text)| (file.as_str().to_string(), text.into()))
                    .collect();
                serde_json::json!({
                    "success": true,
                    "website": files,
                })
                .to_string()
            }
            Err(e) => error_response(&e),
        }
    }

    // ========================================================================
    // File Tools
    // ========================================================================

    #[tool(description = "Read a single file from the website project. Set line_numbers to see the 0-indexed numbering that update_file uses.")]
    #[tracing::instrument(skip(self, req), fields(file = %req.file), name = "mcp.read_file")]
    pub fn read_file(&self, Parameters(req): Parameters<ReadFileRequest>) -> String {
        match self.store.read(&req.file) {
            Ok(content) => {
                let mut body = serde_json::json!({
                    "success": true,
                    "file": req.file,
                    "line_count": line_count(&content),
                });
                if req.line_numbers {
                    body["numbered"] = numbered(&split_lines(&content)).into();
                }
                body["content"] = content.into();
                body.to_string()
            }
            Err(e) => error_response(&e),
        }
    }

    #[tool(description = "Replace the entire content of a file. Use for new files or major rewrites; prefer update_file for small changes.")]
    #[tracing::instrument(skip(self, req), fields(file = %req.file), name = "mcp.write_file")]
    pub fn write_file(&self, Parameters(req): Parameters<WriteFileRequest>) -> String {
        match self.store.write_whole(&req.file, &req.content) {
            Ok(file) => serde_json::json!({
                "success": true,
                "file": file.as_str(),
                "bytes": req.content.len(),
                "line_count": line_count(&req.content),
            })
            .to_string(),
            Err(e) => error_response(&e),
        }
    }

    #[tool(description = "Apply line-level edits to a file atomically. Operations: insert {at, lines}, replace {start, end, lines}, delete {start, end}; ranges are half-open and 0-indexed, and every line number refers to the file BEFORE this batch. Overlapping operations or out-of-range lines reject the whole batch and leave the file unchanged. A file left holding a single empty line is saved empty, so lines_after is 0.")]
    #[tracing::instrument(skip(self, req), fields(file = %req.file, ops = req.operations.len()), name = "mcp.update_file")]
    pub fn update_file(&self, Parameters(req): Parameters<UpdateFileRequest>) -> String {
        let count = req.operations.len();
        let ops: Vec<sitebuilder_store::EditOp> =
            req.operations.into_iter().map(Into::into).collect();

        match self.store.update(&req.file, &ops) {
            Ok(outcome) => {
                let mut body = serde_json::json!({
                    "success": true,
                    "file": outcome.file.as_str(),
                    "operations": count,
                    "lines_before": outcome.lines_before,
                    "lines_after": outcome.lines_after,
                });
                if req.return_content {
                    body["content"] = outcome.content.into();
                }
                body.to_string()
            }
            Err(e) => error_response(&e),
        }
    }
}

#[tool_handler]
impl ServerHandler for SiteBuilderMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Website builder MCP server. Manages a project of exactly three files (index.html, styles.css, script.js). Call ensure_website once, get_website before editing, and update_file for precise line edits.".into()
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// List available resources.
    ///
    /// - `website://files` - Project listing with sizes
    /// - `website://files/{name}` - Raw file content (once the project exists)
    fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListResourcesResult, McpError>> + Send + '_ {
        async move {
            let mut resources = vec![RawResource {
                uri: RESOURCE_ROOT.to_string(),
                name: "website".to_string(),
                title: Some("Website Files".to_string()),
                description: Some("The three project files with sizes and line counts".to_string()),
                mime_type: Some("application/json".to_string()),
                size: None,
                icons: None,
                meta: None,
            }
            .no_annotation()];

            if self.store.state() == ProjectState::Ready {
                for file in SiteFile::ALL {
                    resources.push(
                        RawResource {
                            uri: resource_uri(file.as_str()),
                            name: file.as_str().to_string(),
                            title: Some(file.as_str().to_string()),
                            description: Some(format!("Current content of {}", file)),
                            mime_type: Some(file.mime_type().to_string()),
                            size: None,
                            icons: None,
                            meta: None,
                        }
                        .no_annotation(),
                    );
                }
            }

            Ok(ListResourcesResult {
                meta: None,
                next_cursor: None,
                resources,
            })
        }
    }

    /// Read a specific resource.
    fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ReadResourceResult, McpError>> + Send + '_ {
        async move {
            let content = self.resource_text(&request.uri)?;
            Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(content, request.uri.clone())],
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(result: &str) -> serde_json::Value {
        serde_json::from_str(result).unwrap()
    }

    fn ready() -> SiteBuilderMcp {
        let mcp = SiteBuilderMcp::new();
        assert_eq!(parse(&mcp.ensure_website())["success"], true);
        mcp
    }

    #[test]
    fn test_ensure_reports_created_once() {
        let mcp = SiteBuilderMcp::new();
        let first = parse(&mcp.ensure_website());
        assert_eq!(
            first["created"],
            serde_json::json!(["index.html", "styles.css", "script.js"])
        );
        let second = parse(&mcp.ensure_website());
        assert_eq!(second["created"], serde_json::json!([]));
    }

    #[test]
    fn test_get_website_before_ensure() {
        let mcp = SiteBuilderMcp::new();
        let result = parse(&mcp.get_website());
        assert_eq!(result["success"], false);
        assert_eq!(result["error_kind"], "not_ready");
    }

    #[test]
    fn test_write_and_read() {
        let mcp = ready();
        let result = parse(&mcp.write_file(Parameters(WriteFileRequest {
            file: "styles.css".to_string(),
            content: "body {\n  margin: 0;\n}\n".to_string(),
        })));
        assert_eq!(result["success"], true);
        assert_eq!(result["line_count"], 4);

        let result = parse(&mcp.read_file(Parameters(ReadFileRequest {
            file: "styles.css".to_string(),
            line_numbers: true,
        })));
        assert_eq!(result["content"], "body {\n  margin: 0;\n}\n");
        assert!(result["numbered"].as_str().unwrap().contains("   1│   margin: 0;"));
    }

    #[test]
    fn test_read_unknown_file() {
        let mcp = ready();
        let result = parse(&mcp.read_file(Parameters(ReadFileRequest {
            file: "main.py".to_string(),
            line_numbers: false,
        })));
        assert_eq!(result["error_kind"], "not_found");
        assert!(result["error"].as_str().unwrap().contains("index.html"));
    }

    #[test]
    fn test_update_with_return_content() {
        let mcp = ready();
        let result = parse(&mcp.update_file(Parameters(UpdateFileRequest {
            file: "index.html".to_string(),
            operations: vec![EditOp::Insert {
                at: 0,
                lines: vec!["<h1>Hello</h1>".to_string()],
            }],
            return_content: true,
        })));
        assert_eq!(result["success"], true);
        assert_eq!(result["lines_before"], 0);
        assert_eq!(result["lines_after"], 1);
        assert_eq!(result["content"], "<h1>Hello</h1>");
    }

    #[test]
    fn test_update_conflict_reports_both_operations() {
        let mcp = ready();
        mcp.write_file(Parameters(WriteFileRequest {
            file: "script.js".to_string(),
            content: "a\nb\nc".to_string(),
        }));
        let result = parse(&mcp.update_file(Parameters(UpdateFileRequest {
            file: "script.js".to_string(),
            operations: vec![
                EditOp::Delete { start: 0, end: 2 },
                EditOp::Replace {
                    start: 1,
                    end: 3,
                    lines: vec!["x".to_string()],
                },
            ],
            return_content: false,
        })));
        assert_eq!(result["error_kind"], "conflicting_edit");
        assert_eq!(result["detail"]["first"], 0);
        assert_eq!(result["detail"]["second"], 1);
    }

    #[test]
    fn test_resource_text() {
        let mcp = SiteBuilderMcp::new();
        assert!(mcp.resource_text(RESOURCE_ROOT).is_err());

        mcp.ensure_website();
        mcp.write_file(Parameters(WriteFileRequest {
            file: "script.js".to_string(),
            content: "console.log(1);".to_string(),
        }));

        assert_eq!(
            mcp.resource_text("website://files/script.js").unwrap(),
            "console.log(1);"
        );
        let listing: serde_json::Value =
            serde_json::from_str(&mcp.resource_text(RESOURCE_ROOT).unwrap()).unwrap();
        assert_eq!(listing.as_array().unwrap().len(), 3);
        assert!(mcp.resource_text("website://other").is_err());
        assert!(mcp.resource_text("website://files/other.txt").is_err());
    }
}
