//! HTML page rendering the published OpenAPI document.
//!
//! A configured template file is read on every request so it can be edited
//! while the server runs. Without one, the embedded page is served.

use std::path::PathBuf;
use thiserror::Error;

/// Page shipped with the binary.
pub const EMBEDDED_TEMPLATE: &str = include_str!("../assets/docs-template.html");

/// Route serving the OpenAPI document the page points at.
pub const OPENAPI_PATH: &str = "/openapi.json";

#[derive(Debug, Error)]
pub enum DocsError {
    #[error("failed to read docs template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Documentation page source.
#[derive(Debug, Clone)]
pub struct DocsPage {
    title: String,
    template_path: Option<PathBuf>,
}

impl DocsPage {
    pub fn new(title: impl Into<String>, template_path: Option<PathBuf>) -> Self {
        Self {
            title: title.into(),
            template_path,
        }
    }

    /// Render the page with `{{title}}` and `{{openapi_url}}` substituted.
    pub fn render(&self) -> Result<String, DocsError> {
        let template = match &self.template_path {
            Some(path) => std::fs::read_to_string(path).map_err(|source| DocsError::Read {
                path: path.clone(),
                source,
            })?,
            None => EMBEDDED_TEMPLATE.to_string(),
        };

        Ok(template
            .replace("{{title}}", &self.title)
            .replace("{{openapi_url}}", OPENAPI_PATH))
    }
}
