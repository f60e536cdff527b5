//! The assembly pipeline.
//!
//! [`assemble`] turns a template name and an optional request into one
//! document. Phases run strictly in order and each must finish before the
//! next starts:
//!
//! 1. Load the template from the template store (missing: fatal).
//! 2. A template without frontmatter short-circuits: the raw template is
//!    returned, with the request appended as a `User request:` line.
//! 3. Require the project context file (missing: fatal), then collect the
//!    include candidates:
//!    - includes declared by the context file,
//!    - the context file itself,
//!    - explicit document paths in the scanned text,
//!    - entities matched from the scanned text,
//!    - entities related to those, one level,
//!    - includes declared by the template.
//!
//!    The scanned text is the primary command when one is given, otherwise
//!    the request.
//! 4. Resolve the candidates and compose the output: includes, request,
//!    notice, template body.

use crate::context::RunContext;
use crate::entity::EntityIndex;
use crate::error::{Result, StoryshellError, Warning};
use crate::events::{EventAction, EventLog};
use crate::frontmatter::Document;
use crate::include::{self, IncludeReport};
use crate::prompt;
use crate::relations;
use serde_json::json;


/// Frontmatter key listing documents to include.
pub const INCLUDES_KEY: &str = "includes";

/// Inputs for one assembly.
#[derive(Debug, Clone, Default)]
pub struct AssemblyRequest {
    /// Template name, without extension.
    pub template: String,
    /// Free-text request from the user.
    pub request: Option<String>,
    /// The user's original command when the request was rewritten upstream.
    /// Entity matching and explicit paths read this instead of `request`.
    pub primary: Option<String>,
}

impl AssemblyRequest {
    pub fn new(template: impl Into<String>, request: Option<String>) -> Self {
        Self {
            template: template.into(),
            request,
            primary: None,
        }
    }

    pub fn with_primary(mut self, primary: Option<String>) -> Self {
        self.primary = primary;
        self
    }

    /// The request text, treating blank input as absent.
    pub fn request_text(&self) -> Option<&str> {
        self.request
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    /// Text scanned for entities and explicit paths: the primary command
    /// when present, otherwise the request.
    pub fn scan_text(&self) -> Option<&str> {
        self.primary
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .or_else(|| self.request_text())
    }
}

/// Which output path a run took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyMode {
    /// Template had no frontmatter; emitted verbatim.
    RawTemplate,
    /// Includes resolved and composed with the template body.
    Composed,
}

impl AssemblyMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AssemblyMode::RawTemplate => "raw_template",
            AssemblyMode::Composed => "composed",
        }
    }
}

/// A successfully assembled document.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// The document to emit.
    pub output: String,
    pub mode: AssemblyMode,
    /// Include resolution details; empty for the raw template path.
    pub includes: IncludeReport,
    /// Recoverable problems met along the way.
    pub warnings: Vec<Warning>,
}

/// Run every phase for one request.
pub fn assemble(ctx: &RunContext, req: &AssemblyRequest, log: &mut EventLog) -> Result<Assembly> {
    let template_path = ctx.template_path(&req.template);
    if !template_path.is_file() {
        log.record(
            EventAction::Error,
            json!({ "type": "template_not_found", "path": template_path.display().to_string() }),
        );
        return Err(StoryshellError::TemplateNotFound {
            name: req.template.clone(),
            path: template_path,
        });
    }

    let template_content = std::fs::read_to_string(&template_path).map_err(|e| {
        StoryshellError::UserError(format!(
            "failed to read template '{}': {}",
            template_path.display(),
            e
        ))
    })?;
    log.record(
        EventAction::Template,
        json!({ "file": template_path.display().to_string(), "status": "ok" }),
    );

    let template = Document::parse(&template_content);
    if !template.has_frontmatter() {
        let output = raw_output(&template_content, req.request_text());
        log.record(EventAction::RawTemplate, json!({ "bytes": output.len() }));
        return Ok(Assembly {
            output,
            mode: AssemblyMode::RawTemplate,
            includes: IncludeReport::default(),
            warnings: log.take_warnings(),
        });
    }

    let candidates = collect_candidates(ctx, &template, req.scan_text(), log)?;
    let includes = include::resolve(&candidates, &ctx.search_roots(), log);

    let mut output = includes.body.clone();
    if let Some(request) = req.request_text() {
        output.push_str(request);
        output.push_str("\n\n");
    }
    output.push_str(&ctx.config.notice);
    output.push_str("\n\n");
    output.push_str(template.body);

    Ok(Assembly {
        output,
        mode: AssemblyMode::Composed,
        includes,
        warnings: log.take_warnings(),
    })
}

/// Raw template text with the request spliced after it.
///
/// Printed with a trailing newline this reads as the template line, two
/// blank lines, then `User request: ...` followed by one blank line.
pub fn raw_output(template: &str, request: Option<&str>) -> String {
    match request {
        Some(request) => format!("{}\n\n\nUser request: {}\n", template, request),
        None => template.to_string(),
    }
}

/// The include candidate list, in priority order and before deduplication.
pub fn collect_candidates(
    ctx: &RunContext,
    template: &Document<'_>,
    scan_text: Option<&str>,
    log: &mut EventLog,
) -> Result<Vec<String>> {
    let context_path = ctx.context_file_path();
    if !context_path.is_file() {
        log.record(
            EventAction::Error,
            json!({ "type": "project_context_required", "path": context_path.display().to_string() }),
        );
        return Err(StoryshellError::ProjectContextMissing {
            relative: ctx.config.context_file.clone(),
            path: context_path,
        });
    }

    let context_content = std::fs::read_to_string(&context_path).map_err(|e| {
        StoryshellError::UserError(format!(
            "failed to read project context '{}': {}",
            context_path.display(),
            e
        ))
    })?;
    log.record(
        EventAction::ProjectContext,
        json!({ "file": context_path.display().to_string(), "status": "ok" }),
    );

    let mut candidates = Vec::new();

    let context = Document::parse(&context_content);
    if context.has_frontmatter() {
        let declared = context.frontmatter.list(INCLUDES_KEY);
        log.record(
            EventAction::ProjectContextIncludes,
            json!({ "count": declared.len(), "files": declared }),
        );
        candidates.extend(declared.iter().cloned());
    }

    candidates.push(ctx.config.context_file.clone());

    let text = scan_text.unwrap_or_default();

    let explicit = prompt::extract_explicit_paths(text, &ctx.config.document_extension);
    if !explicit.is_empty() {
        log.record(
            EventAction::ExplicitPaths,
            json!({ "count": explicit.len(), "paths": explicit }),
        );
        candidates.extend(explicit);
    }

    let index = EntityIndex::build(ctx, log);
    let matched = prompt::match_entities(text, &index, log);
    let related = relations::expand(&matched, &index, &ctx.project_dir, log);
    candidates.extend(matched);
    candidates.extend(related);

    candidates.extend(template.frontmatter.list(INCLUDES_KEY).iter().cloned());

    Ok(candidates)
}
