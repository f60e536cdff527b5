//! Implementation of the `storyshell assemble` command.

use crate::assembler::{self, Assembly, AssemblyRequest};
use crate::cli::AssembleArgs;
use crate::context::RunContext;
use crate::error::{Result, StoryshellError};
use crate::events::{EventAction, EventLog};
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;

/// Execute the `storyshell assemble` command.
pub fn cmd_assemble(
    project_dir: Option<PathBuf>,
    framework_dir: Option<PathBuf>,
    args: AssembleArgs,
) -> Result<()> {
    let ctx = RunContext::resolve(project_dir, framework_dir)?;
    let mut log = EventLog::new(ctx.log_path());
    let request = super::text_input(&args.request)?;

    let req = AssemblyRequest::new(args.template, request).with_primary(args.primary_request);
    let mut stdout = std::io::stdout().lock();
    run(&ctx, &req, &mut log, &mut stdout)?;
    Ok(())
}

/// Assemble and write the document to `out`, bracketed by start/end events.
///
/// Nothing is written to `out` when assembly fails.
pub(crate) fn run<W: Write>(
    ctx: &RunContext,
    req: &AssemblyRequest,
    log: &mut EventLog,
    out: &mut W,
) -> Result<Assembly> {
    log.record(
        EventAction::Start,
        json!({
            "template": req.template,
            "project_dir": ctx.project_dir.display().to_string(),
            "framework_dir": ctx.framework_dir.display().to_string(),
            "has_request": req.request_text().is_some(),
        }),
    );

    let assembly = match assembler::assemble(ctx, req, log) {
        Ok(assembly) => assembly,
        Err(e) => {
            log.record(
                EventAction::End,
                json!({ "status": "error", "exit_code": e.exit_code() }),
            );
            return Err(e);
        }
    };

    writeln!(out, "{}", assembly.output).map_err(|e| {
        StoryshellError::UserError(format!("failed to write assembled output: {}", e))
    })?;

    log.record(
        EventAction::Output,
        json!({
            "bytes": assembly.output.len(),
            "mode": assembly.mode.as_str(),
            "includes": assembly.includes.resolved.len(),
            "missing": assembly.includes.missing.len(),
        }),
    );
    log.record(
        EventAction::End,
        json!({ "status": "ok", "warnings": assembly.warnings.len() }),
    );

    Ok(assembly)
}
