//! Implementation of the `storyshell speak` command.

use crate::cli::SpeakArgs;
use crate::context::RunContext;
use crate::error::{Result, StoryshellError};
use crate::events::{EventAction, EventLog};
use crate::speech::{self, CommandSynthesizer, SpeechRequest, SpeechSynthesizer};
use serde_json::json;
use std::path::PathBuf;

/// Execute the `storyshell speak` command.
pub fn cmd_speak(
    project_dir: Option<PathBuf>,
    framework_dir: Option<PathBuf>,
    args: SpeakArgs,
) -> Result<()> {
    let ctx = RunContext::resolve(project_dir, framework_dir)?;
    let mut log = EventLog::new(ctx.log_path());

    let text = super::text_input(&args.text)?.ok_or_else(|| {
        StoryshellError::UserError(
            "no text to speak\n\
             Fix: pass the text as arguments or pipe it on stdin."
                .to_string(),
        )
    })?;

    let request = SpeechRequest {
        text,
        voice: args
            .voice
            .unwrap_or_else(|| ctx.config.speech.voice.clone()),
        style: args.style,
    };

    let synthesizer = CommandSynthesizer::from_config(&ctx.config.speech, ctx.speech_output_dir())?;
    let path = speak_with(&synthesizer, &request, &ctx, &mut log)?;
    println!("{}", path.display());

    Ok(())
}

/// Synthesize `request`, store the audio under the project and log the run.
pub(crate) fn speak_with<S: SpeechSynthesizer>(
    synthesizer: &S,
    request: &SpeechRequest,
    ctx: &RunContext,
    log: &mut EventLog,
) -> Result<PathBuf> {
    log.record(
        EventAction::Start,
        json!({
            "command": "speak",
            "voice": request.voice,
            "style": request.style,
            "chars": request.text.chars().count(),
        }),
    );

    let result = synthesizer.synthesize(request).and_then(|output| {
        speech::persist(
            output,
            &ctx.speech_output_dir(),
            &ctx.config.speech.extension,
        )
    });

    match result {
        Ok(path) => {
            log.record(
                EventAction::Speech,
                json!({ "file": path.display().to_string(), "status": "ok" }),
            );
            let warnings = log.warnings().len();
            log.record(
                EventAction::End,
                json!({ "status": "ok", "warnings": warnings }),
            );
            Ok(path)
        }
        Err(e) => {
            log.record(
                EventAction::Error,
                json!({ "type": "speech_failed", "message": e.to_string() }),
            );
            log.record(
                EventAction::End,
                json!({ "status": "error", "exit_code": e.exit_code() }),
            );
            Err(e)
        }
    }
}
