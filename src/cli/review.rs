//! Line-oriented review loop over a `Workspace`
//!
//! Edits are autosaved into a [`LatestDraft`]; `draft` prints what was last
//! saved and `stats` reports whether a save is still pending.

use anyhow::Result;
use chrono::Local;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::cli::commands::write_summary;
use crate::editor::{download_file_name, LatestDraft, SaveStatus};
use crate::workspace::Workspace;

const HELP: &str = "\
Commands:
  show                 print the summary
  stats                word/character counts, history position, save status
  set <text>           replace the summary (use \\n for line breaks)
  append <text>        add a line to the end of the summary
  undo | redo          step through edit history
  regenerate           summarize the transcript again
  draft                print the last autosaved draft
  save [path]          write the summary to a file
  subject <text>       set the email subject
  message <text>       set the email message (empty to clear)
  to <address>         add a recipient
  rm <n>               remove recipient row n
  recipients           list recipient rows
  send                 share the summary by email
  help                 show this help
  quit                 leave";

/// Run the loop until `quit` or end of input.
pub async fn run<R, W>(
    workspace: &mut Workspace,
    drafts: &LatestDraft,
    input: R,
    mut out: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "Type `help` for commands.")?;
    let mut lines = input.lines();

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (command, arg) = line
            .split_once(' ')
            .map(|(c, a)| (c, a.trim()))
            .unwrap_or((line, ""));

        match command {
            "quit" | "exit" => break,
            "help" => writeln!(out, "{}", HELP)?,
            "show" => writeln!(out, "{}", workspace.editor().text())?,
            "stats" => write_stats(workspace, &mut out)?,
            "set" => {
                let changed = workspace.editor_mut().edit(arg.replace("\\n", "\n"));
                writeln!(out, "{}", if changed { "Updated." } else { "No change." })?;
            }
            "append" => {
                let text = format!("{}\n{}", workspace.editor().text(), arg);
                workspace.editor_mut().edit(text);
                writeln!(out, "Updated.")?;
            }
            "undo" => {
                let moved = workspace.editor_mut().undo();
                writeln!(out, "{}", if moved { "Undone." } else { "Nothing to undo." })?;
            }
            "redo" => {
                let moved = workspace.editor_mut().redo();
                writeln!(out, "{}", if moved { "Redone." } else { "Nothing to redo." })?;
            }
            "regenerate" => match workspace.regenerate().await {
                Ok(result) => writeln!(
                    out,
                    "{}\n\n[{} | {} words]",
                    result.summary_text, result.resolved_template_name, result.word_count
                )?,
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            "draft" => match drafts.get() {
                Some(text) => writeln!(out, "{}", text)?,
                None => writeln!(out, "Nothing autosaved yet.")?,
            },
            "save" => {
                let path = if arg.is_empty() {
                    PathBuf::from(download_file_name(Local::now().date_naive()))
                } else {
                    PathBuf::from(arg)
                };
                if let Err(e) = write_summary(&path, workspace.editor().text()) {
                    writeln!(out, "error: {:#}", e)?;
                }
            }
            "subject" => {
                workspace.share_mut().draft_mut().subject = arg.to_string();
            }
            "message" => {
                workspace.share_mut().draft_mut().message =
                    Some(arg.to_string()).filter(|m| !m.is_empty());
            }
            "to" => {
                let draft = workspace.share_mut().draft_mut();
                let blank = draft.recipients().iter().position(|r| r.trim().is_empty());
                let index = match blank {
                    Some(index) => index,
                    None => draft.add_recipient(),
                };
                draft.update_recipient(index, arg);
            }
            "rm" => {
                let removed = arg
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .is_some_and(|index| workspace.share_mut().draft_mut().remove_recipient(index));
                if !removed {
                    writeln!(out, "Cannot remove recipient row '{}'.", arg)?;
                }
            }
            "recipients" => {
                for (i, recipient) in workspace.share().draft().recipients().iter().enumerate() {
                    writeln!(out, "  {}. {}", i + 1, recipient)?;
                }
            }
            "send" => {
                if !workspace.share().can_send() {
                    writeln!(out, "Add at least one recipient first.")?;
                    continue;
                }
                writeln!(out, "Sending email...")?;
                match workspace.share_summary().await {
                    Ok(outcome) => writeln!(
                        out,
                        "{} ({} recipient(s))",
                        outcome.message, outcome.recipient_count
                    )?,
                    Err(e) => writeln!(out, "error: {}", e)?,
                }
            }
            other => writeln!(out, "Unknown command '{}'. Type `help`.", other)?,
        }
    }

    workspace.editor_mut().cancel_autosave();
    Ok(())
}

fn write_stats(workspace: &Workspace, out: &mut impl Write) -> Result<()> {
    let editor = workspace.editor();
    let history = editor.history();
    writeln!(
        out,
        "{} words, {} characters | history {}/{} | {} | {}",
        editor.word_count(),
        editor.char_count(),
        history.cursor() + 1,
        history.len(),
        match editor.save_status() {
            SaveStatus::Saving => "Saving...",
            SaveStatus::Saved => "Saved",
        },
        editor.template_name().unwrap_or("Custom")
    )?;
    Ok(())
}
