use crate::bridge::{HostBridge, update_line};
use crate::commands::{EditorCommand, HELP};
use crate::error::{AppResult, report_error};
use crate::view::{render_code, render_fields, render_status};
use engine::ThemeObject;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{MissedTickBehavior, interval};

/// Whether the command loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive editing session: command lines in, field views and
/// `updateTheme` lines out
pub struct PanelApp {
    bridge: HostBridge,
    tick_interval: Duration,
}

impl PanelApp {
    pub fn new(bridge: HostBridge, tick_interval: Duration) -> Self {
        Self {
            bridge,
            tick_interval,
        }
    }

    pub fn bridge(&self) -> &HostBridge {
        &self.bridge
    }

    /// Apply one command and return the text to show
    pub fn execute(&mut self, command: EditorCommand) -> AppResult<(Flow, Option<String>)> {
        let engine = self.bridge.engine_mut();
        let output = match command {
            EditorCommand::Set { path, value } => {
                engine.edit_field(&path, value)?;
                None
            }
            EditorCommand::Select(name) => {
                if engine.select_theme(&name) {
                    Some(format!("Active theme: {name}"))
                } else {
                    Some(format!("No theme named '{name}'"))
                }
            }
            EditorCommand::Replace { name, theme } => {
                if engine.replace_active_theme(ThemeObject::new(name.clone(), theme)) {
                    Some(format!("Active theme replaced by '{name}'"))
                } else {
                    Some("No options loaded yet".to_string())
                }
            }
            EditorCommand::Load(path) => {
                let report = self.bridge.receive_options_file(&path)?;
                Some(format!(
                    "Loaded {} theme(s), active theme '{}'",
                    report.theme_count, report.active
                ))
            }
            EditorCommand::Themes(path) => {
                let count = self.bridge.set_themes_file(&path)?;
                Some(format!("Theme list replaced ({count} theme(s))"))
            }
            EditorCommand::Reset => {
                if engine.reset_themes() {
                    Some("Themes reset".to_string())
                } else {
                    Some("Nothing to reset".to_string())
                }
            }
            EditorCommand::Fields => Some(render_fields(&engine.fields())),
            EditorCommand::Code => Some(render_code(
                &engine.active_theme().theme,
                engine.config().show_code(),
            )),
            EditorCommand::Status => Some(render_status(engine)),
            EditorCommand::Help => Some(HELP.to_string()),
            EditorCommand::Quit => return Ok((Flow::Quit, None)),
        };
        Ok((Flow::Continue, output))
    }

    /// Run the command loop until `quit` or end of input.
    ///
    /// Emissions are flushed after every command and on every tick, so
    /// debounced updates reach `output` without further input.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> AppResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        let mut ticker = interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        log::info!("Input closed, leaving command loop");
                        break;
                    };
                    let flow = self.handle_line(&line, &mut output).await?;
                    self.flush_updates(&mut output).await?;
                    if flow == Flow::Quit {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.flush_updates(&mut output).await?;
                }
            }
        }

        self.bridge.teardown();
        self.flush_updates(&mut output).await?;
        output.flush().await?;
        Ok(())
    }

    async fn handle_line<W>(&mut self, line: &str, output: &mut W) -> AppResult<Flow>
    where
        W: AsyncWrite + Unpin,
    {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }
        log::debug!("Command: {line}");

        let result = line
            .parse::<EditorCommand>()
            .and_then(|command| self.execute(command));
        match result {
            Ok((flow, text)) => {
                if let Some(text) = text {
                    write_line(output, &text).await?;
                }
                Ok(flow)
            }
            Err(e) => {
                report_error(&e);
                Ok(Flow::Continue)
            }
        }
    }

    async fn flush_updates<W>(&mut self, output: &mut W) -> AppResult<()>
    where
        W: AsyncWrite + Unpin,
    {
        for theme in self.bridge.drain_updates() {
            write_line(output, &update_line(&theme)?).await?;
        }
        Ok(())
    }
}

async fn write_line<W>(output: &mut W, text: &str) -> AppResult<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}
