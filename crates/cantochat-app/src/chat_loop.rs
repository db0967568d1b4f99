//! Terminal conversation loop.
//!
//! Reads one user turn per stdin line and prints the assistant reply as
//! it streams in. A line typed while a reply is still arriving supersedes
//! that reply.

use std::io::Write;

use cantochat_common::{CantochatError, NotificationLevel};
use cantochat_session::{SessionController, SessionEvent, SubmitOutcome};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::{debug, info};

use crate::wiring::Scenario;

/// A parsed input line.
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Quit,
    Restart,
    Say(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        match line.trim() {
            "/quit" | "/exit" => Self::Quit,
            "/restart" => Self::Restart,
            _ => Self::Say(line),
        }
    }
}

enum Input {
    Event(Option<SessionEvent>),
    Line(Option<String>),
}

/// Enter `scenario` and print its opening line.
pub async fn start<W: Write>(
    session: &mut SessionController,
    scenario: &Scenario,
    out: &mut W,
) -> std::io::Result<()> {
    // On failure the placeholder turn is printed and `/restart` retries.
    if let Err(e) = session.initialize(&scenario.id, &scenario.prompt).await {
        debug!(error = %e, "Scenario start failed");
    }
    if let Some(opening) = session.conversation().last() {
        writeln!(out, "{}", opening.text())?;
        out.flush()?;
    }
    flush_notifications(session);
    Ok(())
}

/// Run on stdin until `/quit` or end of input.
pub async fn run<W: Write>(
    session: &mut SessionController,
    scenario: &Scenario,
    out: &mut W,
) -> Result<(), CantochatError> {
    let lines = BufReader::new(tokio::io::stdin()).lines();
    drive(session, scenario, lines, out).await
}

/// Feed `lines` to the session and write replies to `out`. The connection
/// is closed on return.
async fn drive<R, W>(
    session: &mut SessionController,
    scenario: &Scenario,
    mut lines: Lines<R>,
    out: &mut W,
) -> Result<(), CantochatError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        let input = if session.has_live_connection() {
            tokio::select! {
                event = session.next_event() => Input::Event(event),
                line = lines.next_line() => Input::Line(line?),
            }
        } else {
            Input::Line(lines.next_line().await?)
        };

        match input {
            Input::Event(Some(event)) => {
                render(&event, out)?;
                flush_notifications(session);
            }
            Input::Event(None) => {}
            Input::Line(None) => {
                info!("End of input");
                break;
            }
            Input::Line(Some(line)) => match Command::parse(&line) {
                Command::Quit => break,
                Command::Restart => {
                    if session.has_live_connection() {
                        writeln!(out)?;
                    }
                    start(session, scenario, out).await?;
                }
                Command::Say(text) => {
                    let superseding = session.has_live_connection();
                    match session.submit_turn(text) {
                        Ok(SubmitOutcome::Sent) if superseding => {
                            debug!("Superseding unfinished reply");
                            writeln!(out)?;
                        }
                        Ok(_) => {}
                        Err(e) => eprintln!("! {e}"),
                    }
                }
            },
        }
    }

    session.close();
    Ok(())
}

fn render<W: Write>(event: &SessionEvent, out: &mut W) -> std::io::Result<()> {
    match event {
        SessionEvent::Chunk(text) => {
            write!(out, "{text}")?;
            out.flush()
        }
        SessionEvent::Completed | SessionEvent::Failed(_) => writeln!(out),
        SessionEvent::Opened | SessionEvent::Warning(_) => Ok(()),
    }
}

fn flush_notifications(session: &mut SessionController) {
    for notice in session.notifications().drain() {
        let tag = match notice.level {
            NotificationLevel::Warning => "?",
            NotificationLevel::Error => "!",
        };
        eprintln!("{tag} {}: {}", notice.title, notice.body);
    }
}
