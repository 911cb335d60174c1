use std::sync::Arc;

use anyhow::Context as _;
use tokio::io::{AsyncBufRead, AsyncBufReadExt as _, AsyncWrite, AsyncWriteExt as _, BufReader};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::filter::TagFilter;
use crate::render::text;
use crate::router::Route;
use crate::session::Session;

const HELP: &str = "commands: search <text> | tag <name>|All | open <id> | go <path> | next | prev | select <n> | back | home | tags | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Search(String),
    Tag(TagFilter),
    Open(String),
    Go(String),
    Next,
    Prev,
    /// 1-based, as shown next to the screenshot.
    Select(usize),
    Back,
    Home,
    Tags,
    Help,
    Quit,
}

impl BrowseCommand {
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match (word, rest) {
            ("search", query) => Self::Search(query.to_owned()),
            ("tag", "") => return Err("usage: tag <name>|All".to_owned()),
            ("tag", tag) => Self::Tag(TagFilter::parse(tag)),
            ("open", "") => return Err("usage: open <id>".to_owned()),
            ("open", id) => Self::Open(id.to_owned()),
            ("go", "") => return Err("usage: go <path>".to_owned()),
            ("go", path) => Self::Go(path.to_owned()),
            ("next", "") => Self::Next,
            ("prev", "") => Self::Prev,
            ("select", n) => match n.parse::<usize>() {
                Ok(n) if n >= 1 => Self::Select(n),
                _ => return Err("usage: select <n> (1-based)".to_owned()),
            },
            ("back", "") => Self::Back,
            ("home", "") => Self::Home,
            ("tags", "") => Self::Tags,
            ("help", "") => Self::Help,
            ("quit" | "exit", "") => Self::Quit,
            _ => return Err(format!("unknown command: {line}\n{HELP}")),
        };
        Ok(Some(command))
    }
}

pub async fn run(catalog: Arc<Catalog>, config: &Config) -> anyhow::Result<()> {
    let session = Session::new(catalog, config);
    browse(
        session,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
}

/// Drives `session` from `input` until EOF or `quit`, re-rendering after
/// every command and every redirect the session follows.
pub async fn browse<R, W>(mut session: Session, input: R, mut output: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    write_screen(&mut output, &session, None).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("read command")? else {
                    break;
                };
                match BrowseCommand::parse(&line) {
                    Ok(None) => continue,
                    Ok(Some(BrowseCommand::Quit)) => break,
                    Ok(Some(command)) => {
                        tracing::debug!(?command, "browse command");
                        let notice = apply(&mut session, command);
                        write_screen(&mut output, &session, notice.as_deref()).await?;
                    }
                    Err(usage) => write_line(&mut output, &usage).await?,
                }
            }
            route = session.next_event() => {
                tracing::debug!(route = %route, "followed redirect");
                write_screen(&mut output, &session, None).await?;
            }
        }
    }

    output.flush().await.context("flush output")?;
    Ok(())
}

/// Applies one command; returns a notice to print under the view.
fn apply(session: &mut Session, command: BrowseCommand) -> Option<String> {
    let result = match command {
        BrowseCommand::Search(query) => session.home_mut().map(|home| home.set_query(query)),
        BrowseCommand::Tag(tag) => session.home_mut().map(|home| home.set_tag(tag)),
        BrowseCommand::Open(id) => {
            session.navigate(Route::project(id));
            Ok(())
        }
        BrowseCommand::Go(path) => {
            session.navigate(Route::resolve(&path));
            Ok(())
        }
        BrowseCommand::Next => session.carousel_mut().map(|c| c.next()),
        BrowseCommand::Prev => session.carousel_mut().map(|c| c.prev()),
        BrowseCommand::Select(n) => session.select_image(n - 1),
        BrowseCommand::Back => {
            session.back();
            Ok(())
        }
        BrowseCommand::Home => {
            session.navigate(Route::Home);
            Ok(())
        }
        BrowseCommand::Tags => return Some(session.catalog().tags().join(", ")),
        BrowseCommand::Help => return Some(HELP.to_owned()),
        BrowseCommand::Quit => Ok(()),
    };
    result.err().map(|err| err.to_string())
}

async fn write_screen<W>(
    output: &mut W,
    session: &Session,
    notice: Option<&str>,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut screen = text::render_view(session.catalog(), session.view());
    if let Some(notice) = notice {
        screen.push_str(&format!("> {notice}\n"));
    }
    screen.push('\n');
    output
        .write_all(screen.as_bytes())
        .await
        .context("write screen")?;
    output.flush().await.context("flush output")?;
    Ok(())
}

async fn write_line<W>(output: &mut W, line: &str) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output
        .write_all(format!("{line}\n").as_bytes())
        .await
        .context("write line")?;
    output.flush().await.context("flush output")?;
    Ok(())
}
