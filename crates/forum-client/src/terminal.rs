//! Line-oriented front-end.
//!
//! Reads one command per line, hands it to the matching [`Forum`] mutator and
//! prints the views that changed. Refused actions are printed as
//! `! <notice>`.

use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

use forum_shared::{ForumError, MediaId, PostId, Screen};
use forum_store::KeyValueStore;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::render::{ChatView, Direction, PostView, StagedView};
use crate::search::SearchView;
use crate::state::Forum;

const HELP: &str = "\
commands:
  profile <name>           save the profile form
  pic <uri> | cover <uri>  set the profile form pictures
  write <markup>           replace the post editor content
  attach <path> [mime]     stage a file for the next post
  detach <media-id>        remove a staged file
  publish                  publish the editor content
  send <text>              send a chat message
  search [query]           search posts
  open <post-id>           open a search result
  theme                    toggle light/dark
  go <screen>              feed | profile | createPost | search | chat
  export [path]            print or write a JSON export
  import <path>            replace the state from an export
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Profile(String),
    ProfilePic(String),
    CoverPic(String),
    Write(String),
    Attach { path: PathBuf, mime: Option<String> },
    Detach(MediaId),
    Publish,
    Send(String),
    Search(String),
    Open(PostId),
    Theme,
    Go(Screen),
    Export(Option<PathBuf>),
    Import(PathBuf),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let required = |what: &str| {
            if rest.is_empty() {
                Err(format!("usage: {word} <{what}>"))
            } else {
                Ok(rest.to_string())
            }
        };

        match word {
            "profile" => Ok(Self::Profile(rest.to_string())),
            "pic" => required("uri").map(Self::ProfilePic),
            "cover" => required("uri").map(Self::CoverPic),
            // content is validated by the mutator, not here
            "write" => Ok(Self::Write(rest.to_string())),
            "attach" => {
                let args = required("path")?;
                let mut parts = args.split_whitespace();
                let path = PathBuf::from(parts.next().unwrap_or_default());
                Ok(Self::Attach {
                    path,
                    mime: parts.next().map(str::to_string),
                })
            }
            "detach" => MediaId::parse(&required("media-id")?)
                .map(Self::Detach)
                .map_err(|e| format!("invalid media id: {e}")),
            "publish" => Ok(Self::Publish),
            "send" => Ok(Self::Send(rest.to_string())),
            "search" => Ok(Self::Search(rest.to_string())),
            "open" => PostId::parse(&required("post-id")?)
                .map(Self::Open)
                .map_err(|e| format!("invalid post id: {e}")),
            "theme" => Ok(Self::Theme),
            "go" => required("screen")?
                .parse()
                .map(Self::Go)
                .map_err(|e: forum_shared::types::UnknownScreen| e.to_string()),
            "export" => Ok(Self::Export((!rest.is_empty()).then(|| PathBuf::from(rest)))),
            "import" => required("path").map(|p| Self::Import(PathBuf::from(p))),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command: {other} (try `help`)")),
        }
    }
}

/// Pictures chosen in the profile form before it is saved.
#[derive(Debug, Default)]
struct ProfileForm {
    pic: Option<String>,
    cover: Option<String>,
}

pub struct Terminal<W> {
    out: W,
    form: ProfileForm,
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            form: ProfileForm::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Process `input` until it ends or a `quit` command.
    pub async fn run<S, R>(&mut self, forum: &mut Forum<S>, input: R) -> io::Result<()>
    where
        S: KeyValueStore,
        R: AsyncBufRead + Unpin,
    {
        self.write_screen(forum)?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(command) => {
                    if !self.execute(forum, command).await? {
                        break;
                    }
                }
                Err(usage) => writeln!(self.out, "? {usage}")?,
            }
            self.out.flush()?;
        }
        Ok(())
    }

    /// Run one command. Returns `false` when the session should end.
    pub async fn execute<S: KeyValueStore>(
        &mut self,
        forum: &mut Forum<S>,
        command: Command,
    ) -> io::Result<bool> {
        let outcome = match command {
            Command::Profile(name) => forum
                .save_profile(&name, self.form.pic.as_deref(), self.form.cover.as_deref())
                .map(|_| {
                    self.form = ProfileForm::default();
                }),
            Command::ProfilePic(uri) => {
                self.form.pic = Some(uri);
                Ok(())
            }
            Command::CoverPic(uri) => {
                self.form.cover = Some(uri);
                Ok(())
            }
            Command::Write(markup) => {
                forum.set_draft(&markup);
                forum.show_screen(Screen::CreatePost)
            }
            Command::Attach { path, mime } => forum
                .stage_file(&path, mime.as_deref())
                .await
                .map(|_| ()),
            Command::Detach(id) => {
                if !forum.remove_staged(id) {
                    writeln!(self.out, "? no staged media {id}")?;
                    return Ok(true);
                }
                Ok(())
            }
            Command::Publish => forum.publish_post().map(|_| ()),
            Command::Send(text) => forum
                .send_message(&text)
                .and_then(|_| forum.show_screen(Screen::Chat)),
            Command::Search(query) => {
                forum.search(&query);
                forum.show_screen(Screen::Search)
            }
            Command::Open(id) => forum.open_search_result(id),
            Command::Theme => forum.toggle_theme().map(|_| ()),
            Command::Go(screen) => forum.show_screen(screen),
            Command::Export(path) => self.export(forum, path).await,
            Command::Import(path) => match tokio::fs::read_to_string(&path).await {
                Ok(json) => forum.import_state(&json),
                Err(e) => Err(ForumError::InvalidImport(e.to_string())),
            },
            Command::Help => {
                writeln!(self.out, "{HELP}")?;
                return Ok(true);
            }
            Command::Quit => return Ok(false),
        };

        match outcome {
            Ok(()) => self.write_screen(forum)?,
            Err(e) if e.is_notice() => {
                writeln!(self.out, "! {e}")?;
                // the refusal moved to the profile form
                if e == ForumError::NoProfile {
                    self.write_screen(forum)?;
                }
            }
            Err(_) => {}
        }
        Ok(true)
    }

    async fn export<S: KeyValueStore>(
        &mut self,
        forum: &Forum<S>,
        path: Option<PathBuf>,
    ) -> Result<(), ForumError> {
        let json = forum.export_state()?;
        match path {
            Some(path) => tokio::fs::write(&path, json)
                .await
                .map_err(|e| ForumError::Store(e.to_string())),
            None => writeln!(self.out, "{json}").map_err(|e| ForumError::Store(e.to_string())),
        }
    }

    /// Print the active screen.
    fn write_screen<S: KeyValueStore>(&mut self, forum: &Forum<S>) -> io::Result<()> {
        let display = forum.display();
        writeln!(
            self.out,
            "== {} [{}]",
            display.nav.active,
            display.theme.theme.as_str()
        )?;

        match display.nav.active {
            Screen::Feed => write_feed(&mut self.out, &display.feed),
            Screen::Chat => write_chat(&mut self.out, &display.chat),
            Screen::Search => write_search(&mut self.out, &display.search),
            Screen::CreatePost => {
                writeln!(self.out, "draft: {}", forum.composer().content())?;
                write_staging(&mut self.out, &display.staging)
            }
            Screen::Profile => match &forum.state().current_user {
                Some(user) => writeln!(self.out, "profile: {} ({})", user.username, user.profile_pic),
                None => writeln!(self.out, "no profile yet, use `profile <name>`"),
            },
        }
    }
}

fn write_feed(out: &mut impl Write, feed: &[PostView]) -> io::Result<()> {
    if feed.is_empty() {
        return writeln!(out, "(no posts)");
    }
    for post in feed {
        writeln!(out, "[{}] {} - {}", post.id, post.author, post.date)?;
        writeln!(out, "  {}", post.content)?;
        for media in &post.media {
            writeln!(out, "  <{:?}> {} bytes of data", media.kind, media.src.len())?;
        }
        writeln!(
            out,
            "  likes {} / comments {}",
            post.likes, post.comment_count
        )?;
        for comment in &post.comments {
            writeln!(out, "    {} ({}): {}", comment.author, comment.date, comment.content)?;
        }
    }
    Ok(())
}

fn write_chat(out: &mut impl Write, chat: &ChatView) -> io::Result<()> {
    if chat.messages.is_empty() {
        return writeln!(out, "(no messages)");
    }
    for message in &chat.messages {
        let arrow = match message.direction {
            Direction::Sent => ">",
            Direction::Received => "<",
        };
        writeln!(out, "{arrow} {}", message.content)?;
    }
    Ok(())
}

fn write_search(out: &mut impl Write, search: &SearchView) -> io::Result<()> {
    match search {
        SearchView::Prompt => writeln!(out, "Type a search term to begin"),
        SearchView::NoResults => writeln!(out, "No results found"),
        SearchView::Results(results) => {
            for result in results {
                writeln!(out, "[{}] {}", result.post_id, result.title)?;
                writeln!(out, "  {}...", result.preview)?;
            }
            Ok(())
        }
    }
}

fn write_staging(out: &mut impl Write, staged: &[StagedView]) -> io::Result<()> {
    for item in staged {
        let preview = if item.preview_src.is_some() {
            format!("{:?}", item.kind)
        } else {
            "no preview".to_string()
        };
        writeln!(out, "  staged {} {} ({preview})", item.id, item.mime_type)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::fresh_forum;

    #[test]
    fn parses_commands() {
        assert_eq!(
            "profile  Alice Smith ".parse::<Command>().unwrap(),
            Command::Profile("Alice Smith".into())
        );
        assert_eq!(
            "attach /tmp/a.bin audio/ogg".parse::<Command>().unwrap(),
            Command::Attach {
                path: PathBuf::from("/tmp/a.bin"),
                mime: Some("audio/ogg".into())
            }
        );
        assert_eq!("search".parse::<Command>().unwrap(), Command::Search(String::new()));
        assert_eq!("go chat".parse::<Command>().unwrap(), Command::Go(Screen::Chat));
        assert_eq!("export".parse::<Command>().unwrap(), Command::Export(None));
        assert!("go nowhere".parse::<Command>().is_err());
        assert!("open not-a-uuid".parse::<Command>().is_err());
        assert!("pic".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
    }

    #[tokio::test]
    async fn scripted_session() {
        let mut forum = fresh_forum();
        let script = b"send too early\n\
profile alice\n\
write <b>hello</b> world\n\
publish\n\
send hi there\n\
send   \n\
search hello\n\
bogus\n\
quit\n\
send never processed\n";

        let mut terminal = Terminal::new(Vec::new());
        terminal.run(&mut forum, &script[..]).await.unwrap();
        let output = String::from_utf8(terminal.into_inner()).unwrap();

        assert!(output.contains("! Please create a profile first\n== profileScreen [light]"));
        assert!(output.contains("<b>hello</b> world"));
        assert!(output.contains("> hi there"));
        assert!(output.contains("  hello world..."));
        assert!(output.contains("? unknown command: bogus"));
        // blank chat input is dropped silently
        assert!(!output.contains("Message is empty"));

        assert_eq!(forum.state().posts.len(), 1);
        assert_eq!(forum.state().messages.len(), 1);
        assert_eq!(forum.state().current_screen, Screen::Search);
    }

    #[tokio::test]
    async fn unknown_detach_does_not_redraw() {
        let mut forum = fresh_forum();
        let mut terminal = Terminal::new(Vec::new());
        let id = MediaId::new();

        assert!(terminal.execute(&mut forum, Command::Detach(id)).await.unwrap());
        let output = String::from_utf8(terminal.into_inner()).unwrap();
        assert_eq!(output, format!("? no staged media {id}\n"));
    }
}
