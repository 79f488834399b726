//! Line-oriented identity console. It plays the browser's part against the
//! same backend: one cookie-aware client, one session store, startup restore
//! and the route gate deciding what `whoami` may show.

use crate::{
    app_lib::{api::native::ApiClient, AppError, GIT_COMMIT_HASH},
    cli::actions::Action,
    features::auth::{
        bootstrap::{bootstrap, Ready},
        client::{IdentityApi, NativeIdentityClient},
        guards::{evaluate, GateDecision},
        session::SessionStore,
        token::normalize_token,
        types::{RegisterRequest, User},
    },
};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::{
    io::{self, IsTerminal},
    time::Duration,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tracing::{debug, info};

const PROMPT: &str = "crossbox> ";
const PASSWORD_PROMPT: &str = "password: ";

const HELP: &str = "\
commands:
  register <email> <first-name> <last-name>   create an account (asks for a password)
  activate <user-id> <token...>               activate an account with the emailed token
  login <email>                               sign in (asks for a password)
  whoami                                      show the signed-in user
  refresh                                     reload the current user from the server
  logout                                      sign out
  help                                        show this help
  quit                                        leave the console";

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register {
        email: String,
        first_name: String,
        last_name: String,
    },
    Activate {
        user_id: String,
        token: String,
    },
    Login {
        email: String,
    },
    WhoAmI,
    Refresh,
    Logout,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns a usage message for unknown commands or missing arguments.
pub fn parse_line(line: &str) -> std::result::Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };

    let command = match name.to_lowercase().as_str() {
        "register" => match (words.next(), words.next(), words.next()) {
            (Some(email), Some(first), Some(last)) => Command::Register {
                email: email.to_string(),
                first_name: first.to_string(),
                last_name: last.to_string(),
            },
            _ => return Err("usage: register <email> <first-name> <last-name>".to_string()),
        },
        "activate" => {
            let user_id = words.next();
            let token = words.collect::<Vec<_>>().join(" ");
            match user_id {
                Some(user_id) if !token.is_empty() => Command::Activate {
                    user_id: user_id.to_string(),
                    token,
                },
                _ => return Err("usage: activate <user-id> <token...>".to_string()),
            }
        }
        "login" => match words.next() {
            Some(email) => Command::Login {
                email: email.to_string(),
            },
            None => return Err("usage: login <email>".to_string()),
        },
        "whoami" => Command::WhoAmI,
        "refresh" => Command::Refresh,
        "logout" => Command::Logout,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };

    Ok(Some(command))
}

/// Entry point for [`Action::Console`].
///
/// # Errors
///
/// Returns an error if the API client cannot be built or the terminal fails.
pub async fn handle(action: Action) -> Result<()> {
    let Action::Console { api_url, timeout } = action;

    let api = ApiClient::new(&api_url, Duration::from_secs(timeout))
        .context("Failed to create the API client")?;
    info!(api_url = api.base_url(), timeout, "starting console");

    let store = SessionStore::new(NativeIdentityClient::new(api));
    let ready = bootstrap(&store).await;
    let console = Console::new(store, ready).with_password_input(PasswordInput::detect());

    let reader = BufReader::new(tokio::io::stdin());
    let mut writer = tokio::io::stdout();
    write_line(
        &mut writer,
        &format!(
            "{} {} ({GIT_COMMIT_HASH}) connected to {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            console.store().api().base_url()
        ),
    )
    .await?;
    console.run(reader, &mut writer).await
}

/// Where passwords come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PasswordInput {
    /// The next input line. Used for piped input.
    #[default]
    Line,
    /// The controlling terminal with echo turned off.
    Hidden,
}

impl PasswordInput {
    pub fn detect() -> Self {
        if std::io::stdin().is_terminal() {
            PasswordInput::Hidden
        } else {
            PasswordInput::Line
        }
    }
}

pub struct Console<A> {
    store: SessionStore<A>,
    ready: Ready,
    password_input: PasswordInput,
}

enum Flow {
    Continue,
    Quit,
}

impl<A: IdentityApi> Console<A> {
    pub fn new(store: SessionStore<A>, ready: Ready) -> Self {
        Self {
            store,
            ready,
            password_input: PasswordInput::default(),
        }
    }

    #[must_use]
    pub fn with_password_input(mut self, password_input: PasswordInput) -> Self {
        self.password_input = password_input;
        self
    }

    pub fn store(&self) -> &SessionStore<A> {
        &self.store
    }

    /// Reads commands until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error only when reading or writing the terminal fails; backend
    /// failures are printed and the loop continues.
    pub async fn run<R, W>(&self, reader: R, writer: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        match self.store.current_user() {
            Some(user) => write_line(writer, &format!("signed in as {}", describe(&user))).await?,
            None => write_line(writer, "not signed in; type `help` for commands").await?,
        }

        loop {
            writer.write_all(PROMPT.as_bytes()).await?;
            writer.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let command = match parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(usage) => {
                    write_line(writer, &usage).await?;
                    continue;
                }
            };

            debug!(?command, "console command");
            if let Flow::Quit = self.execute(command, &mut lines, writer).await? {
                break;
            }
        }

        Ok(())
    }

    /// Prompts for a password. `None` means input ended.
    async fn read_password<R, W>(
        &self,
        lines: &mut Lines<R>,
        writer: &mut W,
    ) -> Result<Option<SecretString>>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        match self.password_input {
            PasswordInput::Line => {
                writer.write_all(PASSWORD_PROMPT.as_bytes()).await?;
                writer.flush().await?;
                let line = lines.next_line().await?;
                Ok(line.map(|line| {
                    SecretString::from(line.trim_end_matches(['\r', '\n']).to_string())
                }))
            }
            PasswordInput::Hidden => {
                let typed =
                    tokio::task::spawn_blocking(|| rpassword::prompt_password(PASSWORD_PROMPT))
                        .await?;
                match typed {
                    Ok(password) => Ok(Some(SecretString::from(password))),
                    Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
                    Err(err) => Err(err).context("Failed to read the password"),
                }
            }
        }
    }

    async fn execute<R, W>(
        &self,
        command: Command,
        lines: &mut Lines<R>,
        writer: &mut W,
    ) -> Result<Flow>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let message = match command {
            Command::Register {
                email,
                first_name,
                last_name,
            } => {
                let Some(password) = self.read_password(lines, writer).await? else {
                    return Ok(Flow::Quit);
                };
                let request = RegisterRequest {
                    email: email.clone(),
                    first_name,
                    last_name,
                    password: password.expose_secret().to_string(),
                };
                match self.store.api().register(&request).await {
                    Ok(()) => {
                        format!("registered {email}; check your inbox for the activation token")
                    }
                    Err(err) => failure(&err),
                }
            }
            Command::Activate { user_id, token } => {
                let token = normalize_token(&token);
                match self.store.api().activate_account(&user_id, &token).await {
                    Ok(()) => format!("account {} activated; you can sign in now", user_id.trim()),
                    Err(err) => failure(&err),
                }
            }
            Command::Login { email } => {
                let Some(password) = self.read_password(lines, writer).await? else {
                    return Ok(Flow::Quit);
                };
                match self.store.sign_in(&email, password.expose_secret()).await {
                    Ok(user) => format!("signed in as {}", describe(&user)),
                    Err(err) => failure(&err),
                }
            }
            Command::WhoAmI => match evaluate(self.ready, self.store.current_user()) {
                GateDecision::Render(user) => whoami(&user),
                GateDecision::Redirect(path) => format!("not signed in; sign in first ({path})"),
            },
            Command::Refresh => match self.store.refresh_current_user().await {
                Ok(user) => format!("session refreshed for {}", describe(&user)),
                Err(err) if self.store.is_authenticated() => {
                    format!("{}; keeping the current session", failure(&err))
                }
                Err(err) => failure(&err),
            },
            Command::Logout => {
                self.store.sign_out().await;
                "signed out".to_string()
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Flow::Quit),
        };

        write_line(writer, &message).await?;
        Ok(Flow::Continue)
    }
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, message: &str) -> Result<()> {
    writer.write_all(message.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

fn describe(user: &User) -> String {
    format!("{} <{}>", user.display_name(), user.email)
}

fn whoami(user: &User) -> String {
    let mut out = format!("{}\n  id: {}", describe(user), user.id);
    if !user.is_active {
        out.push_str("\n  account not activated yet");
    }
    out
}

fn failure(err: &AppError) -> String {
    if err.is_network() {
        format!("error: {err} (is the API running?)")
    } else {
        format!("error: {err}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::{session::fake::FakeApi, types::fixtures};

    async fn console_with(api: FakeApi) -> Console<FakeApi> {
        let store = SessionStore::new(api);
        let ready = bootstrap(&store).await;
        Console::new(store, ready)
    }

    async fn run_script(console: &Console<FakeApi>, script: &str) -> Result<String> {
        let mut output = Vec::new();
        console.run(script.as_bytes(), &mut output).await?;
        Ok(String::from_utf8(output)?)
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("WHOAMI"), Ok(Some(Command::WhoAmI)));
        assert_eq!(parse_line("exit"), Ok(Some(Command::Quit)));
        assert_eq!(
            parse_line("login ada@crossbox.fit"),
            Ok(Some(Command::Login {
                email: "ada@crossbox.fit".to_string()
            }))
        );
        assert_eq!(
            parse_line("register ada@crossbox.fit Ada Lovelace"),
            Ok(Some(Command::Register {
                email: "ada@crossbox.fit".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
            }))
        );
    }

    #[test]
    fn activate_keeps_the_whole_token() {
        assert_eq!(
            parse_line("activate u-1 ab cdef  g"),
            Ok(Some(Command::Activate {
                user_id: "u-1".to_string(),
                token: "ab cdef g".to_string(),
            }))
        );
    }

    #[test]
    fn rejects_bad_input_with_usage() {
        assert!(parse_line("login").is_err_and(|usage| usage.starts_with("usage: login")));
        assert!(parse_line("activate u-1").is_err());
        assert!(parse_line("register ada@crossbox.fit Ada").is_err());
        assert!(parse_line("dance").is_err_and(|msg| msg.contains("unknown command")));
    }

    #[tokio::test]
    async fn whoami_is_gated_until_sign_in() -> Result<()> {
        let api = FakeApi::default();
        let user = fixtures::user("u-1", "ada@crossbox.fit");
        api.set_sign_in(Ok(user.clone()));
        api.push_current(Err(AppError::Auth { code: 401 }));
        api.push_current(Ok(user));
        let console = console_with(api).await;

        let script = "whoami\nlogin ada@crossbox.fit\nsecret-pass\nwhoami\nquit\n";
        let output = run_script(&console, script).await?;

        assert!(output.starts_with("not signed in"));
        assert!(output.contains("not signed in; sign in first (/auth)"));
        assert!(output.contains("signed in as Ada Lovelace <ada@crossbox.fit>"));
        assert!(output.contains("id: u-1"));
        assert!(!output.contains("secret-pass"));
        assert!(console.store().is_authenticated());
        Ok(())
    }

    #[tokio::test]
    async fn restored_session_is_announced() -> Result<()> {
        let api = FakeApi::default();
        api.push_current(Ok(fixtures::user("u-1", "ada@crossbox.fit")));
        let console = console_with(api).await;

        let output = run_script(&console, "").await?;

        assert!(output.starts_with("signed in as Ada Lovelace <ada@crossbox.fit>"));
        Ok(())
    }

    #[tokio::test]
    async fn logout_clears_even_when_backend_fails() -> Result<()> {
        let api = FakeApi::default();
        api.push_current(Ok(fixtures::user("u-1", "ada@crossbox.fit")));
        api.fail_sign_out(AppError::Network("connection refused".to_string()));
        let console = console_with(api).await;

        let output = run_script(&console, "logout\nwhoami\n").await?;

        assert!(output.contains("signed out"));
        assert!(output.contains("not signed in; sign in first"));
        assert!(!console.store().is_authenticated());
        Ok(())
    }

    #[tokio::test]
    async fn failed_login_reports_and_continues() -> Result<()> {
        let console = console_with(FakeApi::default()).await;

        let output = run_script(&console, "login ada@crossbox.fit\nwrong\nhelp\n").await?;

        assert!(output.contains("error: Not signed in or session expired (401)"));
        assert!(output.contains("commands:"));
        assert!(!console.store().is_authenticated());
        Ok(())
    }

    #[tokio::test]
    async fn input_ending_at_password_prompt_stops_cleanly() -> Result<()> {
        let console = console_with(FakeApi::default()).await;

        let output = run_script(&console, "login ada@crossbox.fit\n").await?;

        assert!(output.ends_with("password: "));
        assert_eq!(console.store().api().fetches(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn failed_refresh_keeps_the_session() -> Result<()> {
        let api = FakeApi::default();
        api.push_current(Ok(fixtures::user("u-1", "ada@crossbox.fit")));
        api.push_current(Err(AppError::Timeout("Request timed out".to_string())));
        let console = console_with(api).await;

        let output = run_script(&console, "refresh\nwhoami\n").await?;

        assert!(output.contains("(is the API running?); keeping the current session"));
        assert!(output.contains("id: u-1"));
        assert!(console.store().is_authenticated());
        Ok(())
    }

    #[tokio::test]
    async fn piped_passwords_are_read_from_input_without_echo() -> Result<()> {
        let api = FakeApi::default();
        api.set_sign_in(Ok(fixtures::user("u-1", "ada@crossbox.fit")));
        api.push_current(Err(AppError::Auth { code: 401 }));
        api.push_current(Ok(fixtures::user("u-1", "ada@crossbox.fit")));
        let console = console_with(api).await.with_password_input(PasswordInput::Line);

        let output = run_script(&console, "login ada@crossbox.fit\nhunter2hunter2\n").await?;

        assert!(output.contains("password: "));
        assert!(output.contains("signed in as Ada Lovelace"));
        assert!(!output.contains("hunter2"));
        Ok(())
    }

    #[test]
    fn password_input_defaults_to_line() {
        assert_eq!(PasswordInput::default(), PasswordInput::Line);
    }

    #[tokio::test]
    async fn usage_errors_do_not_stop_the_loop() -> Result<()> {
        let console = console_with(FakeApi::default()).await;

        let output = run_script(&console, "login\nactivate u-1 abc def\n").await?;

        assert!(output.contains("usage: login <email>"));
        assert!(output.contains("account u-1 activated"));
        Ok(())
    }
}
