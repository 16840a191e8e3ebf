mod client;
mod console;

use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use quiz_core::Clock;
use quiz_core::model::Intake;
use quiz_core::session::{QuestionRequest, QuizSession, Stage};
use services::documents::{Document, certificate_document, report_document};

use crate::client::BackendClient;
use crate::console::{Action, parse_action, render};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidServer { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidServer { raw } => write!(f, "invalid --server value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  quiz [--server <url>] [--out <dir>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --server http://localhost:4000");
    eprintln!("  --out .");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_SERVER_URL, QUIZ_OUT_DIR");
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    server_url: String,
    out_dir: PathBuf,
}

impl Args {
    /// `None` means `--help` was requested.
    fn parse(
        env: impl Fn(&str) -> Option<String>,
        args: impl IntoIterator<Item = String>,
    ) -> Result<Option<Self>, ArgsError> {
        let mut server_url =
            env("QUIZ_SERVER_URL").unwrap_or_else(|| "http://localhost:4000".into());
        let mut out_dir = env("QUIZ_OUT_DIR").map_or_else(|| PathBuf::from("."), PathBuf::from);

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--server" => server_url = require_value(&mut args, "--server")?,
                "--out" => out_dir = require_value(&mut args, "--out")?.into(),
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if !(server_url.starts_with("http://") || server_url.starts_with("https://")) {
            return Err(ArgsError::InvalidServer { raw: server_url });
        }

        Ok(Some(Self {
            server_url,
            out_dir,
        }))
    }
}

struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Next input line without its terminator; `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, label: &str, keep: Option<&str>) -> io::Result<Option<String>> {
        match keep {
            Some(current) => write!(self.output, "{label} [{current}]: ")?,
            None => write!(self.output, "{label}: ")?,
        }
        self.output.flush()?;
        Ok(self.read_line()?.map(|line| match keep {
            Some(current) if line.trim().is_empty() => current.to_string(),
            _ => line,
        }))
    }

    fn say(&mut self, message: impl fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }
}

/// Ask for the intake fields; `None` at end of input.
fn read_intake<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    previous: Option<&Intake>,
) -> io::Result<Option<Intake>> {
    loop {
        let Some(full_name) = term.prompt("Full name", previous.map(Intake::full_name))? else {
            return Ok(None);
        };
        let Some(email) = term.prompt("Email", previous.map(Intake::email))? else {
            return Ok(None);
        };
        let Some(role) = term.prompt("Role", previous.map(Intake::role))? else {
            return Ok(None);
        };
        let Some(difficulty) = term.prompt(
            "Difficulty (easy/medium/hard)",
            previous.map(Intake::difficulty),
        )?
        else {
            return Ok(None);
        };

        match Intake::new(full_name, email, role, difficulty) {
            Ok(intake) => return Ok(Some(intake)),
            Err(err) => term.say(format_args!("! {err}"))?,
        }
    }
}

fn save(document: &Document, out_dir: &Path) -> io::Result<PathBuf> {
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(&document.file_name);
    std::fs::write(&path, &document.html)?;
    Ok(path)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let Some(args) = Args::parse(|key| std::env::var(key).ok(), std::env::args().skip(1))
        .map_err(|e| {
            eprintln!("{e}");
            print_usage();
            e
        })?
    else {
        print_usage();
        return Ok(());
    };

    let backend = BackendClient::new(&args.server_url);
    let clock = Clock::default_clock();
    let stdin = io::stdin();
    let mut term = Terminal {
        input: stdin.lock(),
        output: io::stdout().lock(),
    };

    let mut session = QuizSession::new();
    let mut pending: Option<QuestionRequest> = None;

    loop {
        render(&session.view(), &mut term.output)?;

        match session.stage() {
            Stage::IntakeForm => {
                let Some(intake) = read_intake(&mut term, session.intake())? else {
                    return Ok(());
                };
                pending = Some(session.submit_form(intake)?);
                continue;
            }
            Stage::Generating => {
                let Some(request) = pending.take() else {
                    session.generation_failed()?;
                    continue;
                };
                match backend.fetch_questions(&request).await {
                    Ok(questions) => {
                        if session.questions_loaded(questions).is_err() {
                            term.say("! The server returned no questions.")?;
                        }
                    }
                    Err(err) => {
                        term.say(format_args!("! {err}"))?;
                        session.generation_failed()?;
                    }
                }
                continue;
            }
            _ => {}
        }

        let Some(line) = term.read_line()? else {
            return Ok(());
        };

        match parse_action(session.stage(), &line) {
            Action::Quit => return Ok(()),
            Action::Download => {
                let document = match (session.stage(), session.report(), session.certificate()) {
                    (Stage::Certificate, _, Some(certificate)) => {
                        Some((certificate_document(certificate), "Certificate"))
                    }
                    (_, Some(report), _) => Some((report_document(report), "Report")),
                    _ => None,
                };
                if let Some((document, label)) = document {
                    match save(&document, &args.out_dir) {
                        Ok(path) => term.say(format_args!(
                            "{label} downloaded! ({})",
                            path.display()
                        ))?,
                        Err(err) => term.say(format_args!("! Failed to save {label}: {err}"))?,
                    }
                }
            }
            Action::Unknown(input) => {
                term.say(format_args!("Unrecognised input: {input:?}"))?;
            }
            action => {
                if let Err(err) = apply(&mut session, &action, &clock) {
                    term.say(format_args!("! {err}"))?;
                }
            }
        }
    }
}

/// Apply a session command. Output-only actions are left to the caller.
fn apply(
    session: &mut QuizSession,
    action: &Action,
    clock: &Clock,
) -> Result<(), quiz_core::Error> {
    match action {
        Action::Begin => session.begin()?,
        Action::About => session.show_about()?,
        Action::Back => session.leave_about()?,
        Action::Mode(mode) => session.select_mode(*mode)?,
        Action::Choose(index) => session.select_option(*index)?,
        Action::Next => session.advance()?,
        Action::Clear => session.clear_selection()?,
        Action::Submit => {
            session.submit()?;
        }
        Action::Certificate => {
            session.request_certificate(clock)?;
        }
        Action::Restart => session.restart()?,
        Action::Download | Action::Quit | Action::Unknown(_) => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
