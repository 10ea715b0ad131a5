use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use chrono::{Datelike, Local};
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rythu_core::error::RythuError;
use rythu_core::home::{ai_tip, my_crop_alert, weather};
use rythu_core::i18n::{Catalog, TextKey, Translator};
use rythu_core::language::Language;
use rythu_core::market::{CropCategory, CropSeason, RateFilter, crops_for_season, mandi_rates};
use rythu_core::session::ChatTurn;
use rythu_core::voice::{UnsupportedRecognizer, VoiceCaptureAdapter, voice_notice};
use rythu_interaction::config::LoadedConfig;
use rythu_interaction::{ChatSession, gemini_session};

const COMMANDS: [&str; 8] = [
    "/home", "/lang", "/rates", "/crops", "/voice", "/history", "/help", "quit",
];

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Quit,
    Help,
    Home,
    History,
    Voice,
    /// `None` lists the available languages.
    Lang(Option<Language>),
    Rates(RateFilter),
    Crops(CropSeason),
    Message(String),
}

fn parse_command(line: &str) -> Result<Command, RythuError> {
    let trimmed = line.trim();
    if trimmed == "quit" || trimmed == "exit" {
        return Ok(Command::Quit);
    }
    if !trimmed.starts_with('/') {
        return Ok(Command::Message(trimmed.to_string()));
    }

    let mut parts = trimmed.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match name {
        "/help" => Ok(Command::Help),
        "/home" => Ok(Command::Home),
        "/history" => Ok(Command::History),
        "/voice" => Ok(Command::Voice),
        "/lang" => match args.first() {
            Some(code) => Ok(Command::Lang(Some(code.parse()?))),
            None => Ok(Command::Lang(None)),
        },
        "/crops" => {
            let season = match args.first() {
                Some(season) => season.parse()?,
                None => CropSeason::Kharif,
            };
            Ok(Command::Crops(season))
        }
        "/rates" => Ok(Command::Rates(parse_rate_filter(&args))),
        other => Err(RythuError::invalid_input(format!(
            "Unknown command '{other}'. Type /help for the list."
        ))),
    }
}

/// `/rates [grains|vegetables|pulses|other|all] [--mine] [search words...]`
fn parse_rate_filter(args: &[&str]) -> RateFilter {
    let mut filter = RateFilter::default();
    let mut search = Vec::new();

    for (index, arg) in args.iter().enumerate() {
        if *arg == "--mine" {
            filter.my_crops_only = true;
        } else if index == 0 && arg.eq_ignore_ascii_case("all") {
            filter.category = None;
        } else if let (0, Ok(category)) = (index, arg.parse::<CropCategory>()) {
            filter.category = Some(category);
        } else {
            search.push(*arg);
        }
    }

    filter.search = search.join(" ");
    filter
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_turn(turn: &ChatTurn, t: &Translator) {
    let stamp = format!("[{}]", turn.display_time()).bright_black();
    if turn.is_user() {
        println!("{} {}", stamp, format!("> {}", turn.text()).green());
        return;
    }

    println!("{} {}", stamp, t.t(TextKey::ChatbotName).bright_magenta());
    for line in turn.text().lines() {
        println!("{}", line.bright_blue());
    }
    if let Some(sources) = turn.sources() {
        println!("{}", t.t(TextKey::SearchSources).bright_black());
        for (index, citation) in sources.iter().enumerate() {
            println!(
                "  {}. {} {}",
                index + 1,
                citation.display_title(),
                format!("<{}>", citation.uri).bright_black()
            );
        }
    }
}

fn print_help() {
    println!("{}", "Commands:".bright_yellow());
    println!("  /home                  weather, my crop alert and today's tip");
    println!("  /lang [te|en|hi]       switch language (resets the conversation)");
    println!("  /rates [category] [--mine] [search]   mandi price board for this month");
    println!("  /crops [kharif|rabi]   crop guide for a season");
    println!("  /voice                 dictate a message");
    println!("  /history               show the conversation");
    println!("  quit                   exit");
}

async fn print_greeting(session: &ChatSession) {
    let t = session.translator().await;
    if let Some(greeting) = session.turns().await.first() {
        print_turn(greeting, &t);
    }
    let suggestions = session.suggested_questions().await;
    if !suggestions.is_empty() {
        println!("{}", t.t(TextKey::ChatbotQuickQuestions).bright_yellow());
        for question in suggestions {
            println!("  - {}", question.yellow());
        }
    }
    println!();
}

fn print_rates(filter: &RateFilter, t: &Translator) -> Result<()> {
    let today = Local::now().date_naive();
    let rates = mandi_rates(today.year(), today.month(), today.year())?;
    let visible = filter.apply(&rates, t.catalog());

    println!("{}", t.t(TextKey::MandiRates).bright_magenta().bold());
    if visible.is_empty() {
        println!("{}", "-".bright_black());
    }
    for rate in visible {
        let marker = if rate.is_user_crop { "*" } else { " " };
        println!("{} {}", marker.bright_green(), rate.summary(t));
    }
    Ok(())
}

fn print_home(t: &Translator) -> Result<()> {
    let weather = weather();
    println!("{}", t.t(TextKey::WeatherTitle).bright_magenta().bold());
    println!("  {}", weather.summary(t).bright_blue());
    println!("  {}", t.t(TextKey::Forecast).bright_black());
    for day in &weather.forecast {
        println!("    {}", day.summary(t));
    }

    let today = Local::now().date_naive();
    let rates = mandi_rates(today.year(), today.month(), today.year())?;
    if let Some(alert) = my_crop_alert(&rates) {
        println!("{}", t.t(TextKey::MyCropAlertTitle).bright_magenta().bold());
        println!("  {}", alert.summary(t).bright_blue());
        let report = format!("{}: /rates --mine", t.t(TextKey::MarketReport));
        println!("  {}", report.bright_black());
    }

    let tip = ai_tip();
    println!("{}", t.t(TextKey::AiTipTitle).bright_magenta().bold());
    println!("  {}", t.t(tip.title).green());
    println!("  {}", t.t(tip.content));
    Ok(())
}

fn print_crops(season: CropSeason, t: &Translator) {
    println!(
        "{} - {}",
        t.t(TextKey::CropGuide).bright_magenta().bold(),
        t.t(season.text_key())
    );
    for item in crops_for_season(season) {
        println!(
            "  {} | {} | {} | {}",
            item.display_name(t).bright_blue(),
            t.t(item.sowing_period),
            t.t(item.duration),
            t.t(item.suitability).green()
        );
    }
}

async fn capture_voice(voice: &mut VoiceCaptureAdapter, session: &ChatSession) -> Option<String> {
    voice.set_locale(session.voice_locale().await);
    voice.start_listening();

    let t = session.translator().await;
    if voice.is_listening() {
        println!("{}", t.t(TextKey::Listening).bright_yellow());
        while voice.is_listening() {
            voice.next_event().await;
        }
    }

    if let Some(error) = voice.error() {
        println!("{}", voice_notice(error, &t).yellow());
        return None;
    }
    voice.take_transcript()
}

async fn send(session: &ChatSession, text: &str) {
    let t = session.translator().await;
    println!("{}", "...".bright_black());

    match session.send_message(text).await {
        Ok(turn) => print_turn(&turn, &t),
        Err(RythuError::RequestInFlight) => {
            println!("{}", t.t(TextKey::RequestInFlight).yellow());
        }
        Err(RythuError::SessionReset) => {}
        Err(err) => eprintln!("{}", format!("Error: {err}").red()),
    }
    println!();
}

/// The main entry point for the Rythu Mitra readline REPL.
#[tokio::main]
async fn main() -> Result<()> {
    let loaded = LoadedConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_tracing(&config.app.log_level);
    if let Err(err) = &loaded {
        warn!(error = %err, "Failed to load configuration; using defaults");
    }
    info!(
        model = config.secrets.gemini_model().unwrap_or(&config.app.chat.model),
        language = %config.app.chat.default_language,
        "Starting Rythu Mitra REPL"
    );

    let session = Arc::new(gemini_session(&config.app, &config.secrets));
    let catalog = Arc::new(Catalog::builtin());
    let mut voice = VoiceCaptureAdapter::new(
        Box::new(UnsupportedRecognizer),
        session.voice_locale().await,
    );

    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Rythu Mitra ===".bright_magenta().bold());
    println!("{}", "Type /help for commands or 'quit' to exit.".bright_black());
    println!();
    print_greeting(&session).await;

    loop {
        let t = Translator::new(session.language().await, Arc::clone(&catalog));
        let readline = rl.readline(&format!("{} ", t.t(TextKey::InputPlaceholder).bright_black()));

        let line = match readline {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line.as_str());

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{}", err.to_string().yellow());
                continue;
            }
        };

        match command {
            Command::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Command::Help => print_help(),
            Command::Home => {
                if let Err(err) = print_home(&t) {
                    eprintln!("{}", format!("Error: {err}").red());
                }
            }
            Command::History => {
                for turn in session.turns().await {
                    print_turn(&turn, &t);
                }
            }
            Command::Lang(None) => {
                for language in Language::all() {
                    let marker = if language == t.language() { "*" } else { " " };
                    println!("{marker} {} ({language})", language.native_name());
                }
            }
            Command::Lang(Some(language)) => {
                session.set_language(language).await;
                let t = session.translator().await;
                println!(
                    "{}",
                    t.t_args(TextKey::LanguageChanged, &[&language.native_name()])
                        .bright_green()
                );
                print_greeting(&session).await;
            }
            Command::Rates(filter) => {
                if let Err(err) = print_rates(&filter, &t) {
                    eprintln!("{}", format!("Error: {err}").red());
                }
            }
            Command::Crops(season) => print_crops(season, &t),
            Command::Voice => {
                if let Some(transcript) = capture_voice(&mut voice, &session).await {
                    println!("{}", format!("> {transcript}").green());
                    send(&session, &transcript).await;
                }
            }
            Command::Message(text) => send(&session, &text).await,
        }
    }

    Ok(())
}
