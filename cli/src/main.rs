mod command;
mod output;

use anyhow::Result;
use clap::Parser;
use command::{Command, HELP};
use pdf_summary::{Config, Lang, Session, SummaryService};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

#[derive(Parser)]
#[command(name = "pdf-summary")]
#[command(about = "Summarize a PDF by URL and ask follow-up questions about it")]
#[command(version)]
struct Args {
    /// URL of the PDF to summarize (prompted for when omitted)
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Answer language: ko or en (defaults to SUMMARY_LANG, then ko)
    #[arg(short, long)]
    lang: Option<Lang>,

    /// Base URL of the summary service (overrides SUMMARY_API_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Follow-up question to ask after the summary; may be repeated
    #[arg(short = 'q', long = "question", value_name = "QUESTION")]
    questions: Vec<String>,

    /// Exit after the summary and queued questions instead of reading stdin
    #[arg(long)]
    no_interactive: bool,
}

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(api_url) = &args.api_url {
        config = config.with_api_url(api_url);
    }
    let lang = args.lang.unwrap_or(config.lang);
    log::info!("Using summary service at {}", config.summary_endpoint());

    let session = Session::new(SummaryService::new(&config)?, lang);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let url = match args.url {
        Some(url) => url,
        None => match prompt(&mut input, "📄 PDF URL: ").await? {
            Some(url) => url,
            None => return Ok(()),
        },
    };

    let mut ok = summarize(&session, &url, lang).await;
    for question in &args.questions {
        ok &= ask(&session, question).await;
    }

    if args.no_interactive {
        if !ok {
            std::process::exit(1);
        }
        return Ok(());
    }

    println!("{HELP}");
    while let Some(line) = prompt(&mut input, "\n➕ ").await? {
        match Command::parse(&line) {
            Command::Ask(question) => {
                ask(&session, &question).await;
            }
            Command::ShowLog => {
                println!("{}", output::render_log(session.lang(), &session.follow_ups()));
            }
            Command::SetLang(lang) => {
                session.set_lang(lang);
                println!("🔤 {}", lang.label());
            }
            Command::NewDocument(url) => {
                summarize(&session, &url, session.lang()).await;
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Skip => {}
            Command::Invalid(message) => eprintln!("{message}"),
        }
    }

    Ok(())
}

async fn prompt(input: &mut Input, label: &str) -> Result<Option<String>> {
    print!("{label}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}

async fn summarize(session: &Session, url: &str, lang: Lang) -> bool {
    println!("{}", output::progress(lang, false));
    match session.request_summary(url, lang).await {
        Ok(summary) => {
            println!("{}", output::render_summary(lang, &summary));
            true
        }
        Err(err) => {
            log::debug!("Summary failed: {:?}", err);
            eprintln!("{}", err.user_message(lang));
            false
        }
    }
}

async fn ask(session: &Session, question: &str) -> bool {
    let lang = session.lang();
    println!("{}", output::progress(lang, true));
    match session.ask_follow_up(question).await {
        Ok(answer) => {
            println!("Q: {}\nA: {}", question.trim(), answer);
            true
        }
        Err(err) => {
            log::debug!("Follow-up failed: {:?}", err);
            eprintln!("{}", err.user_message(lang));
            false
        }
    }
}
