use pdf_summary::Lang;

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ask(String),
    ShowLog,
    SetLang(Lang),
    NewDocument(String),
    Help,
    Quit,
    Skip,
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Skip;
        }
        let Some(rest) = line.strip_prefix(':') else {
            return Command::Ask(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name {
            "q" | "quit" | "exit" => Command::Quit,
            "log" | "history" => Command::ShowLog,
            "help" | "h" | "?" => Command::Help,
            "lang" => match arg.parse() {
                Ok(lang) => Command::SetLang(lang),
                Err(err) => Command::Invalid(err.to_string()),
            },
            "new" if !arg.is_empty() => Command::NewDocument(arg.to_string()),
            "new" => Command::Invalid("usage: :new <pdf-url>".to_string()),
            other => Command::Invalid(format!("unknown command `:{other}` (try :help)")),
        }
    }
}

pub const HELP: &str = "\
Type a question and press Enter to ask about the current PDF.
  :log          show the follow-up log (newest first)
  :lang ko|en   switch the answer language
  :new <url>    summarize another PDF (clears the log)
  :quit         exit";
