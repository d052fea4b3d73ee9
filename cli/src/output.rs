use pdf_summary::{FollowUp, Lang};

pub fn summary_heading(lang: Lang) -> &'static str {
    match lang {
        Lang::Ko => "📝 요약 결과",
        Lang::En => "📝 Summary",
    }
}

pub fn log_heading(lang: Lang) -> &'static str {
    match lang {
        Lang::Ko => "🗒️ 추가 질문 기록",
        Lang::En => "🗒️ Follow-up log",
    }
}

pub fn progress(lang: Lang, follow_up: bool) -> &'static str {
    match (lang, follow_up) {
        (Lang::Ko, false) => "⏳ 요약 중…",
        (Lang::En, false) => "⏳ Summarizing…",
        (Lang::Ko, true) => "⏳ 질문 중…",
        (Lang::En, true) => "⏳ Asking…",
    }
}

pub fn render_summary(lang: Lang, summary: &str) -> String {
    format!("\n{}\n{}\n", summary_heading(lang), summary)
}

pub fn render_log(lang: Lang, log: &[FollowUp]) -> String {
    if log.is_empty() {
        let empty = match lang {
            Lang::Ko => "(기록 없음)",
            Lang::En => "(no follow-ups yet)",
        };
        return format!("{}\n{}", log_heading(lang), empty);
    }

    let entries: Vec<String> = log.iter().map(|entry| entry.to_string()).collect();
    format!("{}\n{}", log_heading(lang), entries.join("\n\n"))
}
