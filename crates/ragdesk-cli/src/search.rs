//! Search screen: query dispatch and highlighted result rendering

use colored::*;

use ragdesk_core::{ResultOrder, SearchBackend, SearchHit, SearchRequest};
use ragdesk_kb::{Highlighter, SearchSession, Segment};

use crate::ui;

/// Issue a search and render whatever lands. A response superseded by a
/// newer search is dropped by the session and never rendered.
pub async fn run(session: &mut SearchSession, backend: &dyn SearchBackend, request: SearchRequest) {
    let Some(id) = session.begin(&request.query) else {
        return;
    };

    println!("{} {}", "🔍".cyan(), format!("Searching for '{}'...", request.query).dimmed());
    match backend.search(&request).await {
        Ok(hits) => {
            if session.complete(id, hits) {
                render(session.results());
            }
        }
        Err(e) => {
            session.abandon(id);
            ui::notify_error("Search backend failed", &e.to_string());
        }
    }
}

pub fn render(hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("{}", "No results".dimmed());
        println!("{}", "Try different keywords, fewer terms, or 'search type all'".dimmed());
        return;
    }

    println!("Found {} result(s)", hits.len());
    for hit in hits {
        println!();
        println!("{} {}", hit.title.bold(), format_relevance(hit.score).cyan());
        match hit.page {
            Some(page) => println!("{}", format!("{} · p.{}", hit.document, page).dimmed()),
            None => println!("{}", hit.document.dimmed()),
        }
        match Highlighter::new(&hit.highlights) {
            Ok(highlighter) => print_highlighted(&hit.content, &highlighter),
            Err(_) => println!("{}", hit.content),
        }
        if !hit.highlights.is_empty() {
            let badges: Vec<String> = hit
                .highlights
                .iter()
                .map(|term| format!("[{}]", term))
                .collect();
            println!("{}", badges.join(" ").yellow());
        }
    }
}

pub fn show_history(history: &[String]) {
    if history.is_empty() {
        println!("{}", "No searches yet".dimmed());
        return;
    }
    println!("{}", "Recent searches:".bold());
    for (n, query) in history.iter().enumerate() {
        println!("  {}. {}", n + 1, query);
    }
}

/// Reorder an already-delivered result set in place
pub fn sort_hits(hits: &mut [SearchHit], order: ResultOrder) {
    match order {
        ResultOrder::Relevance => {
            hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
        }
        ResultOrder::Title => hits.sort_by(|a, b| a.title.cmp(&b.title)),
    }
}

fn print_highlighted(content: &str, highlighter: &Highlighter) {
    for segment in highlighter.segments(content) {
        match segment {
            Segment::Marked(text) => print!("{}", text.black().on_yellow()),
            Segment::Plain(text) => print!("{}", text),
        }
    }
    println!();
}

fn format_relevance(score: f32) -> String {
    format!("{:.0}%", score * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: &str, title: &str, score: f32) -> SearchHit {
        SearchHit {
            id: id.to_string(),
            title: title.to_string(),
            content: String::new(),
            document: "文檔.pdf".to_string(),
            score,
            highlights: Vec::new(),
            page: None,
        }
    }

    #[test]
    fn relevance_renders_as_whole_percent() {
        assert_eq!(format_relevance(0.95), "95%");
        assert_eq!(format_relevance(0.87), "87%");
        assert_eq!(format_relevance(0.76), "76%");
        assert_eq!(format_relevance(1.0), "100%");
    }

    #[test]
    fn sort_by_title_is_code_point_ascending() {
        let mut hits = vec![
            hit("1", "員工假期政策", 0.95),
            hit("2", "API接口認證機制", 0.87),
            hit("3", "產品功能需求", 0.76),
        ];
        sort_hits(&mut hits, ResultOrder::Title);
        let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["2", "1", "3"]);
    }

    #[test]
    fn sort_by_relevance_is_score_descending() {
        let mut hits = vec![
            hit("low", "a", 0.2),
            hit("high", "b", 0.9),
            hit("mid", "c", 0.5),
        ];
        sort_hits(&mut hits, ResultOrder::Relevance);
        let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["high", "mid", "low"]);
    }
}
