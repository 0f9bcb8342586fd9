//! Analytics screen

use colored::*;

use ragdesk_core::{ActivityKind, AnalyticsSnapshot, AnalyticsSource, HealthState, Trend};

use crate::ui;

pub async fn show(source: &dyn AnalyticsSource) {
    match source.snapshot().await {
        Ok(snapshot) => render(&snapshot),
        Err(e) => ui::notify_error("Analytics unavailable", &e.to_string()),
    }
}

fn render(snapshot: &AnalyticsSnapshot) {
    let overview = &snapshot.overview;
    println!("{}", "Usage overview".bold());
    println!("  questions answered   {}", overview.total_questions.to_string().cyan());
    println!("  documents indexed    {}", overview.total_documents.to_string().cyan());
    println!("  active users         {}", overview.total_users.to_string().cyan());
    println!("  avg response time    {}", format!("{}s", overview.avg_response_time).cyan());

    println!();
    println!("{}", "Recent activity".bold());
    for entry in &snapshot.recent_activity {
        println!(
            "  {} {} {} {}",
            activity_glyph(entry.kind),
            entry.time.dimmed(),
            entry.user,
            entry.action
        );
    }

    println!();
    println!("{}", "Popular questions".bold());
    for question in &snapshot.popular_questions {
        println!(
            "  {} {} {}",
            trend_glyph(question.trend),
            question.question,
            format!("({})", question.count).dimmed()
        );
    }

    println!();
    println!("{}", "Document types".bold());
    for share in &snapshot.document_types {
        println!(
            "  {:<10} [{}] {:>3}% ({})",
            share.label,
            ui::progress_bar(share.percentage, 20),
            share.percentage,
            share.count
        );
    }

    println!();
    println!("{}", "Service health".bold());
    for service in &snapshot.service_health {
        let state = match service.state {
            HealthState::Normal => "normal".green(),
            HealthState::Degraded => "degraded".yellow(),
        };
        println!("  {} {}", service.service, state);
    }

    println!();
    println!("{}", "Trend charts are under development".dimmed());
}

fn activity_glyph(kind: ActivityKind) -> &'static str {
    match kind {
        ActivityKind::Search => "🔍",
        ActivityKind::Upload => "⬆️",
        ActivityKind::Chat => "💬",
        ActivityKind::Download => "⬇️",
    }
}

fn trend_glyph(kind: Trend) -> ColoredString {
    match kind {
        Trend::Up => "↑".green(),
        Trend::Down => "↓".red(),
        Trend::Stable => "→".dimmed(),
    }
}
