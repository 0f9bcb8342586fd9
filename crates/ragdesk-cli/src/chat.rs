//! Chat screen: transcript rendering and question dispatch

use colored::*;

use ragdesk_core::{ChatBackend, ChatMessage, ChatRole};
use ragdesk_kb::ChatSession;

use crate::ui;

/// Ask the backend a question and print the reply. Blank questions do
/// nothing; a question sent while one is still pending is refused.
pub async fn ask(session: &mut ChatSession, backend: &dyn ChatBackend, question: &str) {
    let Some(id) = session.send(question) else {
        if session.is_waiting() {
            ui::notify_info("Still thinking", "wait for the current answer first");
        }
        return;
    };

    println!("{} {}", "🤖".cyan(), "Thinking...".dimmed());
    match backend.answer(question).await {
        Ok(reply) => {
            if session.complete(id, reply) {
                if let Some(message) = session.messages().last() {
                    print_message(message);
                }
            }
        }
        Err(e) => {
            session.abandon(id);
            ui::notify_error("Chat backend failed", &e.to_string());
        }
    }
}

/// Print the whole conversation so far
pub fn show_transcript(messages: &[ChatMessage]) {
    println!("{}", "Conversation".bold());
    for message in messages {
        print_message(message);
    }
}

fn print_message(message: &ChatMessage) {
    let time = message.timestamp.format("%H:%M:%S").to_string();
    match message.role {
        ChatRole::User => {
            println!("{} {} {}", time.dimmed(), "you".green().bold(), message.content);
        }
        ChatRole::Assistant => {
            println!("{} {} {}", time.dimmed(), "🤖".cyan(), message.content);
            if !message.sources.is_empty() {
                println!(
                    "   {} {}",
                    "sources:".dimmed(),
                    message.sources.join(", ").dimmed()
                );
            }
        }
    }
}
