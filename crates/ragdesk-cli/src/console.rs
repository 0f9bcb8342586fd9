//! Console state and command dispatch

use colored::*;
use std::time::Duration;

use ragdesk_core::{
    AnalyticsSource, ChatBackend, DocTypeFilter, ResultOrder, SearchBackend, SearchRequest,
    Settings, SettingsStore, UploadTransport,
};
use ragdesk_kb::{
    ChatSession, DocumentQuery, DocumentStore, SearchSession, SimProfile, SimulatedChatBackend,
    SimulatedSearchBackend, SimulatedSettingsStore, SimulatedUploadTransport,
    StaticAnalyticsSource, UploadQueue,
};

use crate::command::{Command, DocsCommand, SearchCommand, SettingsCommand, UploadCommand};
use crate::{analytics, chat, documents, search, settings, ui, upload};

/// Service implementations behind the console
pub struct Backends {
    pub chat: Box<dyn ChatBackend>,
    pub search: Box<dyn SearchBackend>,
    pub transport: Box<dyn UploadTransport>,
    pub settings: Box<dyn SettingsStore>,
    pub analytics: Box<dyn AnalyticsSource>,
}

impl Backends {
    /// Everything simulated, shaped by the given profile
    pub fn simulated(profile: &SimProfile) -> Self {
        Self {
            chat: Box::new(SimulatedChatBackend::new(profile)),
            search: Box::new(SimulatedSearchBackend::new(profile)),
            transport: Box::new(SimulatedUploadTransport::new(profile)),
            settings: Box::new(SimulatedSettingsStore::new(profile)),
            analytics: Box::new(StaticAnalyticsSource),
        }
    }
}

/// All screen state plus the backends serving it
pub struct Console {
    backends: Backends,
    chat: ChatSession,
    search: SearchSession,
    documents: DocumentStore,
    uploads: UploadQueue,
    doc_query: DocumentQuery,
    search_order: ResultOrder,
    search_types: Vec<DocTypeFilter>,
    settings_draft: Settings,
}

impl Console {
    pub fn new(backends: Backends, upload_step_delay: Duration) -> Self {
        Self {
            backends,
            chat: ChatSession::new(),
            search: SearchSession::with_demo_history(),
            documents: DocumentStore::with_demo_documents(),
            uploads: UploadQueue::with_step_delay(upload_step_delay),
            doc_query: DocumentQuery::default(),
            search_order: ResultOrder::default(),
            search_types: Vec::new(),
            settings_draft: Settings::default(),
        }
    }

    pub async fn dispatch(&mut self, command: Command) {
        tracing::debug!("Dispatching {:?}", command);
        match command {
            Command::Help => ui::print_help(),
            // the caller breaks the loop on Exit before dispatching
            Command::Exit => {}
            Command::Chat(None) => chat::show_transcript(self.chat.messages()),
            Command::Chat(Some(question)) => {
                chat::ask(&mut self.chat, self.backends.chat.as_ref(), &question).await;
            }
            Command::Docs(docs) => self.dispatch_docs(docs),
            Command::Upload(upload) => self.dispatch_upload(upload).await,
            Command::Search(search) => self.dispatch_search(search).await,
            Command::Stats => analytics::show(self.backends.analytics.as_ref()).await,
            Command::Settings(settings) => self.dispatch_settings(settings).await,
        }
    }

    fn dispatch_docs(&mut self, command: DocsCommand) {
        match command {
            DocsCommand::List(text) => {
                if let Some(text) = text {
                    self.doc_query.text = text;
                }
                documents::list(&self.documents, &self.doc_query);
            }
            DocsCommand::Sort(key) => {
                self.doc_query.order = key;
                documents::list(&self.documents, &self.doc_query);
            }
            DocsCommand::Filter(filter) => {
                self.doc_query.status = filter;
                documents::list(&self.documents, &self.doc_query);
            }
            DocsCommand::View(id) => documents::view(&self.documents, &id),
            DocsCommand::Download(id) => documents::download(&self.documents, &id),
            DocsCommand::Delete(id) => documents::delete(&mut self.documents, &id),
            DocsCommand::Stats => documents::show_stats(&self.documents.stats()),
            DocsCommand::Clear => {
                self.doc_query = DocumentQuery::default();
                documents::list(&self.documents, &self.doc_query);
            }
        }
    }

    async fn dispatch_upload(&mut self, command: UploadCommand) {
        match command {
            UploadCommand::Stage(paths) => upload::stage(&mut self.uploads, &paths),
            UploadCommand::Start => {
                upload::start(&mut self.uploads, self.backends.transport.as_ref()).await;
            }
            UploadCommand::List => upload::list(self.uploads.records()),
            UploadCommand::Remove(id) => upload::remove(&mut self.uploads, &id),
            UploadCommand::Clear => upload::clear(&mut self.uploads),
        }
    }

    async fn dispatch_search(&mut self, command: SearchCommand) {
        match command {
            SearchCommand::Run(query) => {
                let request = SearchRequest::new(query)
                    .with_order(self.search_order)
                    .with_doc_types(self.search_types.clone());
                search::run(&mut self.search, self.backends.search.as_ref(), request).await;
            }
            SearchCommand::Order(order) => {
                self.search_order = order;
                let mut hits = self.search.results().to_vec();
                if hits.is_empty() {
                    ui::notify_info("Result order updated", "applies to the next search");
                } else {
                    search::sort_hits(&mut hits, order);
                    search::render(&hits);
                }
            }
            SearchCommand::Type(Some(doc_type)) => {
                // each `search type` toggles that facet in or out
                match self.search_types.iter().position(|t| *t == doc_type) {
                    Some(index) => {
                        self.search_types.remove(index);
                    }
                    None => self.search_types.push(doc_type),
                }
                ui::notify_info("Type filters", &describe_types(&self.search_types));
            }
            SearchCommand::Type(None) => {
                self.search_types.clear();
                ui::notify_info("Type filters cleared", "all types match again");
            }
            SearchCommand::History => search::show_history(self.search.history()),
        }
    }

    async fn dispatch_settings(&mut self, command: SettingsCommand) {
        match command {
            SettingsCommand::Show => settings::show(&self.settings_draft),
            SettingsCommand::Set { field, value } => {
                match settings::apply(&mut self.settings_draft, &field, &value) {
                    Ok(()) => {
                        ui::notify_success(&format!("{} updated", field), "");
                        for problem in self.settings_draft.validate() {
                            println!("⚠️  {}", problem.yellow());
                        }
                    }
                    Err(message) => ui::notify_error("Setting not updated", &message),
                }
            }
            SettingsCommand::Save => {
                settings::save(self.backends.settings.as_ref(), &self.settings_draft).await;
            }
            SettingsCommand::Reset => {
                self.settings_draft = Settings::default();
                ui::notify_info("Settings reset to defaults", "run 'settings save' to persist");
            }
        }
    }
}

fn describe_types(types: &[DocTypeFilter]) -> String {
    if types.is_empty() {
        return "none (all types match)".to_string();
    }
    let names: Vec<&str> = types.iter().map(type_name).collect();
    names.join(", ")
}

fn type_name(doc_type: &DocTypeFilter) -> &'static str {
    match doc_type {
        DocTypeFilter::Pdf => "pdf",
        DocTypeFilter::Word => "word",
        DocTypeFilter::Markdown => "markdown",
        DocTypeFilter::Text => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragdesk_kb::SortKey;

    fn console() -> Console {
        let profile = SimProfile::instant();
        Console::new(Backends::simulated(&profile), profile.upload_step_delay)
    }

    #[tokio::test]
    async fn chat_round_trip_appends_two_messages() {
        let mut console = console();
        let before = console.chat.messages().len();

        console
            .dispatch(Command::Chat(Some("年假有幾天？".to_string())))
            .await;

        assert_eq!(console.chat.messages().len(), before + 2);
        assert!(!console.chat.is_waiting());
    }

    #[tokio::test]
    async fn search_run_installs_results_and_history() {
        let mut console = console();

        console
            .dispatch(Command::Search(SearchCommand::Run("年假".to_string())))
            .await;

        assert!(!console.search.results().is_empty());
        assert_eq!(console.search.history()[0], "年假");
    }

    #[tokio::test]
    async fn docs_commands_update_the_active_query() {
        let mut console = console();

        console.dispatch(Command::Docs(DocsCommand::Sort(SortKey::Name))).await;
        assert_eq!(console.doc_query.order, SortKey::Name);

        console
            .dispatch(Command::Docs(DocsCommand::List(Some("政策".to_string()))))
            .await;
        assert_eq!(console.doc_query.text, "政策");

        console.dispatch(Command::Docs(DocsCommand::Clear)).await;
        assert_eq!(console.doc_query, DocumentQuery::default());
    }

    #[tokio::test]
    async fn docs_delete_shrinks_the_library() {
        let mut console = console();
        let before = console.documents.len();

        console
            .dispatch(Command::Docs(DocsCommand::Delete("3".to_string())))
            .await;

        assert_eq!(console.documents.len(), before - 1);
        assert!(console.documents.get("3").is_none());
    }

    #[tokio::test]
    async fn type_facets_toggle() {
        let mut console = console();

        console
            .dispatch(Command::Search(SearchCommand::Type(Some(DocTypeFilter::Pdf))))
            .await;
        assert_eq!(console.search_types, [DocTypeFilter::Pdf]);

        console
            .dispatch(Command::Search(SearchCommand::Type(Some(DocTypeFilter::Pdf))))
            .await;
        assert!(console.search_types.is_empty());
    }

    #[tokio::test]
    async fn settings_edits_live_in_the_draft_until_reset() {
        let mut console = console();

        console
            .dispatch(Command::Settings(SettingsCommand::Set {
                field: "temperature".to_string(),
                value: "0.3".to_string(),
            }))
            .await;
        assert_eq!(console.settings_draft.temperature, 0.3);

        console.dispatch(Command::Settings(SettingsCommand::Reset)).await;
        assert_eq!(console.settings_draft, Settings::default());
    }

    #[test]
    fn facet_descriptions_read_naturally() {
        assert_eq!(describe_types(&[]), "none (all types match)");
        assert_eq!(
            describe_types(&[DocTypeFilter::Pdf, DocTypeFilter::Text]),
            "pdf, text"
        );
    }
}
