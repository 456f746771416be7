//! Application state: the item list, the selected filter, their store, and
//! the surface that shows them. Created once at startup from the store and
//! kept for the life of the process.

use crate::io::store::{KeyValueStore, PersistentStore};
use crate::model::filter::Filter;
use crate::model::item::TaskItem;
use crate::ops::repository::ItemRepository;
use crate::view::{ListView, Renderer, build_view};

/// A user intent, independent of how it was entered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Toggle(String),
    Delete(String),
    Update { id: String, text: String },
    ClearCompleted,
    /// Filter by name; unknown names select `all`
    SetFilter(String),
}

/// What a command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new item was appended with this id
    Added(String),
    /// The item list changed
    Changed,
    /// Nothing to do (blank text, unknown id, nothing completed)
    Unchanged,
    /// The filter is now this one
    FilterSet(Filter),
}

pub struct Session<S, R> {
    repo: ItemRepository,
    filter: Filter,
    store: PersistentStore<S>,
    renderer: R,
}

impl<S: KeyValueStore, R: Renderer> Session<S, R> {
    /// Load items and filter from `store` and render the initial view
    pub fn new(store: PersistentStore<S>, renderer: R) -> Self {
        let repo = ItemRepository::new(store.load());
        Self::with_repository(store, repo, renderer)
    }

    /// Like [`Session::new`] but with an explicit repository (custom id source)
    pub fn with_repository(store: PersistentStore<S>, repo: ItemRepository, renderer: R) -> Self {
        let filter = store.load_filter();
        let mut session = Session {
            repo,
            filter,
            store,
            renderer,
        };
        session.render();
        session
    }

    pub fn items(&self) -> &[TaskItem] {
        self.repo.items()
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn view(&self) -> ListView {
        build_view(self.repo.items(), self.filter)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn store(&self) -> &PersistentStore<S> {
        &self.store
    }

    /// Apply a command, persist what it changed, then render.
    pub fn dispatch(&mut self, command: Command) -> Outcome {
        tracing::debug!(?command, "dispatch");
        let outcome = match command {
            Command::Add(text) => match self.repo.add(&text) {
                Some(id) => Outcome::Added(id),
                None => Outcome::Unchanged,
            },
            Command::Toggle(id) => changed(self.repo.toggle(&id)),
            Command::Delete(id) => changed(self.repo.delete(&id)),
            Command::Update { id, text } => changed(self.repo.update(&id, &text)),
            Command::ClearCompleted => changed(self.repo.clear_completed() > 0),
            Command::SetFilter(name) => Outcome::FilterSet(self.set_filter(&name)),
        };

        if matches!(outcome, Outcome::Added(_) | Outcome::Changed) {
            self.persist_items();
        }
        self.render();
        outcome
    }

    /// Re-render without changing anything (used to discard an inline edit)
    pub fn refresh(&mut self) {
        self.render();
    }

    fn set_filter(&mut self, name: &str) -> Filter {
        let filter = Filter::from_name_or_default(name);
        self.filter = filter;
        if let Err(e) = self.store.save_filter(filter) {
            tracing::warn!(error = %e, "could not save filter");
        }
        filter
    }

    fn persist_items(&mut self) {
        if let Err(e) = self.store.save(self.repo.items()) {
            tracing::warn!(error = %e, "could not save items");
        }
    }

    fn render(&mut self) {
        let view = build_view(self.repo.items(), self.filter);
        self.renderer.render(&view);
    }
}

fn changed(did_change: bool) -> Outcome {
    if did_change {
        Outcome::Changed
    } else {
        Outcome::Unchanged
    }
}

/// Renderer that keeps every view it was given
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub views: Vec<ListView>,
}

impl RecordingRenderer {
    pub fn last(&self) -> Option<&ListView> {
        self.views.last()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, view: &ListView) {
        self.views.push(view.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::{ITEMS_KEY, MemoryStore};
    use crate::ops::repository::tests::SeqIds;

    fn session() -> Session<MemoryStore, RecordingRenderer> {
        session_from(MemoryStore::new())
    }

    fn session_from(backend: MemoryStore) -> Session<MemoryStore, RecordingRenderer> {
        let store = PersistentStore::new(backend);
        let repo = ItemRepository::with_id_generator(store.load(), Box::new(SeqIds::default()));
        Session::with_repository(store, repo, RecordingRenderer::default())
    }

    fn visible(s: &Session<MemoryStore, RecordingRenderer>) -> Vec<String> {
        s.renderer()
            .last()
            .unwrap()
            .rows
            .iter()
            .map(|r| r.text.clone())
            .collect()
    }

    #[test]
    fn renders_on_startup() {
        let s = session();
        assert_eq!(s.renderer().views.len(), 1);
        assert!(s.renderer().last().unwrap().show_empty);
    }

    #[test]
    fn every_command_renders_once() {
        let mut s = session();
        s.dispatch(Command::Add("A".into()));
        s.dispatch(Command::Add("   ".into()));
        s.dispatch(Command::Toggle("missing".into()));
        assert_eq!(s.renderer().views.len(), 4);
    }

    #[test]
    fn add_buy_milk() {
        let mut s = session();
        assert_eq!(
            s.dispatch(Command::Add("Buy milk".into())),
            Outcome::Added("t1".into())
        );
        let view = s.renderer().last().unwrap();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.count_label, "1 item");
        assert!(!view.show_empty);
    }

    #[test]
    fn active_filter_hides_completed() {
        let mut s = session();
        s.dispatch(Command::Add("A".into()));
        s.dispatch(Command::Add("B".into()));
        s.dispatch(Command::Toggle("t1".into()));
        s.dispatch(Command::SetFilter("active".into()));
        assert_eq!(visible(&s), vec!["B"]);
    }

    #[test]
    fn edit_to_empty_removes() {
        let mut s = session();
        s.dispatch(Command::Add("X".into()));
        s.dispatch(Command::Update {
            id: "t1".into(),
            text: "".into(),
        });
        let view = s.renderer().last().unwrap();
        assert!(s.items().is_empty());
        assert_eq!(view.count_label, "0 items");
        assert!(view.show_empty);
    }

    #[test]
    fn clear_completed_empties_list() {
        let mut s = session();
        s.dispatch(Command::Add("A".into()));
        s.dispatch(Command::Add("B".into()));
        s.dispatch(Command::Toggle("t1".into()));
        s.dispatch(Command::Toggle("t2".into()));
        assert_eq!(s.dispatch(Command::ClearCompleted), Outcome::Changed);
        assert!(s.renderer().last().unwrap().show_empty);
        assert_eq!(s.dispatch(Command::ClearCompleted), Outcome::Unchanged);
    }

    #[test]
    fn unknown_filter_selects_all() {
        let mut s = session();
        s.dispatch(Command::SetFilter("completed".into()));
        assert_eq!(
            s.dispatch(Command::SetFilter("bogus".into())),
            Outcome::FilterSet(Filter::All)
        );
        assert_eq!(s.store().load_filter(), Filter::All);
    }

    #[test]
    fn mutations_are_persisted_before_render() {
        let mut s = session();
        s.dispatch(Command::Add("A".into()));
        s.dispatch(Command::Toggle("t1".into()));
        let saved = s.store().load();
        assert_eq!(saved, s.items());
        assert!(saved[0].completed);
    }

    #[test]
    fn noop_does_not_write() {
        let mut s = session();
        s.dispatch(Command::Add("  ".into()));
        assert!(s.store().backend().get(ITEMS_KEY).unwrap().is_none());
    }

    #[test]
    fn state_survives_restart() {
        let mut s = session();
        s.dispatch(Command::Add("A".into()));
        s.dispatch(Command::Add("B".into()));
        s.dispatch(Command::Toggle("t2".into()));
        s.dispatch(Command::SetFilter("completed".into()));
        let backend = s.store().backend().clone();

        let restarted = session_from(backend);
        assert_eq!(restarted.filter(), Filter::Completed);
        assert_eq!(restarted.items().len(), 2);
        assert_eq!(visible(&restarted), vec!["B"]);
    }

    #[test]
    fn refresh_renders_same_view() {
        let mut s = session();
        s.dispatch(Command::Add("A".into()));
        s.refresh();
        let views = &s.renderer().views;
        assert_eq!(views[views.len() - 1], views[views.len() - 2]);
    }
}
