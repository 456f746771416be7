use uuid::Uuid;

use crate::model::item::{TaskItem, normalize_text};

/// Source of fresh item ids
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Time-ordered ids: UUID v7 (millisecond timestamp + random bits), hex form
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeRandomIds;

impl IdGenerator for TimeRandomIds {
    fn next_id(&mut self) -> String {
        Uuid::now_v7().simple().to_string()
    }
}

/// Ordered list of items. Insertion order is never changed.
pub struct ItemRepository {
    items: Vec<TaskItem>,
    ids: Box<dyn IdGenerator>,
}

impl ItemRepository {
    pub fn new(items: Vec<TaskItem>) -> Self {
        Self::with_id_generator(items, Box::new(TimeRandomIds))
    }

    pub fn with_id_generator(items: Vec<TaskItem>, ids: Box<dyn IdGenerator>) -> Self {
        ItemRepository { items, ids }
    }

    pub fn items(&self) -> &[TaskItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&TaskItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Number of items not yet completed
    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_active()).count()
    }

    /// Append a new open item. Returns its id, or `None` when `text` is blank.
    pub fn add(&mut self, text: &str) -> Option<String> {
        let text = normalize_text(text)?;
        let id = self.fresh_id();
        self.items.push(TaskItem::new(id.clone(), text));
        Some(id)
    }

    /// Flip the completion flag. Returns false if `id` is unknown.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.completed = !item.completed;
                true
            }
            None => false,
        }
    }

    /// Remove an item. Returns false if `id` is unknown.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    /// Replace an item's text. Blank text deletes the item instead.
    /// Returns false if `id` is unknown or the text is unchanged.
    pub fn update(&mut self, id: &str, new_text: &str) -> bool {
        let Some(text) = normalize_text(new_text) else {
            return self.delete(id);
        };
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) if item.text != text => {
                item.text = text.to_string();
                true
            }
            _ => false,
        }
    }

    /// Remove every completed item. Returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|i| !i.completed);
        before - self.items.len()
    }

    fn fresh_id(&mut self) -> String {
        // Loaded items may carry ids from any source; never hand out a duplicate.
        loop {
            let id = self.ids.next_id();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

impl std::fmt::Debug for ItemRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemRepository")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}
