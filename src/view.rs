//! Pure view model: what the list looks like for a given (items, filter).

use crate::model::filter::Filter;
use crate::model::item::TaskItem;

/// One visible row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

/// One filter control and whether it is the selected one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterTab {
    pub filter: Filter,
    pub active: bool,
}

/// Everything a surface needs to draw the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub filter: Filter,
    /// Items passing the filter, in insertion order
    pub rows: Vec<RowView>,
    /// Number of items not completed, across all filters
    pub active_count: usize,
    /// `"1 item"` / `"{n} items"`
    pub count_label: String,
    /// True when no row is visible
    pub show_empty: bool,
    pub tabs: [FilterTab; 3],
    /// Whether any item is completed (clear-completed has something to do)
    pub has_completed: bool,
}

/// A surface that displays list views.
///
/// Called once after every command, with the view for the new state.
pub trait Renderer {
    fn render(&mut self, view: &ListView);
}

/// Build the view model. Same inputs always give an equal result.
pub fn build_view(items: &[TaskItem], filter: Filter) -> ListView {
    let rows: Vec<RowView> = items
        .iter()
        .filter(|i| filter.matches(i.completed))
        .map(|i| RowView {
            id: i.id.clone(),
            text: i.text.clone(),
            completed: i.completed,
        })
        .collect();

    let active_count = items.iter().filter(|i| i.is_active()).count();

    ListView {
        filter,
        show_empty: rows.is_empty(),
        rows,
        active_count,
        count_label: count_label(active_count),
        tabs: Filter::ALL.map(|f| FilterTab {
            filter: f,
            active: f == filter,
        }),
        has_completed: items.iter().any(|i| i.completed),
    }
}

/// `"1 item"` for one, `"{n} items"` otherwise (including zero)
pub fn count_label(n: usize) -> String {
    if n == 1 {
        "1 item".to_string()
    } else {
        format!("{} items", n)
    }
}
