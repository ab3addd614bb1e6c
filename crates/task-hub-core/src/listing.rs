//! List query: filter, search, sort and paginate loaded records in memory.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::{EntityId, Project, Task, TASK_PRIORITIES, TASK_STATUSES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn flip(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        }
    }
}

/// A comparable field value. Numbers order before text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Number(i64),
    Text(String),
}

impl SortValue {
    fn text(s: &str) -> Self {
        SortValue::Text(s.to_lowercase())
    }

    fn id(id: &EntityId) -> Self {
        match id {
            EntityId::Int(n) => SortValue::Number(*n),
            EntityId::Text(s) => SortValue::text(s),
        }
    }

    /// Position in a fixed vocabulary, so `LOW < MEDIUM < HIGH`.
    fn rank(value: &str, vocabulary: &[&str]) -> Self {
        match vocabulary.iter().position(|v| *v == value) {
            Some(i) => SortValue::Number(i as i64),
            None => SortValue::text(value),
        }
    }
}

/// A record that can be listed.
pub trait Listable {
    /// Value of a sortable or filterable field. `None` sorts last.
    fn field(&self, name: &str) -> Option<SortValue>;

    /// Raw value compared by the equality filters.
    fn attribute(&self, _name: &str) -> Option<&str> {
        None
    }

    /// Texts matched by the search box.
    fn search_text(&self) -> Vec<&str>;
}

impl Listable for Task {
    fn field(&self, name: &str) -> Option<SortValue> {
        match name {
            "id" => Some(SortValue::id(&self.id)),
            "title" => Some(SortValue::text(&self.title)),
            "status" => Some(SortValue::rank(&self.status, &TASK_STATUSES)),
            "priority" => Some(SortValue::rank(&self.priority, &TASK_PRIORITIES)),
            "due_date" => self.due_date.as_deref().map(SortValue::text),
            "created_at" => self.created_at.as_deref().map(SortValue::text),
            "updated_at" => self.updated_at.as_deref().map(SortValue::text),
            "project_id" => self.project_id.as_ref().map(SortValue::id),
            "assignee_id" => self.assignee_id.as_ref().map(SortValue::id),
            _ => None,
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "status" => Some(&self.status),
            "priority" => Some(&self.priority),
            _ => None,
        }
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }
}

impl Listable for Project {
    fn field(&self, name: &str) -> Option<SortValue> {
        match name {
            "id" => Some(SortValue::id(&self.id)),
            "name" => Some(SortValue::text(&self.name)),
            "description" => self.description.as_deref().map(SortValue::text),
            "created_at" => self.created_at.as_deref().map(SortValue::text),
            "updated_at" => self.updated_at.as_deref().map(SortValue::text),
            _ => None,
        }
    }

    fn search_text(&self) -> Vec<&str> {
        let mut texts = vec![self.name.as_str()];
        if let Some(description) = &self.description {
            texts.push(description);
        }
        texts
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Matches across all pages
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// 1-based inclusive bounds for "Showing a to b of n".
    pub fn range(&self, page_size: usize) -> (usize, usize) {
        showing(self.page, page_size, self.total)
    }
}

/// Bounds of `page` within `total` rows, `(0, 0)` when there are none.
pub fn showing(page: usize, page_size: usize, total: usize) -> (usize, usize) {
    if total == 0 || page == 0 {
        return (0, 0);
    }
    let start = (page - 1) * page_size + 1;
    let end = (page * page_size).min(total);
    (start, end)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub search: String,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub sort_field: String,
    pub sort_order: SortOrder,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: None,
            priority: None,
            sort_field: "created_at".to_string(),
            sort_order: SortOrder::Desc,
            page: 1,
            page_size: 10,
        }
    }
}

impl ListQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
        self.page = 1;
    }

    /// An empty string clears the filter.
    pub fn set_status(&mut self, status: &str) {
        self.status = Some(status.to_string()).filter(|s| !s.is_empty());
        self.page = 1;
    }

    pub fn set_priority(&mut self, priority: &str) {
        self.priority = Some(priority.to_string()).filter(|p| !p.is_empty());
        self.page = 1;
    }

    /// Same field flips the order, a new field starts ascending.
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_order = self.sort_order.flip();
        } else {
            self.sort_field = field.to_string();
            self.sort_order = SortOrder::Asc;
        }
        self.page = 1;
    }

    /// Arrow for a column header, empty unless that column is sorted.
    pub fn indicator(&self, field: &str) -> &'static str {
        if self.sort_field == field {
            self.sort_order.arrow()
        } else {
            ""
        }
    }

    pub fn next_page(&mut self, total_pages: usize) {
        if self.page < total_pages {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    fn matches<T: Listable>(&self, item: &T) -> bool {
        let equals = |name: &str, wanted: &Option<String>| match wanted {
            Some(wanted) => item.attribute(name) == Some(wanted.as_str()),
            None => true,
        };
        if !equals("status", &self.status) || !equals("priority", &self.priority) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        item.search_text().iter().any(|text| text.to_lowercase().contains(&needle))
    }

    fn compare<T: Listable>(&self, a: &T, b: &T) -> Ordering {
        match (a.field(&self.sort_field), b.field(&self.sort_field)) {
            (Some(x), Some(y)) => match self.sort_order {
                SortOrder::Asc => x.cmp(&y),
                SortOrder::Desc => y.cmp(&x),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// Filter, search, sort, then cut out the current page. A page past the
    /// end is clamped to the last one.
    pub fn apply<T: Listable + Clone>(&self, items: &[T]) -> Page<T> {
        let mut matched: Vec<&T> = items.iter().filter(|item| self.matches(*item)).collect();
        matched.sort_by(|a, b| self.compare(*a, *b));

        let total = matched.len();
        let total_pages = total_pages(total, self.page_size);
        let page = self.page.clamp(1, total_pages);
        let items = matched
            .into_iter()
            .skip((page - 1) * self.page_size)
            .take(self.page_size)
            .cloned()
            .collect();

        Page {
            items,
            total,
            page,
            total_pages,
        }
    }
}

/// `ceil(len / page_size)`, never less than 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Tasks grouped under their project's name, in name order.
pub fn group_tasks_by_project<'a>(tasks: &'a [Task], projects: &[Project]) -> Vec<(String, Vec<&'a Task>)> {
    let names: BTreeMap<String, &str> = projects.iter().map(|p| (p.id.to_string(), p.name.as_str())).collect();
    let mut groups: BTreeMap<String, Vec<&Task>> = BTreeMap::new();
    for task in tasks {
        groups.entry(project_label(task.project_id.as_ref(), &names)).or_default().push(task);
    }
    groups.into_iter().collect()
}

/// The project's name, or `Project <id>` when it is not loaded.
pub fn project_name(project_id: Option<&EntityId>, projects: &[Project]) -> String {
    let names: BTreeMap<String, &str> = projects.iter().map(|p| (p.id.to_string(), p.name.as_str())).collect();
    project_label(project_id, &names)
}

fn project_label(project_id: Option<&EntityId>, names: &BTreeMap<String, &str>) -> String {
    let id = project_id.map(|id| id.to_string()).unwrap_or_default();
    match names.get(&id) {
        Some(name) => name.to_string(),
        None => format!("Project {}", id),
    }
}
