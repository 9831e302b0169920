// ── List engine ──
//
// Search filtering, pagination windowing, and multi-select state over the
// in-memory company collection. This is plain value-typed state owned by
// whichever view is showing the list -- no channels, no ambient statics --
// so every rule is unit-testable without a rendering environment.
//
// Canonical semantics (see DESIGN.md for the alternatives considered):
// - filter matches `name` or `website_url`, case-insensitive substring
// - page size 10, 1-based pages, page clamped after every mutation
// - select-all operates on the currently visible page only

use std::collections::HashSet;
use std::sync::Arc;

use crate::model::{Company, CompanyId};

/// Fixed page size for the list view.
pub const PAGE_SIZE: usize = 10;

/// Session-scoped list state: collection, search term, page, selection.
///
/// The collection is replaced wholesale on every successful fetch; search
/// term, page, and selection live only as long as the view session.
#[derive(Debug, Clone)]
pub struct ListEngine {
    collection: Vec<Arc<Company>>,
    search: String,
    /// 1-based current page, always within `[1, total_pages()]`.
    page: usize,
    selection: HashSet<CompanyId>,
    page_size: usize,
}

impl Default for ListEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ListEngine {
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    /// Non-default page sizes are used by the CLI's `--page-size` flag.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            collection: Vec::new(),
            search: String::new(),
            page: 1,
            selection: HashSet::new(),
            page_size: page_size.max(1),
        }
    }

    // ── Collection ───────────────────────────────────────────────────

    /// Replace the collection with a freshly fetched snapshot.
    ///
    /// Gateway order is preserved. The current page is clamped so a
    /// shrinking collection never strands the view on an empty page.
    /// Selection is left untouched -- clearing it after a delete is the
    /// caller's decision, not the engine's.
    pub fn set_collection(&mut self, collection: Vec<Arc<Company>>) {
        self.collection = collection;
        self.clamp_page();
    }

    pub fn collection(&self) -> &[Arc<Company>] {
        &self.collection
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    // ── Search ───────────────────────────────────────────────────────

    /// Commit a new search term. Resets to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// The ordered subsequence matching the current search term.
    ///
    /// Empty term is the identity filter. Matching is case-insensitive
    /// substring over `name` and `website_url`; absent fields compare as
    /// the empty string.
    pub fn filtered(&self) -> Vec<Arc<Company>> {
        if self.search.is_empty() {
            return self.collection.clone();
        }
        let needle = self.search.to_lowercase();
        self.collection
            .iter()
            .filter(|c| matches(c, &needle))
            .cloned()
            .collect()
    }

    pub fn filtered_count(&self) -> usize {
        if self.search.is_empty() {
            return self.collection.len();
        }
        let needle = self.search.to_lowercase();
        self.collection.iter().filter(|c| matches(c, &needle)).count()
    }

    // ── Pagination ───────────────────────────────────────────────────

    pub fn page(&self) -> usize {
        self.page
    }

    /// Total page count over the filtered set, never less than 1 -- an
    /// empty result still renders as a single (empty) page.
    pub fn total_pages(&self) -> usize {
        self.filtered_count().div_ceil(self.page_size).max(1)
    }

    /// Jump to a page, clamped to `[1, total_pages()]`.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// The slice of the filtered set visible on the current page.
    ///
    /// Out-of-range pages yield an empty slice, never a panic.
    pub fn visible(&self) -> Vec<Arc<Company>> {
        page_slice(&self.filtered(), self.page, self.page_size)
    }

    /// `(first, last, total)` for a "Showing first-last of total" line.
    /// An empty result set reads `0-0 of 0`.
    pub fn showing_range(&self) -> (usize, usize, usize) {
        let total = self.filtered_count();
        let first = ((self.page - 1) * self.page_size + 1).min(total);
        let last = (self.page * self.page_size).min(total);
        (first, last, total)
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Flip membership of `id` in the selection set.
    pub fn toggle(&mut self, id: &CompanyId) {
        if !self.selection.remove(id) {
            self.selection.insert(id.clone());
        }
    }

    pub fn is_selected(&self, id: &CompanyId) -> bool {
        self.selection.contains(id)
    }

    /// Select or deselect every row on the current page.
    ///
    /// If all visible ids are already selected, exactly those ids are
    /// removed (the idempotent pair); otherwise they are all added.
    /// Selections made on other pages are preserved either way.
    pub fn select_all_visible(&mut self) {
        let visible: Vec<CompanyId> = self.visible().iter().map(|c| c.id.clone()).collect();
        if visible.is_empty() {
            return;
        }
        if visible.iter().all(|id| self.selection.contains(id)) {
            for id in &visible {
                self.selection.remove(id);
            }
        } else {
            self.selection.extend(visible);
        }
    }

    /// Whether every row on the current page is selected (and there is at
    /// least one row). Drives the header checkbox state.
    pub fn all_visible_selected(&self) -> bool {
        let visible = self.visible();
        !visible.is_empty() && visible.iter().all(|c| self.selection.contains(&c.id))
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Selected ids as strings, for the gateway's batch delete.
    pub fn selection_ids(&self) -> Vec<String> {
        self.selection.iter().map(ToString::to_string).collect()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn clamp_page(&mut self) {
        self.page = self.page.clamp(1, self.total_pages());
    }
}

/// Case-insensitive substring match over the searchable fields.
/// `needle` must already be lowercased.
fn matches(company: &Company, needle: &str) -> bool {
    let hay = |field: Option<&str>| field.unwrap_or("").to_lowercase().contains(needle);
    hay(company.name.as_deref()) || hay(company.website_url.as_deref())
}

/// Clipped page slice: `[(page-1)*size, page*size)` over `items`.
fn page_slice<T: Clone>(items: &[T], page: usize, page_size: usize) -> Vec<T> {
    let start = (page - 1) * page_size;
    if start >= items.len() {
        return Vec::new();
    }
    let end = (start + page_size).min(items.len());
    items.get(start..end).map(<[T]>::to_vec).unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::CompanyId;
    use pretty_assertions::assert_eq;

    fn company(id: &str, name: &str, website: Option<&str>) -> Arc<Company> {
        Arc::new(Company {
            id: CompanyId::from(id),
            name: Some(name.to_owned()),
            description: None,
            address: None,
            email: None,
            website_url: website.map(str::to_owned),
            logo: None,
            screenshot_url: None,
            phone_numbers: Vec::new(),
            facebook_url: None,
            twitter_url: None,
            linkedin_url: None,
            instagram_url: None,
            created_at: None,
            updated_at: None,
        })
    }

    /// `n` companies named A0..A{n-1}.
    fn collection(n: usize) -> Vec<Arc<Company>> {
        (0..n)
            .map(|i| company(&format!("id{i}"), &format!("A{i}"), None))
            .collect()
    }

    fn engine_with(n: usize) -> ListEngine {
        let mut engine = ListEngine::new();
        engine.set_collection(collection(n));
        engine
    }

    fn names(items: &[Arc<Company>]) -> Vec<String> {
        items.iter().map(|c| c.display_name().to_owned()).collect()
    }

    // ── Filtering ────────────────────────────────────────────────────

    #[test]
    fn empty_term_returns_full_collection_in_order() {
        let engine = engine_with(5);
        assert_eq!(names(&engine.filtered()), vec!["A0", "A1", "A2", "A3", "A4"]);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let mut engine = ListEngine::new();
        engine.set_collection((0..12).map(|i| company(&format!("id{i}"), &format!("A{i}"), None)).collect());
        engine.set_search("a1");

        assert_eq!(names(&engine.filtered()), vec!["A1", "A10", "A11"]);
        assert_eq!(engine.total_pages(), 1);
        assert_eq!(engine.visible().len(), 3);
    }

    #[test]
    fn filter_matches_website_url() {
        let mut engine = ListEngine::new();
        engine.set_collection(vec![
            company("a", "Acme", Some("https://acme.example")),
            company("b", "Beta", Some("https://beta.example")),
        ]);
        engine.set_search("ACME.EX");
        assert_eq!(names(&engine.filtered()), vec!["Acme"]);
    }

    #[test]
    fn absent_fields_compare_as_empty() {
        let mut engine = ListEngine::new();
        let mut no_name = Company::clone(&company("x", "ignored", None));
        no_name.name = None;
        engine.set_collection(vec![Arc::new(no_name)]);

        engine.set_search("anything");
        assert!(engine.filtered().is_empty());

        // Empty term still matches records with no searchable fields.
        engine.set_search("");
        assert_eq!(engine.filtered_count(), 1);
    }

    #[test]
    fn filtering_is_idempotent() {
        let mut engine = engine_with(30);
        engine.set_search("a1");
        let first = names(&engine.filtered());

        let mut refiltered = ListEngine::new();
        refiltered.set_collection(engine.filtered());
        refiltered.set_search("a1");
        assert_eq!(names(&refiltered.filtered()), first);
    }

    // ── Pagination ───────────────────────────────────────────────────

    #[test]
    fn pages_of_25_items_split_10_10_5() {
        let mut engine = engine_with(25);
        assert_eq!(engine.total_pages(), 3);

        assert_eq!(engine.visible().len(), 10);
        engine.set_page(2);
        assert_eq!(engine.visible().len(), 10);
        engine.set_page(3);
        assert_eq!(engine.visible().len(), 5);
    }

    #[test]
    fn out_of_range_page_slice_is_empty_not_a_panic() {
        // Exercise the raw slice: set_page clamps, so reach past the end
        // directly.
        let items = collection(5);
        assert!(page_slice(&items, 7, 10).is_empty());
        assert!(page_slice::<Arc<Company>>(&[], 1, 10).is_empty());
    }

    #[test]
    fn set_page_clamps_to_valid_range() {
        let mut engine = engine_with(25);
        engine.set_page(99);
        assert_eq!(engine.page(), 3);
        engine.set_page(0);
        assert_eq!(engine.page(), 1);
    }

    #[test]
    fn shrinking_collection_clamps_current_page() {
        let mut engine = engine_with(25);
        engine.set_page(3);
        engine.set_collection(collection(7));
        assert_eq!(engine.page(), 1);
        assert_eq!(engine.visible().len(), 7);
    }

    #[test]
    fn narrowing_search_resets_to_page_one() {
        let mut engine = engine_with(25);
        engine.set_page(3);
        engine.set_search("a2");
        assert_eq!(engine.page(), 1);
    }

    #[test]
    fn empty_collection_has_one_page_and_zero_range() {
        let engine = ListEngine::new();
        assert_eq!(engine.total_pages(), 1);
        assert_eq!(engine.showing_range(), (0, 0, 0));
        assert!(engine.visible().is_empty());
    }

    #[test]
    fn showing_range_on_last_partial_page() {
        let mut engine = engine_with(25);
        engine.set_page(3);
        assert_eq!(engine.showing_range(), (21, 25, 25));
        engine.set_page(1);
        assert_eq!(engine.showing_range(), (1, 10, 25));
    }

    // ── Selection ────────────────────────────────────────────────────

    #[test]
    fn toggle_flips_membership() {
        let mut engine = engine_with(3);
        let id = CompanyId::from("id1");

        engine.toggle(&id);
        assert!(engine.is_selected(&id));
        engine.toggle(&id);
        assert!(!engine.is_selected(&id));
    }

    #[test]
    fn select_all_twice_restores_empty_selection_for_that_page() {
        let mut engine = engine_with(25);

        engine.select_all_visible();
        assert_eq!(engine.selected_count(), 10);
        assert!(engine.all_visible_selected());

        engine.select_all_visible();
        assert_eq!(engine.selected_count(), 0);
    }

    #[test]
    fn select_all_is_scoped_to_current_page() {
        let mut engine = engine_with(25);

        engine.select_all_visible();
        engine.set_page(2);
        assert!(!engine.all_visible_selected());

        engine.select_all_visible();
        assert_eq!(engine.selected_count(), 20);

        // Deselecting page 2 leaves page 1's selection intact.
        engine.select_all_visible();
        assert_eq!(engine.selected_count(), 10);
        engine.set_page(1);
        assert!(engine.all_visible_selected());
    }

    #[test]
    fn partial_page_selection_completes_on_select_all() {
        let mut engine = engine_with(5);
        engine.toggle(&CompanyId::from("id2"));

        engine.select_all_visible();
        assert_eq!(engine.selected_count(), 5);
    }

    #[test]
    fn select_all_on_empty_page_is_a_no_op() {
        let mut engine = ListEngine::new();
        engine.select_all_visible();
        assert_eq!(engine.selected_count(), 0);
    }

    #[test]
    fn selection_survives_page_changes_and_refetch() {
        let mut engine = engine_with(25);
        let id = CompanyId::from("id3");
        engine.toggle(&id);

        engine.set_page(2);
        engine.set_page(1);
        assert!(engine.is_selected(&id));

        // A refetch replaces the collection but does not clear selection;
        // that is the delete flow's job.
        engine.set_collection(collection(25));
        assert!(engine.is_selected(&id));

        engine.clear_selection();
        assert_eq!(engine.selected_count(), 0);
    }

    #[test]
    fn selection_ids_feed_the_batch_delete() {
        let mut engine = engine_with(3);
        engine.toggle(&CompanyId::from("id0"));
        engine.toggle(&CompanyId::from("id2"));

        let mut ids = engine.selection_ids();
        ids.sort();
        assert_eq!(ids, vec!["id0".to_owned(), "id2".to_owned()]);
    }

    // ── Custom page size (CLI) ───────────────────────────────────────

    #[test]
    fn custom_page_size() {
        let mut engine = ListEngine::with_page_size(4);
        engine.set_collection(collection(10));
        assert_eq!(engine.total_pages(), 3);
        engine.set_page(3);
        assert_eq!(engine.visible().len(), 2);
    }
}
