//! Search and pagination over the product list.

use gemini_store_core::Product;
use serde::Serialize;

/// Products shown per catalog page.
pub const PAGE_SIZE: usize = 8;

/// The shopper's search box and page position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    search_term: String,
    current_page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            current_page: 1,
        }
    }
}

impl ViewState {
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// 1-based page number.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Change the search term and go back to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
    }

    /// Jump to `page`, clamped to `1..=max(total_pages, 1)`.
    pub fn go_to_page(&mut self, page: i64, total_pages: usize) {
        let last = total_pages.max(1);
        let requested = usize::try_from(page).unwrap_or(if page < 0 { 1 } else { last });
        self.current_page = requested.clamp(1, last);
    }

    /// Advance one page, stopping at the last.
    pub fn next_page(&mut self, total_pages: usize) {
        self.current_page = (self.current_page + 1).min(total_pages.max(1));
    }

    /// Go back one page, stopping at 1.
    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    /// Products whose name or category contains the search term.
    #[must_use]
    pub fn filter<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let term = self.search_term.to_lowercase();
        products.iter().filter(|p| p.matches_search(&term)).collect()
    }

    /// Number of pages the current search spans.
    #[must_use]
    pub fn total_pages(&self, products: &[Product]) -> usize {
        page_count(self.filter(products).len())
    }

    /// Render the current page.
    ///
    /// The page number is used as-is: a page left past the end by a deletion
    /// renders empty until the shopper navigates or searches.
    #[must_use]
    pub fn page(&self, products: &[Product], show_admin_controls: bool) -> CatalogPage {
        let matches = self.filter(products);
        let total_matches = matches.len();
        let total_pages = page_count(total_matches);
        let start = (self.current_page - 1).saturating_mul(PAGE_SIZE);

        let items: Vec<Product> = matches
            .into_iter()
            .skip(start)
            .take(PAGE_SIZE)
            .cloned()
            .collect();

        CatalogPage {
            items,
            search_term: self.search_term.clone(),
            page: self.current_page,
            total_pages,
            total_matches,
            no_results: total_matches == 0,
            show_pagination: total_pages > 1,
            has_previous: self.current_page > 1,
            has_next: self.current_page < total_pages,
            show_admin_controls,
        }
    }
}

/// ceil(matches / `PAGE_SIZE`)
#[must_use]
pub const fn page_count(matches: usize) -> usize {
    matches.div_ceil(PAGE_SIZE)
}

/// One rendered catalog page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub items: Vec<Product>,
    pub search_term: String,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
    /// "No Products Found" instead of a grid.
    pub no_results: bool,
    /// Previous/Next controls are only shown with more than one page.
    pub show_pagination: bool,
    pub has_previous: bool,
    pub has_next: bool,
    /// Add/edit/delete controls for the admin role.
    pub show_admin_controls: bool,
}
