//! Filter, search, sort and paginate pipeline shared by the order, product
//! and customer listings.

use std::{cmp::Ordering, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// An entity the pipeline can list.
pub trait Listable {
    /// Value matched exactly by the category/status filter.
    type Facet: PartialEq;
    type SortKey: Copy;

    fn facet_matches(&self, facet: &Self::Facet) -> bool;

    /// Fields searched by the free-text query.
    fn haystacks(&self) -> Vec<&str>;

    fn compare_by(&self, other: &Self, key: Self::SortKey) -> Ordering;
}

/// Single-value filter; `All` is the `"all"` sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter<F> {
    All,
    Only(F),
}

impl<F> Default for Filter<F> {
    fn default() -> Self {
        Filter::All
    }
}

impl<F: FromStr> Filter<F> {
    pub fn parse(raw: Option<&str>) -> Result<Self, F::Err> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Filter::All),
            Some(value) if value.eq_ignore_ascii_case("all") => Ok(Filter::All),
            Some(value) => value.parse().map(Filter::Only),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<K> {
    pub key: K,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    /// Classic page-number slicing, 1-based.
    Page { page: usize, per_page: usize },
    /// Cumulative "load more": the first `loaded` matches, growing by `step`.
    LoadMore { loaded: usize, step: usize },
}

#[derive(Debug, Clone)]
pub struct ListQuery<F, K> {
    pub filter: Filter<F>,
    pub search: Option<String>,
    pub sort: Option<Sort<K>>,
    pub page: PageRequest,
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    /// Matches after filter and search, before slicing.
    pub total: usize,
    pub has_more: bool,
}

pub fn run<T>(items: &[T], query: &ListQuery<T::Facet, T::SortKey>) -> Page<T>
where
    T: Listable + Clone,
{
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut matched: Vec<&T> = items
        .iter()
        .filter(|item| match &query.filter {
            Filter::All => true,
            Filter::Only(facet) => item.facet_matches(facet),
        })
        .filter(|item| {
            needle.as_deref().is_none_or(|needle| {
                item.haystacks()
                    .iter()
                    .any(|field| field.to_lowercase().contains(needle))
            })
        })
        .collect();

    if let Some(sort) = query.sort {
        // stable: equal keys keep insertion order in both directions
        matched.sort_by(|a, b| {
            let ord = a.compare_by(b, sort.key);
            match sort.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
    }

    paginate(&matched, query.page)
}

fn paginate<T: Clone>(matched: &[&T], request: PageRequest) -> Page<T> {
    let total = matched.len();
    match request {
        PageRequest::Page { page, per_page } => {
            let page = page.max(1);
            let per_page = per_page.max(1);
            let start = (page - 1).saturating_mul(per_page);
            let items = matched
                .iter()
                .skip(start)
                .take(per_page)
                .map(|item| (*item).clone())
                .collect();
            Page {
                items,
                page,
                per_page,
                total,
                has_more: start.saturating_add(per_page) < total,
            }
        }
        PageRequest::LoadMore { loaded, step } => {
            let step = step.max(1);
            let loaded = loaded.max(step);
            let items = matched
                .iter()
                .take(loaded)
                .map(|item| (*item).clone())
                .collect();
            Page {
                items,
                page: loaded.div_ceil(step),
                per_page: step,
                total,
                has_more: loaded < total,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationMode {
    #[default]
    Paged,
    LoadMore,
}

/// List state held by a view. Any change to the filter, search or sort
/// criteria rewinds pagination to the first page / initial count.
#[derive(Debug, Clone)]
pub struct ListView<F, K> {
    filter: Filter<F>,
    search: Option<String>,
    sort: Option<Sort<K>>,
    mode: PaginationMode,
    per_page: usize,
    page: usize,
    loaded: usize,
}

impl<F, K> ListView<F, K>
where
    F: Clone + PartialEq,
    K: Copy + PartialEq,
{
    pub fn new(per_page: usize, mode: PaginationMode) -> Self {
        let per_page = per_page.max(1);
        Self {
            filter: Filter::All,
            search: None,
            sort: None,
            mode,
            per_page,
            page: 1,
            loaded: per_page,
        }
    }

    pub fn set_filter(&mut self, filter: Filter<F>) -> &mut Self {
        if self.filter != filter {
            self.filter = filter;
            self.rewind();
        }
        self
    }

    pub fn set_search(&mut self, search: Option<String>) -> &mut Self {
        let search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        if self.search != search {
            self.search = search;
            self.rewind();
        }
        self
    }

    pub fn set_sort(&mut self, sort: Option<Sort<K>>) -> &mut Self {
        if self.sort != sort {
            self.sort = sort;
            self.rewind();
        }
        self
    }

    pub fn go_to_page(&mut self, page: usize) -> &mut Self {
        self.page = page.max(1);
        self
    }

    pub fn next_page(&mut self) -> &mut Self {
        self.page = self.page.saturating_add(1);
        self
    }

    pub fn load_more(&mut self) -> &mut Self {
        self.loaded = self.loaded.saturating_add(self.per_page);
        self
    }

    /// Restores a cumulative count received from a client, rounded up to a
    /// whole number of steps.
    pub fn set_loaded(&mut self, loaded: usize) -> &mut Self {
        let steps = loaded.div_ceil(self.per_page).max(1);
        self.loaded = steps.saturating_mul(self.per_page);
        self
    }

    pub fn rewind(&mut self) {
        self.page = 1;
        self.loaded = self.per_page;
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    pub fn query(&self) -> ListQuery<F, K> {
        let page = match self.mode {
            PaginationMode::Paged => PageRequest::Page {
                page: self.page,
                per_page: self.per_page,
            },
            PaginationMode::LoadMore => PageRequest::LoadMore {
                loaded: self.loaded,
                step: self.per_page,
            },
        };
        ListQuery {
            filter: self.filter.clone(),
            search: self.search.clone(),
            sort: self.sort,
            page,
        }
    }

    pub fn apply<T>(&self, items: &[T]) -> Page<T>
    where
        T: Listable<Facet = F, SortKey = K> + Clone,
    {
        run(items, &self.query())
    }
}
