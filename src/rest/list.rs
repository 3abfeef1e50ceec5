//! Paginated list results.
//!
//! Airwallex endpoints paginate in two ways: cursor-based (the response carries
//! `next_cursor`) and offset-based (`offset` plus `page_size`). [`PaginatedList`]
//! hides the difference behind [`PaginatedList::next_page`], and [`AutoPager`]
//! walks every page in order.
//!
//! # Example
//!
//! ```rust,ignore
//! use airwallex_api::rest::List;
//! use airwallex_api::resources::Transfer;
//!
//! let page = Transfer::list(&client, None, None).await?;
//! let mut pager = page.auto_paging(&client, None);
//! while let Some(transfer) = pager.next().await? {
//!     println!("{:?}", transfer.id());
//! }
//! ```

use std::ops::Index;

use serde_json::{Map, Value};

use crate::clients::{Client, RequestOptions};
use crate::error::Error;
use crate::rest::operations::{ApiResource, List};

/// Page size assumed for offset pagination when none was requested.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// One page of resources plus what is needed to fetch the next one.
///
/// Pages are immutable; [`next_page`](Self::next_page) returns a new page.
#[derive(Clone, Debug, PartialEq)]
pub struct PaginatedList<R> {
    data: Vec<R>,
    has_more: bool,
    next_cursor: Option<String>,
    params: Map<String, Value>,
}

impl<R: ApiResource> PaginatedList<R> {
    /// Wraps raw items into a page.
    #[must_use]
    pub fn new(
        items: Vec<Value>,
        has_more: bool,
        next_cursor: Option<String>,
        params: Map<String, Value>,
    ) -> Self {
        Self {
            data: items.into_iter().map(R::from_value).collect(),
            has_more,
            next_cursor,
            params,
        }
    }

    /// Builds a page from a list response body.
    ///
    /// Accepted shapes are a bare array, or an object with the items under
    /// `items` or `data` and optional `has_more` / `next_cursor` siblings.
    /// Anything else is treated as an empty final page.
    #[must_use]
    pub fn from_response(response: Value, params: Map<String, Value>) -> Self {
        let (items, has_more, next_cursor) = extract_page(response);
        Self::new(items, has_more, next_cursor, params)
    }
}

impl<R> PaginatedList<R> {
    /// Returns the items on this page.
    #[must_use]
    pub fn data(&self) -> &[R] {
        &self.data
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&R> {
        self.data.get(index)
    }

    /// Returns the first item on this page.
    #[must_use]
    pub fn first(&self) -> Option<&R> {
        self.data.first()
    }

    /// Returns the last item on this page.
    #[must_use]
    pub fn last(&self) -> Option<&R> {
        self.data.last()
    }

    /// Iterates over the items on this page.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.data.iter()
    }

    /// Returns `true` if the server reported more results.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Returns the cursor for the next page, if the endpoint uses cursors.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    /// Returns the parameters this page was fetched with.
    #[must_use]
    pub const fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Consumes the page and returns its items.
    #[must_use]
    pub fn into_vec(self) -> Vec<R> {
        self.data
    }

    /// Returns the parameters for the next page, or `None` on the last page.
    ///
    /// With a cursor, `next_cursor` is set and every other parameter is
    /// forwarded unchanged. Without one, `offset` is advanced by `page_size`
    /// (falling back to `limit`, then to 20).
    #[must_use]
    pub fn next_page_params(&self) -> Option<Map<String, Value>> {
        if !self.has_more {
            return None;
        }

        let mut params = self.params.clone();
        if let Some(cursor) = &self.next_cursor {
            params.insert("next_cursor".to_string(), Value::String(cursor.clone()));
        } else {
            let page_size = read_u64(&self.params, "page_size")
                .or_else(|| read_u64(&self.params, "limit"))
                .unwrap_or(DEFAULT_PAGE_SIZE);
            let offset = read_u64(&self.params, "offset").unwrap_or(0);
            params.insert(
                "offset".to_string(),
                Value::from(offset.saturating_add(page_size)),
            );
        }
        Some(params)
    }
}

impl<R: List> PaginatedList<R> {
    /// Fetches the next page, or returns `Ok(None)` on the last page.
    ///
    /// # Errors
    ///
    /// Returns any error from the list request.
    pub async fn next_page(
        &self,
        client: &Client,
        options: Option<&RequestOptions>,
    ) -> Result<Option<Self>, Error> {
        match self.next_page_params() {
            Some(params) => R::list(client, Some(&params), options).await.map(Some),
            None => Ok(None),
        }
    }

    /// Returns a pager that yields every item of this and following pages.
    #[must_use]
    pub fn auto_paging<'a>(
        self,
        client: &'a Client,
        options: Option<&'a RequestOptions>,
    ) -> AutoPager<'a, R> {
        AutoPager::new(self, client, options)
    }

    /// Calls `visitor` for every item across all pages, in order.
    ///
    /// Traversal stops when a page reports no more results, or when the next
    /// page is empty. Pages are fetched one at a time.
    ///
    /// # Errors
    ///
    /// Returns the first error from fetching a page; items visited before the
    /// failure stay visited.
    pub async fn for_each_across_all_pages<F>(
        self,
        client: &Client,
        options: Option<&RequestOptions>,
        mut visitor: F,
    ) -> Result<(), Error>
    where
        F: FnMut(R),
    {
        let mut pager = self.auto_paging(client, options);
        while let Some(item) = pager.next().await? {
            visitor(item);
        }
        Ok(())
    }
}

impl<R> Index<usize> for PaginatedList<R> {
    type Output = R;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<'a, R> IntoIterator for &'a PaginatedList<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<R> IntoIterator for PaginatedList<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

/// Lazy, one-shot iteration over every item of a list and its later pages.
///
/// Obtained from [`PaginatedList::auto_paging`]. After the last item, or
/// after an error, [`AutoPager::next`] keeps returning `Ok(None)`.
#[derive(Debug)]
pub struct AutoPager<'a, R> {
    client: &'a Client,
    options: Option<&'a RequestOptions>,
    page: Option<PaginatedList<R>>,
    items: std::vec::IntoIter<R>,
}

impl<'a, R: List> AutoPager<'a, R> {
    fn new(
        mut page: PaginatedList<R>,
        client: &'a Client,
        options: Option<&'a RequestOptions>,
    ) -> Self {
        let items = std::mem::take(&mut page.data).into_iter();
        Self {
            client,
            options,
            page: Some(page),
            items,
        }
    }

    /// Returns the next item, fetching the next page when needed.
    ///
    /// # Errors
    ///
    /// Returns any error from fetching a page.
    pub async fn next(&mut self) -> Result<Option<R>, Error> {
        loop {
            if let Some(item) = self.items.next() {
                return Ok(Some(item));
            }
            let Some(page) = self.page.take() else {
                return Ok(None);
            };
            match page.next_page(self.client, self.options).await? {
                Some(mut next) if !next.is_empty() => {
                    self.items = std::mem::take(&mut next.data).into_iter();
                    self.page = Some(next);
                }
                _ => return Ok(None),
            }
        }
    }
}

/// Splits a list response into items, the more-flag and the cursor.
fn extract_page(response: Value) -> (Vec<Value>, bool, Option<String>) {
    match response {
        Value::Array(items) => (items, false, None),
        Value::Object(mut map) => {
            let items = match map.remove("items") {
                Some(Value::Array(items)) => items,
                _ => match map.remove("data") {
                    Some(Value::Array(items)) => items,
                    _ => Vec::new(),
                },
            };
            let has_more = map
                .get("has_more")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let next_cursor = map
                .get("next_cursor")
                .and_then(Value::as_str)
                .filter(|cursor| !cursor.is_empty())
                .map(ToString::to_string);
            (items, has_more, next_cursor)
        }
        _ => (Vec::new(), false, None),
    }
}

fn read_u64(params: &Map<String, Value>, key: &str) -> Option<u64> {
    match params.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
