//! Page-number pagination for listing views.
//!
//! Listings are fetched in two round-trips: a `COUNT(*)` to size the
//! paginator, then a `LIMIT/OFFSET` query for the requested page.
//!
//! ```rust,ignore
//! let paginator = Paginator::new(PostQuery::visible(now).count(pool).await?);
//! let number = paginator.resolve(query.page.as_deref())?;
//! let items = PostQuery::visible(now).fetch(paginator.window(number), pool).await?;
//! let page = paginator.page(number, items);
//! ```

use serde::{Deserialize, Serialize};

use super::error::AppError;

/// Items per page on every listing.
pub const PAGE_SIZE: i64 = 10;

/// `?page=` query parameter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

/// LIMIT/OFFSET pair for a resolved page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    count: i64,
    per_page: i64,
}

impl Paginator {
    pub fn new(count: i64) -> Self {
        Self::with_page_size(count, PAGE_SIZE)
    }

    pub fn with_page_size(count: i64, per_page: i64) -> Self {
        Self {
            count: count.max(0),
            per_page: per_page.max(1),
        }
    }

    /// Number of pages; an empty listing still has one (empty) page.
    pub fn num_pages(&self) -> i64 {
        if self.count == 0 {
            1
        } else {
            (self.count + self.per_page - 1) / self.per_page
        }
    }

    /// Resolve a raw `page` parameter to a 1-based page number.
    ///
    /// Missing means the first page and `last` means the final one. Anything
    /// else must be an integer within range, or the page does not exist.
    pub fn resolve(&self, raw: Option<&str>) -> Result<i64, AppError> {
        let number = match raw.map(str::trim) {
            None | Some("") => 1,
            Some("last") => self.num_pages(),
            Some(value) => value.parse::<i64>().map_err(|_| AppError::NotFound)?,
        };

        if number < 1 || number > self.num_pages() {
            return Err(AppError::NotFound);
        }
        Ok(number)
    }

    pub fn window(&self, number: i64) -> Window {
        Window {
            limit: self.per_page,
            offset: (number - 1) * self.per_page,
        }
    }

    pub fn page<T>(&self, number: i64, items: Vec<T>) -> Page<T> {
        Page {
            items,
            number,
            num_pages: self.num_pages(),
            count: self.count,
            has_previous: number > 1,
            has_next: number < self.num_pages(),
        }
    }
}

/// One page of a listing, as handed to the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: i64,
    pub num_pages: i64,
    pub count: i64,
    pub has_previous: bool,
    pub has_next: bool,
}
