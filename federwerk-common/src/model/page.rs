use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

pub const DEFAULT_PAGE_SIZE: NonZeroU32 = NonZeroU32::new(10).unwrap();

/// One bounded slice of an ordered listing.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct PageBounds {
    pub number: u32,
    pub total_pages: u32,
    pub offset: u64,
}

/// Resolves a requested page number against the listing size. Out-of-range
/// requests clamp to the nearest valid page; a missing request means page 1.
/// An empty listing still has one (empty) page.
#[must_use]
pub fn page_bounds(requested: Option<u32>, total_items: u64, page_size: NonZeroU32) -> PageBounds {
    let total_pages = total_items
        .div_ceil(u64::from(page_size.get()))
        .clamp(1, u64::from(u32::MAX));
    let total_pages = u32::try_from(total_pages).unwrap_or(u32::MAX);

    let number = requested.unwrap_or(1).clamp(1, total_pages);
    let offset = u64::from(number - 1) * u64::from(page_size.get());

    PageBounds {
        number,
        total_pages,
        offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: NonZeroU32 = NonZeroU32::new(4).unwrap();

    #[test]
    fn first_page_is_the_default() {
        let bounds = page_bounds(None, 7, SIZE);
        assert_eq!(
            bounds,
            PageBounds {
                number: 1,
                total_pages: 2,
                offset: 0
            }
        );
    }

    #[test]
    fn out_of_range_requests_clamp() {
        assert_eq!(page_bounds(Some(0), 7, SIZE).number, 1);

        let past_the_end = page_bounds(Some(99), 7, SIZE);
        assert_eq!(past_the_end.number, 2);
        assert_eq!(past_the_end.offset, 4);
    }

    #[test]
    fn empty_listing_has_one_page() {
        let bounds = page_bounds(Some(3), 0, SIZE);
        assert_eq!(
            bounds,
            PageBounds {
                number: 1,
                total_pages: 1,
                offset: 0
            }
        );
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        assert_eq!(page_bounds(None, 8, SIZE).total_pages, 2);
        assert_eq!(page_bounds(None, 9, SIZE).total_pages, 3);
    }
}
