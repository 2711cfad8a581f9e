use crate::validation::{ValidationError, check_range};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// `?page=&size=` query parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub size: i64,
}

impl Page {
    pub fn skip(self) -> i64 {
        (self.page - 1) * self.size
    }
}

impl TryFrom<PageQuery> for Page {
    type Error = ValidationError;

    fn try_from(q: PageQuery) -> Result<Self, Self::Error> {
        let page = q.page.unwrap_or(1);
        let size = q.size.unwrap_or(DEFAULT_PAGE_SIZE);
        check_range("page", page, 1, i64::from(i32::MAX))?;
        check_range("size", size, 1, MAX_PAGE_SIZE)?;
        Ok(Page { page, size })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let page = Page::try_from(PageQuery::default()).expect("defaults are valid");
        assert_eq!(page, Page { page: 1, size: 10 });
        assert_eq!(page.skip(), 0);
    }

    #[test]
    fn skip_follows_page_and_size() {
        let page = Page::try_from(PageQuery {
            page: Some(3),
            size: Some(25),
        })
        .expect("valid");
        assert_eq!(page.skip(), 50);
    }

    #[test]
    fn oversized_page_is_rejected() {
        let err = Page::try_from(PageQuery {
            page: Some(1),
            size: Some(MAX_PAGE_SIZE + 1),
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::Range { field: "size", .. }));
    }
}
