use serde::Deserialize;

use chirp_core::pagination::PageRequest;

use crate::error::ApiError;

/// Path ids arrive as text so a bad one becomes a JSON 400, not axum's plain-text rejection.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("invalid id".into()))
}

/// `?page=&page_size=`; unparsable values fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl PageQuery {
    pub fn to_page_request(&self) -> PageRequest {
        PageRequest::new(lenient(&self.page), lenient(&self.page_size))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PostListQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub user_id: Option<String>,
}

impl PostListQuery {
    pub fn to_page_request(&self) -> PageRequest {
        PageRequest::new(lenient(&self.page), lenient(&self.page_size))
    }

    /// Unlike paging, a present but garbled author filter is an error.
    pub fn author(&self) -> Result<Option<i64>, ApiError> {
        match self.user_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| ApiError::BadRequest("invalid user_id".into())),
        }
    }
}

fn lenient(raw: &Option<String>) -> Option<i64> {
    raw.as_deref().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, page_size: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(String::from),
            page_size: page_size.map(String::from),
        }
    }

    #[test]
    fn garbage_paging_falls_back() {
        let req = query(Some("abc"), Some("-3")).to_page_request();
        assert_eq!(req, PageRequest::default());

        let req = query(Some("3"), Some("25")).to_page_request();
        assert_eq!((req.page, req.page_size), (3, 25));
    }

    #[test]
    fn author_filter_parsing() {
        let mut q = PostListQuery::default();
        assert_eq!(q.author().unwrap(), None);

        q.user_id = Some("42".into());
        assert_eq!(q.author().unwrap(), Some(42));

        q.user_id = Some("forty-two".into());
        assert!(matches!(q.author(), Err(ApiError::BadRequest(msg)) if msg == "invalid user_id"));
    }

    #[test]
    fn ids_must_be_numeric() {
        assert_eq!(parse_id("7").unwrap(), 7);
        assert!(parse_id("seven").is_err());
    }
}
