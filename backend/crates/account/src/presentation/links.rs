//! Hypermedia links
//!
//! Absolute links built from the configured public base URL.

use serde::Serialize;

use crate::domain::value_object::account_id::AccountId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub rel: &'static str,
    pub href: String,
    pub method: &'static str,
}

impl Link {
    fn new(rel: &'static str, method: &'static str, href: String) -> Self {
        Self { rel, href, method }
    }
}

/// `self`, `update` and `delete` for one account
pub fn account_links(base_url: &str, account_id: &AccountId) -> Vec<Link> {
    let href = format!("{}/users/{}", base_url.trim_end_matches('/'), account_id);
    vec![
        Link::new("self", "GET", href.clone()),
        Link::new("update", "PUT", href.clone()),
        Link::new("delete", "DELETE", href),
    ]
}

/// `self`, `first` and `last` always; `prev`/`next` only when such a page exists
pub fn pagination_links(base_url: &str, skip: u64, limit: u64, total: u64) -> Vec<Link> {
    let limit = limit.max(1);
    let page = |skip: u64| {
        format!(
            "{}/users?skip={}&limit={}",
            base_url.trim_end_matches('/'),
            skip,
            limit
        )
    };
    let last_skip = total.saturating_sub(1) / limit * limit;

    let mut links = vec![
        Link::new("self", "GET", page(skip)),
        Link::new("first", "GET", page(0)),
        Link::new("last", "GET", page(last_skip)),
    ];
    if skip > 0 {
        links.push(Link::new("prev", "GET", page(skip.saturating_sub(limit))));
    }
    if skip.saturating_add(limit) < total {
        links.push(Link::new("next", "GET", page(skip + limit)));
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rels(links: &[Link]) -> Vec<&'static str> {
        links.iter().map(|l| l.rel).collect()
    }

    #[test]
    fn test_account_links() {
        let id = AccountId::new();
        let links = account_links("http://localhost:8000/", &id);
        assert_eq!(rels(&links), ["self", "update", "delete"]);
        assert_eq!(links[0].href, format!("http://localhost:8000/users/{id}"));
        assert_eq!(links[2].method, "DELETE");
    }

    #[test]
    fn test_first_page() {
        let links = pagination_links("http://api", 0, 10, 25);
        assert_eq!(rels(&links), ["self", "first", "last", "next"]);
        assert_eq!(links[2].href, "http://api/users?skip=20&limit=10");
        assert_eq!(links[3].href, "http://api/users?skip=10&limit=10");
    }

    #[test]
    fn test_middle_and_last_page() {
        let links = pagination_links("http://api", 10, 10, 25);
        assert_eq!(rels(&links), ["self", "first", "last", "prev", "next"]);

        let links = pagination_links("http://api", 20, 10, 25);
        assert_eq!(rels(&links), ["self", "first", "last", "prev"]);
        assert_eq!(links[3].href, "http://api/users?skip=10&limit=10");
    }

    #[test]
    fn test_empty_collection() {
        let links = pagination_links("http://api", 0, 10, 0);
        assert_eq!(rels(&links), ["self", "first", "last"]);
        assert_eq!(links[2].href, "http://api/users?skip=0&limit=10");
    }
}
