/// Ordering view over a populated page
///
/// The scratch buffer lays lines out by the `order` stored on headers and
/// subheaders, not by the order buttons happen to be clicked. `PageOutline`
/// captures that layout once so the click handlers can do ordered lookups
/// without re-sorting on every click.

use clickscribe_shared::models::tree::PageTree;
use uuid::Uuid;

/// Sorted, flattened view of a page for scratch-buffer layout
#[derive(Debug, Clone)]
pub struct PageOutline {
    /// Page title
    pub title: Option<String>,

    /// Headers sorted by `order`
    pub headers: Vec<HeaderOutline>,
}

/// One header in layout order
#[derive(Debug, Clone)]
pub struct HeaderOutline {
    /// Header ID
    pub id: Uuid,

    /// Text used for this header's buffer line
    ///
    /// Falls back to the internal title when no display text was stored.
    pub display_text: String,

    /// Stored position
    pub order: i32,

    /// Subheaders sorted by `order`
    pub subheaders: Vec<SubheaderOutline>,
}

/// One subheader in layout order
#[derive(Debug, Clone)]
pub struct SubheaderOutline {
    /// Subheader ID
    pub id: Uuid,

    /// Text used for this subheader's buffer line
    pub title: String,

    /// Stored position
    pub order: i32,
}

impl PageOutline {
    /// Builds an outline from a populated page tree
    ///
    /// Headers and subheaders are sorted by their stored `order`; ties keep
    /// the stored array order.
    pub fn from_page(page: &PageTree) -> Self {
        let mut headers: Vec<HeaderOutline> = page
            .headers
            .iter()
            .map(|header| {
                let mut subheaders: Vec<SubheaderOutline> = header
                    .subheaders
                    .iter()
                    .map(|subheader| SubheaderOutline {
                        id: subheader.id,
                        title: subheader.title.clone().unwrap_or_default(),
                        order: subheader.order,
                    })
                    .collect();
                subheaders.sort_by_key(|s| s.order);

                HeaderOutline {
                    id: header.id,
                    display_text: header
                        .display_text
                        .clone()
                        .or_else(|| header.title.clone())
                        .unwrap_or_default(),
                    order: header.order,
                    subheaders,
                }
            })
            .collect();
        headers.sort_by_key(|h| h.order);

        Self {
            title: page.title.clone(),
            headers,
        }
    }

    /// Looks up a header by ID
    pub fn find_header(&self, id: Uuid) -> Option<&HeaderOutline> {
        self.headers.iter().find(|h| h.id == id)
    }

    /// Looks up a subheader by ID, also yielding its parent header
    pub fn find_subheader(&self, id: Uuid) -> Option<(&HeaderOutline, &SubheaderOutline)> {
        self.headers.iter().find_map(|header| {
            header
                .subheaders
                .iter()
                .find(|s| s.id == id)
                .map(|subheader| (header, subheader))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clickscribe_shared::models::tree::{HeaderTree, SubheaderTree};

    fn header(display: &str, order: i32, subheaders: Vec<SubheaderTree>) -> HeaderTree {
        HeaderTree {
            id: Uuid::new_v4(),
            title: Some(display.to_string()),
            display_text: Some(display.to_string()),
            order,
            subheaders,
            buttons: vec![],
        }
    }

    fn subheader(title: &str, order: i32) -> SubheaderTree {
        SubheaderTree {
            id: Uuid::new_v4(),
            title: Some(title.to_string()),
            order,
            buttons: vec![],
        }
    }

    fn page(headers: Vec<HeaderTree>) -> PageTree {
        PageTree {
            id: Uuid::new_v4(),
            title: Some("Test".to_string()),
            headers,
        }
    }

    #[test]
    fn test_headers_sorted_by_order() {
        let tree = page(vec![
            header("Third", 3, vec![]),
            header("First", 1, vec![]),
            header("Second", 2, vec![]),
        ]);

        let outline = PageOutline::from_page(&tree);
        let names: Vec<&str> = outline
            .headers
            .iter()
            .map(|h| h.display_text.as_str())
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_subheaders_sorted_within_header() {
        let tree = page(vec![header(
            "Main",
            1,
            vec![subheader("B", 2), subheader("A", 1)],
        )]);

        let outline = PageOutline::from_page(&tree);
        let names: Vec<&str> = outline.headers[0]
            .subheaders
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_display_text_falls_back_to_title() {
        let mut h = header("Main", 1, vec![]);
        h.display_text = None;

        let outline = PageOutline::from_page(&page(vec![h]));
        assert_eq!(outline.headers[0].display_text, "Main");
    }

    #[test]
    fn test_find_subheader_yields_parent() {
        let tree = page(vec![
            header("First", 1, vec![subheader("Roof", 1)]),
            header("Second", 2, vec![subheader("Walls", 1)]),
        ]);
        let outline = PageOutline::from_page(&tree);

        let wanted = outline.headers[1].subheaders[0].id;
        let (parent, sub) = outline.find_subheader(wanted).expect("subheader exists");
        assert_eq!(parent.display_text, "Second");
        assert_eq!(sub.title, "Walls");
    }

    #[test]
    fn test_find_missing_returns_none() {
        let outline = PageOutline::from_page(&page(vec![]));
        assert!(outline.find_header(Uuid::new_v4()).is_none());
        assert!(outline.find_subheader(Uuid::new_v4()).is_none());
    }
}
