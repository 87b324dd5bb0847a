//! Pagination control descriptors
//!
//! A pure function of the current page and the page count. Rendering to
//! HTML is kept separate so callers can choose how page links look.

use serde::Serialize;

/// Pages shown on each side of the current one
const WINDOW: usize = 2;

/// Previous/Next control; `target` is `None` when disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavControl {
    pub target: Option<usize>,
}

impl NavControl {
    pub fn is_enabled(&self) -> bool {
        self.target.is_some()
    }
}

/// A numbered page control (zero-based index, shown one-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub index: usize,
    pub active: bool,
}

impl PageLink {
    pub fn label(&self) -> usize {
        self.index + 1
    }
}

/// Full set of pagination controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current: usize,
    pub total_pages: usize,
    pub previous: NavControl,
    pub pages: Vec<PageLink>,
    pub next: NavControl,
}

/// Build controls for page `current` of `total_pages`.
///
/// Returns `None` when there is at most one page, in which case the
/// whole control is suppressed.
pub fn paginate(current: usize, total_pages: usize) -> Option<Pagination> {
    if total_pages <= 1 {
        return None;
    }

    let start = current.saturating_sub(WINDOW);
    let end = (total_pages - 1).min(current.saturating_add(WINDOW));
    let pages = (start..=end)
        .map(|index| PageLink {
            index,
            active: index == current,
        })
        .collect();

    let previous = NavControl {
        target: (current > 0).then(|| current - 1),
    };
    let next = NavControl {
        target: (current.saturating_add(1) < total_pages).then(|| current + 1),
    };

    Some(Pagination {
        current,
        total_pages,
        previous,
        pages,
        next,
    })
}

impl Pagination {
    /// Render as a Bootstrap pagination list; `href` maps a page index to a link
    pub fn to_html<F>(&self, href: F) -> String
    where
        F: Fn(usize) -> String,
    {
        let mut html = String::from(r#"<ul class="pagination justify-content-center">"#);

        push_nav(&mut html, &self.previous, "Previous", &href);

        for page in &self.pages {
            let active = if page.active { " active" } else { "" };
            html.push_str(&format!(
                r#"<li class="page-item{}"><a class="page-link" href="{}">{}</a></li>"#,
                active,
                href(page.index),
                page.label()
            ));
        }

        push_nav(&mut html, &self.next, "Next", &href);

        html.push_str("</ul>");
        html
    }
}

fn push_nav<F>(html: &mut String, control: &NavControl, label: &str, href: &F)
where
    F: Fn(usize) -> String,
{
    match control.target {
        Some(target) => html.push_str(&format!(
            r#"<li class="page-item"><a class="page-link" href="{}">{}</a></li>"#,
            href(target),
            label
        )),
        None => html.push_str(&format!(
            r##"<li class="page-item disabled"><a class="page-link" href="#" tabindex="-1" aria-disabled="true">{}</a></li>"##,
            label
        )),
    }
}
