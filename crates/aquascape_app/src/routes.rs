//! Path routing and page composition.
//!
//! # Responsibility
//! - Map URL-style paths to pages.
//! - Wrap every page in the root layout (title bar + navigation).
//!
//! # Invariants
//! - Routing holds no tank state; pages render from borrowed components.

use crate::ui::form::TankForm;
use crate::ui::list::TankList;
use aquascape_core::Tank;
use std::error::Error;
use std::fmt::{Display, Formatter, Write as _};

pub const APP_TITLE: &str = "Aquascape Planner";
const RULE_WIDTH: usize = 60;

/// Known application routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Tanks,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Tanks => "/tanks",
        }
    }

    /// Resolves a path, ignoring surrounding whitespace, a trailing slash and
    /// any query string.
    pub fn resolve(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim();
        let without_query = trimmed.split(['?', '#']).next().unwrap_or_default();
        let normalized = without_query.trim_end_matches('/');
        match normalized {
            "" => Ok(Self::Home),
            "/tanks" => Ok(Self::Tanks),
            _ => Err(RouteError::NotFound(trimmed.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    NotFound(String),
}

impl Display for RouteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "no page at `{path}`"),
        }
    }
}

impl Error for RouteError {}

/// Components a page may borrow while rendering.
pub struct PageContext<'a> {
    pub tanks: &'a [Tank],
    pub form: &'a TankForm,
    pub list: &'a TankList,
}

/// Renders `route` inside the root layout.
pub fn render_page(route: Route, ctx: &PageContext<'_>) -> String {
    let body = match route {
        Route::Home => render_home(),
        Route::Tanks => render_tanks(ctx),
    };
    render_layout(route, &body)
}

fn render_layout(active: Route, body: &str) -> String {
    let link = if active == Route::Tanks {
        "*Tanks*"
    } else {
        "Tanks"
    };
    let gap = RULE_WIDTH.saturating_sub(APP_TITLE.len() + link.len()).max(1);
    let rule = "=".repeat(RULE_WIDTH);
    format!("{APP_TITLE}{}{link}\n{rule}\n{body}", " ".repeat(gap))
}

fn render_home() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Welcome to {APP_TITLE}");
    out.push_str("Track your aquarium maintenance and get insights to prevent common issues\n\n");

    let cards = [
        (
            "Tanks",
            "Manage your aquariums and their configurations",
            "View Tanks -> goto /tanks",
        ),
        (
            "Maintenance Log",
            "Record water changes, trimming, and maintenance tasks",
            "Coming Soon",
        ),
        (
            "Insights",
            "Get alerts for algae risks and maintenance reminders",
            "Coming Soon",
        ),
    ];
    for (title, blurb, action) in cards {
        let _ = writeln!(out, "+-- {title}\n| {blurb}\n| [{action}]");
    }
    out
}

fn render_tanks(ctx: &PageContext<'_>) -> String {
    let mut out = String::from("Your Tanks\nManage your aquariums and their configurations\n\n");
    out.push_str(&ctx.form.render());
    out.push('\n');
    out.push_str(&ctx.list.render(ctx.tanks));
    out
}

#[cfg(test)]
mod tests {
    use super::{render_page, PageContext, Route, RouteError, APP_TITLE};
    use crate::ui::form::TankForm;
    use crate::ui::list::{TankList, EMPTY_MESSAGE};
    use aquascape_core::TankStore;

    #[test]
    fn resolve_known_paths() {
        assert_eq!(Route::resolve("/").unwrap(), Route::Home);
        assert_eq!(Route::resolve("").unwrap(), Route::Home);
        assert_eq!(Route::resolve("/tanks").unwrap(), Route::Tanks);
        assert_eq!(Route::resolve(" /tanks/ ").unwrap(), Route::Tanks);
        assert_eq!(Route::resolve("/tanks?tab=all").unwrap(), Route::Tanks);
    }

    #[test]
    fn resolve_rejects_unknown_paths() {
        assert_eq!(
            Route::resolve("/maintenance").unwrap_err(),
            RouteError::NotFound("/maintenance".to_string())
        );
        assert!(Route::resolve("tanks").is_err());
    }

    #[test]
    fn home_page_lists_feature_cards() {
        let mut store = TankStore::new();
        let list = TankList::mount(&mut store);
        let form = TankForm::new();
        let ctx = PageContext {
            tanks: store.tanks(),
            form: &form,
            list: &list,
        };

        let page = render_page(Route::Home, &ctx);
        assert!(page.starts_with(APP_TITLE));
        assert!(page.contains("Maintenance Log"));
        assert!(page.contains("Coming Soon"));
        assert!(!page.contains("*Tanks*"));
    }

    #[test]
    fn tanks_page_composes_form_and_list() {
        let mut store = TankStore::new();
        let list = TankList::mount(&mut store);
        let form = TankForm::new();
        let ctx = PageContext {
            tanks: store.tanks(),
            form: &form,
            list: &list,
        };

        let page = render_page(Route::Tanks, &ctx);
        assert!(page.contains("*Tanks*"));
        assert!(page.contains("Add New Tank"));
        assert!(page.contains(EMPTY_MESSAGE));
        assert!(!list.needs_render());
    }
}
