use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::chat::{ChatSession, GREETING};

/// Every screen reachable from the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Overview,
    Customers,
    Products,
    SalesOrders,
    PurchaseOrders,
    Invoices,
    Suppliers,
    Warehouses,
    Employees,
    Projects,
    Transactions,
    Analytics,
    Forecast,
    Reports,
    DataImport,
    Assistant,
}

impl Page {
    pub const ALL: [Page; 16] = [
        Page::Overview,
        Page::Customers,
        Page::Products,
        Page::SalesOrders,
        Page::PurchaseOrders,
        Page::Invoices,
        Page::Suppliers,
        Page::Warehouses,
        Page::Employees,
        Page::Projects,
        Page::Transactions,
        Page::Analytics,
        Page::Forecast,
        Page::Reports,
        Page::DataImport,
        Page::Assistant,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Customers => "Customers",
            Page::Products => "Products",
            Page::SalesOrders => "Sales orders",
            Page::PurchaseOrders => "Purchase orders",
            Page::Invoices => "Invoices",
            Page::Suppliers => "Suppliers",
            Page::Warehouses => "Warehouses",
            Page::Employees => "Employees",
            Page::Projects => "Projects",
            Page::Transactions => "Transactions",
            Page::Analytics => "Analytics",
            Page::Forecast => "AI forecast",
            Page::Reports => "Reports",
            Page::DataImport => "Data import",
            Page::Assistant => "AI assistant",
        }
    }

    /// Sidebar group heading.
    pub fn section(&self) -> &'static str {
        match self {
            Page::Overview | Page::Analytics | Page::Forecast | Page::Reports => "Dashboard",
            Page::Customers | Page::SalesOrders | Page::Invoices | Page::Transactions => "Sales",
            Page::Products | Page::Warehouses | Page::Suppliers | Page::PurchaseOrders => {
                "Inventory & purchasing"
            }
            Page::Employees | Page::Projects => "Organisation",
            Page::DataImport | Page::Assistant => "Tools",
        }
    }
}

/// Shared application state, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct AppState {
    pub page: ReadSignal<Page>,
    pub set_page: WriteSignal<Page>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let (page, set_page) = signal(Page::Overview);
        let state = Self { page, set_page };
        provide_context(state);
        state
    }

    pub fn open(&self, page: Page) {
        log::debug!("Opening page {}", page.title());
        self.set_page.set(page);
    }
}

/// Transcript of one chat widget. Lives as long as the widget that created it.
#[derive(Clone, Copy)]
pub struct ChatState {
    pub session: ReadSignal<ChatSession>,
    set_session: WriteSignal<ChatSession>,
}

impl ChatState {
    pub fn new() -> Self {
        let (session, set_session) = signal(ChatSession::with_greeting(GREETING));
        Self { session, set_session }
    }

    pub fn is_busy(&self) -> bool {
        self.session.with(ChatSession::is_busy)
    }

    /// Appends the user turn and sends it. Ignored while a reply is pending.
    pub fn send_message(&self, text: String) {
        let Some(request) = self.set_session.try_update(|s| s.submit(&text)).flatten() else {
            return;
        };

        let set_session = self.set_session;
        spawn_local(async move {
            let result = api::send_chat(&request).await;
            // The widget may be gone by now; its transcript went with it.
            if set_session.try_update(|s| s.complete(result).is_some()).is_none() {
                log::debug!("Chat reply arrived after the chat view closed");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_page_has_a_section() {
        let mut titles: Vec<_> = Page::ALL.iter().map(Page::title).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), Page::ALL.len());
        assert!(Page::ALL.iter().all(|p| !p.section().is_empty()));
    }
}
