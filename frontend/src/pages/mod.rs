//! One view per sidebar entry.

mod analytics;
mod assistant;
mod data_import;
mod forecast;
mod overview;
mod projects;
mod reports;
mod transactions;

use leptos::prelude::*;

use crate::components::entity_page::entity_page;
use crate::models::{
    Customer, Employee, Invoice, Product, PurchaseOrder, SalesOrder, Supplier, Warehouse,
};
use crate::state::Page;

use analytics::AnalyticsPage;
use assistant::AssistantPage;
use data_import::DataImportPage;
use forecast::ForecastPage;
use overview::OverviewPage;
use projects::ProjectsPage;
use reports::ReportsPage;
use transactions::TransactionsPage;

pub fn page_view(page: Page) -> AnyView {
    match page {
        Page::Overview => view! { <OverviewPage /> }.into_any(),
        Page::Customers => entity_page::<Customer>().into_any(),
        Page::Products => entity_page::<Product>().into_any(),
        Page::SalesOrders => entity_page::<SalesOrder>().into_any(),
        Page::PurchaseOrders => entity_page::<PurchaseOrder>().into_any(),
        Page::Invoices => entity_page::<Invoice>().into_any(),
        Page::Suppliers => entity_page::<Supplier>().into_any(),
        Page::Warehouses => entity_page::<Warehouse>().into_any(),
        Page::Employees => entity_page::<Employee>().into_any(),
        Page::Projects => view! { <ProjectsPage /> }.into_any(),
        Page::Transactions => view! { <TransactionsPage /> }.into_any(),
        Page::Analytics => view! { <AnalyticsPage /> }.into_any(),
        Page::Forecast => view! { <ForecastPage /> }.into_any(),
        Page::Reports => view! { <ReportsPage /> }.into_any(),
        Page::DataImport => view! { <DataImportPage /> }.into_any(),
        Page::Assistant => view! { <AssistantPage /> }.into_any(),
    }
}
