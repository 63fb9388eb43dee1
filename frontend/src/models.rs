use serde::{Deserialize, Deserializer, Serialize};

use crate::dashboard::DashboardSpec;

/// Treats an explicit JSON `null` the same as a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A dashboard that does not parse is dropped so the text reply still shows.
fn lenient_dashboard<'de, D>(deserializer: D) -> Result<Option<DashboardSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match serde_json::from_value(value) {
        Ok(spec) => Some(spec),
        Err(e) => {
            log::warn!("Ignoring unreadable dashboard config: {e}");
            None
        }
    }))
}

// ── Chat wire types ─────────────────────────────────────────────────────────

/// One prior turn sent along with a chat request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

/// Request body for `POST /api/chat`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_history: Vec<HistoryEntry>,
}

/// Response from the chat service.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ChatReply {
    #[serde(default, deserialize_with = "nullable")]
    pub response: String,
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default, deserialize_with = "lenient_dashboard")]
    pub dashboard_config: Option<DashboardSpec>,
}

// ── Entities ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: String,
    #[serde(default, deserialize_with = "nullable")]
    pub location: String,
    #[serde(default)]
    pub total_spent: Option<f64>,
    #[serde(default, deserialize_with = "nullable")]
    pub order_count: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub level: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CustomerUpdate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub sku: String,
    #[serde(default, deserialize_with = "nullable")]
    pub category: String,
    #[serde(default, deserialize_with = "nullable")]
    pub price: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub stock: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub sold_count: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrder {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub order_number: String,
    #[serde(default, deserialize_with = "nullable")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub order_date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub grand_total: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
    #[serde(default, deserialize_with = "nullable")]
    pub payment_status: String,
}

/// Shared by sales and purchase orders: only the workflow fields are editable.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub status: String,
    pub payment_status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub po_number: String,
    #[serde(default, deserialize_with = "nullable")]
    pub supplier_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub order_date: String,
    #[serde(default)]
    pub expected_date: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub grand_total: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
    #[serde(default, deserialize_with = "nullable")]
    pub payment_status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub invoice_number: String,
    #[serde(default, deserialize_with = "nullable")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub invoice_date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub due_date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub paid_amount: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceUpdate {
    pub status: String,
    pub paid_amount: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: String,
    #[serde(default, deserialize_with = "nullable")]
    pub address: String,
    #[serde(default, deserialize_with = "nullable")]
    pub city: String,
    #[serde(default, deserialize_with = "nullable")]
    pub country: String,
    #[serde(default, deserialize_with = "nullable")]
    pub total_purchased: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub rating: String,
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct SupplierUpdate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub warehouse_code: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub location: String,
    #[serde(default, deserialize_with = "nullable")]
    pub city: String,
    #[serde(default, deserialize_with = "nullable")]
    pub manager: String,
    #[serde(default, deserialize_with = "nullable")]
    pub capacity: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub current_stock: i64,
    #[serde(default, rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct WarehouseUpdate {
    pub name: String,
    pub location: String,
    pub city: String,
    pub manager: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub employee_id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub first_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub last_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable")]
    pub department: String,
    #[serde(default, deserialize_with = "nullable")]
    pub position: String,
    #[serde(default, deserialize_with = "nullable")]
    pub salary: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub position: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    #[serde(default)]
    pub project_code: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectStatus {
    Planning,
    InProgress,
    Done,
    Blocked,
}

impl ProjectStatus {
    /// Unknown or missing statuses are shown as planning.
    pub fn coerce(raw: Option<&str>) -> Self {
        match raw {
            Some("in_progress") => ProjectStatus::InProgress,
            Some("done") => ProjectStatus::Done,
            Some("blocked") => ProjectStatus::Blocked,
            _ => ProjectStatus::Planning,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "Planning",
            ProjectStatus::InProgress => "In progress",
            ProjectStatus::Done => "Done",
            ProjectStatus::Blocked => "Blocked",
        }
    }
}

impl Project {
    pub fn display_code(&self) -> String {
        match self.project_code.as_deref() {
            Some(code) if !code.is_empty() => code.to_string(),
            _ => format!("PRJ-{:04}", self.id),
        }
    }

    pub fn display_customer(&self) -> &str {
        self.customer_name.as_deref().unwrap_or("-")
    }

    pub fn status(&self) -> ProjectStatus {
        ProjectStatus::coerce(self.status.as_deref())
    }

    /// Case-insensitive match against code, name and customer.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        [self.display_code(), self.name.clone(), self.display_customer().to_string()]
            .iter()
            .any(|field| field.to_lowercase().contains(&q))
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub transaction_date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub transaction_type: String,
    #[serde(default, deserialize_with = "nullable")]
    pub product: String,
    #[serde(default, deserialize_with = "nullable")]
    pub revenue: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub cost: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub profit: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub order_status: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: i64,
    #[serde(default, alias = "title", deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    #[serde(default, alias = "createdAt", deserialize_with = "nullable")]
    pub date: String,
    #[serde(default, alias = "createdBy", deserialize_with = "nullable")]
    pub user: String,
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
}

// ── Stats ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomerStats {
    #[serde(deserialize_with = "nullable")]
    pub total: f64,
    #[serde(deserialize_with = "nullable")]
    pub vip: f64,
    #[serde(deserialize_with = "nullable")]
    pub diamond: f64,
    #[serde(deserialize_with = "nullable")]
    pub gold: f64,
    #[serde(rename = "new", deserialize_with = "nullable")]
    pub new_customers: f64,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductStats {
    #[serde(deserialize_with = "nullable")]
    pub total: f64,
    #[serde(deserialize_with = "nullable")]
    pub active: f64,
    #[serde(deserialize_with = "nullable")]
    pub low_stock: f64,
    #[serde(deserialize_with = "nullable")]
    pub out_of_stock: f64,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SalesOrderStats {
    #[serde(deserialize_with = "nullable")]
    pub total: f64,
    #[serde(deserialize_with = "nullable")]
    pub pending: f64,
    #[serde(deserialize_with = "nullable")]
    pub delivered: f64,
    #[serde(deserialize_with = "nullable")]
    pub total_revenue: f64,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PurchaseOrderStats {
    #[serde(deserialize_with = "nullable")]
    pub total: f64,
    #[serde(deserialize_with = "nullable")]
    pub sent: f64,
    #[serde(deserialize_with = "nullable")]
    pub received: f64,
    #[serde(deserialize_with = "nullable")]
    pub total_purchased: f64,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct InvoiceStats {
    #[serde(deserialize_with = "nullable")]
    pub total: f64,
    #[serde(deserialize_with = "nullable")]
    pub paid: f64,
    #[serde(deserialize_with = "nullable")]
    pub overdue: f64,
    #[serde(deserialize_with = "nullable")]
    pub total_paid: f64,
    #[serde(deserialize_with = "nullable")]
    pub total_outstanding: f64,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SupplierStats {
    #[serde(deserialize_with = "nullable")]
    pub total: f64,
    #[serde(deserialize_with = "nullable")]
    pub active: f64,
    #[serde(deserialize_with = "nullable")]
    pub inactive: f64,
    #[serde(deserialize_with = "nullable")]
    pub blocked: f64,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct WarehouseStats {
    #[serde(deserialize_with = "nullable")]
    pub total: f64,
    #[serde(deserialize_with = "nullable")]
    pub active: f64,
    #[serde(deserialize_with = "nullable")]
    pub total_stock: f64,
    #[serde(deserialize_with = "nullable")]
    pub utilization_percent: f64,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EmployeeStats {
    #[serde(deserialize_with = "nullable")]
    pub total: f64,
    #[serde(deserialize_with = "nullable")]
    pub active: f64,
    #[serde(deserialize_with = "nullable")]
    pub on_leave: f64,
    #[serde(deserialize_with = "nullable")]
    pub resigned: f64,
}

// ── Overview & forecast ─────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Kpi {
    #[serde(deserialize_with = "nullable")]
    pub value: f64,
    #[serde(deserialize_with = "nullable")]
    pub change: f64,
    #[serde(deserialize_with = "nullable")]
    pub trend: String,
}

impl Kpi {
    pub fn is_up(&self) -> bool {
        match self.trend.as_str() {
            "up" => true,
            "down" => false,
            _ => self.change >= 0.0,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct KpiSet {
    pub revenue: Kpi,
    pub profit: Kpi,
    pub orders: Kpi,
    pub inventory: Kpi,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ForecastInsight {
    #[serde(deserialize_with = "nullable")]
    pub label: String,
    #[serde(deserialize_with = "nullable")]
    pub message: String,
    #[serde(deserialize_with = "nullable")]
    pub status: String,
    #[serde(alias = "expectedGrowth", alias = "changePercent", deserialize_with = "nullable")]
    pub growth_percent: f64,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ForecastInsights {
    pub q1_forecast: ForecastInsight,
    pub peak_season: ForecastInsight,
    pub inventory_warning: ForecastInsight,
}

/// One month of the revenue forecast, in millions of đồng. Historical months
/// carry `actual`, projected months carry `forecast`; the other side is 0.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ForecastPoint {
    #[serde(deserialize_with = "nullable")]
    pub month: String,
    #[serde(deserialize_with = "nullable")]
    pub actual: f64,
    #[serde(deserialize_with = "nullable")]
    pub forecast: f64,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ForecastTarget {
    #[serde(deserialize_with = "nullable")]
    pub target: String,
    #[serde(deserialize_with = "nullable")]
    pub expected: String,
    #[serde(deserialize_with = "nullable")]
    pub probability: f64,
    #[serde(deserialize_with = "nullable")]
    pub status: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Recommendation {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(alias = "desc", deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub priority: String,
}

// ── Data import ─────────────────────────────────────────────────────────────

/// Body returned by the CSV upload and clear endpoints.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportResponse {
    pub message: Option<String>,
    pub records_imported: Option<u64>,
    pub error: Option<String>,
}

/// Outcome shown in the import banner.
#[derive(Clone, Debug, PartialEq)]
pub struct ImportOutcome {
    pub success: bool,
    pub message: String,
    pub records_imported: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_fields_fall_back_to_defaults() {
        let json = r#"{"id":3,"name":null,"email":"a@b.vn","totalSpent":null,"orderCount":null}"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.id, 3);
        assert_eq!(customer.name, "");
        assert_eq!(customer.email, "a@b.vn");
        assert_eq!(customer.total_spent, None);
        assert_eq!(customer.order_count, 0);
    }

    #[test]
    fn record_without_id_is_rejected() {
        let json = r#"{"name":"Kho A"}"#;
        assert!(serde_json::from_str::<Warehouse>(json).is_err());
    }

    #[test]
    fn stats_tolerate_missing_and_null_sums() {
        let stats: InvoiceStats =
            serde_json::from_str(r#"{"total":12,"paid":4,"totalPaid":null}"#).unwrap();
        assert_eq!(stats.total, 12.0);
        assert_eq!(stats.paid, 4.0);
        assert_eq!(stats.total_paid, 0.0);
        assert_eq!(stats.total_outstanding, 0.0);
    }

    #[test]
    fn project_status_and_code_are_coerced() {
        let p: Project =
            serde_json::from_str(r#"{"id":7,"name":"ERP rollout","status":"archived"}"#).unwrap();
        assert_eq!(p.status(), ProjectStatus::Planning);
        assert_eq!(p.display_code(), "PRJ-0007");
        assert_eq!(p.display_customer(), "-");
        assert!(p.matches("prj-0007"));
        assert!(p.matches("rollout"));
        assert!(!p.matches("warehouse"));
    }

    #[test]
    fn employee_update_uses_camel_case() {
        let update = EmployeeUpdate {
            first_name: "An".into(),
            last_name: "Nguyen".into(),
            email: "an@erp.vn".into(),
            department: "Sales".into(),
            position: "Lead".into(),
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["firstName"], "An");
        assert_eq!(value["lastName"], "Nguyen");
    }

    #[test]
    fn chat_reply_without_optional_fields() {
        let reply: ChatReply = serde_json::from_str(r#"{"response":"Hello"}"#).unwrap();
        assert_eq!(reply.response, "Hello");
        assert!(reply.intent.is_none());
        assert!(reply.dashboard_config.is_none());
    }

    #[test]
    fn unreadable_dashboard_keeps_the_text_reply() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"response":"Here it is","intent":"create_dashboard","dashboard_config":{"charts":"oops"}}"#,
        )
        .unwrap();
        assert_eq!(reply.response, "Here it is");
        assert!(reply.dashboard_config.is_none());
    }
}
