use super::{Editable, Field, Resource, StatCard};
use crate::format::{format_date, format_vnd, format_vnd_compact, group_thousands};
use crate::models::{
    Customer, CustomerStats, CustomerUpdate, Employee, EmployeeStats, EmployeeUpdate, Invoice,
    InvoiceStats, InvoiceUpdate, OrderStatusUpdate, Product, ProductStats, ProductUpdate,
    PurchaseOrder, PurchaseOrderStats, SalesOrder, SalesOrderStats, Supplier, SupplierStats,
    SupplierUpdate, Warehouse, WarehouseStats, WarehouseUpdate,
};

fn count(value: f64) -> String {
    group_thousands(value)
}

fn parse_or<T: std::str::FromStr + Copy>(raw: &str, current: T) -> T {
    raw.trim().parse().unwrap_or(current)
}

// ── Customers ───────────────────────────────────────────────────────────────

impl Resource for Customer {
    type Stats = CustomerStats;

    const COLLECTION: &'static str = "customers";
    const LIST_PATH: Option<&'static str> = Some("customers/vip");
    const LIST_KEY: Option<&'static str> = Some("customers");
    const LIST_LIMIT: Option<usize> = Some(5);
    const TITLE: &'static str = "Customers";
    const SUBTITLE: &'static str = "Top customers by lifetime value";

    fn id(&self) -> i64 {
        self.id
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Email", "Phone", "Location", "Total spent", "Orders", "Level"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.location.clone(),
            self.total_spent.map(format_vnd).unwrap_or_else(|| "-".to_string()),
            self.order_count.to_string(),
            self.level.clone(),
        ]
    }

    fn stat_cards(stats: &CustomerStats) -> Vec<StatCard> {
        vec![
            StatCard::new("Total customers", count(stats.total)),
            StatCard::new("VIP", count(stats.vip)).hint(format!("{} diamond", count(stats.diamond))),
            StatCard::new("Loyal", count(stats.gold)).hint("More than 3 purchases"),
            StatCard::new("New", count(stats.new_customers)),
        ]
    }
}

impl Editable for Customer {
    type Update = CustomerUpdate;

    fn to_update(&self) -> CustomerUpdate {
        CustomerUpdate {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            location: self.location.clone(),
        }
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::text("Name", |c| c.name.clone(), |c, v| c.name = v.to_string()),
            Field::text("Email", |c| c.email.clone(), |c, v| c.email = v.to_string()),
            Field::text("Phone", |c| c.phone.clone(), |c, v| c.phone = v.to_string()),
            Field::text("Location", |c| c.location.clone(), |c, v| c.location = v.to_string()),
        ]
    }
}

// ── Products ────────────────────────────────────────────────────────────────

impl Resource for Product {
    type Stats = ProductStats;

    const COLLECTION: &'static str = "products";
    const LIST_KEY: Option<&'static str> = Some("products");
    const TITLE: &'static str = "Products";
    const SUBTITLE: &'static str = "Catalogue, pricing and stock levels";

    fn id(&self) -> i64 {
        self.id
    }

    fn columns() -> &'static [&'static str] {
        &["SKU", "Name", "Category", "Price", "Stock", "Sold", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.sku.clone(),
            self.name.clone(),
            self.category.clone(),
            format_vnd(self.price),
            self.stock.to_string(),
            self.sold_count.to_string(),
            self.status.clone(),
        ]
    }

    fn stat_cards(stats: &ProductStats) -> Vec<StatCard> {
        let active_share = if stats.total > 0.0 {
            (stats.active / stats.total * 100.0).round()
        } else {
            0.0
        };
        vec![
            StatCard::new("Total products", count(stats.total)),
            StatCard::new("Active", count(stats.active)).hint(format!("{active_share}% of catalogue")),
            StatCard::new("Low stock", count(stats.low_stock)),
            StatCard::new("Out of stock", count(stats.out_of_stock)),
        ]
    }
}

impl Editable for Product {
    type Update = ProductUpdate;

    fn to_update(&self) -> ProductUpdate {
        ProductUpdate {
            name: self.name.clone(),
            category: self.category.clone(),
            price: self.price,
            stock: self.stock,
        }
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::text("Name", |p| p.name.clone(), |p, v| p.name = v.to_string()),
            Field::text("Category", |p| p.category.clone(), |p, v| p.category = v.to_string()),
            Field::number("Price", |p| p.price.to_string(), |p, v| p.price = parse_or(v, p.price)),
            Field::number("Stock", |p| p.stock.to_string(), |p, v| p.stock = parse_or(v, p.stock)),
        ]
    }
}

// ── Sales orders ────────────────────────────────────────────────────────────

impl Resource for SalesOrder {
    type Stats = SalesOrderStats;

    const COLLECTION: &'static str = "sales-orders";
    const TITLE: &'static str = "Sales orders";
    const SUBTITLE: &'static str = "Every order sold to customers";

    fn id(&self) -> i64 {
        self.id
    }

    fn columns() -> &'static [&'static str] {
        &["Order #", "Customer", "Date", "Total", "Status", "Payment"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.order_number.clone(),
            self.customer_name.clone(),
            format_date(&self.order_date),
            format_vnd(self.grand_total),
            self.status.clone(),
            self.payment_status.clone(),
        ]
    }

    fn stat_cards(stats: &SalesOrderStats) -> Vec<StatCard> {
        vec![
            StatCard::new("Total orders", count(stats.total)),
            StatCard::new("Pending", count(stats.pending)),
            StatCard::new("Delivered", count(stats.delivered)),
            StatCard::new("Revenue", format_vnd_compact(stats.total_revenue)),
        ]
    }
}

impl Editable for SalesOrder {
    type Update = OrderStatusUpdate;

    fn to_update(&self) -> OrderStatusUpdate {
        OrderStatusUpdate {
            status: self.status.clone(),
            payment_status: self.payment_status.clone(),
        }
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::text("Status", |o| o.status.clone(), |o, v| o.status = v.to_string()),
            Field::text("Payment", |o| o.payment_status.clone(), |o, v| o.payment_status = v.to_string()),
        ]
    }
}

// ── Purchase orders ─────────────────────────────────────────────────────────

impl Resource for PurchaseOrder {
    type Stats = PurchaseOrderStats;

    const COLLECTION: &'static str = "purchase-orders";
    const TITLE: &'static str = "Purchase orders";
    const SUBTITLE: &'static str = "Orders placed with suppliers";

    fn id(&self) -> i64 {
        self.id
    }

    fn columns() -> &'static [&'static str] {
        &["PO #", "Supplier", "Order date", "Expected", "Total", "Status", "Payment"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.po_number.clone(),
            self.supplier_name.clone(),
            format_date(&self.order_date),
            self.expected_date.as_deref().map(format_date).unwrap_or_else(|| "-".to_string()),
            format_vnd(self.grand_total),
            self.status.clone(),
            self.payment_status.clone(),
        ]
    }

    fn stat_cards(stats: &PurchaseOrderStats) -> Vec<StatCard> {
        vec![
            StatCard::new("Total POs", count(stats.total)),
            StatCard::new("Sent", count(stats.sent)),
            StatCard::new("Received", count(stats.received)),
            StatCard::new("Purchased", format_vnd_compact(stats.total_purchased)),
        ]
    }
}

impl Editable for PurchaseOrder {
    type Update = OrderStatusUpdate;

    fn to_update(&self) -> OrderStatusUpdate {
        OrderStatusUpdate {
            status: self.status.clone(),
            payment_status: self.payment_status.clone(),
        }
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::text("Status", |o| o.status.clone(), |o, v| o.status = v.to_string()),
            Field::text("Payment", |o| o.payment_status.clone(), |o, v| o.payment_status = v.to_string()),
        ]
    }
}

// ── Invoices ────────────────────────────────────────────────────────────────

impl Resource for Invoice {
    type Stats = InvoiceStats;

    const COLLECTION: &'static str = "invoices";
    const TITLE: &'static str = "Invoices";
    const SUBTITLE: &'static str = "Sales invoices and receivables";

    fn id(&self) -> i64 {
        self.id
    }

    fn columns() -> &'static [&'static str] {
        &["Invoice #", "Customer", "Date", "Due", "Total", "Paid", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.invoice_number.clone(),
            self.customer_name.clone(),
            format_date(&self.invoice_date),
            format_date(&self.due_date),
            format_vnd(self.total_amount),
            format_vnd(self.paid_amount),
            self.status.clone(),
        ]
    }

    fn stat_cards(stats: &InvoiceStats) -> Vec<StatCard> {
        vec![
            StatCard::new("Total invoices", count(stats.total)),
            StatCard::new("Paid", count(stats.paid)).hint(format_vnd(stats.total_paid)),
            StatCard::new("Overdue", count(stats.overdue)),
            StatCard::new("Outstanding", format_vnd(stats.total_outstanding)).hint("Still to collect"),
        ]
    }
}

impl Editable for Invoice {
    type Update = InvoiceUpdate;

    fn to_update(&self) -> InvoiceUpdate {
        InvoiceUpdate {
            status: self.status.clone(),
            paid_amount: self.paid_amount,
        }
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::text("Status", |i| i.status.clone(), |i, v| i.status = v.to_string()),
            Field::number(
                "Paid amount",
                |i| i.paid_amount.to_string(),
                |i, v| i.paid_amount = parse_or(v, i.paid_amount),
            ),
        ]
    }
}

// ── Suppliers ───────────────────────────────────────────────────────────────

fn rating_stars(rating: &str) -> String {
    let stars = match rating {
        "excellent" => 5,
        "good" => 4,
        "poor" => 2,
        _ => 3,
    };
    "★".repeat(stars)
}

impl Resource for Supplier {
    type Stats = SupplierStats;

    const COLLECTION: &'static str = "suppliers";
    const TITLE: &'static str = "Suppliers";
    const SUBTITLE: &'static str = "Vendors and purchasing volume";

    fn id(&self) -> i64 {
        self.id
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Email", "Phone", "Location", "Purchased", "Rating", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            format!("{}, {}", self.city, self.country),
            format_vnd(self.total_purchased),
            rating_stars(&self.rating),
            self.status.clone(),
        ]
    }

    fn stat_cards(stats: &SupplierStats) -> Vec<StatCard> {
        vec![
            StatCard::new("Total suppliers", count(stats.total)),
            StatCard::new("Active", count(stats.active)),
            StatCard::new("Inactive", count(stats.inactive)),
            StatCard::new("Blocked", count(stats.blocked)),
        ]
    }
}

impl Editable for Supplier {
    type Update = SupplierUpdate;

    fn to_update(&self) -> SupplierUpdate {
        SupplierUpdate {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
        }
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::text("Name", |s| s.name.clone(), |s, v| s.name = v.to_string()),
            Field::text("Email", |s| s.email.clone(), |s, v| s.email = v.to_string()),
            Field::text("Phone", |s| s.phone.clone(), |s, v| s.phone = v.to_string()),
            Field::text("Address", |s| s.address.clone(), |s, v| s.address = v.to_string()),
        ]
    }
}

// ── Warehouses ──────────────────────────────────────────────────────────────

impl Resource for Warehouse {
    type Stats = WarehouseStats;

    const COLLECTION: &'static str = "warehouses";
    const TITLE: &'static str = "Warehouses";
    const SUBTITLE: &'static str = "Storage sites, stock and capacity";

    fn id(&self) -> i64 {
        self.id
    }

    fn columns() -> &'static [&'static str] {
        &["Code", "Name", "City", "Manager", "Stock", "Capacity", "Type", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.warehouse_code.clone(),
            self.name.clone(),
            self.city.clone(),
            self.manager.clone(),
            count(self.current_stock as f64),
            count(self.capacity as f64),
            self.kind.clone(),
            self.status.clone(),
        ]
    }

    fn stat_cards(stats: &WarehouseStats) -> Vec<StatCard> {
        vec![
            StatCard::new("Total warehouses", count(stats.total)),
            StatCard::new("Active", count(stats.active)),
            StatCard::new("Units in stock", count(stats.total_stock)),
            StatCard::new("Utilization", format!("{:.1}%", stats.utilization_percent)),
        ]
    }
}

impl Editable for Warehouse {
    type Update = WarehouseUpdate;

    fn to_update(&self) -> WarehouseUpdate {
        WarehouseUpdate {
            name: self.name.clone(),
            location: self.location.clone(),
            city: self.city.clone(),
            manager: self.manager.clone(),
        }
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::text("Name", |w| w.name.clone(), |w, v| w.name = v.to_string()),
            Field::text("Location", |w| w.location.clone(), |w, v| w.location = v.to_string()),
            Field::text("City", |w| w.city.clone(), |w, v| w.city = v.to_string()),
            Field::text("Manager", |w| w.manager.clone(), |w, v| w.manager = v.to_string()),
        ]
    }
}

// ── Employees ───────────────────────────────────────────────────────────────

impl Resource for Employee {
    type Stats = EmployeeStats;

    const COLLECTION: &'static str = "employees";
    const TITLE: &'static str = "Employees";
    const SUBTITLE: &'static str = "Staff directory";

    fn id(&self) -> i64 {
        self.id
    }

    fn columns() -> &'static [&'static str] {
        &["ID", "Name", "Email", "Department", "Position", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.employee_id.clone(),
            format!("{} {}", self.first_name, self.last_name).trim().to_string(),
            self.email.clone(),
            self.department.clone(),
            self.position.clone(),
            self.status.clone(),
        ]
    }

    fn stat_cards(stats: &EmployeeStats) -> Vec<StatCard> {
        vec![
            StatCard::new("Headcount", count(stats.total)),
            StatCard::new("Active", count(stats.active)),
            StatCard::new("On leave", count(stats.on_leave)),
            StatCard::new("Resigned", count(stats.resigned)),
        ]
    }
}

impl Editable for Employee {
    type Update = EmployeeUpdate;

    fn to_update(&self) -> EmployeeUpdate {
        EmployeeUpdate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            department: self.department.clone(),
            position: self.position.clone(),
        }
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::text("First name", |e| e.first_name.clone(), |e, v| e.first_name = v.to_string()),
            Field::text("Last name", |e| e.last_name.clone(), |e, v| e.last_name = v.to_string()),
            Field::text("Email", |e| e.email.clone(), |e, v| e.email = v.to_string()),
            Field::text("Department", |e| e.department.clone(), |e, v| e.department = v.to_string()),
            Field::text("Position", |e| e.position.clone(), |e, v| e.position = v.to_string()),
        ]
    }
}
