//! Value objects mirroring the inventory database schema.
//!
//! Field names serialize to the database's PascalCase column names so rows
//! produced by a future SQL engine deserialize directly. Nothing in the
//! service queries these tables; they document the shape the canned SQL
//! templates run against.
//!
//! The database stores money as DECIMAL(18,2) and quantities as
//! DECIMAL(18,4). Both are carried as `f64` here, which cannot represent
//! every decimal value exactly; computed amounts are rounded back to the
//! money scale with [`round_money`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Status enums
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetStatus {
    #[default]
    Active,
    InRepair,
    Disposed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillStatus {
    #[default]
    Open,
    Paid,
    Void,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoStatus {
    #[default]
    Open,
    Approved,
    Closed,
    Cancelled,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoStatus {
    #[default]
    Open,
    Shipped,
    Closed,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxnType {
    Move,
    Adjust,
    Dispose,
    Create,
}

fn default_true() -> bool {
    true
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_quantity() -> u32 {
    1
}

// =============================================================================
// Master data
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Customer {
    pub customer_id: Option<i64>,
    pub customer_code: String,
    pub customer_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub billing_address1: Option<String>,
    pub billing_city: Option<String>,
    pub billing_country: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Vendor {
    pub vendor_id: Option<i64>,
    pub vendor_code: String,
    pub vendor_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address_line1: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Site {
    pub site_id: Option<i64>,
    pub site_code: String,
    pub site_name: String,
    pub address_line1: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub time_zone: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// A storage location within a site. Locations may nest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Location {
    pub location_id: Option<i64>,
    pub site_id: i64,
    pub location_code: String,
    pub location_name: String,
    pub parent_location_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    pub item_id: Option<i64>,
    pub item_code: String,
    pub item_name: String,
    pub category: Option<String>,
    pub unit_of_measure: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Asset {
    pub asset_id: Option<i64>,
    pub asset_tag: String,
    pub asset_name: String,
    pub site_id: i64,
    pub location_id: Option<i64>,
    pub serial_number: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub status: AssetStatus,
    pub cost: Option<f64>,
    pub purchase_date: Option<NaiveDate>,
    pub vendor_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Documents
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Bill {
    pub bill_id: Option<i64>,
    pub vendor_id: i64,
    pub bill_number: String,
    pub bill_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub total_amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub status: BillStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    #[serde(rename = "POId")]
    pub po_id: Option<i64>,
    #[serde(rename = "PONumber")]
    pub po_number: String,
    #[serde(rename = "VendorId")]
    pub vendor_id: i64,
    #[serde(rename = "PODate")]
    pub po_date: NaiveDate,
    #[serde(rename = "Status", default)]
    pub status: PoStatus,
    #[serde(rename = "SiteId")]
    pub site_id: Option<i64>,
    #[serde(rename = "CreatedAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "UpdatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    #[serde(rename = "POLineId")]
    pub po_line_id: Option<i64>,
    #[serde(rename = "POId")]
    pub po_id: i64,
    #[serde(rename = "LineNumber")]
    pub line_number: u32,
    #[serde(rename = "ItemId")]
    pub item_id: Option<i64>,
    #[serde(rename = "ItemCode")]
    pub item_code: String,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Quantity")]
    pub quantity: f64,
    #[serde(rename = "UnitPrice")]
    pub unit_price: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalesOrder {
    #[serde(rename = "SOId")]
    pub so_id: Option<i64>,
    #[serde(rename = "SONumber")]
    pub so_number: String,
    #[serde(rename = "CustomerId")]
    pub customer_id: i64,
    #[serde(rename = "SODate")]
    pub so_date: NaiveDate,
    #[serde(rename = "Status", default)]
    pub status: SoStatus,
    #[serde(rename = "SiteId")]
    pub site_id: Option<i64>,
    #[serde(rename = "CreatedAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "UpdatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalesOrderLine {
    #[serde(rename = "SOLineId")]
    pub so_line_id: Option<i64>,
    #[serde(rename = "SOId")]
    pub so_id: i64,
    #[serde(rename = "LineNumber")]
    pub line_number: u32,
    #[serde(rename = "ItemId")]
    pub item_id: Option<i64>,
    #[serde(rename = "ItemCode")]
    pub item_code: String,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Quantity")]
    pub quantity: f64,
    #[serde(rename = "UnitPrice")]
    pub unit_price: f64,
}

/// Decimal places of monetary columns.
pub const MONEY_SCALE: i32 = 2;

/// Round an amount to the money column scale, half away from zero.
pub fn round_money(amount: f64) -> f64 {
    let factor = 10f64.powi(MONEY_SCALE);
    (amount * factor).round() / factor
}

impl PurchaseOrderLine {
    /// Quantity times unit price, rounded to cents.
    pub fn line_total(&self) -> f64 {
        round_money(self.quantity * self.unit_price)
    }
}

impl SalesOrderLine {
    /// Quantity times unit price, rounded to cents.
    pub fn line_total(&self) -> f64 {
        round_money(self.quantity * self.unit_price)
    }
}

/// Movement or adjustment of a single asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssetTransaction {
    pub asset_txn_id: Option<i64>,
    pub asset_id: i64,
    pub from_location_id: Option<i64>,
    pub to_location_id: Option<i64>,
    pub txn_type: TxnType,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub txn_date: Option<DateTime<Utc>>,
    pub note: Option<String>,
}
