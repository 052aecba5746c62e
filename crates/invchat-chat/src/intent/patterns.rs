//! Regex-based intent pattern table and matcher.
//!
//! Table order is significant: entries are tried in declaration order and,
//! within an entry, regexes are tried in declaration order. The first regex
//! that finds a match anywhere in the normalized message decides the intent.

use regex::Regex;
use serde::Serialize;

/// One canned inventory query and the phrasings that select it.
#[derive(Debug, Clone)]
pub struct QueryPattern {
    pub intent: &'static str,
    pub sql: &'static str,
    pub answer_template: &'static str,
    patterns: Vec<Regex>,
}

impl QueryPattern {
    /// Source strings of this entry's regexes, in match order.
    pub fn pattern_sources(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Regex::as_str)
    }

    fn is_match(&self, normalized: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(normalized))
    }
}

/// Serializable view of a table entry for the intent catalogue.
#[derive(Debug, Clone, Serialize)]
pub struct QueryPatternInfo {
    pub intent: String,
    pub sql: String,
    pub answer_template: String,
    pub patterns: Vec<String>,
}

impl From<&QueryPattern> for QueryPatternInfo {
    fn from(p: &QueryPattern) -> Self {
        Self {
            intent: p.intent.to_string(),
            sql: p.sql.to_string(),
            answer_template: p.answer_template.to_string(),
            patterns: p.pattern_sources().map(str::to_string).collect(),
        }
    }
}

struct PatternDef {
    patterns: &'static [&'static str],
    sql: &'static str,
    answer_template: &'static str,
    intent: &'static str,
}

// Earlier entries shadow later ones: "how many assets by site" resolves to
// asset_count_total because that entry is declared first.
const PATTERN_TABLE: &[PatternDef] = &[
    PatternDef {
        patterns: &[
            r"how many assets",
            r"total assets",
            r"count.*assets",
            r"number of assets",
        ],
        sql: "SELECT COUNT(*) AS AssetCount FROM Assets WHERE Status <> 'Disposed';",
        answer_template: "You have {AssetCount} assets in your inventory.",
        intent: "asset_count_total",
    },
    PatternDef {
        patterns: &[
            r"how many assets.*by site",
            r"assets.*per site",
            r"asset count.*site",
            r"breakdown.*site",
            r"show.*assets.*by site",
            r"show.*assets.*site",
            r"list.*assets.*by site",
            r"assets.*by site",
        ],
        sql: "SELECT s.SiteName, COUNT(*) AS AssetCount
FROM Assets a
JOIN Sites s ON s.SiteId = a.SiteId
WHERE a.Status <> 'Disposed'
GROUP BY s.SiteName
ORDER BY AssetCount DESC;",
        answer_template: "Here's the asset count by site: {results}",
        intent: "asset_count_by_site",
    },
    PatternDef {
        patterns: &[
            r"total value.*assets.*site",
            r"asset value.*site",
            r"value.*assets.*per site",
        ],
        sql: "SELECT s.SiteName, SUM(ISNULL(a.Cost, 0)) AS TotalValue
FROM Assets a
JOIN Sites s ON s.SiteId = a.SiteId
WHERE a.Status <> 'Disposed'
GROUP BY s.SiteName
ORDER BY TotalValue DESC;",
        answer_template: "Here's the total asset value by site: {results}",
        intent: "asset_value_by_site",
    },
    PatternDef {
        patterns: &[
            r"assets purchased.*this year",
            r"assets.*bought.*year",
            r"how many.*purchased.*current year",
        ],
        sql: "SELECT COUNT(*) AS AssetCount
FROM Assets
WHERE YEAR(PurchaseDate) = YEAR(GETDATE())
AND Status <> 'Disposed';",
        answer_template: "You purchased {AssetCount} assets this year.",
        intent: "assets_purchased_this_year",
    },
    PatternDef {
        patterns: &[
            r"which vendor.*most assets",
            r"vendor.*supplied.*most",
            r"top vendor.*assets",
        ],
        sql: "SELECT TOP 1 v.VendorName, COUNT(*) AS AssetCount
FROM Assets a
JOIN Vendors v ON v.VendorId = a.VendorId
WHERE a.Status <> 'Disposed'
GROUP BY v.VendorName
ORDER BY AssetCount DESC;",
        answer_template:
            "The vendor that supplied the most assets is {VendorName} with {AssetCount} assets.",
        intent: "top_vendor_by_assets",
    },
    PatternDef {
        patterns: &[
            r"total billed.*last quarter",
            r"bills.*last quarter",
            r"amount billed.*quarter",
        ],
        sql: "SELECT SUM(TotalAmount) AS TotalBilled
FROM Bills
WHERE BillDate >= DATEADD(QUARTER, DATEDIFF(QUARTER, 0, GETDATE()) - 1, 0)
AND BillDate < DATEADD(QUARTER, DATEDIFF(QUARTER, 0, GETDATE()), 0);",
        answer_template: "The total billed amount for the last quarter is ${TotalBilled:,.2f}.",
        intent: "total_billed_last_quarter",
    },
    PatternDef {
        patterns: &[
            r"how many.*open.*purchase orders",
            r"pending.*purchase orders",
            r"open.*po",
        ],
        sql: "SELECT COUNT(*) AS OpenPOCount
FROM PurchaseOrders
WHERE Status = 'Open';",
        answer_template: "There are {OpenPOCount} open purchase orders currently pending.",
        intent: "open_purchase_orders",
    },
    PatternDef {
        patterns: &[
            r"assets.*by category",
            r"breakdown.*category",
            r"assets.*per category",
            r"show.*assets.*category",
            r"list.*assets.*category",
        ],
        sql: "SELECT Category, COUNT(*) AS AssetCount
FROM Assets
WHERE Status <> 'Disposed'
GROUP BY Category
ORDER BY AssetCount DESC;",
        answer_template: "Here's the breakdown of assets by category: {results}",
        intent: "assets_by_category",
    },
    PatternDef {
        patterns: &[
            r"sales orders.*customer.*last month",
            r"how many.*sales orders.*month",
            r"so.*created.*customer",
        ],
        sql: "SELECT c.CustomerName, COUNT(*) AS SOCount
FROM SalesOrders so
JOIN Customers c ON c.CustomerId = so.CustomerId
WHERE so.SODate >= DATEADD(MONTH, -1, GETDATE())
GROUP BY c.CustomerName
ORDER BY SOCount DESC;",
        answer_template: "Here are the sales orders created for customers last month: {results}",
        intent: "sales_orders_by_customer_last_month",
    },
    PatternDef {
        patterns: &[r"list.*vendors", r"show.*vendors", r"all vendors"],
        sql: "SELECT VendorCode, VendorName, Email, Phone
FROM Vendors
WHERE IsActive = 1
ORDER BY VendorName;",
        answer_template: "Here are all active vendors: {results}",
        intent: "list_vendors",
    },
    PatternDef {
        patterns: &[r"list.*customers", r"show.*customers", r"all customers"],
        sql: "SELECT CustomerCode, CustomerName, Email, Phone
FROM Customers
WHERE IsActive = 1
ORDER BY CustomerName;",
        answer_template: "Here are all active customers: {results}",
        intent: "list_customers",
    },
    PatternDef {
        patterns: &[r"list.*sites", r"show.*sites", r"all sites"],
        sql: "SELECT SiteCode, SiteName, City, Country
FROM Sites
WHERE IsActive = 1
ORDER BY SiteName;",
        answer_template: "Here are all active sites: {results}",
        intent: "list_sites",
    },
];

/// Ordered, compiled intent table. Built once and shared read-only.
#[derive(Debug, Clone)]
pub struct IntentMatcher {
    patterns: Vec<QueryPattern>,
}

impl Default for IntentMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentMatcher {
    /// Compile the built-in inventory pattern table.
    pub fn new() -> Self {
        let patterns = PATTERN_TABLE
            .iter()
            .map(|def| QueryPattern {
                intent: def.intent,
                sql: def.sql,
                answer_template: def.answer_template,
                patterns: def
                    .patterns
                    .iter()
                    .map(|p| Regex::new(p).expect("Invalid intent regex"))
                    .collect(),
            })
            .collect();

        Self { patterns }
    }

    /// Return the first table entry matching `message`, if any.
    ///
    /// The message is trimmed and lowercased before matching. Regexes are
    /// searched, not anchored, so a phrase anywhere in the message counts.
    pub fn match_intent(&self, message: &str) -> Option<&QueryPattern> {
        let normalized = message.trim().to_lowercase();
        self.patterns.iter().find(|p| p.is_match(&normalized))
    }

    /// All entries in match order.
    pub fn patterns(&self) -> &[QueryPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
