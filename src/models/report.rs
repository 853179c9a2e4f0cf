use serde::Serialize;

/// Single-day totals for one user (or, for executives, across all users)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub total_inventory_cost: f64,
    pub total_revenue: f64,
    pub total_units_sold: i64,
    pub total_profit: f64,
}

impl DailySummary {
    /// Build a summary from the two aggregate queries; profit is always
    /// revenue minus cost, zero-activity days stay at 0 rather than null
    pub fn new(total_inventory_cost: f64, total_revenue: f64, total_units_sold: i64) -> Self {
        Self {
            total_inventory_cost,
            total_revenue,
            total_units_sold,
            total_profit: total_revenue - total_inventory_cost,
        }
    }
}

/// One row of the executive breakdown. Users with no activity on the date
/// still appear with zeroed totals (left join against the user list).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserBreakdownRow {
    pub id: i64,
    pub username: String,
    pub total_units_purchased: i64,
    pub total_inventory_cost: f64,
    pub total_units_sold: i64,
    pub total_revenue: f64,
    pub profit: f64,
}

/// Grand totals summed over every per-user row returned
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GrandTotals {
    pub total_inventory_cost: f64,
    pub total_revenue: f64,
    pub total_profit: f64,
    pub total_units_sold: i64,
    pub total_units_purchased: i64,
}

/// Executive dashboard payload: per-user rows plus their grand totals
#[derive(Debug, Clone, Serialize)]
pub struct ExecutiveReport {
    pub grand_totals: GrandTotals,
    pub user_breakdown: Vec<UserBreakdownRow>,
}

impl ExecutiveReport {
    pub fn from_rows(user_breakdown: Vec<UserBreakdownRow>) -> Self {
        let mut grand_totals = GrandTotals::default();
        for row in &user_breakdown {
            grand_totals.total_inventory_cost += row.total_inventory_cost;
            grand_totals.total_revenue += row.total_revenue;
            grand_totals.total_profit += row.profit;
            grand_totals.total_units_sold += row.total_units_sold;
            grand_totals.total_units_purchased += row.total_units_purchased;
        }
        Self {
            grand_totals,
            user_breakdown,
        }
    }
}
