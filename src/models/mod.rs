pub mod inventory;
pub mod product;
pub mod rate_limit;
pub mod report;
pub mod sale;
pub mod user;

pub use inventory::{InventoryRow, PurchaseEntry};
pub use product::{NewProduct, ProductPatch, TeaProduct};
pub use rate_limit::RateLimiter;
pub use report::{DailySummary, ExecutiveReport, GrandTotals, UserBreakdownRow};
pub use sale::{NewSale, Sale};
pub use user::{CurrentUser, Role, User, UserCredentials};
