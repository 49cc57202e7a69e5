//! Business logic layer. One service per aggregate, each holding a shared
//! connection pool; handlers stay thin and call into these.

pub mod catalog;
pub mod customers;
pub mod feedback;
pub mod orders;

use crate::db::DbPool;
use std::sync::Arc;

pub use catalog::CatalogService;
pub use customers::CustomerService;
pub use feedback::FeedbackService;
pub use orders::OrderService;

/// Container wiring every service to the shared pool.
#[derive(Clone)]
pub struct AppServices {
    pub customers: Arc<CustomerService>,
    pub catalog: Arc<CatalogService>,
    pub orders: Arc<OrderService>,
    pub feedback: Arc<FeedbackService>,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            customers: Arc::new(CustomerService::new(db.clone())),
            catalog: Arc::new(CatalogService::new(db.clone())),
            orders: Arc::new(OrderService::new(db.clone())),
            feedback: Arc::new(FeedbackService::new(db)),
        }
    }
}
