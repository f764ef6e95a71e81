use crate::{
    db::{DbConnection, DbPool},
    domain::{
        customer::{Customer, NewCustomer},
        types::{CustomerId, PhoneNumber},
    },
    repository::errors::RepositoryResult,
};

pub mod customer;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Diesel-backed repository shared by all request handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        self.pool.get().map_err(|e| {
            log::error!("Failed to check out a customers database connection: {e}");
            errors::RepositoryError::from(e)
        })
    }
}

/// Zero-based page window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// SQL `LIMIT` and `OFFSET` for this window.
    ///
    /// Returns `None` when either value does not fit into SQLite's signed
    /// 64-bit integers.
    pub fn bounds(&self) -> Option<(i64, i64)> {
        let limit = i64::try_from(self.per_page).ok()?;
        let offset = i64::try_from(self.page.checked_mul(self.per_page)?).ok()?;
        Some((limit, offset))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerSearchQuery {
    /// Substring matched against customer names.
    pub name: String,
    pub pagination: Option<Pagination>,
}

impl CustomerSearchQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pagination: None,
        }
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait CustomerReader {
    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;
    fn customer_exists_by_phone(&self, phone: &PhoneNumber) -> RepositoryResult<bool>;
    /// Returns the total number of matches together with the requested page.
    fn search_customers_by_name(
        &self,
        query: CustomerSearchQuery,
    ) -> RepositoryResult<(usize, Vec<Customer>)>;
}

pub trait CustomerWriter {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    /// Persists every mutable field of an already stored customer.
    fn update_customer(&self, customer: &Customer) -> RepositoryResult<Customer>;
    fn delete_customer(&self, id: CustomerId) -> RepositoryResult<()>;
}
