//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::customer::{Customer, NewCustomer};
use crate::domain::types::{CustomerId, PhoneNumber};
use crate::repository::errors::RepositoryResult;
use crate::repository::{CustomerReader, CustomerSearchQuery, CustomerWriter};

mock! {
    pub Repository {}

    impl CustomerReader for Repository {
        fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;
        fn customer_exists_by_phone(&self, phone: &PhoneNumber) -> RepositoryResult<bool>;
        fn search_customers_by_name(
            &self,
            query: CustomerSearchQuery,
        ) -> RepositoryResult<(usize, Vec<Customer>)>;
    }

    impl CustomerWriter for Repository {
        fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
        fn update_customer(&self, customer: &Customer) -> RepositoryResult<Customer>;
        fn delete_customer(&self, id: CustomerId) -> RepositoryResult<()>;
    }
}
