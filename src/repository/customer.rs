//! Repository implementation for customers.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::{
        customer::{Customer, NewCustomer},
        types::{CustomerId, PhoneNumber},
    },
    models::customer::{
        Customer as DbCustomer, NewCustomer as DbNewCustomer, UpdateCustomer as DbUpdateCustomer,
    },
    repository::{
        CustomerReader, CustomerSearchQuery, CustomerWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

/// Escapes `LIKE` wildcards so the search term is matched literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let db_customer = customers::table
            .find(id.get())
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        db_customer
            .map(Customer::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn customer_exists_by_phone(&self, phone: &PhoneNumber) -> RepositoryResult<bool> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let exists = diesel::select(diesel::dsl::exists(
            customers::table.filter(customers::phone.eq(phone.as_str())),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(exists)
    }

    fn search_customers_by_name(
        &self,
        query: CustomerSearchQuery,
    ) -> RepositoryResult<(usize, Vec<Customer>)> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let pattern = format!("%{}%", escape_like(&query.name));

        let query_builder = || {
            customers::table
                .filter(customers::name.like(pattern.clone()).escape('\\'))
                .into_boxed::<Sqlite>()
        };

        // Get the total count before applying pagination
        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order(customers::id.asc());

        if let Some(pagination) = &query.pagination {
            let (limit, offset) = pagination.bounds().ok_or_else(|| {
                RepositoryError::ValidationError(format!(
                    "page {} of size {} is out of range",
                    pagination.page, pagination.per_page
                ))
            })?;
            items = items.limit(limit).offset(offset);
        }

        let customers = items
            .load::<DbCustomer>(&mut conn)?
            .into_iter()
            .map(Customer::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(RepositoryError::from)?;

        Ok((total, customers))
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let insertable: DbNewCustomer = new_customer.into();

        let db_customer = diesel::insert_into(customers::table)
            .values(&insertable)
            .get_result::<DbCustomer>(&mut conn)?;

        Customer::try_from(db_customer).map_err(RepositoryError::from)
    }

    fn update_customer(&self, customer: &Customer) -> RepositoryResult<Customer> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let changes: DbUpdateCustomer = customer.into();

        let db_customer = diesel::update(customers::table.find(customer.id.get()))
            .set(&changes)
            .get_result::<DbCustomer>(&mut conn)?;

        Customer::try_from(db_customer).map_err(RepositoryError::from)
    }

    fn delete_customer(&self, id: CustomerId) -> RepositoryResult<()> {
        use crate::schema::customers;

        let mut conn = self.conn()?;
        let affected = diesel::delete(customers::table.find(id.get())).execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
