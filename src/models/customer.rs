use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::customer::{Customer as DomainCustomer, NewCustomer as DomainNewCustomer};
use crate::domain::types::{CustomerId, CustomerName, PhoneNumber, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::customers)]
/// Diesel model for [`crate::domain::customer::Customer`].
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub birthday: NaiveDate,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::customers)]
/// Insertable form of [`Customer`].
pub struct NewCustomer<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub birthday: NaiveDate,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::customers)]
/// Data used when saving an existing [`Customer`] record.
pub struct UpdateCustomer<'a> {
    pub name: &'a str,
    pub phone: &'a str,
    pub birthday: NaiveDate,
}

impl TryFrom<Customer> for DomainCustomer {
    type Error = TypeConstraintError;

    fn try_from(customer: Customer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CustomerId::new(customer.id)?,
            name: CustomerName::new(customer.name)?,
            phone: PhoneNumber::new(customer.phone)?,
            birthday: customer.birthday,
        })
    }
}

impl<'a> From<&'a DomainNewCustomer> for NewCustomer<'a> {
    fn from(customer: &'a DomainNewCustomer) -> Self {
        Self {
            name: customer.name.as_str(),
            phone: customer.phone.as_str(),
            birthday: customer.birthday,
        }
    }
}

impl<'a> From<&'a DomainCustomer> for UpdateCustomer<'a> {
    fn from(customer: &'a DomainCustomer) -> Self {
        Self {
            name: customer.name.as_str(),
            phone: customer.phone.as_str(),
            birthday: customer.birthday,
        }
    }
}
