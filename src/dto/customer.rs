//! Response views for customer endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::customer::Customer;
use crate::pagination::Page;

/// Customer as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct CustomerGetDto {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "123456789")]
    pub phone: String,
    pub birthday: NaiveDate,
}

impl From<Customer> for CustomerGetDto {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.get(),
            name: customer.name.into_inner(),
            phone: customer.phone.into_inner(),
            birthday: customer.birthday,
        }
    }
}

/// One page of customers matching a name search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPageDto {
    pub customers: Vec<CustomerGetDto>,
    /// Zero-based page index.
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
    /// Whether this is the last page of the result set.
    pub last: bool,
}

impl From<Page<Customer>> for CustomerPageDto {
    fn from(page: Page<Customer>) -> Self {
        let page = page.map(CustomerGetDto::from);
        Self {
            customers: page.items,
            page: page.page,
            size: page.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
            last: page.last,
        }
    }
}
