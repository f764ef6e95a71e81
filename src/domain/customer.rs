use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CustomerId, CustomerName, PhoneNumber};

/// Persisted customer record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: CustomerName,
    pub phone: PhoneNumber,
    pub birthday: NaiveDate,
}

/// Customer data prior to insertion; the store assigns the id.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: CustomerName,
    pub phone: PhoneNumber,
    pub birthday: NaiveDate,
}

impl NewCustomer {
    #[must_use]
    pub fn new(name: CustomerName, phone: PhoneNumber, birthday: NaiveDate) -> Self {
        Self {
            name,
            phone,
            birthday,
        }
    }
}

impl Customer {
    /// Replaces every mutable field, keeping the identifier.
    pub fn apply(&mut self, name: CustomerName, phone: PhoneNumber, birthday: NaiveDate) {
        self.name = name;
        self.phone = phone;
        self.birthday = birthday;
    }
}
