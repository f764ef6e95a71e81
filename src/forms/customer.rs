use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::customer::NewCustomer;
use crate::domain::types::{CustomerName, PhoneNumber};
use crate::forms::FormError;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
/// Body of `POST /api/customers`.
pub struct CreateCustomerForm {
    #[validate(length(min = 1))]
    #[schema(example = "John Doe")]
    pub name: String,
    #[validate(length(min = 1))]
    #[schema(example = "123456789")]
    pub phone: String,
    /// ISO-8601 calendar date.
    pub birthday: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
/// Body of `PUT /api/customers/{id}`.
pub struct UpdateCustomerForm {
    #[validate(length(min = 1))]
    #[schema(example = "John Doe")]
    pub name: String,
    #[validate(length(min = 1))]
    #[schema(example = "123456789")]
    pub phone: String,
    /// ISO-8601 calendar date.
    pub birthday: NaiveDate,
}

/// Validated customer fields shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerPayload {
    pub name: CustomerName,
    pub phone: PhoneNumber,
    pub birthday: NaiveDate,
}

impl CustomerPayload {
    fn parse(name: String, phone: String, birthday: NaiveDate) -> Result<Self, FormError> {
        Ok(Self {
            name: CustomerName::new(name).map_err(|_| FormError::InvalidName)?,
            phone: PhoneNumber::new(phone).map_err(|_| FormError::InvalidPhoneNumber)?,
            birthday,
        })
    }

    pub fn into_new_customer(self) -> NewCustomer {
        NewCustomer::new(self.name, self.phone, self.birthday)
    }
}

impl TryFrom<CreateCustomerForm> for CustomerPayload {
    type Error = FormError;

    fn try_from(form: CreateCustomerForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Self::parse(form.name, form.phone, form.birthday)
    }
}

impl TryFrom<UpdateCustomerForm> for CustomerPayload {
    type Error = FormError;

    fn try_from(form: UpdateCustomerForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Self::parse(form.name, form.phone, form.birthday)
    }
}
