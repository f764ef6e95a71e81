//! Customer workflows: lookups, name search and validated mutations.

use chrono::{Months, NaiveDate, Utc};

use crate::domain::customer::Customer;
use crate::domain::types::{CustomerId, PhoneNumber};
use crate::dto::customer::{CustomerGetDto, CustomerPageDto};
use crate::forms::customer::{CreateCustomerForm, CustomerPayload, UpdateCustomerForm};
use crate::pagination::Page;
use crate::repository::errors::RepositoryError;
use crate::repository::{CustomerReader, CustomerSearchQuery, CustomerWriter, Pagination};
use crate::services::{ServiceError, ServiceResult};

/// Minimum age, in full years, a customer must have reached.
pub const ADULT_AGE_YEARS: u32 = 18;

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Returns `true` when `birthday` is at least [`ADULT_AGE_YEARS`] before `today`.
///
/// The boundary day itself counts as adult. A 29 February boundary clamps to
/// 28 February.
pub fn is_adult(birthday: NaiveDate, today: NaiveDate) -> bool {
    match today.checked_sub_months(Months::new(ADULT_AGE_YEARS * 12)) {
        Some(cutoff) => birthday <= cutoff,
        None => false,
    }
}

fn ensure_adult(birthday: NaiveDate) -> ServiceResult<()> {
    if is_adult(birthday, today()) {
        Ok(())
    } else {
        Err(ServiceError::customer_under_age())
    }
}

/// Loads a customer or fails with the not-found error for `customer_id`.
fn find_customer<R>(repo: &R, customer_id: i32) -> ServiceResult<Customer>
where
    R: CustomerReader + ?Sized,
{
    // Non-positive ids are never assigned by the store.
    let Ok(id) = CustomerId::new(customer_id) else {
        return Err(ServiceError::customer_not_found(customer_id));
    };

    repo.get_customer_by_id(id)?
        .ok_or_else(|| ServiceError::customer_not_found(customer_id))
}

/// Maps a storage-level unique violation on `phone` to the duplicate error.
fn translate_write_error(err: RepositoryError, phone: &PhoneNumber) -> ServiceError {
    match err {
        RepositoryError::UniqueViolation(_) => ServiceError::phone_already_exists(phone),
        other => ServiceError::from(other),
    }
}

/// Fetches a single customer by its identifier.
pub fn get_customer_by_id<R>(repo: &R, customer_id: i32) -> ServiceResult<CustomerGetDto>
where
    R: CustomerReader + ?Sized,
{
    let customer = find_customer(repo, customer_id)?;
    Ok(customer.into())
}

/// Returns one zero-based page of customers whose name contains `name`.
pub fn get_customers_by_name<R>(
    repo: &R,
    name: &str,
    page: usize,
    size: usize,
) -> ServiceResult<CustomerPageDto>
where
    R: CustomerReader + ?Sized,
{
    if size == 0 {
        return Err(ServiceError::invalid_page_size());
    }

    let window = Pagination {
        page,
        per_page: size,
    };
    if window.bounds().is_none() {
        return Err(ServiceError::page_out_of_range(page, size));
    }

    let (total, customers) =
        repo.search_customers_by_name(CustomerSearchQuery::new(name).paginate(page, size))?;

    Ok(Page::new(customers, page, size, total).into())
}

/// Validates the payload and persists a new customer.
///
/// Phone uniqueness is checked before the age constraint.
pub fn create_customer<R>(repo: &R, form: CreateCustomerForm) -> ServiceResult<CustomerGetDto>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    let payload = CustomerPayload::try_from(form)?;

    if repo.customer_exists_by_phone(&payload.phone)? {
        return Err(ServiceError::phone_already_exists(&payload.phone));
    }

    ensure_adult(payload.birthday)?;

    let phone = payload.phone.clone();
    let customer = repo
        .create_customer(&payload.into_new_customer())
        .map_err(|err| translate_write_error(err, &phone))?;

    log::info!("Created customer {}", customer.id);

    Ok(customer.into())
}

/// Replaces the name, phone and birthday of an existing customer.
///
/// The uniqueness check only runs when the phone actually changes.
pub fn update_customer<R>(repo: &R, customer_id: i32, form: UpdateCustomerForm) -> ServiceResult<()>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    let mut customer = find_customer(repo, customer_id)?;

    let payload = CustomerPayload::try_from(form)?;

    if payload.phone != customer.phone && repo.customer_exists_by_phone(&payload.phone)? {
        return Err(ServiceError::phone_already_exists(&payload.phone));
    }

    ensure_adult(payload.birthday)?;

    customer.apply(payload.name, payload.phone, payload.birthday);

    repo.update_customer(&customer)
        .map_err(|err| translate_write_error(err, &customer.phone))?;

    log::info!("Updated customer {}", customer.id);

    Ok(())
}

/// Removes an existing customer.
pub fn delete_customer<R>(repo: &R, customer_id: i32) -> ServiceResult<()>
where
    R: CustomerReader + CustomerWriter + ?Sized,
{
    let customer = find_customer(repo, customer_id)?;

    repo.delete_customer(customer.id)?;

    log::info!("Deleted customer {}", customer.id);

    Ok(())
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::types::CustomerName;
    use crate::repository::mock::MockRepository;

    fn years_ago(years: u32) -> NaiveDate {
        today().checked_sub_months(Months::new(years * 12)).unwrap()
    }

    fn stored_customer(id: i32, name: &str, phone: &str, birthday: NaiveDate) -> Customer {
        Customer {
            id: CustomerId::new(id).unwrap(),
            name: CustomerName::new(name).unwrap(),
            phone: PhoneNumber::new(phone).unwrap(),
            birthday,
        }
    }

    fn create_form(name: &str, phone: &str, birthday: NaiveDate) -> CreateCustomerForm {
        CreateCustomerForm {
            name: name.to_string(),
            phone: phone.to_string(),
            birthday,
        }
    }

    fn update_form(name: &str, phone: &str, birthday: NaiveDate) -> UpdateCustomerForm {
        UpdateCustomerForm {
            name: name.to_string(),
            phone: phone.to_string(),
            birthday,
        }
    }

    fn assert_message(result: ServiceResult<impl std::fmt::Debug>, expected: &str) {
        let err = result.expect_err("operation should fail");
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn is_adult_accepts_exact_boundary() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        assert!(is_adult(NaiveDate::from_ymd_opt(2006, 6, 15).unwrap(), today));
        assert!(is_adult(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(), today));
        assert!(!is_adult(NaiveDate::from_ymd_opt(2006, 6, 16).unwrap(), today));
    }

    #[test]
    fn is_adult_clamps_leap_day_boundary() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();

        assert!(is_adult(NaiveDate::from_ymd_opt(2006, 2, 28).unwrap(), today));
        assert!(!is_adult(NaiveDate::from_ymd_opt(2006, 3, 1).unwrap(), today));
    }

    #[test]
    fn get_customers_by_name_on_empty_store_returns_empty_page() {
        let mut repo = MockRepository::new();
        repo.expect_search_customers_by_name()
            .withf(|query| {
                query.name == "customer"
                    && query.pagination
                        == Some(Pagination {
                            page: 0,
                            per_page: 10,
                        })
            })
            .times(1)
            .returning(|_| Ok((0, vec![])));

        let page = get_customers_by_name(&repo, "customer", 0, 10).unwrap();

        assert!(page.customers.is_empty());
        assert_eq!(page.page, 0);
        assert_eq!(page.size, 10);
        assert_eq!(page.total_elements, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.last);
    }

    #[test]
    fn get_customers_by_name_reports_store_totals() {
        let mut repo = MockRepository::new();
        repo.expect_search_customers_by_name().returning(|_| {
            Ok((
                5,
                vec![
                    stored_customer(3, "customer c", "3", years_ago(30)),
                    stored_customer(4, "customer d", "4", years_ago(30)),
                ],
            ))
        });

        let page = get_customers_by_name(&repo, "customer", 1, 2).unwrap();

        let ids: Vec<i32> = page.customers.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
        assert!(!page.last);
    }

    #[test]
    fn get_customers_by_name_rejects_zero_page_size() {
        let repo = MockRepository::new();

        assert_message(
            get_customers_by_name(&repo, "customer", 0, 0),
            "Page size must not be less than one",
        );
    }

    #[test]
    fn get_customers_by_name_rejects_window_beyond_sql_range() {
        let mut repo = MockRepository::new();
        repo.expect_search_customers_by_name().never();

        assert_message(
            get_customers_by_name(&repo, "Customer", 1 << 62, 2),
            "Page 4611686018427387904 of size 2 is out of range",
        );
        assert!(matches!(
            get_customers_by_name(&repo, "Customer", 0, 1 << 63),
            Err(ServiceError::BadRequest(_))
        ));
        assert!(matches!(
            get_customers_by_name(&repo, "Customer", 0, usize::MAX),
            Err(ServiceError::BadRequest(_))
        ));
    }

    #[test]
    fn get_customer_by_id_when_missing_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id()
            .with(eq(CustomerId::new(1).unwrap()))
            .returning(|_| Ok(None));

        let result = get_customer_by_id(&repo, 1);

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
        assert_message(result, "Customer 1 is not found");
    }

    #[test]
    fn get_customer_by_id_with_non_positive_id_skips_repository() {
        let repo = MockRepository::new();

        assert_message(get_customer_by_id(&repo, 0), "Customer 0 is not found");
        assert_message(get_customer_by_id(&repo, -3), "Customer -3 is not found");
    }

    #[test]
    fn get_customer_by_id_returns_view() {
        let birthday = years_ago(20);
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id()
            .returning(move |id| Ok(Some(stored_customer(id.get(), "A", "555", birthday))));

        let view = get_customer_by_id(&repo, 7).unwrap();

        assert_eq!(
            view,
            CustomerGetDto {
                id: 7,
                name: "A".to_string(),
                phone: "555".to_string(),
                birthday,
            }
        );
    }

    #[test]
    fn create_customer_with_existing_phone_is_duplicated() {
        let mut repo = MockRepository::new();
        repo.expect_customer_exists_by_phone()
            .withf(|phone| phone.as_str() == "123456789")
            .returning(|_| Ok(true));
        repo.expect_create_customer().never();

        let result = create_customer(&repo, create_form("customer", "123456789", years_ago(30)));

        assert!(matches!(result, Err(ServiceError::Duplicated(_))));
        assert_message(result, "Phone number 123456789 already exists");
    }

    #[test]
    fn create_customer_checks_phone_before_age() {
        let mut repo = MockRepository::new();
        repo.expect_customer_exists_by_phone()
            .returning(|_| Ok(true));

        let result = create_customer(&repo, create_form("customer", "123456789", years_ago(17)));

        assert!(matches!(result, Err(ServiceError::Duplicated(_))));
    }

    #[test]
    fn create_customer_under_age_is_bad_request() {
        let mut repo = MockRepository::new();
        repo.expect_customer_exists_by_phone()
            .returning(|_| Ok(false));
        repo.expect_create_customer().never();

        let result = create_customer(&repo, create_form("customer", "123456789", years_ago(17)));

        assert!(matches!(result, Err(ServiceError::BadRequest(_))));
        assert_message(result, "Customer must be at least 18 years old");
    }

    #[test]
    fn create_customer_on_age_boundary_succeeds() {
        let birthday = years_ago(18);
        let mut repo = MockRepository::new();
        repo.expect_customer_exists_by_phone()
            .returning(|_| Ok(false));
        repo.expect_create_customer()
            .times(1)
            .returning(|new_customer| {
                Ok(Customer {
                    id: CustomerId::new(1).unwrap(),
                    name: new_customer.name.clone(),
                    phone: new_customer.phone.clone(),
                    birthday: new_customer.birthday,
                })
            });

        let view = create_customer(&repo, create_form("customer", "123456789", birthday)).unwrap();

        assert_eq!(view.id, 1);
        assert_eq!(view.name, "customer");
        assert_eq!(view.phone, "123456789");
        assert_eq!(view.birthday, birthday);
    }

    #[test]
    fn create_customer_rejects_blank_name_before_touching_store() {
        let repo = MockRepository::new();

        let result = create_customer(&repo, create_form("  ", "123", years_ago(30)));

        assert!(matches!(result, Err(ServiceError::BadRequest(_))));
    }

    #[test]
    fn create_customer_maps_unique_violation_to_duplicated() {
        let mut repo = MockRepository::new();
        repo.expect_customer_exists_by_phone()
            .returning(|_| Ok(false));
        repo.expect_create_customer().returning(|_| {
            Err(RepositoryError::UniqueViolation(
                "UNIQUE constraint failed: customers.phone".to_string(),
            ))
        });

        let result = create_customer(&repo, create_form("customer", "123456789", years_ago(30)));

        assert_message(result, "Phone number 123456789 already exists");
    }

    #[test]
    fn update_customer_maps_unique_violation_to_duplicated() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id()
            .returning(|_| Ok(Some(stored_customer(1, "customer", "111", years_ago(30)))));
        repo.expect_customer_exists_by_phone()
            .returning(|_| Ok(false));
        repo.expect_update_customer().times(1).returning(|_| {
            Err(RepositoryError::UniqueViolation(
                "UNIQUE constraint failed: customers.phone".to_string(),
            ))
        });

        let result = update_customer(&repo, 1, update_form("customer", "222", years_ago(30)));

        assert!(matches!(result, Err(ServiceError::Duplicated(_))));
        assert_message(result, "Phone number 222 already exists");
    }

    #[test]
    fn update_customer_when_missing_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id().returning(|_| Ok(None));
        repo.expect_customer_exists_by_phone().never();

        let result = update_customer(&repo, 1, update_form("customer", "1", years_ago(30)));

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
        assert_message(result, "Customer 1 is not found");
    }

    #[test]
    fn update_customer_not_found_precedes_field_validation() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id().returning(|_| Ok(None));

        let result = update_customer(&repo, 1, update_form("", "", years_ago(1)));

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[test]
    fn update_customer_with_taken_phone_is_duplicated() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id()
            .returning(|_| Ok(Some(stored_customer(1, "customer", "123456789", years_ago(30)))));
        repo.expect_customer_exists_by_phone()
            .withf(|phone| phone.as_str() == "987654321")
            .times(1)
            .returning(|_| Ok(true));
        repo.expect_update_customer().never();

        let result = update_customer(&repo, 1, update_form("customer", "987654321", years_ago(30)));

        assert_message(result, "Phone number 987654321 already exists");
    }

    #[test]
    fn update_customer_with_unchanged_phone_skips_uniqueness_check() {
        let birthday = years_ago(40);
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id()
            .with(eq(CustomerId::new(1).unwrap()))
            .returning(move |_| Ok(Some(stored_customer(1, "old", "123456789", birthday))));
        repo.expect_customer_exists_by_phone().never();
        repo.expect_update_customer()
            .withf(move |customer| {
                customer.id.get() == 1
                    && customer.name.as_str() == "new"
                    && customer.phone.as_str() == "123456789"
                    && customer.birthday == birthday
            })
            .times(1)
            .returning(|customer| Ok(customer.clone()));

        update_customer(&repo, 1, update_form("new", "123456789", birthday)).unwrap();
    }

    #[test]
    fn update_customer_under_age_is_bad_request() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id()
            .returning(|_| Ok(Some(stored_customer(1, "customer", "123456789", years_ago(30)))));
        repo.expect_update_customer().never();

        let result = update_customer(&repo, 1, update_form("customer", "123456789", years_ago(17)));

        assert!(matches!(result, Err(ServiceError::BadRequest(_))));
        assert_message(result, "Customer must be at least 18 years old");
    }

    #[test]
    fn update_customer_saves_all_fields() {
        let birthday = years_ago(18);
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id()
            .returning(|_| Ok(Some(stored_customer(1, "old", "111", years_ago(50)))));
        repo.expect_customer_exists_by_phone()
            .withf(|phone| phone.as_str() == "222")
            .returning(|_| Ok(false));
        repo.expect_update_customer()
            .withf(move |customer| {
                customer.name.as_str() == "customer"
                    && customer.phone.as_str() == "222"
                    && customer.birthday == birthday
            })
            .times(1)
            .returning(|customer| Ok(customer.clone()));

        update_customer(&repo, 1, update_form("customer", "222", birthday)).unwrap();
    }

    #[test]
    fn delete_customer_when_missing_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id().returning(|_| Ok(None));
        repo.expect_delete_customer().never();

        assert_message(delete_customer(&repo, 1), "Customer 1 is not found");
    }

    #[test]
    fn delete_customer_removes_existing_record() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id()
            .returning(|id| Ok(Some(stored_customer(id.get(), "customer", "1", years_ago(30)))));
        repo.expect_delete_customer()
            .with(eq(CustomerId::new(1).unwrap()))
            .times(1)
            .returning(|_| Ok(()));

        delete_customer(&repo, 1).unwrap();
    }

    #[test]
    fn repository_failures_are_propagated() {
        let mut repo = MockRepository::new();
        repo.expect_get_customer_by_id()
            .returning(|_| Err(RepositoryError::ConnectionError("pool exhausted".to_string())));

        let result = get_customer_by_id(&repo, 1);

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }
}
