use crate::domain::customer::Customer;
use crate::forms::customers::AddCustomerForm;
use crate::repository::CustomerWriter;
use crate::services::{ServiceError, ServiceResult};

/// Create a `regular` customer. Members are only created by registration.
pub fn create_customer<R>(repo: &R, form: AddCustomerForm) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    let new_customer = form.into_new_customer()?;

    let customer = repo
        .create_customer(&new_customer)
        .map_err(ServiceError::from)?;

    log::info!("Created customer {} ({})", customer.id, customer.name);

    Ok(customer)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::domain::customer::CustomerType;
    use crate::repository::mock::MockRepository;

    #[test]
    fn created_customers_are_regular() {
        let mut repo = MockRepository::new();
        repo.expect_create_customer()
            .times(1)
            .withf(|new_customer| new_customer.name == "Bob")
            .returning(|new_customer| {
                Ok(Customer {
                    id: 5,
                    name: new_customer.name.clone(),
                    phone: new_customer.phone.clone(),
                    email: new_customer.email.clone(),
                    address: new_customer.address.clone(),
                    customer_type: CustomerType::Regular,
                    created_at: NaiveDateTime::default(),
                })
            });

        let form = AddCustomerForm {
            name: "Bob".to_string(),
            ..AddCustomerForm::default()
        };

        match create_customer(&repo, form) {
            Ok(customer) => assert!(!customer.is_member()),
            Err(err) => panic!("creation should succeed: {err}"),
        }
    }

    #[test]
    fn blank_name_is_a_validation_error() {
        let mut repo = MockRepository::new();
        repo.expect_create_customer().never();

        let form = AddCustomerForm {
            name: "   ".to_string(),
            ..AddCustomerForm::default()
        };

        assert!(matches!(
            create_customer(&repo, form),
            Err(ServiceError::Validation(_))
        ));
    }
}
