//! Shared test data.

use crate::model::Address;
use crate::model::Company;
use crate::model::User;

/// Builds a user with the given id, name and email and placeholder details.
pub(crate) fn user(id: u64, name: &str, email: &str) -> User {
    User {
        id,
        name: name.to_string(),
        username: name.to_lowercase(),
        email: email.to_string(),
        address: Address {
            street: format!("{} Street", id),
            suite: "Apt. 1".to_string(),
            city: "Gwenborough".to_string(),
            zipcode: "92998-3874".to_string(),
            ..Default::default()
        },
        phone: "1-770-736-8031".to_string(),
        website: "example.org".to_string(),
        company: Company {
            name: format!("Company {}", id),
            ..Default::default()
        },
    }
}

/// Builds users named after `names`, with ids from 1 and `u<id>@test.io` emails.
pub(crate) fn named(names: &[&str]) -> Vec<User> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let id = i as u64 + 1;
            user(id, name, &format!("u{}@test.io", id))
        })
        .collect()
}
