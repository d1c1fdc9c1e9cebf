//! User record as served by the users endpoint.

use serde::Deserialize;
use serde::Serialize;

/// A single user entry.
///
/// Records are immutable once fetched. The `id` is unique and stable across
/// fetches, so views hold on to ids rather than references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Login handle.
    #[serde(default)]
    pub username: String,
    /// Email address.
    pub email: String,
    /// Postal address.
    pub address: Address,
    /// Phone number, free-form.
    pub phone: String,
    /// Personal or company website.
    pub website: String,
    /// Employer.
    pub company: Company,
}

/// Postal address of a [`User`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    #[serde(default)]
    pub geo: Geo,
}

impl Address {
    /// Formats the address on a single line: `street, suite, city, zipcode`.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {}, {}",
            self.street, self.suite, self.city, self.zipcode
        )
    }
}

/// Coordinates, kept as the strings the endpoint serves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geo {
    #[serde(default)]
    pub lat: String,
    #[serde(default)]
    pub lng: String,
}

/// Employer of a [`User`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    #[serde(default)]
    pub catch_phrase: String,
    #[serde(default)]
    pub bs: String,
}
