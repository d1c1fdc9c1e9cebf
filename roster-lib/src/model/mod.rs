//! Data model types.

mod user;

pub use user::Address;
pub use user::Company;
pub use user::Geo;
pub use user::User;
