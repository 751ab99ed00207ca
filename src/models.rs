pub mod activity_types;
pub mod users;

pub use activity_types::ActivityType;
pub use users::User;
