pub mod persist;
pub mod subscription_store;

pub use subscription_store::SubscriptionStore;
