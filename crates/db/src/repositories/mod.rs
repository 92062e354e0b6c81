//! Repositories, one per table family.
//!
//! Repositories are stateless structs with associated async functions.
//! Functions taking `&PgPool` are self-contained; functions taking
//! `&mut PgConnection` compose into a caller-managed transaction.

mod analytics_repo;
mod card_repo;
mod category_repo;
mod session_repo;
mod slug_repo;
mod user_repo;
mod version_repo;
mod wallet_repo;
mod zone_repo;

pub use analytics_repo::AnalyticsRepo;
pub use card_repo::CardRepo;
pub use category_repo::CategoryRepo;
pub use session_repo::SessionRepo;
pub use slug_repo::SlugRepo;
pub use user_repo::UserRepo;
pub use version_repo::VersionRepo;
pub use wallet_repo::WalletRepo;
pub use zone_repo::ZoneRepo;
