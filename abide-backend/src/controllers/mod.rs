pub mod devotion;
pub mod feeling;
pub mod health;
pub mod history;
pub mod users;
pub mod verses;

/// Page size bounds shared by list endpoints
pub(crate) fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(1, 100)
}
