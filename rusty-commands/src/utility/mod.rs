pub mod help;
pub mod paginate;
pub mod ping;
