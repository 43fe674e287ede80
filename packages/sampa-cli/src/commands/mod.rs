pub mod batch;
pub mod filter;
pub mod info;
pub mod inspect;
pub mod validate;
