pub mod paths;
pub mod prepare;
pub mod record;
pub mod validate;
