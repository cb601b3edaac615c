pub mod gates;
pub mod integration;
pub mod security;
pub mod test;
