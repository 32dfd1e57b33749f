pub mod historical;
pub mod indices;
pub mod info;
pub mod market;
pub mod top;
