pub mod job;
pub mod labour;
pub mod materials;
pub mod quote;
