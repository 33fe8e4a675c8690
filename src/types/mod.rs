pub mod errors;
pub mod mode;
pub mod ownership;
pub mod report;
pub mod request;
pub mod safepath;

pub use errors::*;
pub use mode::*;
pub use ownership::*;
pub use report::*;
pub use request::*;
pub use safepath::*;
