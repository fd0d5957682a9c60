pub mod frequency;
pub mod proximity;
pub mod ranking;
pub mod recommendations;
pub mod sources;

pub use frequency::aggregate;
pub use proximity::find_nearby;
pub use ranking::recommend;
