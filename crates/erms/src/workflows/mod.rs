pub mod cases;
pub mod routing;
pub mod status;
