pub mod calendar;
pub mod handlers;
pub mod middleware;
pub mod movies;
pub mod proxy;
pub mod regions;
pub mod routes;
pub mod search;
pub mod settings;

pub use routes::create_router;
