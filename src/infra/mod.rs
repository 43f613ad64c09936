pub mod audit;
pub mod boot;
pub mod config;
pub mod http_app;
pub mod lifecycle;
pub mod logging;
pub mod metrics;
pub mod http {
    pub mod headers;
}
pub mod runtime {
    pub mod limits;
}
