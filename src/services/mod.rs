pub mod echo_proxy;
pub mod frs_proxy;
