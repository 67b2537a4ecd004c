//! Contract bindings for the bridge's hub pool, spoke pools and the ERC20
//! tokens they route.
pub mod alloy;
