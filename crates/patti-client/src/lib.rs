pub mod net_client;
pub mod room_session;
pub mod transport;

#[cfg(feature = "native")]
pub mod ws_transport;

#[cfg(all(test, feature = "native"))]
mod testing;
