mod response_reader;
mod socket_client;

pub use socket_client::{
    GmpAddress, SocketGmpClient, SocketGmpConnector, DEFAULT_MAX_RESPONSE_SIZE,
};
