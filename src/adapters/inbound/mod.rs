/// Inbound adapters - GraphQL schema and the HTTP server exposing it
pub mod graphql;
pub mod http;
