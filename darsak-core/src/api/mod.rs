/// Versioned route paths shared by the server and its clients
pub mod routes;
