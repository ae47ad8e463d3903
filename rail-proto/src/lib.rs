//! Wire contract for the `train.TrainService` gRPC API.

pub mod convert;

include!(concat!(env!("OUT_DIR"), "/train.TrainService.rs"));

pub use train_service_client::TrainServiceClient;
pub use train_service_server::{TrainService, TrainServiceServer};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct User {
    #[prost(string, tag = "1")]
    pub first_name: String,
    #[prost(string, tag = "2")]
    pub last_name: String,
    #[prost(string, tag = "3")]
    pub email: String,
    /// Lookup key on requests; the occupied seat in section listings.
    #[prost(string, tag = "4")]
    pub seat: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TicketRequest {
    #[prost(string, tag = "1")]
    pub from: String,
    #[prost(string, tag = "2")]
    pub to: String,
    #[prost(message, optional, tag = "3")]
    pub user: Option<User>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Receipt {
    #[prost(string, tag = "1")]
    pub from: String,
    #[prost(string, tag = "2")]
    pub to: String,
    #[prost(message, optional, tag = "3")]
    pub user: Option<User>,
    #[prost(float, tag = "4")]
    pub price_paid: f32,
    #[prost(string, tag = "5")]
    pub seat: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SectionRequest {
    #[prost(string, tag = "1")]
    pub section: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SectionDetails {
    #[prost(message, repeated, tag = "1")]
    pub users: Vec<User>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModifySeatRequest {
    #[prost(message, optional, tag = "1")]
    pub user: Option<User>,
    #[prost(string, tag = "2")]
    pub new_seat: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RemoveUserResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
}
