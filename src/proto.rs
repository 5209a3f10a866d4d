//! Generated gRPC types, see `proto/rates.proto`.

pub mod rates {
    pub mod v1 {
        tonic::include_proto!("rates.v1");
    }
}

pub use rates::v1::*;
