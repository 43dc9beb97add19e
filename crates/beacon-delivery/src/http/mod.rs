mod client;

pub use client::HttpDelivery;
