//! Builds prior vectors and diagonal covariance matrices for PMNS neutrino
//! oscillation parameters and writes them to a Parquet container with one
//! named entry per artifact.

pub mod data;
