//! Indonesian administrative regions (wilayah) feature.
//!
//! Models for the four-level hierarchy and the client for the external
//! region directory that serves each level's children on demand.
//!
//! ## Data Hierarchy
//!
//! - Level 1: Provinces (Provinsi)
//! - Level 2: Regencies/Cities (Kabupaten/Kota)
//! - Level 3: Districts (Kecamatan)
//! - Level 4: Villages (Kelurahan/Desa)

pub mod clients;
pub mod models;
