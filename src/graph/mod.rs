pub mod builder;
pub mod csr;
pub mod io_bin;
pub mod stats;
