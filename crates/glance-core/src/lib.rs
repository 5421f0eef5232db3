pub mod compositor;
pub mod config;
pub mod consts;
pub mod error;
pub mod histogram;
pub mod io;
pub mod probe;
pub mod raster;
pub mod session;
pub mod viewport;
pub mod window;
