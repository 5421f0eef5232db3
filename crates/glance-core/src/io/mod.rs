pub mod decode;
pub mod navigation;
pub mod npy;
