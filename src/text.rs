pub mod raster;
pub mod sampler;
