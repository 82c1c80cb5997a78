pub mod pca;
pub mod scale;
pub mod stats;
