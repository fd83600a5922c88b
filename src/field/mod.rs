pub mod gradient;
pub mod particles;
pub mod waves;
