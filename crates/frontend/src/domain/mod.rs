pub mod a001_mandor;
pub mod a002_penyadap;
pub mod a003_baku;
pub mod a004_peta;
pub mod a005_master;
