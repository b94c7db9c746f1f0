pub mod p900_monitoring;
pub mod p901_visualisasi;
pub mod p902_perbandingan;
