pub mod d400_afdeling_summary;
