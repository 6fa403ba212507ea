pub mod llc_header;
