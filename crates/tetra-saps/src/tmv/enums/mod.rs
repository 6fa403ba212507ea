pub mod logical_chans;
