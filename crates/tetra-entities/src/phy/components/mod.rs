pub mod train_consts;
