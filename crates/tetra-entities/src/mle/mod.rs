pub mod mle_dl;
