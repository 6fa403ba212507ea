pub mod mm_dl;
