pub mod mle_pdu_type_dl;
pub mod mle_protocol_discriminator;
