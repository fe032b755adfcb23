mod aes_cbc_roundtrip;
mod rsa_roundtrip;
